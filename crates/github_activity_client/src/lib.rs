//! Read-only access to the three public activity feeds of a GitHub account:
//! the profile summary, one page of repositories and the daily contribution
//! calendar.
//!
//! Payloads are decoded leniently: a field with the wrong type is treated as
//! absent instead of failing the whole feed. Only a payload whose overall
//! shape is wrong is reported as an error.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

pub mod config;
pub mod fetch;
pub mod http_client;
pub mod observability;

pub use fetch::{FetchResult, fetch_activity};

/// Largest repository page the feeds are asked for.
pub const MAX_REPO_PAGE_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// The three independent feeds a fetch cycle reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    Profile,
    Repositories,
    Contributions,
}

impl Feed {
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Profile => "profile",
            Feed::Repositories => "repositories",
            Feed::Contributions => "contributions",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the feeds of a cycle did not complete. The whole cycle is void.
#[derive(Debug, Error)]
#[error("{feed} feed failed: {cause}")]
pub struct PartialFailure {
    pub feed: Feed,
    #[source]
    pub cause: ActivityError,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawProfile {
    #[serde(rename = "public_repos", default, deserialize_with = "lenient_count")]
    pub public_repo_count: Option<u64>,
    #[serde(rename = "followers", default, deserialize_with = "lenient_count")]
    pub follower_count: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawRepository {
    #[serde(
        rename = "stargazers_count",
        default,
        deserialize_with = "lenient_count"
    )]
    pub star_count: Option<u64>,
    #[serde(rename = "language", default, deserialize_with = "lenient_string")]
    pub primary_language: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawContributionDay {
    /// Calendar date as sent by the provider; may be empty or malformed.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawContributionCalendar {
    /// The provider's own rolling-year total (`total.lastYear`).
    pub rolling_total: Option<u64>,
    pub days: Vec<RawContributionDay>,
}

/// Payloads of one fully successful fetch cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawActivity {
    pub profile: RawProfile,
    pub repositories: Vec<RawRepository>,
    pub calendar: RawContributionCalendar,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(json_count))
}

/// A non-negative whole number, whether JSON encodes it as `3` or `3.0`.
pub(crate) fn json_count(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

#[async_trait]
pub trait ActivitySource: Send + Sync + 'static {
    async fn get_profile(&self, identity: &str) -> Result<RawProfile, ActivityError>;

    /// A single page of at most `per_page` repositories.
    async fn list_repositories(
        &self,
        identity: &str,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, ActivityError>;

    async fn get_contributions(
        &self,
        identity: &str,
    ) -> Result<RawContributionCalendar, ActivityError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_ignores_unrelated_fields() {
        let payload = json!({"login": "octo", "public_repos": 12, "followers": 7, "bio": null});
        let p: RawProfile = serde_json::from_value(payload).expect("profile");
        assert_eq!(p.public_repo_count, Some(12));
        assert_eq!(p.follower_count, Some(7));
    }

    #[test]
    fn non_numeric_counts_decode_as_absent() {
        let payload = json!({"public_repos": "twelve", "followers": -3});
        let p: RawProfile = serde_json::from_value(payload).expect("profile");
        assert_eq!(p, RawProfile::default());
    }

    #[test]
    fn whole_floats_count_but_fractions_do_not() {
        let day: RawContributionDay =
            serde_json::from_value(json!({"date": "2024-01-05", "count": 3.0})).expect("day");
        assert_eq!(day.count, Some(3));

        let day: RawContributionDay =
            serde_json::from_value(json!({"date": "2024-01-05", "count": 2.5})).expect("day");
        assert_eq!(day.count, None);

        let p: RawProfile =
            serde_json::from_value(json!({"followers": -4.0})).expect("profile");
        assert_eq!(p.follower_count, None);
    }

    #[test]
    fn repository_language_must_be_a_string() {
        let payload = json!([
            {"stargazers_count": 4, "language": "Rust"},
            {"stargazers_count": 1, "language": null},
            {"language": 42}
        ]);
        let repos: Vec<RawRepository> = serde_json::from_value(payload).expect("repos");
        assert_eq!(repos[0].primary_language.as_deref(), Some("Rust"));
        assert_eq!(repos[1].primary_language, None);
        assert_eq!(repos[2].primary_language, None);
        assert_eq!(repos[2].star_count, None);
    }

    #[test]
    fn contribution_day_with_bad_date_keeps_count() {
        let day: RawContributionDay =
            serde_json::from_value(json!({"date": 20240105, "count": 3})).expect("day");
        assert_eq!(day.date, "");
        assert_eq!(day.count, Some(3));
    }

    #[test]
    fn partial_failure_names_the_feed() {
        let err = PartialFailure {
            feed: Feed::Contributions,
            cause: ActivityError::Status {
                status: 502,
                body: "bad gateway".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "contributions feed failed: unexpected status 502: bad gateway"
        );
    }
}
