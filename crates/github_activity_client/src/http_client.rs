//! HTTP implementation of [`ActivitySource`](crate::ActivitySource) backed by
//! the public GitHub REST API and the github-contributions-api calendar.
//!
//! Every call is a single attempt; no retry or backoff is applied here.

use crate::config::Config;
use crate::{
    ActivityError, ActivitySource, RawContributionCalendar, RawContributionDay, RawProfile,
    RawRepository, json_count,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;

/// Client for the activity feeds using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestActivitySource {
    api_base_url: String,
    contributions_base_url: String,
    client: reqwest::Client,
}

impl ReqwestActivitySource {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `api_base_url` - Base URL of the GitHub REST API (e.g. "https://api.github.com")
    /// * `contributions_base_url` - Base URL of the contribution calendar service
    /// * `user_agent` - Sent on every request; GitHub refuses anonymous agents
    pub fn new(
        api_base_url: &str,
        contributions_base_url: &str,
        user_agent: &str,
    ) -> Result<Self, ActivityError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            contributions_base_url: contributions_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ActivityError> {
        Self::new(
            &config.api_base_url,
            &config.contributions_base_url,
            &config.user_agent,
        )
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).header(ACCEPT, "application/json")
    }

    /// Execute a request and decode the JSON body. A body that does not
    /// match `T` is a decode error rather than a transport error.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ActivityError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            ActivityError::Decode(format!("{e} - body: {body_snippet}"))
        })
    }

    async fn error_from_response(resp: reqwest::Response) -> ActivityError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        ActivityError::Status {
            status,
            body: body.chars().take(256).collect(),
        }
    }
}

#[derive(serde::Deserialize)]
struct CalendarPayload {
    #[serde(default)]
    total: Option<serde_json::Value>,
    #[serde(default)]
    contributions: Option<Vec<serde_json::Value>>,
}

impl CalendarPayload {
    fn into_calendar(self) -> RawContributionCalendar {
        let rolling_total = self
            .total
            .as_ref()
            .and_then(|t| t.get("lastYear"))
            .and_then(json_count);
        let days = self
            .contributions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<RawContributionDay>(v) {
                Ok(day) => Some(day),
                Err(e) => {
                    debug!(error = %e, "dropping malformed contribution record");
                    None
                }
            })
            .collect();
        RawContributionCalendar {
            rolling_total,
            days,
        }
    }
}

#[async_trait]
impl ActivitySource for ReqwestActivitySource {
    async fn get_profile(&self, identity: &str) -> Result<RawProfile, ActivityError> {
        let url = format!("{}/users/{}", self.api_base_url, identity);
        self.execute_json(self.get_request(&url)).await
    }

    async fn list_repositories(
        &self,
        identity: &str,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, ActivityError> {
        let url = format!("{}/users/{}/repos", self.api_base_url, identity);
        let per_page = per_page.to_string();
        self.execute_json(self.get_request(&url).query(&[("per_page", per_page.as_str())]))
            .await
    }

    async fn get_contributions(
        &self,
        identity: &str,
    ) -> Result<RawContributionCalendar, ActivityError> {
        let url = format!("{}/v4/{}", self.contributions_base_url, identity);
        let payload: CalendarPayload = self.execute_json(self.get_request(&url)).await?;
        Ok(payload.into_calendar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_new_trims_base_urls() {
        let client = ReqwestActivitySource::new("http://localhost/", "http://calendar//", "ua")
            .expect("client");
        assert_eq!(client.api_base_url, "http://localhost");
        assert_eq!(client.contributions_base_url, "http://calendar");
    }

    #[test]
    fn calendar_reads_last_year_total() {
        let payload: CalendarPayload = serde_json::from_value(json!({
            "total": {"2023": 400, "2024": 321, "lastYear": 512},
            "contributions": [{"date": "2024-01-05", "count": 3, "level": 1}]
        }))
        .expect("payload");
        let calendar = payload.into_calendar();
        assert_eq!(calendar.rolling_total, Some(512));
        assert_eq!(calendar.days.len(), 1);
        assert_eq!(calendar.days[0].count, Some(3));
    }

    #[test]
    fn calendar_accepts_float_encoded_numbers() {
        let payload: CalendarPayload = serde_json::from_value(json!({
            "total": {"lastYear": 512.0},
            "contributions": [{"date": "2024-01-05", "count": 3.0}]
        }))
        .expect("payload");
        let calendar = payload.into_calendar();
        assert_eq!(calendar.rolling_total, Some(512));
        assert_eq!(calendar.days[0].count, Some(3));
    }

    #[test]
    fn calendar_tolerates_missing_fields() {
        let payload: CalendarPayload = serde_json::from_value(json!({})).expect("payload");
        let calendar = payload.into_calendar();
        assert_eq!(calendar, RawContributionCalendar::default());

        let payload: CalendarPayload =
            serde_json::from_value(json!({"total": {"lastYear": "many"}, "contributions": null}))
                .expect("payload");
        let calendar = payload.into_calendar();
        assert_eq!(calendar.rolling_total, None);
        assert!(calendar.days.is_empty());
    }

    #[test]
    fn calendar_drops_non_object_records() {
        let payload: CalendarPayload = serde_json::from_value(json!({
            "contributions": [7, {"date": "2024-02-01", "count": 1}, "x"]
        }))
        .expect("payload");
        let calendar = payload.into_calendar();
        assert_eq!(calendar.days.len(), 1);
        assert_eq!(calendar.days[0].date, "2024-02-01");
    }
}
