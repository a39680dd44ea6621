use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub repositories: u64,
    pub total_stars: u64,
    pub followers: u64,
    /// Provider's rolling-year total, not the sum of the monthly series.
    pub total_contributions: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyContribution {
    /// One of `Jan`..`Dec`.
    pub month: &'static str,
    pub contributions: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub count: u64,
    pub color: &'static str,
}

/// Display-ready view of one fetch cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub counters: Counters,
    /// Calendar order, non-zero months only.
    pub monthly_series: Vec<MonthlyContribution>,
    /// First-seen order of each language across the repository page.
    pub language_distribution: Vec<LanguageShare>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Loading,
    Ready,
    Error,
}

/// What the presenter renders: the last good summary plus the state of the
/// most recent refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub status: Status,
    /// `None` until a cycle has succeeded.
    pub summary: Option<ActivitySummary>,
    pub error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            status: Status::Loading,
            summary: None,
            error: None,
            refreshed_at: None,
        }
    }
}
