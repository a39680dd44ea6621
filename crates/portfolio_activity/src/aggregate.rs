//! Folds the raw payloads of one fetch cycle into an [`ActivitySummary`].
//!
//! Everything here is pure and total: malformed days are skipped, absent
//! counts are zero, and any input produces a complete summary.

use chrono::{Datelike, NaiveDate};
use github_activity_client::{
    RawActivity, RawContributionCalendar, RawContributionDay, RawProfile, RawRepository,
};
use std::collections::HashMap;
use tracing::debug;

use crate::colors::language_color;
use crate::types::{ActivitySummary, Counters, LanguageShare, MonthlyContribution};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn aggregate(
    profile: &RawProfile,
    repositories: &[RawRepository],
    calendar: &RawContributionCalendar,
) -> ActivitySummary {
    let counters = Counters {
        repositories: repositories.len() as u64,
        total_stars: repositories
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.star_count.unwrap_or(0))),
        followers: profile.follower_count.unwrap_or(0),
        total_contributions: calendar.rolling_total.unwrap_or(0),
    };
    ActivitySummary {
        counters,
        monthly_series: monthly_series(&calendar.days),
        language_distribution: language_distribution(repositories),
    }
}

pub fn aggregate_activity(activity: &RawActivity) -> ActivitySummary {
    aggregate(
        &activity.profile,
        &activity.repositories,
        &activity.calendar,
    )
}

/// Count repositories per declared language, keyed by the exact name.
///
/// Entries come out in the order each language is first seen. This follows
/// the repository feed's ordering on purpose; sorting would change what the
/// chart shows.
pub fn language_distribution(repositories: &[RawRepository]) -> Vec<LanguageShare> {
    let mut shares: Vec<LanguageShare> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let languages = repositories
        .iter()
        .filter_map(|r| r.primary_language.as_deref())
        .filter(|l| !l.is_empty());
    for language in languages {
        match index.get(language) {
            Some(&i) => shares[i].count += 1,
            None => {
                index.insert(language, shares.len());
                shares.push(LanguageShare {
                    name: language.to_string(),
                    count: 1,
                    color: language_color(language),
                });
            }
        }
    }
    shares
}

/// Sum day counts per calendar month, merging years, and emit Jan..Dec
/// skipping empty months.
pub fn monthly_series(days: &[RawContributionDay]) -> Vec<MonthlyContribution> {
    let mut buckets = [0u64; 12];
    for day in days {
        let Some(date) = parse_day(&day.date) else {
            debug!(date = %day.date, "skipping unparsable contribution day");
            continue;
        };
        let slot = &mut buckets[date.month0() as usize];
        *slot = slot.saturating_add(day.count.unwrap_or(0));
    }
    MONTH_LABELS
        .into_iter()
        .zip(buckets)
        .filter(|(_, total)| *total > 0)
        .map(|(month, contributions)| MonthlyContribution {
            month,
            contributions,
        })
        .collect()
}

/// Parse a contribution date as written, without any timezone shift.
///
/// Accepts:
/// - YYYY-MM-DD
/// - RFC3339 datetime (date in its own offset)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date());
    }
    None
}
