//! Metric names and recording helpers for the feeds.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops.

use crate::Feed;

pub const FEED_REQUESTS_TOTAL: &str = "activity_feed_requests_total";

pub fn record_feed_outcome(feed: Feed, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!(FEED_REQUESTS_TOTAL, "feed" => feed.as_str(), "outcome" => outcome)
        .increment(1);
}
