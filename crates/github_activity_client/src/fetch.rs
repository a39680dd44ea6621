//! One fetch cycle: the three feeds are requested concurrently and joined as
//! a unit. The first feed to fail voids the cycle.

use crate::observability::record_feed_outcome;
use crate::{ActivityError, ActivitySource, Feed, PartialFailure, RawActivity};
use std::future::Future;
use tracing::{debug, warn};

pub type FetchResult = Result<RawActivity, PartialFailure>;

pub async fn fetch_activity(
    source: &dyn ActivitySource,
    identity: &str,
    per_page: u32,
) -> FetchResult {
    let (profile, repositories, calendar) = tokio::try_join!(
        observe(Feed::Profile, source.get_profile(identity)),
        observe(
            Feed::Repositories,
            source.list_repositories(identity, per_page)
        ),
        observe(Feed::Contributions, source.get_contributions(identity)),
    )?;
    Ok(RawActivity {
        profile,
        repositories,
        calendar,
    })
}

async fn observe<T, F>(feed: Feed, fut: F) -> Result<T, PartialFailure>
where
    F: Future<Output = Result<T, ActivityError>>,
{
    match fut.await {
        Ok(value) => {
            record_feed_outcome(feed, true);
            debug!(%feed, "activity feed retrieved");
            Ok(value)
        }
        Err(cause) => {
            record_feed_outcome(feed, false);
            warn!(%feed, error = %cause, "activity feed failed");
            Err(PartialFailure { feed, cause })
        }
    }
}
