//! The refresh board: owner of the most recently displayed summary.
//!
//! Every refresh is numbered. A cycle's outcome is applied only while it is
//! still the newest cycle; anything that finishes after a newer cycle started
//! is dropped.

use chrono::Utc;
use github_activity_client::config::Config;
use github_activity_client::http_client::ReqwestActivitySource;
use github_activity_client::{ActivitySource, fetch_activity};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::aggregate::aggregate_activity;
use crate::error::ServiceResult;
use crate::types::{Snapshot, Status};

/// Shown instead of any detail about which feed failed.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to load GitHub stats right now.";

pub const REFRESH_TOTAL: &str = "activity_refresh_total";

#[derive(Debug, Default)]
struct BoardState {
    generation: u64,
    snapshot: Snapshot,
}

pub struct ActivityBoard {
    source: Arc<dyn ActivitySource>,
    identity: String,
    per_page: u32,
    state: RwLock<BoardState>,
}

impl ActivityBoard {
    pub fn new(source: Arc<dyn ActivitySource>, identity: impl Into<String>, per_page: u32) -> Self {
        Self {
            source,
            identity: identity.into(),
            per_page,
            state: RwLock::new(BoardState::default()),
        }
    }

    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        let source = ReqwestActivitySource::from_config(config)?;
        Ok(Self::new(
            Arc::new(source),
            config.identity.clone(),
            config.repo_page_size,
        ))
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Run one fetch cycle and return the snapshot as it stands afterwards.
    ///
    /// On failure the previous summary is kept and only the status and
    /// error message change.
    pub async fn refresh(&self) -> Snapshot {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.snapshot.status = Status::Loading;
            state.snapshot.error = None;
            state.generation
        };

        let result = fetch_activity(self.source.as_ref(), &self.identity, self.per_page).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            metrics::counter!(REFRESH_TOTAL, "outcome" => "stale").increment(1);
            warn!(
                generation,
                current = state.generation,
                "discarding result of superseded activity refresh"
            );
            return state.snapshot.clone();
        }

        let snapshot = &mut state.snapshot;
        match result {
            Ok(activity) => {
                let summary = aggregate_activity(&activity);
                info!(
                    generation,
                    repositories = summary.counters.repositories,
                    months = summary.monthly_series.len(),
                    languages = summary.language_distribution.len(),
                    "activity summary refreshed"
                );
                snapshot.summary = Some(summary);
                snapshot.status = Status::Ready;
                snapshot.error = None;
                snapshot.refreshed_at = Some(Utc::now());
                metrics::counter!(REFRESH_TOTAL, "outcome" => "ready").increment(1);
            }
            Err(failure) => {
                warn!(
                    generation,
                    feed = %failure.feed,
                    error = %failure.cause,
                    "activity refresh failed; keeping previous summary"
                );
                snapshot.status = Status::Error;
                snapshot.error = Some(UNAVAILABLE_MESSAGE.to_string());
                metrics::counter!(REFRESH_TOTAL, "outcome" => "error").increment(1);
            }
        }
        snapshot.clone()
    }

    /// Start a refresh on the runtime without waiting for it.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<Snapshot> {
        let board = Arc::clone(self);
        tokio::spawn(async move { board.refresh().await })
    }
}
