//! Mock `ActivitySource` implementations shared by unit tests.
#![cfg(test)]

use async_trait::async_trait;
use github_activity_client::{
    ActivityError, ActivitySource, RawContributionCalendar, RawContributionDay, RawProfile,
    RawRepository,
};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

fn sample_repositories() -> Vec<RawRepository> {
    vec![
        RawRepository {
            star_count: Some(5),
            primary_language: Some("TypeScript".into()),
        },
        RawRepository {
            star_count: Some(3),
            primary_language: Some("TypeScript".into()),
        },
        RawRepository {
            star_count: Some(0),
            primary_language: None,
        },
    ]
}

fn sample_calendar() -> RawContributionCalendar {
    RawContributionCalendar {
        rolling_total: Some(120),
        days: vec![
            RawContributionDay {
                date: "2024-01-05".into(),
                count: Some(3),
            },
            RawContributionDay {
                date: "2024-01-20".into(),
                count: Some(2),
            },
        ],
    }
}

/// Serves fixed payloads; the repository feed can be switched to failing.
pub struct StaticSource {
    failing: AtomicBool,
}

impl StaticSource {
    pub fn healthy() -> Self {
        Self {
            failing: AtomicBool::new(false),
        }
    }

    pub fn failing_repositories() -> Self {
        Self {
            failing: AtomicBool::new(true),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivitySource for StaticSource {
    async fn get_profile(&self, _identity: &str) -> Result<RawProfile, ActivityError> {
        Ok(RawProfile {
            public_repo_count: Some(3),
            follower_count: Some(11),
        })
    }

    async fn list_repositories(
        &self,
        _identity: &str,
        _per_page: u32,
    ) -> Result<Vec<RawRepository>, ActivityError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ActivityError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(sample_repositories())
    }

    async fn get_contributions(
        &self,
        _identity: &str,
    ) -> Result<RawContributionCalendar, ActivityError> {
        Ok(sample_calendar())
    }
}

/// The first profile request parks until `release_first` is called; later
/// requests answer straight away. Follower counts are captured when a
/// request starts.
pub struct GatedSource {
    calls: AtomicUsize,
    followers: AtomicU64,
    gate: Semaphore,
}

impl Default for GatedSource {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            followers: AtomicU64::new(1),
            gate: Semaphore::new(0),
        }
    }
}

impl GatedSource {
    pub fn set_followers(&self, followers: u64) {
        self.followers.store(followers, Ordering::SeqCst);
    }

    pub fn release_first(&self) {
        self.gate.add_permits(1);
    }

    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls.load(Ordering::SeqCst) < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl ActivitySource for GatedSource {
    async fn get_profile(&self, _identity: &str) -> Result<RawProfile, ActivityError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let followers = self.followers.load(Ordering::SeqCst);
        if call == 0 {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| ActivityError::Decode(e.to_string()))?;
        }
        Ok(RawProfile {
            public_repo_count: None,
            follower_count: Some(followers),
        })
    }

    async fn list_repositories(
        &self,
        _identity: &str,
        _per_page: u32,
    ) -> Result<Vec<RawRepository>, ActivityError> {
        Ok(sample_repositories())
    }

    async fn get_contributions(
        &self,
        _identity: &str,
    ) -> Result<RawContributionCalendar, ActivityError> {
        Ok(sample_calendar())
    }
}
