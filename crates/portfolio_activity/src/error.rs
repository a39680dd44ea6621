//! Error types for the activity service.

use thiserror::Error;

/// Startup and serving errors. Fetch failures never surface here; the board
/// absorbs them into its snapshot.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("activity source error: {0}")]
    Source(#[from] github_activity_client::ActivityError),

    #[error("invalid listen address {0:?}")]
    Address(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
