//! Activity aggregation for the portfolio site's GitHub widget.
//!
//! [`aggregate()`] turns one cycle's raw feeds into an [`ActivitySummary`];
//! [`ActivityBoard`] drives refresh cycles and holds what the presenter
//! displays; [`server`] exposes the board over HTTP.

pub mod aggregate;
pub mod board;
pub mod colors;
pub mod error;
pub mod server;
pub mod types;

mod test_utils;

pub use aggregate::{aggregate, aggregate_activity};
pub use board::{ActivityBoard, UNAVAILABLE_MESSAGE};
pub use error::{ServiceError, ServiceResult};
pub use types::{ActivitySummary, Counters, LanguageShare, MonthlyContribution, Snapshot, Status};
