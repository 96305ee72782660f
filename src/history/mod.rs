//! Audit history
//!
//! Persists finished reports in SQLite so later audits of the same URL can
//! be checked for score regressions.

mod schema;
mod store;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use store::{HistoryEntry, HistoryStore};

use crate::compare::{compare, score_snapshot, RegressionResult};
use crate::report::ScoreView;
use thiserror::Error;

/// Errors that can occur while reading or writing history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Compares a new report with a previous one
///
/// Checks every pillar present in both, plus the overall score when both
/// reports were scored under the same scheme.
pub fn detect_regression(
    current: &dyn ScoreView,
    previous: &dyn ScoreView,
    threshold: f64,
) -> RegressionResult {
    let mut before = score_snapshot(previous);
    if previous.scoring_version() != current.scoring_version() {
        before.remove("overall");
    }
    compare(&before, &score_snapshot(current), threshold)
}
