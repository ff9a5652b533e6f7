//! Error types for the scheduling core and the import/export layer.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced by the scheduler itself.
///
/// The scheduler is pure computation, so the only failure mode is a caller
/// supplying a review instant that predates the item's last recorded review.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("review at {now} predates last review at {last_reviewed}")]
    InvalidTimestamp {
        now: DateTime<Utc>,
        last_reviewed: DateTime<Utc>,
    },
}

/// Errors produced while importing or exporting decks.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid deck JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid vocabulary CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("vocabulary CSV is missing the '{0}' column")]
    MissingColumn(&'static str),
}
