//! Per-card spaced-repetition state.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scheduler::INITIAL_EASE;

/// Scheduling state for one card under spaced repetition.
///
/// Mutated only through [`scheduler::record_review`](super::scheduler::record_review),
/// which takes the current state and returns the next one. Persisting the
/// collection is the storage layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub card_id: i64,
    /// Multiplier controlling interval growth, clamped to [1.3, 5.0].
    pub ease_factor: f64,
    /// Current interval in whole days. 0 only before the first review.
    pub interval_days: u32,
    /// Consecutive successful reviews since the last lapse.
    pub repetitions: u32,
    /// How many times the card has been forgotten.
    pub lapses: u32,
    /// Earliest instant the card is eligible for review again.
    pub due: DateTime<Utc>,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl ReviewItem {
    /// Fresh state for a card just added to the deck: due immediately,
    /// default ease, no history.
    pub fn new(card_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            card_id,
            ease_factor: INITIAL_EASE,
            interval_days: 0,
            repetitions: 0,
            lapses: 0,
            due: now,
            last_reviewed: None,
        }
    }
}
