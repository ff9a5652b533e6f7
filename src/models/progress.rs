//! Derived progress counters for a deck.
use super::ReviewItem;
use super::scheduler::{self, Stage};
use chrono::{DateTime, Utc};

/// Snapshot of where a deck's cards sit in the learning lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckProgress {
    pub new: usize,
    pub learning: usize,
    pub relearning: usize,
    pub mature: usize,
    /// Cards eligible for review right now.
    pub due: usize,
    pub total: usize,
}

impl DeckProgress {
    pub fn summarize(items: &[ReviewItem], now: DateTime<Utc>) -> Self {
        let mut progress = Self {
            total: items.len(),
            ..Self::default()
        };

        for item in items {
            match scheduler::stage(item) {
                Stage::New => progress.new += 1,
                Stage::Learning => progress.learning += 1,
                Stage::Relearning => progress.relearning += 1,
                Stage::Mature => progress.mature += 1,
            }
            if item.due <= now {
                progress.due += 1;
            }
        }

        progress
    }
}
