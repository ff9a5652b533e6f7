//! Wrapper for cards that tracks within-session progress.
use super::Card;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SessionCard {
    pub card: Card,
    pub passed: bool,
    pub last_graded_at: Option<DateTime<Utc>>,
}

impl SessionCard {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            passed: false,
            last_graded_at: None,
        }
    }

    pub fn mark_passed(&mut self, now: DateTime<Utc>) {
        self.passed = true;
        self.last_graded_at = Some(now);
    }
}
