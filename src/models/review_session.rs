//! Review session management for spaced repetition practice.
//! Handles multi-round card review; cards the learner fails come back in
//! later rounds of the same sitting until every card passes.
//!
//! The session owns only in-memory state. Each grade runs the scheduler and
//! hands the updated [`ReviewItem`] back to the caller, which is responsible
//! for persisting it.

use super::{Card, ReviewItem, ReviewOutcome, SessionCard, scheduler};
use crate::error::SchedulerError;
use chrono::{DateTime, Utc};

pub struct ReviewSession {
    pub deck_name: String,
    pub all_cards: Vec<(i64, SessionCard, ReviewItem)>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_definition: bool,
    pub round_number: usize,
}

impl ReviewSession {
    /// Creates a new session from the cards that are due for review.
    pub fn new_from_due_cards(deck_name: String, cards: Vec<(i64, Card, ReviewItem)>) -> Self {
        let session_cards: Vec<_> = cards
            .into_iter()
            .map(|(id, card, item)| (id, SessionCard::new(card), item))
            .collect();

        let indices: Vec<usize> = (0..session_cards.len()).collect();

        Self {
            deck_name,
            all_cards: session_cards,
            current_round_cards: indices,
            current_index: 0,
            show_definition: false,
            round_number: 1,
        }
    }

    pub fn current_card(&self) -> Option<&SessionCard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx).map(|(_, card, _)| card))
    }

    pub fn current_item(&self) -> Option<&ReviewItem> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx).map(|(_, _, item)| item))
    }

    pub fn toggle_definition(&mut self) {
        self.show_definition = !self.show_definition;
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
            self.show_definition = false;
        } else {
            // End of round - check if there are cards to retry
            self.start_next_round();
        }
    }

    /// Starts a new round with the cards that weren't passed.
    /// If no cards remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_cards
                    .get(idx)
                    .map(|(_, card, _)| !card.passed)
                    .unwrap_or(false)
            })
            .collect();

        if !failed_indices.is_empty() {
            self.current_round_cards = failed_indices;
            self.current_index = 0;
            self.show_definition = false;
            self.round_number += 1;

            // Reset passed for these cards (they'll be shown again)
            for &idx in &self.current_round_cards {
                if let Some((_, card, _)) = self.all_cards.get_mut(idx) {
                    card.passed = false;
                }
            }
        }
        // If failed_indices is empty, session ends (is_completed() = true)
    }

    /// Grades the current card through the scheduler.
    ///
    /// Cards graded Hard/Good/Easy pass for this sitting; a Fail keeps the
    /// card in the retry pool. Returns the updated review state so the
    /// caller can persist it, or `Ok(None)` when there is no current card.
    pub fn grade_current(
        &mut self,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewItem>, SchedulerError> {
        let Some(&actual_idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(None);
        };
        let Some((_, card, item)) = self.all_cards.get_mut(actual_idx) else {
            return Ok(None);
        };

        let updated = scheduler::record_review(item, outcome, now)?;

        if outcome.is_success() {
            card.mark_passed(now);
        } else {
            card.passed = false; // Will come back in the next round
        }

        *item = updated.clone();
        Ok(Some(updated))
    }

    pub fn passed_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| {
                self.all_cards
                    .get(idx)
                    .map(|(_, card, _)| card.passed)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.passed_count()
    }

    /// Returns true when all cards have been passed or the session is empty.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.passed_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Retry): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
