//! SM-2-style spaced repetition scheduler.
//!
//! The scheduler decides when a card is next due given how well the learner
//! recalled it:
//! - Each item has an ease factor (EF) that adjusts with performance
//! - Fail: the item lapses — progress resets and the interval drops to 1 day
//! - Hard/Good/Easy: the interval grows by previous interval × EF, with an
//!   extra 1.3× bonus for Easy
//! - EF is adjusted after each review and stays within [1.3, 5.0]
//!
//! All functions here are pure: no I/O, no shared state. Callers pass items
//! in and persist the returned state themselves.

use super::{ReviewItem, ReviewOutcome};
use crate::error::SchedulerError;
use chrono::{DateTime, Duration, Utc};

/// Ease factor assigned to freshly created items.
pub const INITIAL_EASE: f64 = 2.5;
/// Ease factor never drops below this.
pub const MIN_EASE: f64 = 1.3;
/// Ease factor never grows beyond this.
pub const MAX_EASE: f64 = 5.0;
/// Subtracted from the ease factor on a lapse.
pub const FAIL_EASE_PENALTY: f64 = 0.2;
/// Ease adjustment for a Hard review.
pub const HARD_EASE_DELTA: f64 = -0.15;
/// Ease adjustment for an Easy review.
pub const EASY_EASE_DELTA: f64 = 0.15;
/// Extra interval multiplier for an Easy review.
pub const EASY_BONUS: f64 = 1.3;
/// Shortest interval handed out after any review, in days.
pub const MIN_INTERVAL_DAYS: u32 = 1;
/// Interval at which an item counts as mature, in days.
pub const GRADUATION_THRESHOLD_DAYS: u32 = 21;

/// Where an item sits in its learning lifecycle. Derived from the counters,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Never reviewed successfully, never lapsed.
    New,
    /// At least one success, interval still below graduation.
    Learning,
    /// Lapsed and not yet back on track.
    Relearning,
    /// Interval at or past the graduation threshold.
    Mature,
}

/// Classifies an item into its learning stage.
pub fn stage(item: &ReviewItem) -> Stage {
    if item.repetitions == 0 {
        if item.lapses == 0 {
            Stage::New
        } else {
            Stage::Relearning
        }
    } else if item.interval_days >= GRADUATION_THRESHOLD_DAYS {
        Stage::Mature
    } else {
        Stage::Learning
    }
}

/// Applies one review outcome and returns the item's next state.
///
/// Fails with [`SchedulerError::InvalidTimestamp`] when `now` is earlier
/// than the item's last recorded review; the input is left untouched.
/// Reviewing again at the exact same instant is allowed so a session can
/// regrade a failed card within the same sitting.
pub fn record_review(
    item: &ReviewItem,
    outcome: ReviewOutcome,
    now: DateTime<Utc>,
) -> Result<ReviewItem, SchedulerError> {
    if let Some(last) = item.last_reviewed {
        if now < last {
            return Err(SchedulerError::InvalidTimestamp {
                now,
                last_reviewed: last,
            });
        }
    }

    let mut next = item.clone();

    match outcome {
        ReviewOutcome::Fail => {
            next.lapses += 1;
            next.repetitions = 0;
            next.interval_days = MIN_INTERVAL_DAYS;
            next.ease_factor = clamp_ease(item.ease_factor - FAIL_EASE_PENALTY);
        }
        ReviewOutcome::Hard | ReviewOutcome::Good | ReviewOutcome::Easy => {
            next.repetitions += 1;

            let multiplier = match outcome {
                ReviewOutcome::Easy => EASY_BONUS,
                _ => 1.0,
            };
            // The new interval uses the ease factor as it was before this
            // review; the adjustment below only affects future reviews.
            let grown = item.interval_days as f64 * item.ease_factor * multiplier;
            next.interval_days = (grown.round() as u32).max(MIN_INTERVAL_DAYS);

            let delta = match outcome {
                ReviewOutcome::Hard => HARD_EASE_DELTA,
                ReviewOutcome::Easy => EASY_EASE_DELTA,
                _ => 0.0,
            };
            next.ease_factor = clamp_ease(item.ease_factor + delta);
        }
    }

    next.due = now + Duration::days(next.interval_days as i64);
    next.last_reviewed = Some(now);

    Ok(next)
}

/// Items due at or before `cutoff`, ordered by ascending due instant with
/// ties broken by card id. The ordering is deterministic so review queues
/// are reproducible.
pub fn items_due_by<'a>(
    items: &'a [ReviewItem],
    cutoff: DateTime<Utc>,
) -> impl Iterator<Item = &'a ReviewItem> + 'a {
    let mut due: Vec<&ReviewItem> = items.iter().filter(|item| item.due <= cutoff).collect();
    due.sort_by_key(|item| (item.due, item.card_id));
    due.into_iter()
}

fn clamp_ease(ease: f64) -> f64 {
    ease.clamp(MIN_EASE, MAX_EASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn new_item(id: i64) -> ReviewItem {
        ReviewItem::new(id, day(0))
    }

    #[test]
    fn test_first_review_good() {
        let item = new_item(1);

        let next = record_review(&item, ReviewOutcome::Good, day(0)).unwrap();
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.due, day(1));
        assert_eq!(next.last_reviewed, Some(day(0)));
    }

    #[test]
    fn test_repeated_good_gives_increasing_intervals() {
        let mut item = new_item(1);
        let mut now = day(0);
        let mut previous = 0;

        for _ in 0..8 {
            item = record_review(&item, ReviewOutcome::Good, now).unwrap();
            assert!(item.interval_days > previous);
            previous = item.interval_days;
            now = item.due;
        }
    }

    #[test]
    fn test_fail_resets_progress() {
        let item = ReviewItem {
            repetitions: 5,
            interval_days: 40,
            ..new_item(1)
        };

        let next = record_review(&item, ReviewOutcome::Fail, day(50)).unwrap();
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.lapses, 1);
        assert!((next.ease_factor - 2.3).abs() < 1e-9);
        assert_eq!(next.due, day(51));
    }

    #[test]
    fn test_ease_never_falls_below_floor() {
        let mut item = ReviewItem {
            ease_factor: 1.4,
            ..new_item(1)
        };

        for n in 0..5 {
            item = record_review(&item, ReviewOutcome::Fail, day(n)).unwrap();
            assert!(item.ease_factor >= MIN_EASE);
        }
        assert_eq!(item.ease_factor, MIN_EASE);
    }

    #[test]
    fn test_ease_never_exceeds_ceiling() {
        let mut item = ReviewItem {
            ease_factor: 4.95,
            ..new_item(1)
        };
        let mut now = day(0);

        for _ in 0..5 {
            item = record_review(&item, ReviewOutcome::Easy, now).unwrap();
            assert!(item.ease_factor <= MAX_EASE);
            now = item.due;
        }
        assert_eq!(item.ease_factor, MAX_EASE);
    }

    #[test]
    fn test_hard_slows_growth_through_ease_not_interval() {
        let item = ReviewItem {
            repetitions: 2,
            interval_days: 6,
            last_reviewed: Some(day(0)),
            ..new_item(1)
        };

        let hard = record_review(&item, ReviewOutcome::Hard, day(6)).unwrap();
        let good = record_review(&item, ReviewOutcome::Good, day(6)).unwrap();

        assert_eq!(hard.interval_days, good.interval_days);
        assert!(hard.ease_factor < good.ease_factor);
    }

    #[test]
    fn test_easy_outgrows_good() {
        let item = ReviewItem {
            repetitions: 2,
            interval_days: 6,
            last_reviewed: Some(day(0)),
            ..new_item(1)
        };

        let easy = record_review(&item, ReviewOutcome::Easy, day(6)).unwrap();
        let good = record_review(&item, ReviewOutcome::Good, day(6)).unwrap();

        assert!(easy.interval_days > good.interval_days);
        assert!(easy.ease_factor > good.ease_factor);
    }

    // The worked example from the product notes: create at day 0, pass twice,
    // then forget on day 4.
    #[test]
    fn test_good_good_fail_scenario() {
        let item = new_item(1);

        let item = record_review(&item, ReviewOutcome::Good, day(0)).unwrap();
        assert_eq!(item.interval_days, 1);
        assert_eq!(item.due, day(1));
        assert_eq!(item.repetitions, 1);

        let item = record_review(&item, ReviewOutcome::Good, day(1)).unwrap();
        assert_eq!(item.interval_days, 3); // 1 × 2.5 rounded
        assert_eq!(item.due, day(4));
        assert_eq!(item.repetitions, 2);

        let item = record_review(&item, ReviewOutcome::Fail, day(4)).unwrap();
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.interval_days, 1);
        assert_eq!(item.due, day(5));
        assert_eq!(item.lapses, 1);
        assert!((item.ease_factor - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_review_before_last_review_is_rejected() {
        let item = ReviewItem {
            last_reviewed: Some(day(2)),
            ..new_item(1)
        };
        let before = item.clone();

        let err = record_review(&item, ReviewOutcome::Good, day(1)).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InvalidTimestamp {
                now: day(1),
                last_reviewed: day(2),
            }
        );
        assert_eq!(item, before);
    }

    #[test]
    fn test_review_at_same_instant_is_allowed() {
        let item = ReviewItem {
            last_reviewed: Some(day(2)),
            ..new_item(1)
        };

        assert!(record_review(&item, ReviewOutcome::Good, day(2)).is_ok());
    }

    #[test]
    fn test_items_due_by_orders_by_due_then_id() {
        let mut a = new_item(3);
        a.due = day(2);
        let mut b = new_item(1);
        b.due = day(2);
        let mut c = new_item(2);
        c.due = day(1);
        let mut late = new_item(4);
        late.due = day(9);

        let items = vec![a, b, c, late];
        let ids: Vec<i64> = items_due_by(&items, day(5)).map(|i| i.card_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_items_due_by_is_idempotent() {
        let mut a = new_item(1);
        a.due = day(1);
        let mut b = new_item(2);
        b.due = day(0);
        let items = vec![a, b];

        let first: Vec<i64> = items_due_by(&items, day(3)).map(|i| i.card_id).collect();
        let second: Vec<i64> = items_due_by(&items, day(3)).map(|i| i.card_id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_items_due_by_excludes_future_items() {
        let mut item = new_item(1);
        item.due = day(10);

        let items = vec![item];
        assert_eq!(items_due_by(&items, day(9)).count(), 0);
        assert_eq!(items_due_by(&items, day(10)).count(), 1);
    }

    #[test]
    fn test_stage_transitions() {
        let item = new_item(1);
        assert_eq!(stage(&item), Stage::New);

        let learning = record_review(&item, ReviewOutcome::Good, day(0)).unwrap();
        assert_eq!(stage(&learning), Stage::Learning);

        let mature = ReviewItem {
            repetitions: 6,
            interval_days: GRADUATION_THRESHOLD_DAYS,
            ..new_item(1)
        };
        assert_eq!(stage(&mature), Stage::Mature);

        let lapsed = record_review(&mature, ReviewOutcome::Fail, day(30)).unwrap();
        assert_eq!(stage(&lapsed), Stage::Relearning);

        let recovering = record_review(&lapsed, ReviewOutcome::Good, day(31)).unwrap();
        assert_eq!(stage(&recovering), Stage::Learning);
    }
}
