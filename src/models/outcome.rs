//! Review outcome grades.
use serde::{Deserialize, Serialize};

/// How well the learner recalled a card on one review attempt.
///
/// A closed set so every grade path is handled exhaustively:
/// - `Fail`: could not recall, the card lapses
/// - `Hard`: recalled with serious difficulty
/// - `Good`: recalled with some hesitation
/// - `Easy`: perfect recall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewOutcome {
    Fail,
    Hard,
    Good,
    Easy,
}

impl ReviewOutcome {
    /// Maps the numeric grades 0-3 used by front ends. Returns `None` for
    /// anything out of range.
    pub fn from_grade(grade: u8) -> Option<Self> {
        match grade {
            0 => Some(Self::Fail),
            1 => Some(Self::Hard),
            2 => Some(Self::Good),
            3 => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::Hard => "Hard",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }

    /// True for every grade except `Fail`.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Fail)
    }
}
