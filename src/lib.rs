pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{ImportError, SchedulerError};
pub use models::{Card, Deck, DeckSet, ReviewItem, ReviewOutcome, ReviewSession};
