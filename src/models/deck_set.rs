//! Container for all available decks
use super::Deck;

#[derive(Debug, Clone, Default)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}
