//! Card is a pair <term, definition>: the Spanish word or phrase and its
//! English translation. Part of speech is carried when the source knows it.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub term: String,
    pub definition: String,
    /// E.g. "noun (feminine)", "transitive verb". Absent for decks built by
    /// hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            part_of_speech: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("hola", "hello");

        assert_eq!(card.term, "hola");
        assert_eq!(card.definition, "hello");
        assert!(card.part_of_speech.is_none());
    }

    #[test]
    fn test_card_json_omits_missing_part_of_speech() {
        let card = Card::new("gato", "cat");
        let json = serde_json::to_string(&card).unwrap();

        assert!(!json.contains("part_of_speech"));

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back.term, "gato");
    }
}
