//! Import of SpanishDict vocabulary CSV exports.
//!
//! The scraper that feeds this tool writes rows as
//! `Date Added, Spanish, English, Part of Speech, Popularity, AI Analysis`.
//! Only the word pair and part of speech matter for the deck; rows without
//! a translation are skipped.

use crate::error::ImportError;
use crate::models::{Card, Deck};
use std::fs::File;
use tracing::info;

const SPANISH_COLUMN: &str = "Spanish";
const ENGLISH_COLUMN: &str = "English";
const PART_OF_SPEECH_COLUMN: &str = "Part of Speech";

/// Reads a vocabulary CSV and builds a deck out of it.
pub fn import_vocab_csv(deck_name: &str, path: &str) -> Result<Deck, ImportError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let spanish_idx = column_index(&headers, SPANISH_COLUMN)?;
    let english_idx = column_index(&headers, ENGLISH_COLUMN)?;
    // Older exports predate this column
    let pos_idx = headers.iter().position(|h| h == PART_OF_SPEECH_COLUMN);

    let mut cards = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;

        let term = record.get(spanish_idx).unwrap_or("").trim();
        let definition = record.get(english_idx).unwrap_or("").trim();
        if term.is_empty() || definition.is_empty() {
            skipped += 1;
            continue;
        }

        let part_of_speech = pos_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|pos| !pos.is_empty())
            .map(str::to_string);

        cards.push(Card {
            term: term.to_string(),
            definition: definition.to_string(),
            part_of_speech,
        });
    }

    info!(
        deck = deck_name,
        cards = cards.len(),
        skipped,
        file = path,
        "vocabulary CSV imported"
    );

    Ok(Deck {
        name: deck_name.to_string(),
        cards,
    })
}

fn column_index(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or(ImportError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Date Added,Spanish,English,Part of Speech,Popularity,AI Analysis
2024-01-05,el perro,the dog,noun (masculine),120,some analysis text
2024-01-06,hablar,to speak,transitive verb,98,
2024-01-07,sin traducción,,,45,
";

    fn write_csv(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vocab.csv");
        fs::write(&path, contents).unwrap();
        let path = path.to_str().unwrap().to_string();
        (dir, path)
    }

    #[test]
    fn test_import_maps_columns_to_cards() {
        let (_dir, path) = write_csv(SAMPLE);

        let deck = import_vocab_csv("SpanishDict", &path).unwrap();
        assert_eq!(deck.name, "SpanishDict");
        assert_eq!(deck.cards.len(), 2);

        assert_eq!(deck.cards[0].term, "el perro");
        assert_eq!(deck.cards[0].definition, "the dog");
        assert_eq!(
            deck.cards[0].part_of_speech.as_deref(),
            Some("noun (masculine)")
        );

        assert_eq!(deck.cards[1].term, "hablar");
        assert_eq!(deck.cards[1].part_of_speech.as_deref(), Some("transitive verb"));
    }

    #[test]
    fn test_rows_without_translation_are_skipped() {
        let (_dir, path) = write_csv(SAMPLE);

        let deck = import_vocab_csv("SpanishDict", &path).unwrap();
        assert!(deck.cards.iter().all(|card| card.term != "sin traducción"));
    }

    #[test]
    fn test_export_without_part_of_speech_column_still_imports() {
        let (_dir, path) = write_csv("Spanish,English\ngato,cat\n");

        let deck = import_vocab_csv("Minimal", &path).unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert!(deck.cards[0].part_of_speech.is_none());
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let (_dir, path) = write_csv("Date Added,Spanish,Popularity\n2024-01-05,hola,120\n");

        let result = import_vocab_csv("Broken", &path);
        assert!(matches!(
            result,
            Err(ImportError::MissingColumn("English"))
        ));
    }
}
