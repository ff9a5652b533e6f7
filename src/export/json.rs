//! JSON import/export module for decks.
//! Provides functionality to save and load Deck structures to/from JSON files.

use crate::error::ImportError;
use crate::models::Deck;
use std::fs::File;
use std::io::{Read, Write};
use tracing::info;

/// Exports a deck to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(deck: &Deck, path: &str) -> Result<(), ImportError> {
    let json_string = serde_json::to_string_pretty(deck)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a deck from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<Deck, ImportError> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let deck: Deck = serde_json::from_str(&contents)?;

    info!(deck = %deck.name, file = filename, "deck imported");
    Ok(deck)
}
