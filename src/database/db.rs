//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, CRUD operations for decks and
//! cards, and persistence of spaced-repetition review state.

use crate::models::{Card, Deck, DeckSet, ReviewItem, scheduler::INITIAL_EASE};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, Result, params};
use tracing::{debug, info};

/// Opens the database at `path` and creates the required tables.
///
/// Use `:memory:` for an in-memory database (useful for testing).
/// Sets the persisted current date to now if not already initialized.
pub fn init_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS decks (
            name TEXT PRIMARY KEY
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_name TEXT NOT NULL,
            term TEXT NOT NULL,
            definition TEXT NOT NULL,
            part_of_speech TEXT,
            FOREIGN KEY (deck_name) REFERENCES decks(name),
            UNIQUE(deck_name, term)
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_items (
            card_id INTEGER PRIMARY KEY,
            ease_factor REAL NOT NULL,
            interval_days INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            lapses INTEGER NOT NULL DEFAULT 0,
            due INTEGER NOT NULL,
            last_reviewed INTEGER,
            FOREIGN KEY (card_id) REFERENCES cards(id) ON DELETE CASCADE
        )",
        (),
    )?;

    // The app runs on a persisted date so schedules can be exercised
    // without waiting wall-clock days.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![Utc::now().timestamp().to_string()],
    )?;

    Ok(conn)
}

fn from_unix(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Retrieves the persisted current date
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let timestamp: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    Ok(from_unix(timestamp.parse::<i64>().unwrap_or(0)))
}

/// Advances the persisted current date by 24 hours
pub fn advance_day(conn: &Connection) -> Result<()> {
    let next_day = get_current_date(conn)? + chrono::Duration::days(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![next_day.timestamp().to_string()],
    )?;

    Ok(())
}

/// Creates a new deck in the database
pub fn new_deck(name: &str, conn: &Connection) -> Result<()> {
    conn.execute("INSERT INTO decks (name) VALUES (?1)", params![name])?;
    info!(deck = name, "deck created");
    Ok(())
}

/// Adds a card to a deck and initializes its review state
///
/// Returns the card ID. If the card already exists (same deck + term),
/// it's ignored due to the UNIQUE constraint.
pub fn add_card(deck_name: &str, card: &Card, conn: &Connection) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO cards (deck_name, term, definition, part_of_speech)
         VALUES (?1, ?2, ?3, ?4)",
        params![deck_name, card.term, card.definition, card.part_of_speech],
    )?;

    let card_id: i64 = conn.query_row(
        "SELECT id FROM cards WHERE deck_name = ?1 AND term = ?2",
        params![deck_name, card.term],
        |row| row.get(0),
    )?;

    // New cards are due immediately
    let current_date = get_current_date(conn)?;

    conn.execute(
        "INSERT OR IGNORE INTO review_items
             (card_id, ease_factor, interval_days, repetitions, lapses, due, last_reviewed)
         VALUES (?1, ?2, 0, 0, 0, ?3, NULL)",
        params![card_id, INITIAL_EASE, current_date.timestamp()],
    )?;

    Ok(card_id)
}

fn card_from_row(row: &rusqlite::Row, term_idx: usize) -> Result<Card> {
    Ok(Card {
        term: row.get(term_idx)?,
        definition: row.get(term_idx + 1)?,
        part_of_speech: row.get(term_idx + 2)?,
    })
}

fn review_item_from_row(row: &rusqlite::Row, card_id: i64, first_idx: usize) -> Result<ReviewItem> {
    Ok(ReviewItem {
        card_id,
        ease_factor: row.get(first_idx)?,
        interval_days: row.get(first_idx + 1)?,
        repetitions: row.get(first_idx + 2)?,
        lapses: row.get(first_idx + 3)?,
        due: from_unix(row.get(first_idx + 4)?),
        last_reviewed: row.get::<_, Option<i64>>(first_idx + 5)?.map(from_unix),
    })
}

/// Retrieves all cards for a given deck
///
/// Returns a vector of (card_id, Card) tuples
pub fn get_cards_for_deck(deck_name: &str, conn: &Connection) -> Result<Vec<(i64, Card)>> {
    let mut stmt = conn
        .prepare("SELECT id, term, definition, part_of_speech FROM cards WHERE deck_name = ?1")?;

    let cards = stmt
        .query_map(params![deck_name], |row| {
            Ok((row.get(0)?, card_from_row(row, 1)?))
        })?
        .collect::<Result<Vec<(i64, Card)>>>()?;

    Ok(cards)
}

/// Writes a card's review state back after a review
pub fn update_review_item(item: &ReviewItem, conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE review_items
         SET ease_factor = ?1, interval_days = ?2, repetitions = ?3,
             lapses = ?4, due = ?5, last_reviewed = ?6
         WHERE card_id = ?7",
        params![
            item.ease_factor,
            item.interval_days,
            item.repetitions,
            item.lapses,
            item.due.timestamp(),
            item.last_reviewed.map(|t| t.timestamp()),
            item.card_id
        ],
    )?;
    debug!(card_id = item.card_id, due = %item.due, "review state saved");

    Ok(())
}

/// Retrieves the cards due for review in a deck
///
/// Returns cards where due <= the persisted current date, ordered by due
/// instant with ties broken by card id, matching the scheduler's queue
/// ordering.
pub fn get_cards_due_for_review(
    deck_name: &str,
    conn: &Connection,
) -> Result<Vec<(i64, Card, ReviewItem)>> {
    let cutoff = get_current_date(conn)?.timestamp();

    let mut stmt = conn.prepare(
        "SELECT c.id, c.term, c.definition, c.part_of_speech,
                r.ease_factor, r.interval_days, r.repetitions, r.lapses, r.due, r.last_reviewed
         FROM cards c
         JOIN review_items r ON c.id = r.card_id
         WHERE c.deck_name = ?1 AND r.due <= ?2
         ORDER BY r.due ASC, c.id ASC",
    )?;

    let cards = stmt
        .query_map(params![deck_name, cutoff], |row| {
            let id: i64 = row.get(0)?;
            Ok((id, card_from_row(row, 1)?, review_item_from_row(row, id, 4)?))
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(cards)
}

/// Retrieves the review state for every card in a deck
pub fn get_review_items_for_deck(deck_name: &str, conn: &Connection) -> Result<Vec<ReviewItem>> {
    let mut stmt = conn.prepare(
        "SELECT r.card_id, r.ease_factor, r.interval_days, r.repetitions, r.lapses,
                r.due, r.last_reviewed
         FROM review_items r
         JOIN cards c ON c.id = r.card_id
         WHERE c.deck_name = ?1",
    )?;

    let items = stmt
        .query_map(params![deck_name], |row| {
            let id: i64 = row.get(0)?;
            review_item_from_row(row, id, 1)
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(items)
}

/// Retrieves all deck names from the database
pub fn get_all_decks(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM decks")?;
    let decks = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(decks)
}

/// Loads all decks with their cards into memory
///
/// Does not load review state - that's fetched separately when starting a
/// review session.
pub fn load_all_decks(conn: &Connection) -> Result<DeckSet> {
    let deck_names = get_all_decks(conn)?;

    let mut decks = Vec::new();

    for deck_name in deck_names {
        let cards_with_ids = get_cards_for_deck(&deck_name, conn)?;
        // Strip IDs - we only need them for review sessions
        let cards = cards_with_ids.into_iter().map(|(_, card)| card).collect();

        decks.push(Deck {
            name: deck_name,
            cards,
        });
    }

    Ok(DeckSet { decks })
}
