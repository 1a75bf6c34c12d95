//! JSON documents for sharing single cards and saving whole decks.
//!
//! Cards are exchanged as a "config string", the JSON text of a [`CardRecord`]. Imports are all-or-nothing: a
//! malformed or too new document is rejected and nothing is changed.

use bingo_core::{Card, Deck};

pub use card::*;
pub use deck::*;
pub use error::*;
pub use settings::*;

mod card;
mod deck;
mod error;
mod settings;

/// Version written into every new document. Version 1 documents carry no version field.
pub const FORMAT_VERSION: u32 = 2;

pub fn export_card(card: &Card) -> Result<String> {
    Ok(serde_json::to_string(&CardRecord::from_card(card))?)
}

pub fn import_card(config: &str) -> Result<Card> {
    let record: CardRecord = serde_json::from_str(config.trim())?;
    record.into_card()
}

pub fn export_deck(deck: &Deck, settings: &ViewSettings) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DeckRecord::from_deck(
        deck, settings,
    ))?)
}

pub fn import_deck(document: &str) -> Result<(Deck, ViewSettings)> {
    let record: DeckRecord = serde_json::from_str(document.trim())?;
    record.into_deck()
}
