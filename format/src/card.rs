use bingo_core::{
    Card, CardId, CardOptions, DEFAULT_CARD_NAME, Grid, GridSize, WinCondition, resize,
};
use serde::{Deserialize, Serialize};

use crate::*;

/// Stored shape of a single card.
///
/// Every field has a default so documents written by older versions, which lack some of them, still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRecord {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(alias = "name")]
    pub card_name: String,
    pub grid_size: u32,
    pub items: Vec<String>,
    pub marked_squares: Vec<bool>,
    pub instant_win: String,
    pub instant_win_active: bool,
    pub win_condition: WinCondition,
    pub show_title: bool,
    pub show_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_image: Option<String>,
    /// Missing in version 1, where a card with any mark is taken to be in play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playing: Option<bool>,
}

pub(crate) fn legacy_version() -> u32 {
    1
}

impl Default for CardRecord {
    fn default() -> Self {
        let size = GridSize::default();
        Self {
            version: FORMAT_VERSION,
            card_name: DEFAULT_CARD_NAME.to_string(),
            grid_size: size.get().into(),
            items: vec![String::new(); size.cell_count()],
            marked_squares: vec![false; size.cell_count()],
            instant_win: String::new(),
            instant_win_active: false,
            win_condition: WinCondition::default(),
            show_title: true,
            show_image: true,
            person_image: None,
            playing: None,
        }
    }
}

impl CardRecord {
    pub fn from_card(card: &Card) -> Self {
        let grid = card.grid();
        Self {
            version: FORMAT_VERSION,
            card_name: card.name.clone(),
            grid_size: card.size().get().into(),
            items: grid.items().to_vec(),
            marked_squares: grid.marked().to_vec(),
            instant_win: card.instant_win_text.clone(),
            instant_win_active: card.instant_win_active(),
            win_condition: card.win_condition(),
            show_title: card.options.contains(CardOptions::SHOW_TITLE),
            show_image: card.options.contains(CardOptions::SHOW_IMAGE),
            person_image: card.image.clone(),
            playing: Some(card.is_playing()),
        }
    }

    /// Rebuilds a card, repairing what can be repaired: the grid size is clamped and cell arrays of the wrong
    /// length are padded or truncated.
    pub fn into_card(self) -> Result<Card> {
        check_version(self.version)?;

        let size = GridSize::new(u8::try_from(self.grid_size).unwrap_or(u8::MAX));
        if u32::from(size.get()) != self.grid_size {
            log::warn!(
                "Card \"{}\" has unsupported grid size {}, using {}",
                self.card_name,
                self.grid_size,
                size
            );
        }

        let expected = size.cell_count();
        let (items, marked) =
            if self.items.len() == expected && self.marked_squares.len() == expected {
                (self.items, self.marked_squares)
            } else {
                log::warn!(
                    "Card \"{}\" stored {} items and {} marks for {} cells, reshaping",
                    self.card_name,
                    self.items.len(),
                    self.marked_squares.len(),
                    expected
                );
                resize(&self.items, &self.marked_squares, size.side())
            };
        let playing = self
            .playing
            .unwrap_or_else(|| marked.iter().any(|&m| m));

        let mut card = Card::with_grid(CardId(0), Grid::from_parts(size, items, marked)?);
        card.name = self.card_name;
        card.instant_win_text = self.instant_win;
        card.image = self.person_image;
        card.options.set(CardOptions::SHOW_TITLE, self.show_title);
        card.options.set(CardOptions::SHOW_IMAGE, self.show_image);
        card.set_win_condition(self.win_condition)?;
        card.set_instant_win_active(self.instant_win_active);

        if playing {
            if let Err(err) = card.resume() {
                log::warn!("Card \"{}\" cannot resume play: {err}", card.name);
            }
        }
        Ok(card)
    }
}

pub(crate) fn check_version(found: u32) -> Result<()> {
    if found > FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found,
            supported: FORMAT_VERSION,
        });
    }
    Ok(())
}
