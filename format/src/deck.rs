use bingo_core::Deck;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stored shape of a whole deck together with the view settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckRecord {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub cards: Vec<CardRecord>,
    pub active_card: usize,
    pub settings: ViewSettings,
}

impl Default for DeckRecord {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            cards: vec![CardRecord::default()],
            active_card: 0,
            settings: ViewSettings::default(),
        }
    }
}

impl DeckRecord {
    /// Saved cards only; a pending draft is not part of the record.
    pub fn from_deck(deck: &Deck, settings: &ViewSettings) -> Self {
        Self {
            version: FORMAT_VERSION,
            cards: deck.cards().iter().map(CardRecord::from_card).collect(),
            active_card: deck.active_index(),
            settings: settings.clone(),
        }
    }

    pub fn into_deck(self) -> Result<(Deck, ViewSettings)> {
        check_version(self.version)?;
        let cards = self
            .cards
            .into_iter()
            .map(CardRecord::into_card)
            .collect::<Result<Vec<_>>>()?;
        Ok((
            Deck::from_cards(cards, self.active_card),
            self.settings.normalized(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_core::CardId;

    #[test]
    fn deck_record_keeps_card_order_and_active_card() {
        let mut deck = Deck::new();
        deck.active_mut().name = "First".to_string();
        deck.add_card().unwrap();
        deck.active_mut().name = "Second".to_string();
        deck.switch_to(CardId(1)).unwrap();

        let settings = ViewSettings {
            theme: ThemeName::Classic,
            ..Default::default()
        };
        let (restored, restored_settings) =
            DeckRecord::from_deck(&deck, &settings).into_deck().unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.active().name, "First");
        assert_eq!(restored.cards()[1].name, "Second");
        assert_eq!(restored_settings.theme, ThemeName::Classic);
    }

    #[test]
    fn draft_is_not_recorded() {
        let mut deck = Deck::new();
        deck.begin_edit().name = "Draft".to_string();

        let record = DeckRecord::from_deck(&deck, &ViewSettings::default());

        assert_eq!(record.cards[0].card_name, bingo_core::DEFAULT_CARD_NAME);
    }

    #[test]
    fn empty_deck_record_yields_default_deck() {
        let record = DeckRecord {
            cards: vec![],
            active_card: 3,
            ..Default::default()
        };

        let (deck, _) = record.into_deck().unwrap();

        assert_eq!(deck, Deck::new());
    }
}
