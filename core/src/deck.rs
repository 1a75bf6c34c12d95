use alloc::vec::Vec;

use crate::*;

/// All cards of one user, the active card and an optional draft being edited.
///
/// A deck is never empty. The draft is a detached copy of the active card: edits go there first and reach the
/// saved card only through [`Deck::save_draft`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    active: usize,
    next_id: u32,
    draft: Option<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: alloc::vec![Card::new(CardId(1))],
            active: 0,
            next_id: 2,
            draft: None,
        }
    }

    /// Builds a deck from restored cards, assigning fresh ids. An empty list yields a default deck.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>, active: usize) -> Self {
        let mut deck = Self {
            cards: Vec::new(),
            active: 0,
            next_id: 1,
            draft: None,
        };
        for card in cards {
            deck.push(card);
        }
        if deck.cards.is_empty() {
            return Self::new();
        }
        deck.active = active.min(deck.cards.len() - 1);
        deck
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn active(&self) -> &Card {
        &self.cards[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Card {
        &mut self.cards[self.active]
    }

    pub fn active_id(&self) -> CardId {
        self.active().id()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Adds a blank card and makes it active.
    pub fn add_card(&mut self) -> Result<CardId> {
        self.import_card(Card::new(CardId(0)))
    }

    /// Adds an existing card under a fresh id and makes it active.
    pub fn import_card(&mut self, card: Card) -> Result<CardId> {
        self.check_no_unsaved_changes()?;
        let id = self.push(card);
        self.active = self.cards.len() - 1;
        log::debug!("Card {id} added, deck now holds {} cards", self.cards.len());
        Ok(id)
    }

    pub fn switch_to(&mut self, id: CardId) -> Result<()> {
        let index = self.position(id)?;
        self.check_no_unsaved_changes()?;
        self.active = index;
        log::debug!("Switched to card {id}");
        Ok(())
    }

    /// Removes a card. Removing the active card activates the card that took its place, or the previous one when
    /// it was last.
    pub fn delete_card(&mut self, id: CardId) -> Result<()> {
        let index = self.position(id)?;
        if self.cards.len() == 1 {
            return Err(BingoError::LastCard);
        }
        self.check_no_unsaved_changes()?;

        self.cards.remove(index);
        if self.active > index || self.active == self.cards.len() {
            self.active -= 1;
        }
        log::debug!("Card {id} deleted, active card is {}", self.active_id());
        Ok(())
    }

    /// Starts editing the active card, or continues the running draft.
    pub fn begin_edit(&mut self) -> &mut Card {
        let active = &self.cards[self.active];
        self.draft.get_or_insert_with(|| active.clone())
    }

    pub fn draft(&self) -> Option<&Card> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Result<&mut Card> {
        self.draft.as_mut().ok_or(BingoError::NoDraft)
    }

    /// Whether the draft differs from the saved card.
    pub fn is_dirty(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| draft != self.active())
    }

    pub fn save_draft(&mut self) -> Result<()> {
        let draft = self.draft.take().ok_or(BingoError::NoDraft)?;
        log::debug!("Saved draft of card {}", draft.id());
        self.cards[self.active] = draft;
        Ok(())
    }

    pub fn discard_draft(&mut self) {
        if self.draft.take().is_some() {
            log::debug!("Discarded draft of card {}", self.active_id());
        }
    }

    fn push(&mut self, mut card: Card) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        card.set_id(id);
        self.cards.push(card);
        id
    }

    fn position(&self, id: CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|card| card.id() == id)
            .ok_or(BingoError::CardNotFound(id))
    }

    /// A clean draft is dropped, a dirty one blocks the operation.
    fn check_no_unsaved_changes(&mut self) -> Result<()> {
        if self.is_dirty() {
            return Err(BingoError::UnsavedChanges);
        }
        self.draft = None;
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
