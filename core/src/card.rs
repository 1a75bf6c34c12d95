use alloc::string::String;
use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_CARD_NAME: &str = "My Bingo Card";

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// What a card shows above its grid.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CardOptions: u8 {
        const SHOW_TITLE = 1;
        const SHOW_IMAGE = 1 << 1;
    }
}

impl Default for CardOptions {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardMode {
    /// Clues are being written, squares cannot be marked.
    Setup,
    Play,
}

impl Default for CardMode {
    fn default() -> Self {
        Self::Setup
    }
}

/// Change of the derived win state caused by a single mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WinTransition {
    Unchanged,
    /// The card just became won; this is the moment to celebrate.
    Achieved,
    Revoked,
}

impl WinTransition {
    pub const fn is_fresh_win(self) -> bool {
        matches!(self, Self::Achieved)
    }
}

/// A single bingo card: configuration, play progress and the cached win flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    pub name: String,
    pub options: CardOptions,
    /// Opaque image reference, usually a data URL. Never decoded here.
    pub image: Option<String>,
    /// Free-text rule that grants victory when the player reports it happened.
    pub instant_win_text: String,
    instant_win_active: bool,
    win_condition: WinCondition,
    grid: Grid,
    mode: CardMode,
    won: bool,
}

impl Card {
    pub fn new(id: CardId) -> Self {
        Self::with_grid(id, Grid::default())
    }

    pub fn with_grid(id: CardId, grid: Grid) -> Self {
        Self {
            id,
            name: String::from(DEFAULT_CARD_NAME),
            options: CardOptions::default(),
            image: None,
            instant_win_text: String::new(),
            instant_win_active: false,
            win_condition: WinCondition::default(),
            grid,
            mode: CardMode::Setup,
            won: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: CardId) {
        self.id = id;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn mode(&self) -> CardMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, CardMode::Play)
    }

    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    pub fn instant_win_active(&self) -> bool {
        self.instant_win_active
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Writes a clue. Edits are allowed while playing and re-evaluate the win state.
    ///
    /// Blanking a square also drops its mark. Blanking is refused during a blackout game.
    pub fn edit_item(&mut self, index: CellIndex, text: impl Into<String>) -> Result<WinTransition> {
        let text = text.into();
        let blank = !is_active_item(&text);
        if blank && self.needs_every_clue() && self.grid.is_active(index)? {
            return Err(BingoError::BlankSquares);
        }
        self.grid.set_item(index, text)?;
        if blank && self.grid.set_marked(index, false)? {
            log::debug!("Card {} square {} blanked, mark dropped", self.id, index);
        }
        Ok(self.refresh_win())
    }

    /// Empties every clue.
    pub fn clear_items(&mut self) -> Result<()> {
        self.check_setup()?;
        self.grid.clear_items();
        Ok(())
    }

    pub fn start_game(&mut self) -> Result<WinTransition> {
        self.check_setup()?;
        self.check_playable(self.win_condition)?;
        self.mode = CardMode::Play;
        log::debug!("Card {} started with {} clues", self.id, self.grid.active_count());
        Ok(self.refresh_win())
    }

    /// Marks or unmarks a square. Blank squares are not real clues and ignore the toggle.
    pub fn toggle_square(&mut self, index: CellIndex) -> Result<WinTransition> {
        if !self.is_playing() {
            return Err(BingoError::NotPlaying);
        }
        if !self.grid.is_active(index)? {
            return Ok(WinTransition::Unchanged);
        }
        self.grid.toggle(index)?;
        Ok(self.refresh_win())
    }

    pub fn set_instant_win_active(&mut self, active: bool) -> WinTransition {
        self.instant_win_active = active;
        self.refresh_win()
    }

    /// Switching to blackout in the middle of a game is refused while any square is blank.
    pub fn set_win_condition(&mut self, condition: WinCondition) -> Result<WinTransition> {
        if self.is_playing() && condition == WinCondition::Full {
            self.check_playable(condition)?;
        }
        self.win_condition = condition;
        Ok(self.refresh_win())
    }

    /// Changes the grid size. The card counts as not won until the next mutation re-evaluates it.
    ///
    /// A blackout game in progress can only shrink.
    pub fn resize(&mut self, size: GridSize) -> Result<()> {
        if size > self.size() && self.needs_every_clue() {
            return Err(BingoError::BlankSquares);
        }
        self.grid.resize(size);
        self.won = false;
        Ok(())
    }

    /// Drops all marks and the instant win and goes back to setup.
    pub fn restart(&mut self) {
        if self.grid.clear_marks() {
            log::debug!("Card {} marks cleared", self.id);
        }
        self.instant_win_active = false;
        self.mode = CardMode::Setup;
        self.won = false;
    }

    /// Resumes play of a restored card without reporting a win transition.
    pub fn resume(&mut self) -> Result<()> {
        self.check_playable(self.win_condition)?;
        self.mode = CardMode::Play;
        self.won = self.evaluate();
        Ok(())
    }

    fn evaluate(&self) -> bool {
        self.is_playing()
            && self
                .grid
                .evaluate(self.win_condition, self.instant_win_active)
    }

    fn refresh_win(&mut self) -> WinTransition {
        let won = self.evaluate();
        let transition = match (self.won, won) {
            (false, true) => WinTransition::Achieved,
            (true, false) => WinTransition::Revoked,
            _ => WinTransition::Unchanged,
        };
        if transition != WinTransition::Unchanged {
            log::debug!("Card {} win state: {:?}", self.id, transition);
        }
        self.won = won;
        transition
    }

    fn needs_every_clue(&self) -> bool {
        self.is_playing() && self.win_condition == WinCondition::Full
    }

    fn check_playable(&self, condition: WinCondition) -> Result<()> {
        let active = self.grid.active_count();
        if active == 0 {
            return Err(BingoError::NoActiveItems);
        }
        if condition == WinCondition::Full && active < self.grid.len() {
            return Err(BingoError::BlankSquares);
        }
        Ok(())
    }

    fn check_setup(&self) -> Result<()> {
        match self.mode {
            CardMode::Setup => Ok(()),
            CardMode::Play => Err(BingoError::NotInSetup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_card(size: u8) -> Card {
        let mut card = Card::with_grid(CardId(1), Grid::new(GridSize::new(size)));
        for i in 0..card.grid().len() {
            card.edit_item(i, "clue").unwrap();
        }
        card
    }

    #[test]
    fn new_card_defaults() {
        let card = Card::new(CardId(7));

        assert_eq!(card.name, DEFAULT_CARD_NAME);
        assert_eq!(card.size(), GridSize::new(3));
        assert_eq!(card.mode(), CardMode::Setup);
        assert_eq!(card.win_condition(), WinCondition::Standard);
        assert!(card.options.contains(CardOptions::SHOW_TITLE | CardOptions::SHOW_IMAGE));
        assert!(!card.is_won());
    }

    #[test]
    fn start_requires_a_clue() {
        let mut card = Card::new(CardId(1));
        assert_eq!(card.start_game(), Err(BingoError::NoActiveItems));

        card.edit_item(0, "   ").unwrap();
        assert_eq!(card.start_game(), Err(BingoError::NoActiveItems));

        card.edit_item(0, "clue").unwrap();
        assert_eq!(card.start_game(), Ok(WinTransition::Unchanged));
        assert!(card.is_playing());
    }

    #[test]
    fn marking_needs_play_mode() {
        let mut card = filled_card(3);
        assert_eq!(card.toggle_square(0), Err(BingoError::NotPlaying));
    }

    #[test]
    fn completing_a_line_is_reported_once() {
        let mut card = filled_card(3);
        card.start_game().unwrap();

        assert_eq!(card.toggle_square(0).unwrap(), WinTransition::Unchanged);
        assert_eq!(card.toggle_square(1).unwrap(), WinTransition::Unchanged);
        assert_eq!(card.toggle_square(2).unwrap(), WinTransition::Achieved);
        assert!(card.is_won());

        assert_eq!(card.toggle_square(4).unwrap(), WinTransition::Unchanged);
        assert_eq!(card.toggle_square(1).unwrap(), WinTransition::Revoked);
        assert!(!card.is_won());
    }

    #[test]
    fn blank_squares_ignore_toggles() {
        let mut card = filled_card(3);
        card.edit_item(4, "").unwrap();
        card.start_game().unwrap();

        assert_eq!(card.toggle_square(4).unwrap(), WinTransition::Unchanged);
        assert!(!card.grid().is_marked(4).unwrap());
        assert!(card.toggle_square(9).is_err());
    }

    #[test]
    fn instant_win_wins_and_restart_clears_it() {
        let mut card = filled_card(3);
        card.start_game().unwrap();

        assert_eq!(card.set_instant_win_active(true), WinTransition::Achieved);
        assert_eq!(card.set_instant_win_active(true), WinTransition::Unchanged);

        card.restart();
        assert!(!card.is_won());
        assert!(!card.instant_win_active());
        assert_eq!(card.mode(), CardMode::Setup);
    }

    #[test]
    fn switching_condition_reevaluates() {
        let mut card = filled_card(3);
        card.start_game().unwrap();
        for i in [0, 1, 2] {
            card.toggle_square(i).unwrap();
        }

        assert_eq!(card.set_win_condition(WinCondition::Full), Ok(WinTransition::Revoked));
        assert_eq!(card.set_win_condition(WinCondition::Standard), Ok(WinTransition::Achieved));
    }

    #[test]
    fn blackout_refuses_blank_squares() {
        let mut card = filled_card(3);
        card.edit_item(8, "").unwrap();
        card.set_win_condition(WinCondition::Full).unwrap();
        assert_eq!(card.start_game(), Err(BingoError::BlankSquares));
        assert_eq!(card.resume(), Err(BingoError::BlankSquares));
        assert_eq!(card.mode(), CardMode::Setup);

        card.set_win_condition(WinCondition::Standard).unwrap();
        card.start_game().unwrap();
        assert_eq!(card.set_win_condition(WinCondition::Full), Err(BingoError::BlankSquares));
        assert_eq!(card.win_condition(), WinCondition::Standard);

        card.edit_item(8, "late clue").unwrap();
        assert_eq!(card.set_win_condition(WinCondition::Full), Ok(WinTransition::Unchanged));
    }

    #[test]
    fn blackout_game_keeps_every_square_filled() {
        let mut card = filled_card(3);
        card.set_win_condition(WinCondition::Full).unwrap();
        card.start_game().unwrap();

        assert_eq!(card.edit_item(4, " "), Err(BingoError::BlankSquares));
        assert_eq!(card.grid().item(4).unwrap(), "clue");
        assert_eq!(card.resize(GridSize::new(4)), Err(BingoError::BlankSquares));
        assert_eq!(card.size(), GridSize::new(3));

        for i in 0..8 {
            assert_eq!(card.toggle_square(i).unwrap(), WinTransition::Unchanged);
        }
        assert!(card.toggle_square(8).unwrap().is_fresh_win());
        assert_eq!(card.edit_item(8, "other clue"), Ok(WinTransition::Unchanged));
    }

    #[test]
    fn blanking_a_marked_square_drops_its_mark() {
        let mut card = filled_card(3);
        card.start_game().unwrap();
        for i in [0, 1] {
            card.toggle_square(i).unwrap();
        }
        assert!(card.toggle_square(2).unwrap().is_fresh_win());

        assert_eq!(card.edit_item(2, "").unwrap(), WinTransition::Revoked);
        assert!(!card.grid().is_marked(2).unwrap());
        assert_eq!(card.toggle_square(2).unwrap(), WinTransition::Unchanged);
        assert!(!card.grid().is_marked(2).unwrap());

        // a fresh clue starts unmarked
        assert_eq!(card.edit_item(2, "new clue").unwrap(), WinTransition::Unchanged);
        assert!(card.toggle_square(2).unwrap().is_fresh_win());
    }

    #[test]
    fn resize_resets_win_without_reevaluating() {
        let mut card = filled_card(3);
        card.start_game().unwrap();
        card.set_instant_win_active(true);
        assert!(card.is_won());

        card.resize(GridSize::new(4)).unwrap();

        assert!(!card.is_won());
        assert_eq!(card.grid().len(), 16);
        assert_eq!(card.set_instant_win_active(true), WinTransition::Achieved);
    }

    #[test]
    fn clear_items_only_in_setup() {
        let mut card = filled_card(3);
        card.start_game().unwrap();
        assert_eq!(card.clear_items(), Err(BingoError::NotInSetup));

        card.restart();
        card.clear_items().unwrap();
        assert_eq!(card.grid().active_count(), 0);
    }

    #[test]
    fn resume_restores_win_silently() {
        let mut card = filled_card(3);
        card.set_instant_win_active(true);
        card.resume().unwrap();

        assert!(card.is_won());
        assert_eq!(card.set_instant_win_active(true), WinTransition::Unchanged);
    }

    #[test]
    fn only_blanking_the_winning_line_revokes_win() {
        let mut card = filled_card(3);
        card.start_game().unwrap();
        for i in [0, 4, 8] {
            card.toggle_square(i).unwrap();
        }
        assert!(card.is_won());

        for i in [1, 2, 3, 5, 6, 7] {
            assert_eq!(card.edit_item(i, "").unwrap(), WinTransition::Unchanged);
        }
        assert_eq!(card.edit_item(8, " ").unwrap(), WinTransition::Revoked);
        assert_eq!(card.grid().active_count(), 2);
    }
}
