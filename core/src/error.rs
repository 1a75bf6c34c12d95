use thiserror::Error;

use crate::CardId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BingoError {
    #[error("Invalid argument: expected {expected} cells, got {items} items and {marked} marks")]
    InvalidArgument {
        expected: usize,
        items: usize,
        marked: usize,
    },
    #[error("Cell index {index} is outside a grid of {len} cells")]
    InvalidIndex { index: usize, len: usize },
    #[error("Card has no clues to play with")]
    NoActiveItems,
    #[error("Card is not being played, squares cannot be marked")]
    NotPlaying,
    #[error("Card is being played, finish or restart it before editing")]
    NotInSetup,
    #[error("No card with id {0}")]
    CardNotFound(CardId),
    #[error("The last remaining card cannot be deleted")]
    LastCard,
    #[error("There is an unsaved draft, save or discard it first")]
    UnsavedChanges,
    #[error("Blackout needs a clue in every square")]
    BlankSquares,
    #[error("No draft is being edited")]
    NoDraft,
}

pub type Result<T> = core::result::Result<T, BingoError>;
