use bingo_core::BingoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Document version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error(transparent)]
    Card(#[from] BingoError),
}

pub type Result<T> = core::result::Result<T, FormatError>;
