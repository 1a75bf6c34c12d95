use core::fmt;

use serde::{Deserialize, Serialize};

/// Flat row-major index into a grid, `row * size + column`.
pub type CellIndex = usize;

/// Side length of a square bingo grid, always within [`GridSize::MIN`]..=[`GridSize::MAX`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct GridSize(u8);

impl GridSize {
    pub const MIN: Self = Self(3);
    pub const MAX: Self = Self(7);

    /// Clamps `size` into the supported range.
    pub const fn new(size: u8) -> Self {
        if size < Self::MIN.0 {
            Self::MIN
        } else if size > Self::MAX.0 {
            Self::MAX
        } else {
            Self(size)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn side(self) -> usize {
        self.0 as usize
    }

    pub const fn cell_count(self) -> usize {
        cell_count(self.side())
    }

    pub const fn index(self, row: usize, column: usize) -> CellIndex {
        row * self.side() + column
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u8> for GridSize {
    fn from(size: u8) -> Self {
        Self::new(size)
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}×{0}", self.0)
    }
}

/// Number of cells in a square grid with `side` cells per row.
pub const fn cell_count(side: usize) -> usize {
    side.saturating_mul(side)
}

/// Whether a clue counts as a real square: whitespace-only text does not.
pub fn is_active_item(item: &str) -> bool {
    !item.trim().is_empty()
}
