use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::*;

/// Reshapes a card's cells for a grid with `new_size` cells per row.
///
/// Values are kept positionally up to the smaller of the two lengths and new cells start blank and unmarked.
/// Shrinking drops the trailing cells for good: growing back afterwards does not bring them back.
pub fn resize<S: Clone + Default>(items: &[S], marked: &[bool], new_size: usize) -> (Vec<S>, Vec<bool>) {
    let len = cell_count(new_size);
    (reshape(items, len), reshape(marked, len))
}

fn reshape<T: Clone + Default>(cells: &[T], len: usize) -> Vec<T> {
    let keep = cells.len().min(len);
    let mut reshaped = Vec::with_capacity(len);
    reshaped.extend_from_slice(&cells[..keep]);
    reshaped.resize_with(len, T::default);
    reshaped
}

/// Clues and marks of one card, kept at exactly `size²` cells each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    items: Vec<String>,
    marked: Vec<bool>,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        let len = size.cell_count();
        Self {
            size,
            items: alloc::vec![String::new(); len],
            marked: alloc::vec![false; len],
        }
    }

    pub fn from_parts(size: GridSize, items: Vec<String>, marked: Vec<bool>) -> Result<Self> {
        let expected = size.cell_count();
        if items.len() != expected || marked.len() != expected {
            return Err(BingoError::InvalidArgument {
                expected,
                items: items.len(),
                marked: marked.len(),
            });
        }
        Ok(Self {
            size,
            items,
            marked,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn marked(&self) -> &[bool] {
        &self.marked
    }

    pub fn item(&self, index: CellIndex) -> Result<&str> {
        let index = self.validate_index(index)?;
        Ok(&self.items[index])
    }

    pub fn is_marked(&self, index: CellIndex) -> Result<bool> {
        let index = self.validate_index(index)?;
        Ok(self.marked[index])
    }

    pub fn is_active(&self, index: CellIndex) -> Result<bool> {
        self.item(index).map(is_active_item)
    }

    /// Number of cells holding a non-blank clue.
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| is_active_item(item)).count()
    }

    pub fn set_item(&mut self, index: CellIndex, text: impl Into<String>) -> Result<()> {
        let index = self.validate_index(index)?;
        self.items[index] = text.into();
        Ok(())
    }

    /// Flips a mark and returns the new one.
    pub fn toggle(&mut self, index: CellIndex) -> Result<bool> {
        let index = self.validate_index(index)?;
        self.marked[index] = !self.marked[index];
        Ok(self.marked[index])
    }

    /// Returns whether the mark changed.
    pub fn set_marked(&mut self, index: CellIndex, marked: bool) -> Result<bool> {
        let index = self.validate_index(index)?;
        let changed = self.marked[index] != marked;
        self.marked[index] = marked;
        Ok(changed)
    }

    pub fn clear_items(&mut self) {
        self.items.iter_mut().for_each(String::clear);
    }

    /// Returns whether any mark was set.
    pub fn clear_marks(&mut self) -> bool {
        let had_marks = self.marked.contains(&true);
        self.marked.fill(false);
        had_marks
    }

    pub fn resize(&mut self, size: GridSize) {
        if size == self.size {
            return;
        }
        let (items, marked) = resize(&self.items, &self.marked, size.side());
        log::debug!("Grid resized from {} to {}", self.size, size);
        self.size = size;
        self.items = items;
        self.marked = marked;
    }

    pub fn evaluate(&self, condition: WinCondition, instant_win_active: bool) -> bool {
        evaluate(
            &self.items,
            &self.marked,
            self.size.side(),
            condition,
            instant_win_active,
        )
        .unwrap_or(false)
    }

    pub fn winning_lines(&self) -> SmallVec<[WinLine; 4]> {
        winning_lines(&self.marked, self.size.side()).unwrap_or_default()
    }

    fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.items.len() {
            Ok(index)
        } else {
            Err(BingoError::InvalidIndex {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}
