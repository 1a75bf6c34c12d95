use ndarray::{ArrayView2, s};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rule variant deciding what a completed card looks like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinCondition {
    /// Blackout: every cell of the grid has to be marked.
    #[serde(alias = "blackout")]
    Full,
    /// Any complete row, column or diagonal.
    #[serde(alias = "line")]
    Standard,
}

impl Default for WinCondition {
    fn default() -> Self {
        Self::Standard
    }
}

/// A fully marked line of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinLine {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Decides whether a card is currently won.
///
/// `items` and `marked` are the row-major cells of a `grid_size × grid_size` grid. An active instant win always
/// wins; otherwise `condition` is checked against `marked`. A grid without a single non-blank item never wins.
///
/// Fails with [`BingoError::InvalidArgument`] when the slice lengths do not match `grid_size²`, which means the
/// caller broke the grid invariant.
pub fn evaluate<S: AsRef<str>>(
    items: &[S],
    marked: &[bool],
    grid_size: usize,
    condition: WinCondition,
    instant_win_active: bool,
) -> Result<bool> {
    let board = board_view(items.len(), marked, grid_size)?;
    Ok(evaluate_board(items, board, condition, instant_win_active))
}

/// Lists every complete line in `marked`, in row, column, diagonal, anti-diagonal order.
pub fn winning_lines(marked: &[bool], grid_size: usize) -> Result<SmallVec<[WinLine; 4]>> {
    let board = board_view(marked.len(), marked, grid_size)?;
    let mut lines = SmallVec::new();
    if board.is_empty() {
        return Ok(lines);
    }

    lines.extend(
        board
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|&m| m))
            .map(|(r, _)| WinLine::Row(r)),
    );
    lines.extend(
        board
            .columns()
            .into_iter()
            .enumerate()
            .filter(|(_, column)| column.iter().all(|&m| m))
            .map(|(c, _)| WinLine::Column(c)),
    );
    if board.diag().iter().all(|&m| m) {
        lines.push(WinLine::Diagonal);
    }
    if board.slice(s![.., ..;-1]).diag().iter().all(|&m| m) {
        lines.push(WinLine::AntiDiagonal);
    }
    Ok(lines)
}

/// Evaluation over an already validated board.
fn evaluate_board<S: AsRef<str>>(
    items: &[S],
    board: ArrayView2<'_, bool>,
    condition: WinCondition,
    instant_win_active: bool,
) -> bool {
    if instant_win_active {
        return true;
    }

    if !items.iter().any(|item| is_active_item(item.as_ref())) {
        return false;
    }

    match condition {
        WinCondition::Full => board.iter().all(|&m| m),
        WinCondition::Standard => has_complete_line(board),
    }
}

fn board_view(
    items_len: usize,
    marked: &[bool],
    grid_size: usize,
) -> Result<ArrayView2<'_, bool>> {
    let expected = cell_count(grid_size);
    let invalid = BingoError::InvalidArgument {
        expected,
        items: items_len,
        marked: marked.len(),
    };

    if items_len != expected || marked.len() != expected {
        log::error!("Grid invariant violated: {invalid}");
        return Err(invalid);
    }

    ArrayView2::from_shape((grid_size, grid_size), marked).map_err(|_| invalid)
}

fn has_complete_line(board: ArrayView2<'_, bool>) -> bool {
    // an empty grid has vacuously complete diagonals
    if board.is_empty() {
        return false;
    }

    board.rows().into_iter().any(|row| row.iter().all(|&m| m))
        || board
            .columns()
            .into_iter()
            .any(|column| column.iter().all(|&m| m))
        || board.diag().iter().all(|&m| m)
        || board.slice(s![.., ..;-1]).diag().iter().all(|&m| m)
}
