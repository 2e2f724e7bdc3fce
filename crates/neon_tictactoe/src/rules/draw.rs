//! Draw detection.

use super::super::{Board, WinResult};
use tracing::instrument;

/// Checks if every cell holds a mark.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.is_empty())
}

/// A draw is a full board with no winner.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, win: Option<&WinResult>) -> bool {
    win.is_none() && is_full(board)
}
