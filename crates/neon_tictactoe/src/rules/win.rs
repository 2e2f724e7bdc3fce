//! Win detection.

use super::super::{Board, Cell, Line, WinResult};
use tracing::instrument;

/// Returns the first line, in [`Line::ALL`] order, holding three
/// identical marks.
#[instrument(skip(board))]
pub fn detect_winner(board: &Board) -> Option<WinResult> {
    Line::ALL.into_iter().find_map(|line| {
        let [a, b, c] = line.positions();
        match board.get(a) {
            Cell::Occupied(mark) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some(WinResult::new(mark, line))
            }
            _ => None,
        }
    })
}
