//! Move application and turn order.

use super::super::contracts::{Contract, MoveContract};
use super::super::{Board, Mark, Move, MoveError, Position};
use tracing::{debug, instrument};

/// Places `mark` at `index`, returning the new board.
///
/// The input board is never modified. Rejects out-of-range indices,
/// occupied cells, and boards that already have a winner or no empty cell.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
    let action = Move::new(mark, position);

    MoveContract::pre(board, &action)?;

    let next = board.with(position, mark);

    #[cfg(debug_assertions)]
    MoveContract::post(board, &next, &action)?;

    debug!(%action, "Move applied");
    Ok(next)
}

/// The mark that moves after `mark`.
pub fn next_turn(mark: Mark) -> Mark {
    mark.opponent()
}
