//! Contract-based move validation.
//!
//! Contracts state what must hold before a move touches a board
//! (preconditions) and what must hold afterwards (postconditions):
//! `{P} action {Q}`.

use super::rules::{detect_winner, is_full};
use super::{Board, Cell, Mark, Move, MoveError};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S, action: &A) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the board has no winner and at least one empty cell.
pub struct GameNotOver;

impl GameNotOver {
    /// Checks the precondition.
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if detect_winner(board).is_some() || is_full(board) {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Checks the precondition.
    #[instrument(skip(board))]
    pub fn check(board: &Board, action: &Move) -> Result<(), MoveError> {
        if board.is_empty(action.position) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(action.position))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly the target cell changed, from empty to the mover's mark.
pub struct OnlyTargetChanged;

impl OnlyTargetChanged {
    /// Returns true when the postcondition holds.
    #[instrument(skip(before, after))]
    pub fn holds(before: &Board, after: &Board, action: &Move) -> bool {
        let target = action.position.to_index();
        before
            .cells()
            .iter()
            .zip(after.cells())
            .enumerate()
            .all(|(i, (old, new))| {
                if i == target {
                    old.is_empty() && *new == Cell::Occupied(action.mark)
                } else {
                    old == new
                }
            })
    }
}

/// Invariant: X moves first and marks alternate, so X count is O count or O count + 1.
pub struct MarksBalanced;

impl MarksBalanced {
    /// Returns true when the invariant holds.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        let valid = x == o || x == o + 1;
        if !valid {
            warn!(x_count = x, o_count = o, "Mark balance violated");
        }
        valid
    }
}

// ─────────────────────────────────────────────────────────────
//  Move contract
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark on a board.
///
/// Preconditions:
/// - Game is not over
/// - Target cell is empty
///
/// Postconditions:
/// - Only the target cell changed
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        GameNotOver::check(board)?;
        CellIsEmpty::check(board, action)?;
        Ok(())
    }

    fn post(before: &Board, after: &Board, action: &Move) -> Result<(), MoveError> {
        if OnlyTargetChanged::holds(before, after, action) {
            Ok(())
        } else {
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: board changed outside {}",
                action.position
            )))
        }
    }
}
