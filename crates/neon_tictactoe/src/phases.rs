//! Derived game phase.

use super::rules::{detect_winner, is_draw};
use super::{Board, WinResult};
use serde::{Deserialize, Serialize};

/// Phase of a game, always recomputed from the board.
///
/// `Won` and `Drawn` are absorbing: no move leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No winner and at least one empty cell.
    InProgress,
    /// Three in a row.
    Won(WinResult),
    /// Full board, no winner.
    Drawn,
}

impl Phase {
    /// Derives the phase of a board.
    pub fn of(board: &Board) -> Self {
        let win = detect_winner(board);
        match win {
            Some(win) => Phase::Won(win),
            None if is_draw(board, None) => Phase::Drawn,
            None => Phase::InProgress,
        }
    }

    /// True for `Won` and `Drawn`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::InProgress)
    }

    /// The win result, if any.
    pub fn win(&self) -> Option<&WinResult> {
        match self {
            Phase::Won(win) => Some(win),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::InProgress => write!(f, "In progress"),
            Phase::Won(win) => write!(f, "{}", win),
            Phase::Drawn => write!(f, "Draw"),
        }
    }
}
