//! Stateful game wrapper over the pure rules.

use super::contracts::MarksBalanced;
use super::rules::{apply_move, next_turn};
use super::{Board, Mark, Move, MoveError, Phase, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game: board, turn state and move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next. Meaningless once the game is over.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        Phase::of(&self.board)
    }

    /// Plays the current mark at `index` (0-8).
    ///
    /// On rejection the game is left untouched.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn play(&mut self, index: usize) -> Result<Phase, MoveError> {
        let mark = self.to_move;
        let board = apply_move(&self.board, index, mark).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;

        self.board = board;
        if let Some(position) = Position::from_index(index) {
            self.history.push(Move::new(mark, position));
        }
        self.to_move = next_turn(mark);

        debug_assert!(MarksBalanced::holds(&self.board), "Mark balance violated");
        debug_assert_eq!(self.history.len(), self.board.filled());

        let phase = self.phase();
        debug!(%phase, "Move played");
        if phase.is_terminal() {
            info!(%phase, moves = self.history.len(), "Game over");
        }
        Ok(phase)
    }

    /// Empty positions available to the mover.
    pub fn open_positions(&self) -> Vec<Position> {
        if self.phase().is_terminal() {
            Vec::new()
        } else {
            Position::empty(&self.board)
        }
    }

    /// Resets to the initial state in place.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        *self = Self::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Mark::X);
        game.play(4).expect("legal");
        assert_eq!(game.to_move(), Mark::O);
        game.play(0).expect("legal");
        assert_eq!(game.to_move(), Mark::X);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut game = Game::new();
        game.play(4).expect("legal");
        let before = game.clone();
        assert!(game.play(4).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        game.play(0).expect("legal");
        game.play(1).expect("legal");
        game.reset();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_open_positions_shrink_then_close() {
        let mut game = Game::new();
        assert_eq!(game.open_positions().len(), 9);
        game.play(4).expect("legal");
        assert!(!game.open_positions().contains(&Position::Center));
        assert_eq!(game.open_positions().len(), 8);

        for index in [0, 1, 3, 7] {
            game.play(index).expect("legal");
        }
        assert!(game.phase().is_terminal());
        assert!(game.open_positions().is_empty());
    }
}
