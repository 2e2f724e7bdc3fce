//! Pure tic-tac-toe rules.
//!
//! # Architecture
//!
//! - **Types**: [`Mark`], [`Cell`], [`Board`], [`Position`]
//! - **Lines**: the 8 fixed [`Line`]s and derived [`WinResult`]
//! - **Rules**: [`apply_move`], [`detect_winner`], [`is_draw`], [`next_turn`]
//! - **Contracts**: pre/postconditions enforced on every move
//! - **Game**: stateful wrapper holding board, turn and history
//!
//! # Example
//!
//! ```
//! use neon_tictactoe::{Board, Mark, apply_move, detect_winner};
//!
//! let board = apply_move(&Board::new(), 4, Mark::X)?;
//! assert!(detect_winner(&board).is_none());
//! # Ok::<(), neon_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod game;
mod line;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use line::{Line, WinResult};
pub use phases::Phase;
pub use position::Position;
pub use rules::{apply_move, detect_winner, is_draw, is_full, next_turn};
pub use types::{Board, Cell, Mark};
