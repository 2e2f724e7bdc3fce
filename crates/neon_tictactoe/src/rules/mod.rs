//! Game rules for tic-tac-toe.
//!
//! Pure functions over board snapshots. Rules are kept apart from the
//! `Game` wrapper so callers holding only a `Board` can use them directly.

pub mod draw;
pub mod moves;
pub mod win;

pub use draw::{is_draw, is_full};
pub use moves::{apply_move, next_turn};
pub use win::detect_winner;
