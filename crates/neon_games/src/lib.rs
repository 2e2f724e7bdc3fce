//! Neon Tic-Tac-Toe front end.
//!
//! # Architecture
//!
//! - **Session**: game plus hint state as one tagged state machine
//! - **Console**: line-based terminal loop, hints fetched in the background
//!
//! Rules live in `neon_tictactoe`; the hint client lives in `neon_advisor`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod console;
pub mod session;

pub use console::{
    ConsoleCommand, apply_command, open_cells_hint, render, run_console, status_line,
};
pub use session::{HintRefused, HintSlot, HintTicket, Session, SessionPhase};
