//! Hint advisor client for tic-tac-toe.
//!
//! Turns a board and the active mark into a request for an external
//! language model, and turns whatever comes back into a [`HintOutcome`].
//! The client is total: every failure becomes the fallback suggestion
//! (index `-1`, fixed reasoning), so callers render a single shape.
//!
//! # Example
//!
//! ```no_run
//! use neon_advisor::{AdvisorConfig, HintAdvisor};
//! use neon_tictactoe::{Board, Mark};
//!
//! # async fn example() {
//! let advisor = HintAdvisor::from_config(&AdvisorConfig::default());
//! let outcome = advisor.request_hint(&Board::new(), Mark::X).await;
//! println!("{}", outcome.suggestion());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod advisor;
mod config;
mod error;
mod llm_client;
mod parse;
mod request;
mod suggestion;

pub use advisor::{Advisor, HintAdvisor, UnavailableAdvisor};
pub use config::{AdvisorConfig, ConfigError};
pub use error::{AdvisorError, AdvisorErrorKind};
pub use llm_client::{LlmClient, LlmConfig, LlmProvider};
pub use parse::parse_suggestion;
pub use request::{BoardFormatError, HintRequest, SYSTEM_PROMPT, decode_board, encode_board};
pub use suggestion::{FALLBACK_REASONING, HintOutcome, HintSuggestion, NO_SUGGESTION};
