//! Hint suggestions and the success-or-fallback outcome.

use crate::error::AdvisorError;
use derive_getters::Getters;
use neon_tictactoe::Position;
use serde::{Deserialize, Serialize};

/// Sentinel index meaning "no concrete suggestion".
pub const NO_SUGGESTION: i32 = -1;

/// Reasoning shown whenever the advisor could not produce a hint.
pub const FALLBACK_REASONING: &str = "System overload! Make your own move.";

/// A suggested cell and a short rationale.
///
/// Serializes as `{"suggestedIndex": 4, "reasoning": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintSuggestion {
    /// Cell index 0-8, or [`NO_SUGGESTION`].
    suggested_index: i32,
    /// Short human-readable rationale.
    reasoning: String,
}

impl HintSuggestion {
    /// Creates a suggestion for `position`.
    pub fn new(position: Position, reasoning: impl Into<String>) -> Self {
        Self {
            suggested_index: position.to_index() as i32,
            reasoning: reasoning.into(),
        }
    }

    /// The fixed "no suggestion" value.
    pub fn fallback() -> Self {
        Self {
            suggested_index: NO_SUGGESTION,
            reasoning: FALLBACK_REASONING.to_string(),
        }
    }

    /// The suggested position, `None` for the sentinel.
    pub fn position(&self) -> Option<Position> {
        usize::try_from(self.suggested_index)
            .ok()
            .and_then(Position::from_index)
    }
}

impl std::fmt::Display for HintSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position() {
            Some(pos) => write!(f, "Play {}: {}", pos, self.reasoning),
            None => write!(f, "No suggestion: {}", self.reasoning),
        }
    }
}

/// Result of asking for a hint. Always carries a renderable suggestion.
///
/// A reply is passed through verbatim only if it is valid for the board it
/// was requested against: an index naming an occupied cell is a malformed
/// reply and yields [`HintOutcome::Fallback`].
#[derive(Debug, Clone)]
pub enum HintOutcome {
    /// The advisor produced a suggestion for an empty cell of the board.
    Advised(HintSuggestion),
    /// The advisor failed; the suggestion is [`HintSuggestion::fallback`].
    Fallback {
        /// The fallback suggestion.
        suggestion: HintSuggestion,
        /// Why the advisor failed.
        cause: AdvisorError,
    },
}

impl HintOutcome {
    /// Wraps a failure into the fallback outcome.
    pub fn from_failure(cause: AdvisorError) -> Self {
        HintOutcome::Fallback {
            suggestion: HintSuggestion::fallback(),
            cause,
        }
    }

    /// The suggestion to render, advised or not.
    pub fn suggestion(&self) -> &HintSuggestion {
        match self {
            HintOutcome::Advised(suggestion) => suggestion,
            HintOutcome::Fallback { suggestion, .. } => suggestion,
        }
    }

    /// Consumes the outcome, returning the suggestion.
    pub fn into_suggestion(self) -> HintSuggestion {
        match self {
            HintOutcome::Advised(suggestion) => suggestion,
            HintOutcome::Fallback { suggestion, .. } => suggestion,
        }
    }

    /// True when the advisor failed.
    pub fn is_fallback(&self) -> bool {
        matches!(self, HintOutcome::Fallback { .. })
    }

    /// The failure, if any.
    pub fn cause(&self) -> Option<&AdvisorError> {
        match self {
            HintOutcome::Advised(_) => None,
            HintOutcome::Fallback { cause, .. } => Some(cause),
        }
    }
}

impl From<Result<HintSuggestion, AdvisorError>> for HintOutcome {
    fn from(result: Result<HintSuggestion, AdvisorError>) -> Self {
        match result {
            Ok(suggestion) => HintOutcome::Advised(suggestion),
            Err(cause) => HintOutcome::from_failure(cause),
        }
    }
}
