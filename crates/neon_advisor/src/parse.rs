//! Normalization of untrusted advisor payloads.

use crate::error::{AdvisorError, AdvisorErrorKind};
use crate::suggestion::HintSuggestion;
use neon_tictactoe::{Board, Position};
use serde::Deserialize;
use tracing::{debug, instrument};

/// The only accepted payload shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct WireHint {
    suggested_index: serde_json::Number,
    reasoning: String,
}

/// Parses an advisor reply into a suggestion valid for `board`.
///
/// Models sometimes wrap the object in code fences or a sentence, so the
/// outermost `{...}` is cut out before strict parsing. The index must be an
/// integer naming an empty cell of `board`.
#[instrument(skip(text, board), fields(text_len = text.len()))]
pub fn parse_suggestion(text: &str, board: &Board) -> Result<HintSuggestion, AdvisorError> {
    if text.trim().is_empty() {
        return Err(AdvisorError::new(
            AdvisorErrorKind::EmptyResponse,
            "Advisor returned no text",
        ));
    }

    let object = extract_object(text).ok_or_else(|| {
        AdvisorError::new(AdvisorErrorKind::Malformed, "No JSON object in advisor reply")
    })?;

    let wire: WireHint = serde_json::from_str(object).map_err(|e| {
        AdvisorError::new(
            AdvisorErrorKind::Malformed,
            format!("Invalid hint payload: {}", e),
        )
    })?;

    let index = integral(&wire.suggested_index).ok_or_else(|| {
        AdvisorError::new(
            AdvisorErrorKind::Malformed,
            format!("suggestedIndex {} is not an integer", wire.suggested_index),
        )
    })?;

    let position = usize::try_from(index)
        .ok()
        .and_then(Position::from_index)
        .ok_or_else(|| {
            AdvisorError::new(
                AdvisorErrorKind::Malformed,
                format!("suggestedIndex {} is outside 0-8", index),
            )
        })?;

    if !board.is_empty(position) {
        return Err(AdvisorError::new(
            AdvisorErrorKind::Malformed,
            format!("suggestedIndex {} names an occupied cell", index),
        ));
    }

    debug!(%position, "Advisor payload accepted");
    Ok(HintSuggestion::new(position, wire.reasoning))
}

/// Cuts the outermost `{...}` span out of `text`.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Integer value of a JSON number; `4.0` counts, `4.5` does not.
fn integral(number: &serde_json::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 1e9)
            .map(|f| f as i64)
    })
}
