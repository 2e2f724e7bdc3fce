//! Hint request encoding.
//!
//! The advisor sees the board as nine comma-separated tokens. An occupied
//! cell is its mark; an empty cell is its own index, so the open cells are
//! exactly the numeric labels the advisor may answer with:
//!
//! ```text
//! X, 1, 2, 3, O, 5, 6, 7, 8
//! ```

use derive_more::{Display, Error};
use neon_tictactoe::{Board, Cell, Mark};
use serde::Serialize;
use tracing::instrument;

/// Instruction sent ahead of every hint request.
pub const SYSTEM_PROMPT: &str = "You are a tic-tac-toe strategist advising the player to move. \
Cells are numbered 0-8 in row-major order; a number on the board is an open cell, \
a letter is a taken cell. Pick the best open cell: first take an immediate win, \
then block the opponent's immediate win, otherwise prefer the center, then corners. \
Answer with ONLY a JSON object of the form \
{\"suggestedIndex\": <integer 0-8>, \"reasoning\": \"<short reason, at most 10 words>\"} \
and nothing else.";

/// Board snapshot and active mark sent to the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HintRequest {
    board: Board,
    mark: Mark,
}

impl HintRequest {
    /// Creates a request for `mark` to move on `board`.
    pub fn new(board: Board, mark: Mark) -> Self {
        Self { board, mark }
    }

    /// The board snapshot the request was issued against.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark asking for advice.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The nine board tokens joined by `", "`.
    pub fn encoded_board(&self) -> String {
        encode_board(&self.board)
    }

    /// The user message carrying the encoded board and active mark.
    pub fn user_message(&self) -> String {
        format!(
            "Current board (0-8): [{}]\nCurrent player: {}",
            self.encoded_board(),
            self.mark
        )
    }
}

/// Encodes a board as nine tokens: the mark, or the index when empty.
pub fn encode_board(board: &Board) -> String {
    board
        .cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Cell::Empty => i.to_string(),
            Cell::Occupied(mark) => mark.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decodes the nine-token form produced by [`encode_board`].
///
/// Surrounding brackets and whitespace are ignored. An empty cell's token
/// must be its own index; `_` and `.` are accepted as shorthand.
#[instrument]
pub fn decode_board(text: &str) -> Result<Board, BoardFormatError> {
    let inner = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let tokens: Vec<&str> = inner.split(',').map(str::trim).collect();
    if tokens.len() != 9 {
        return Err(BoardFormatError::new(format!(
            "Expected 9 tokens, found {}",
            tokens.len()
        )));
    }

    let mut cells = [Cell::Empty; 9];
    for (i, (cell, token)) in cells.iter_mut().zip(&tokens).enumerate() {
        *cell = if let Some(mark) = Mark::from_token(token) {
            Cell::Occupied(mark)
        } else if *token == "_" || *token == "." || token.parse::<usize>().ok() == Some(i) {
            Cell::Empty
        } else {
            return Err(BoardFormatError::new(format!(
                "Invalid token '{}' at cell {}",
                token, i
            )));
        };
    }
    Ok(Board::from_cells(cells))
}

/// Board text that is not nine valid tokens.
#[derive(Debug, Clone, Display, Error)]
#[display("Board format error: {} at {}:{}", message, file, line)]
pub struct BoardFormatError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardFormatError {
    /// Creates a new board format error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_tictactoe::apply_move;

    #[test]
    fn test_empty_cells_are_self_labelled() {
        assert_eq!(encode_board(&Board::new()), "0, 1, 2, 3, 4, 5, 6, 7, 8");
    }

    #[test]
    fn test_encoding_shows_marks() {
        let board = apply_move(&Board::new(), 0, Mark::X).expect("legal");
        let board = apply_move(&board, 4, Mark::O).expect("legal");
        assert_eq!(encode_board(&board), "X, 1, 2, 3, O, 5, 6, 7, 8");
    }

    #[test]
    fn test_user_message_names_active_mark() {
        let request = HintRequest::new(Board::new(), Mark::O);
        let message = request.user_message();
        assert!(message.contains("[0, 1, 2, 3, 4, 5, 6, 7, 8]"));
        assert!(message.ends_with("Current player: O"));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let board = apply_move(&Board::new(), 8, Mark::X).expect("legal");
        let decoded = decode_board(&format!("[{}]", encode_board(&board))).expect("valid");
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_decode_accepts_shorthand() {
        let board = decode_board("x,_,_,.,o,_,_,_,_").expect("valid");
        assert_eq!(encode_board(&board), "X, 1, 2, 3, O, 5, 6, 7, 8");
    }

    #[test]
    fn test_decode_rejects_wrong_index_label() {
        assert!(decode_board("0,1,2,3,4,5,6,8,7").is_err());
        assert!(decode_board("0,1,2").is_err());
        assert!(decode_board("0,1,2,3,Z,5,6,7,8").is_err());
    }
}
