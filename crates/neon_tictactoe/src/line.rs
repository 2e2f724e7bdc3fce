//! Winning lines and win results.

use super::position::Position;
use super::types::Mark;
use serde::{Deserialize, Serialize};

/// One of the 8 index triples that win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// All lines in scan order: rows top-to-bottom, columns left-to-right,
    /// then the 0-4-8 and 2-4-6 diagonals.
    pub const ALL: [Line; 8] = [
        // Rows
        Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
        Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
        Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
        // Columns
        Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
        Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
        Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
        // Diagonals
        Line([Position::TopLeft, Position::Center, Position::BottomRight]),
        Line([Position::TopRight, Position::Center, Position::BottomLeft]),
    ];

    /// The three positions of the line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of the line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// True if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// A completed line: who won and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinResult {
    mark: Mark,
    line: Line,
}

impl WinResult {
    /// Creates a win result.
    pub fn new(mark: Mark, line: Line) -> Self {
        Self { mark, line }
    }

    /// The winning mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The winning line.
    pub fn line(&self) -> Line {
        self.line
    }
}

impl std::fmt::Display for WinResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.line.indices();
        write!(f, "{} wins on [{}, {}, {}]", self.mark, a, b, c)
    }
}
