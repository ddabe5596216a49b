use thiserror::Error;

use crate::types::Cell;

/// Errors raised by board storage and its bulk formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfRange { x: i32, y: i32 },

    #[error("cell value {0:?} cannot be stored on the board")]
    Unstorable(Cell),

    #[error("expected {expected} cells, got {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("invalid cell character '{found}' at index {index}")]
    InvalidChar { index: usize, found: char },

    /// A packed byte holds the unused `0b11` pattern.
    #[error("corrupt packed cell at index {index}: bits {bits:#04b}")]
    Corrupt { index: usize, bits: u8 },
}

/// Errors raised while reading or validating the per-turn tuning table.
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("tuning table has no rows")]
    Empty,

    #[error("invalid turn range '{0}'")]
    InvalidRange(String),

    #[error("no tuning row for difficulty {difficulty} at turn {turn}")]
    MissingRow { difficulty: u8, turn: u32 },

    #[error("failed to read tuning table: {0}")]
    Io(#[from] std::io::Error),
}
