//! Error types for the protocol and fixture boundaries.
//!
//! The search core itself never fails; these errors only come from reading
//! external input.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid integer '{token}' while reading {expected}")]
    InvalidInteger {
        token: String,
        expected: &'static str,
    },

    #[error("coordinate ({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange { row: i32, col: i32, size: usize },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },

    #[error("referee offered no legal moves")]
    NoLegalMoves,

    #[error("diagram has {got} rows, expected {expected}")]
    InvalidDiagramRows { expected: usize, got: usize },

    #[error("diagram row {row} has {got} cells, expected {expected}")]
    InvalidDiagramRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid character '{character}' at row {row}, column {col} of diagram")]
    InvalidDiagramCell { character: char, row: usize, col: usize },
}

/// Convenience alias used at the crate's input boundaries.
pub type Result<T> = std::result::Result<T, Error>;
