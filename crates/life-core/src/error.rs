//! Error types for the grid engine and its controller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimension: {rows}x{columns} (rows and columns must be positive)")]
    InvalidDimension { rows: i64, columns: i64 },

    #[error("Out of bounds: ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: usize,
        columns: usize,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for failures a caller can shrug off, like a click just past the edge
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. } | Error::InvalidCommand(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
