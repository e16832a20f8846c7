//! Error types for exlang-core

use thiserror::Error;

use crate::value::TypeHint;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in exlang-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Unknown type hint name
    #[error("Unknown type hint: {0}")]
    InvalidTypeHint(String),

    /// A literal cannot be coerced to its forced type hint
    #[error("Cannot coerce '{raw}' to {hint}")]
    TypeMismatch { raw: String, hint: TypeHint },

    /// A sink rejected a write
    #[error("Sink error: {0}")]
    Sink(String),
}

impl Error {
    /// Create a new sink error with a message
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Error::Sink(msg.into())
    }
}
