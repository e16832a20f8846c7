//! Compiler error types

use thiserror::Error;

/// Result type for compilation
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Errors that can occur while compiling exlang markup
#[derive(Debug, Error)]
pub enum CompileError {
    /// XML error from the underlying reader
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed markup (not even a tree)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed tree that violates the structural contract
    ///
    /// Always carries the complete batch of findings, never just the first.
    #[error("Invalid exlang document:\n{}", format_batch(.0))]
    Validation(Vec<String>),

    /// Core error (addressing, coercion, sink rejection)
    #[error(transparent)]
    Core(#[from] exlang_core::Error),
}

impl CompileError {
    /// Check whether this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, CompileError::Validation(_))
    }

    /// The validation messages, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            CompileError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_batch(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
