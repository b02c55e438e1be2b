use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmanError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileReadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Parse pipeline errors
    #[error("Syntax errors: {count} diagnostic(s) reported")]
    SyntaxErrors { count: usize },

    // Pretty-printer errors
    #[error("Invalid identifier '{identifier}' cannot be printed as source")]
    InvalidIdentifier { identifier: String },

    #[error("Output error: {0}")]
    OutputError(String),
}

impl AmanError {
    /// Create a file read error
    pub fn file_read_error(message: impl Into<String>) -> Self {
        AmanError::FileReadError(message.into())
    }

    /// Create an invalid identifier error for the pretty-printer
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        AmanError::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }
}

impl From<std::fmt::Error> for AmanError {
    fn from(err: std::fmt::Error) -> Self {
        AmanError::OutputError(err.to_string())
    }
}

// Type alias for Result with AmanError
pub type AmanResult<T> = Result<T, AmanError>;
