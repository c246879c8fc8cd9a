//! Error types.
//!
//! - `ParseError`: the library-level failure when text cannot become a `Dataset`
//! - `AppError`: what the `linreg` binary reports, with a process exit code

use thiserror::Error;

/// Failure to build a `Dataset` from delimited text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input had no header row at all.
    #[error("missing header row")]
    MissingHeader,

    /// A field could not be read as a floating-point number.
    #[error("line {line}, column {column}: invalid number '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    /// The underlying CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::new(2, format!("Failed to parse dataset: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
