//! Form error taxonomy
//!
//! Field validation failures are not errors in the `Result` sense: they are
//! carried as data in [`ValidationResult`](super::ValidationResult). Only
//! misconfiguration and handler failures are represented here.

use thiserror::Error;

/// Programmer error in a form's field configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("field `{0}` is already registered")]
    DuplicateField(String),
    #[error("field `{0}` is not registered")]
    UnknownField(String),
}

/// Failure reported by a submit handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmissionError {
    message: String,
}

impl SubmissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Displayable message for the screen
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<anyhow::Error> for SubmissionError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err.to_string())
    }
}
