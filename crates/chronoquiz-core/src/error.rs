//! Error types for event loading and quiz sessions.
//!
//! `SourceError` is defined here rather than in `chronoquiz-sources` so the
//! loader can classify failures for retry decisions without string matching.

use thiserror::Error;

/// Errors that can occur while fetching the event list from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no usable location configured.
    #[error("source not configured: {0}")]
    NotConfigured(String),

    /// The server answered with an HTTP error status.
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The payload was an object carrying an `error` field.
    #[error("remote error: {0}")]
    Remote(String),

    /// The payload did not have the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Returns `true` if retrying cannot help.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            SourceError::NotConfigured(_) | SourceError::Malformed(_) | SourceError::Io(_)
        )
    }
}

/// Errors surfaced by the quiz core.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Fetching the event list failed after all retries.
    #[error("failed to load quiz data after {attempts} attempt(s): {source}")]
    DataFetchFailure {
        attempts: u32,
        #[source]
        source: SourceError,
    },

    /// The filters excluded every event.
    #[error("no events match the selected filters; try loosening the tag or year range")]
    EmptyResult,

    /// The event pool itself is empty.
    #[error("the event list is empty; check the data source")]
    InsufficientData,

    /// A year guess could not be understood.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation was called in a state that does not allow it.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The quiz configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QuizError {
    /// Returns `true` for errors the user can fix by retyping or changing
    /// settings without reloading the data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::EmptyResult | QuizError::InvalidInput(_) | QuizError::InvalidConfig(_)
        )
    }
}
