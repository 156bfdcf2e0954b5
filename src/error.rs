//! Error types for folio.
//!
//! `FolioError` is `Clone` so a single failed fetch can be handed to every
//! caller that joined the same in-flight request.

use thiserror::Error;

/// Errors produced by the data gateway and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FolioError {
    /// Network error, timeout, non-2xx status or non-200 envelope code.
    ///
    /// Recovered locally by fixture fallback on the read path.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No static fallback could be produced for a record.
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Contact-form or newsletter delivery failed. The message is shown to users as-is.
    #[error("{0}")]
    Submission(String),

    /// Caller input was rejected before any network activity.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A payload did not match the record shape it was requested as.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Client storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Decode(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FolioError>;
