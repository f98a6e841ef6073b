//! Error types for the MAS log generator.

use thiserror::Error;

/// Errors that can occur while generating or writing a log stream.
#[derive(Debug, Error)]
pub enum GenError {
    /// Destination could not be written (permissions, disk full, bad path)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generator configuration would draw from an empty set
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Topic name outside the known topic set
    #[error("Unknown topic: {0}")]
    InvalidTopic(String),
}

impl GenError {
    /// Creates a configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates an unknown-topic error.
    pub fn invalid_topic(name: impl std::fmt::Display) -> Self {
        Self::InvalidTopic(name.to_string())
    }
}

/// Result alias used across the generator.
pub type GenResult<T> = Result<T, GenError>;
