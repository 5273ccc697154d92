// src/error.rs

//! Unified error handling for the story search client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote search failed (transport, status or payload)
    #[error("Fetch failed for {query}: {message}")]
    Fetch { query: String, message: String },

    /// A tagged action record named a discriminator outside the closed set.
    /// This is a caller defect and must not be suppressed.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Preference backend could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error for the given query.
    pub fn fetch(query: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            query: query.into(),
            message: message.to_string(),
        }
    }

    /// Create an unknown action error.
    pub fn unknown_action(discriminator: impl Into<String>) -> Self {
        Self::UnknownAction(discriminator.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::StorageUnavailable(message.to_string())
    }
}
