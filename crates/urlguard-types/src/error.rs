//! Error types shared across urlguard crates.
//!
//! [`UrlguardError`] covers the failures that happen before any request is
//! served: a malformed configuration file, an unreadable path, bad JSON.
//! Pipeline failures (scoring, storage) have their own types in
//! `urlguard-core`.

use thiserror::Error;

/// Top-level error type for configuration and startup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UrlguardError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UrlguardError {
    /// Shorthand for [`UrlguardError::ConfigInvalid`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            reason: reason.into(),
        }
    }
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UrlguardError>;
