//! Core error types for studyroom-core.
//!
//! Nothing in here is fatal to the process. Load failures fall back to
//! defaults, save failures are reported while the in-memory state stays
//! authoritative, and invalid input is rejected before any mutation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by a [`StorageBackend`](crate::storage::StorageBackend).
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage is not reachable at all (no data directory, read-only medium, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration field
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for user input.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Goal hours must be strictly positive and finite
    #[error("{field} must be a positive number of hours, got {value}")]
    NonPositiveHours { field: &'static str, value: f64 },

    /// Adding the hours would leave the total unrepresentable
    #[error("{field} would overflow: {current} + {added} is not a finite number of hours")]
    HoursOverflow {
        field: &'static str,
        current: f64,
        added: f64,
    },

    /// No task id is left above the highest one in use
    #[error("task ids exhausted: highest id in use is {0}")]
    IdsExhausted(u64),

    /// Date did not parse as `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
