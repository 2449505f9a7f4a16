//! Core error types for taskmind-core.
//!
//! The analysis functions are total and never return these. Errors only
//! surface at the boundaries: building a [`TaskRecord`](crate::TaskRecord)
//! from loose input, loading configuration, talking to SQLite, or asking an
//! external advisor.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskmind-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Advisor errors
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored row could not be turned back into a task
    #[error("Corrupt task row '{id}': {source}")]
    CorruptRow {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised while building task records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Unknown status string
    #[error("Unknown task status '{0}' (expected pending, in-progress or done)")]
    UnknownStatus(String),

    /// Unknown priority string
    #[error("Unknown task priority '{0}' (expected low, medium or high)")]
    UnknownPriority(String),

    /// Invalid timestamp
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failures from an advisor backend.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// The backend is not configured or not reachable
    #[error("Advisor '{0}' is unavailable")]
    Unavailable(String),

    /// The backend did not answer in time
    #[error("Advisor '{name}' timed out after {timeout_secs} seconds")]
    Timeout { name: String, timeout_secs: u64 },

    /// The backend answered with something that does not fit the result shape
    #[error("Advisor '{name}' returned an invalid response: {message}")]
    InvalidResponse { name: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_errors_convert_into_core_error() {
        let err: CoreError = ValidationError::EmptyField("title").into();
        assert_eq!(
            err.to_string(),
            "Validation error: Field 'title' must not be empty"
        );

        let err: CoreError = AdvisorError::Unavailable("remote".into()).into();
        assert!(matches!(err, CoreError::Advisor(AdvisorError::Unavailable(_))));

        let err: CoreError = ConfigError::UnknownKey("assistant.mood".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key: assistant.mood"
        );
    }

    #[test]
    fn sqlite_errors_map_to_query_failed() {
        let err: CoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, CoreError::Database(DatabaseError::QueryFailed(_))));
    }
}
