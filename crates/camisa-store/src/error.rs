//! Store error types.

use thiserror::Error;

/// Errors raised by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Row or object not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Query against a table failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Object storage operation failed.
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// Backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Email/password pair rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session token unknown.
    #[error("session not found")]
    SessionNotFound,

    /// Session token past its expiry.
    #[error("session expired")]
    SessionExpired,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Failed to (de)serialize a record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Query(_))
    }
}
