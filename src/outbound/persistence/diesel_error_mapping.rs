//! Error mapping from Diesel errors to persistence errors.

use thiserror::Error;
use tracing::debug;

/// Errors surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// No row matched the requested identifier.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("conflicting record: {message}")]
    Conflict { message: String },

    /// A foreign key constraint rejected the write or delete.
    #[error("invalid reference: {message}")]
    ForeignKey { message: String },

    /// The database connection failed.
    #[error("database connection error: {message}")]
    Connection { message: String },

    /// Any other query failure.
    #[error("database query error: {message}")]
    Query { message: String },
}

impl PersistenceError {
    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a foreign key error with the given message.
    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::ForeignKey {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Map Diesel errors to persistence errors and emit debug context.
pub fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => PersistenceError::NotFound,
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => PersistenceError::conflict(info.message()),
            DatabaseErrorKind::ForeignKeyViolation => {
                PersistenceError::foreign_key(info.message())
            }
            DatabaseErrorKind::ClosedConnection => {
                PersistenceError::connection("database connection closed")
            }
            _ => PersistenceError::query(info.message()),
        },
        _ => PersistenceError::query("database error"),
    }
}
