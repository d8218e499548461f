//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the manager app) ← One user-visible message              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The taxonomy is deliberately small: a record is missing (`NotFound`), the
//! schema's own rules rejected a write (`ConstraintViolation`), the store is
//! unreachable (`ConnectionFailed`), or something lower-level went wrong.

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - Reading, updating or deleting an id that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A schema constraint rejected the operation.
    ///
    /// ## When This Occurs
    /// - Inserting/updating a menu item whose category_id references no
    ///   category row (foreign key)
    /// - Inserting a duplicate category name (unique index)
    /// - A negative price reaching the store (CHECK)
    /// - Deleting a category that menu items still reference
    #[error("constraint violated ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for errors caused by the schema's own rules.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DbError::ConstraintViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound            → DbError::NotFound
/// sqlx::Error::Database (constraint)  → DbError::ConstraintViolation
/// sqlx::Error::PoolTimedOut/Closed    → DbError::ConnectionFailed
/// Other                               → DbError::Internal
/// ```
///
/// SQLite reports constraints in the message text:
/// `UNIQUE constraint failed: <table>.<column>`,
/// `FOREIGN KEY constraint failed`,
/// `CHECK constraint failed: <table>` — all three land in one variant.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                if msg.contains("UNIQUE constraint failed") {
                    DbError::ConstraintViolation {
                        constraint: "unique".to_string(),
                        message: msg,
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ConstraintViolation {
                        constraint: "foreign_key".to_string(),
                        message: msg,
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::ConstraintViolation {
                        constraint: "check".to_string(),
                        message: msg,
                    }
                } else {
                    DbError::QueryFailed(msg)
                }
            }

            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("connection pool timed out".to_string())
            }

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
