//! # API Error Type
//!
//! Unified error type for the command surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cantina                                │
//! │                                                                         │
//! │  Front End                    Command Layer                             │
//! │  ─────────                    ─────────────                             │
//! │                                                                         │
//! │  save button                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ├── ValidationError ─── (store never touched) ──┐       │  │
//! │  │         ├── DbError ─────────── NotFound / Constraint ──┼──────►│  │
//! │  │         └── ReportError ─────── render / print ─────────┘       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One user-visible message; the form state is left untouched            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use cantina_core::ValidationError;
use cantina_db::DbError;
use cantina_report::ReportError;

/// API error surfaced by commands.
///
/// Carries a machine-readable `code` and the human-readable `message`
/// the front end displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed before reaching the store
    ValidationError,

    /// The schema rejected the write (bad reference, duplicate)
    ConstraintViolation,

    /// Database operation failed
    DatabaseError,

    /// Report rendering/preview/printing failed
    ReportError,

    /// Anything unexpected
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConstraintViolation {
                constraint,
                message,
            } => {
                tracing::warn!(constraint = %constraint, "Constraint violation: {message}");
                let user_message = match constraint.as_str() {
                    "foreign_key" => "The selected category does not exist".to_string(),
                    "unique" => "A record with that name already exists".to_string(),
                    _ => "The store rejected the change".to_string(),
                };
                ApiError::new(ErrorCode::ConstraintViolation, user_message)
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {e}");
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {e}");
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {e}");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {e}");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts report errors to API errors.
impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::new(ErrorCode::ReportError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
