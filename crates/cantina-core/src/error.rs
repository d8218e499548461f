//! # Error Types
//!
//! Domain-specific error types for cantina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cantina-core errors (this file)                                       │
//! │  └── ValidationError  - Form input failures, caught before the store   │
//! │                                                                         │
//! │  cantina-db errors (separate crate)                                    │
//! │  └── DbError          - NotFound / ConstraintViolation / Connection    │
//! │                                                                         │
//! │  cantina-report errors (separate crate)                                │
//! │  └── ReportError      - Render / document / print failures             │
//! │                                                                         │
//! │  App errors (apps/manager)                                             │
//! │  └── ApiError         - What the front end displays                    │
//! │                                                                         │
//! │  Flow: ValidationError → (short-circuits) — DbError → ApiError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
///
/// These occur when user input does not meet requirements. They are raised
/// before the data-access layer is reached, so a failed validation never
/// touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., a price that does not parse).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g., an unknown category).
    #[error("{field} must be one of the known {field} values")]
    NotAllowed { field: String },

    /// A blob exceeds the allowed size.
    #[error("{field} exceeds the maximum size of {max_bytes} bytes")]
    TooLarge { field: String, max_bytes: usize },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");

        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }
}
