//! # Validation Module
//!
//! Form input validation for Cantina.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form session (presentation layer)                            │
//! │  ├── THIS MODULE: field checks before any store round-trip             │
//! │  └── Immediate user feedback, store left untouched                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (category names)                               │
//! │  ├── CHECK (price_cents >= 0)                                          │
//! │  └── Foreign key: menu_items.category_id → categories.id              │
//! │                                                                         │
//! │  Defense in depth: the two layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cantina_core::validation::{validate_item_name, validate_price_input};
//!
//! validate_item_name("Cheesecake").unwrap();
//! let price = validate_price_input("4.50").unwrap();
//! assert_eq!(price.cents(), 450);
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::Category;
use crate::{MAX_DESCRIPTION_LEN, MAX_IMAGE_BYTES, MAX_NAME_LEN, MAX_QUERY_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use cantina_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Flat White").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a menu item description.
///
/// Same shape as the name check with a larger bound; the description is a
/// required field on the form.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (an empty query lists every item)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Price Validator
// =============================================================================

/// Validates the raw text of the price field and returns the parsed amount.
///
/// ## Rules
/// - Must parse as a decimal amount with at most two places
/// - Must not be negative (zero is allowed — giveaway items exist)
///
/// ## Example
/// ```rust
/// use cantina_core::validation::validate_price_input;
///
/// assert_eq!(validate_price_input("4.50").unwrap().cents(), 450);
/// assert!(validate_price_input("four fifty").is_err());
/// ```
pub fn validate_price_input(input: &str) -> ValidationResult<Money> {
    let price: Money = input.parse().map_err(|e: crate::ParseMoneyError| {
        ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        }
    })?;

    validate_price_cents(price.cents())?;
    Ok(price)
}

/// Validates a price already expressed in cents.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Category Validator
// =============================================================================

/// Validates that a category id was selected and belongs to the known set.
///
/// The form offers a combo box filled from the store; a stale or fabricated
/// id is rejected here before the foreign key would reject it anyway.
pub fn validate_category_selection(
    category_id: Option<&str>,
    known: &[Category],
) -> ValidationResult<String> {
    let id = match category_id {
        Some(id) if !id.trim().is_empty() => id.trim(),
        _ => {
            return Err(ValidationError::Required {
                field: "category".to_string(),
            })
        }
    };

    if !known.iter().any(|c| c.id == id) {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
        });
    }

    Ok(id.to_string())
}

// =============================================================================
// Image Validator
// =============================================================================

/// Validates an optional image blob.
///
/// ## Rules
/// - Absent image is fine (the image is optional)
/// - Present image must be non-empty and at most MAX_IMAGE_BYTES
///
/// Decodability is NOT checked here: the report generator degrades
/// gracefully on an undecodable blob instead of rejecting it up front.
pub fn validate_image(image: Option<&[u8]>) -> ValidationResult<()> {
    let Some(bytes) = image else { return Ok(()) };

    if bytes.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge {
            field: "image".to_string(),
            max_bytes: MAX_IMAGE_BYTES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn known_categories() -> Vec<Category> {
        vec![
            Category {
                id: "cat-1".to_string(),
                name: "Beverages".to_string(),
                created_at: Utc::now(),
            },
            Category {
                id: "cat-2".to_string(),
                name: "Desserts".to_string(),
                created_at: Utc::now(),
            },
        ]
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Flat White").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Served hot.").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"A".repeat(3000)).is_err());
    }

    #[test]
    fn test_validate_price_input() {
        assert_eq!(validate_price_input("4.50").unwrap().cents(), 450);
        assert_eq!(validate_price_input("0").unwrap().cents(), 0);
        assert!(validate_price_input("-2").is_err());
        assert!(validate_price_input("cheap").is_err());
    }

    #[test]
    fn test_validate_category_selection() {
        let known = known_categories();

        assert_eq!(
            validate_category_selection(Some("cat-2"), &known).unwrap(),
            "cat-2"
        );
        assert!(matches!(
            validate_category_selection(None, &known),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_category_selection(Some(""), &known),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_category_selection(Some("cat-404"), &known),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image(None).is_ok());
        assert!(validate_image(Some(&[1, 2, 3])).is_ok());
        assert!(validate_image(Some(&[])).is_err());

        let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            validate_image(Some(&oversized)),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  latte  ").unwrap(), "latte");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }
}
