//! # Domain Types
//!
//! Core domain types used throughout Cantina.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    MenuItem     │   │ MenuItemSummary │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name (unique)  │◄──│  category_id    │   │  name           │       │
//! │  │                 │   │  price_cents    │   │  price_cents    │       │
//! │  └─────────────────┘   │  image (blob)   │   │  category_name  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  NewMenuItem  — insert payload (no id, no timestamps)                  │
//! │  MenuItemPatch — update payload (every field optional)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Summaries deliberately omit the image blob: they back the navigable
//! result set, and paging through hundreds of rows must not drag every
//! image across the connection. The full record is fetched by id when a
//! row is shown in the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A named grouping that menu items belong to.
///
/// Created at schema initialization (six fixed defaults); referenced by
/// menu items and never deleted while referenced (enforced by the store's
/// foreign key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across categories.
    pub name: String,

    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// One sellable cafeteria product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the form and on the report.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Price in cents (smallest currency unit), never negative.
    pub price_cents: i64,

    /// Category this item belongs to. Always resolves to an existing
    /// Category row.
    pub category_id: String,

    /// Category display name, denormalized from the join for the form
    /// and the report.
    pub category_name: String,

    /// Optional image blob (PNG/JPEG/BMP bytes as uploaded).
    pub image: Option<Vec<u8>>,

    /// Optional label for the image blob (original file name).
    pub image_name: Option<String>,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the item carries an image blob.
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

// =============================================================================
// Insert / Update Payloads
// =============================================================================

/// Payload for inserting a new menu item.
///
/// The id and timestamps are generated by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_id: String,
    pub image: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

/// Partial update for an existing menu item.
///
/// Only named (Some) fields are overwritten; everything else retains its
/// stored value. An absent image keeps the stored blob, which is how the
/// form expresses "I did not touch the picture".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category_id: Option<String>,
    pub image: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

impl MenuItemPatch {
    /// True when the patch names no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.category_id.is_none()
            && self.image.is_none()
            && self.image_name.is_none()
    }
}

// =============================================================================
// Menu Item Summary
// =============================================================================

/// Blob-free row used to drive search results and next/previous navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItemSummary {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub category_name: String,
}

impl MenuItemSummary {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

impl From<&MenuItem> for MenuItemSummary {
    fn from(item: &MenuItem) -> Self {
        MenuItemSummary {
            id: item.id.clone(),
            name: item.name.clone(),
            price_cents: item.price_cents,
            category_name: item.category_name.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> MenuItem {
        MenuItem {
            id: "11111111-1111-1111-1111-111111111111".to_string(),
            name: "Cheesecake".to_string(),
            description: "Baked New York style".to_string(),
            price_cents: 450,
            category_id: "c0000000-0000-0000-0000-000000000006".to_string(),
            category_name: "Desserts".to_string(),
            image: None,
            image_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_price_accessor() {
        let item = sample_item();
        assert_eq!(item.price(), Money::from_cents(450));
        assert!(!item.has_image());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(MenuItemPatch::default().is_empty());

        let patch = MenuItemPatch {
            price_cents: Some(500),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_summary_from_item() {
        let item = sample_item();
        let summary = MenuItemSummary::from(&item);
        assert_eq!(summary.id, item.id);
        assert_eq!(summary.name, "Cheesecake");
        assert_eq!(summary.category_name, "Desserts");
        assert_eq!(summary.price(), Money::from_cents(450));
    }
}
