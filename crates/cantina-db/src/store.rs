//! # MenuStore Capability Trait
//!
//! The contract between the presentation layer and the data-access layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Capability Mediation                                │
//! │                                                                         │
//! │  Form session / commands                                               │
//! │       │         (written against the trait, not the implementation)    │
//! │       ▼                                                                 │
//! │  MenuStore: create / read / update / delete / search / list / cats     │
//! │       ▲                                                                 │
//! │       │ implemented by                                                  │
//! │  Database (SQLite repositories)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The front end and the SQLite implementation vary independently: the
//! command layer is generic over `S: MenuStore` and never names a pool or
//! a repository.

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use cantina_core::{Category, MenuItem, MenuItemPatch, MenuItemSummary, NewMenuItem};

/// The capability set the presentation layer may exercise against the store.
///
/// Semantics:
/// - `read` fails with `NotFound` for an absent id (it does not return an
///   Option; callers want the record or the error message)
/// - `create`/`update` fail with `ConstraintViolation` for an invalid
///   category reference and leave the store unchanged
/// - `search` matches a case-insensitive substring of the item or category
///   name; the empty term behaves as `list_all`
/// - only `read`, `search`, `list_all` and `categories` are idempotent
#[allow(async_fn_in_trait)]
pub trait MenuStore {
    /// Inserts a new menu item and returns the stored record.
    async fn create(&self, new_item: NewMenuItem) -> DbResult<MenuItem>;

    /// Returns the menu item with the given id.
    async fn read(&self, id: &str) -> DbResult<MenuItem>;

    /// Overwrites the patch's named fields and returns the updated record.
    async fn update(&self, id: &str, patch: MenuItemPatch) -> DbResult<MenuItem>;

    /// Removes the menu item with the given id.
    async fn delete(&self, id: &str) -> DbResult<()>;

    /// Returns summaries matching the term, ordered by name.
    async fn search(&self, term: &str) -> DbResult<Vec<MenuItemSummary>>;

    /// Returns every summary, ordered by name.
    async fn list_all(&self) -> DbResult<Vec<MenuItemSummary>>;

    /// Returns the known categories, ordered by name.
    async fn categories(&self) -> DbResult<Vec<Category>>;
}

impl MenuStore for Database {
    async fn create(&self, new_item: NewMenuItem) -> DbResult<MenuItem> {
        self.menu_items().insert(&new_item).await
    }

    async fn read(&self, id: &str) -> DbResult<MenuItem> {
        self.menu_items()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))
    }

    async fn update(&self, id: &str, patch: MenuItemPatch) -> DbResult<MenuItem> {
        self.menu_items().update(id, &patch).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        self.menu_items().delete(id).await
    }

    async fn search(&self, term: &str) -> DbResult<Vec<MenuItemSummary>> {
        self.menu_items().search(term).await
    }

    async fn list_all(&self) -> DbResult<Vec<MenuItemSummary>> {
        self.menu_items().list_all().await
    }

    async fn categories(&self) -> DbResult<Vec<Category>> {
        // Fully qualified: the inherent accessor shares the trait method's name
        Database::categories(self).list().await
    }
}
