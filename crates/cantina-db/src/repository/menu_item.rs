//! # Menu Item Repository
//!
//! Database operations for menu items.
//!
//! ## Key Operations
//! - CRUD against the `menu_items` table
//! - Substring search over item and category names
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Search Works                                     │
//! │                                                                         │
//! │  User types: "latte"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%latte%' over item name OR category name (case-insensitive)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ menu_items ⋈ categories                 │                           │
//! │  │                                         │                           │
//! │  │ Iced Latte   | Beverages  | $4.00      │ ← MATCH (name)            │
//! │  │ Latte        | Beverages  | $3.50      │ ← MATCH (name)            │
//! │  │ Cheesecake   | Desserts   | $4.50      │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Blob-free summaries ordered by name → drives next/previous            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use cantina_core::{MenuItem, MenuItemPatch, MenuItemSummary, NewMenuItem};

/// Columns of the joined menu item row, shared by every full-record query.
const ITEM_COLUMNS: &str = r#"
    m.id,
    m.name,
    m.description,
    m.price_cents,
    m.category_id,
    c.name AS category_name,
    m.image,
    m.image_name,
    m.created_at,
    m.updated_at
"#;

/// Repository for menu item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MenuItemRepository::new(pool);
///
/// let created = repo.insert(&new_item).await?;
/// let results = repo.search("latte").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    /// Creates a new MenuItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuItemRepository { pool }
    }

    /// Inserts a new menu item.
    ///
    /// The id is generated here (UUID v4), timestamps are set to now.
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - The stored row, joined with its category name
    /// * `Err(DbError::ConstraintViolation)` - category_id references no
    ///   category, or the price violates the non-negative CHECK
    pub async fn insert(&self, new_item: &NewMenuItem) -> DbResult<MenuItem> {
        let id = generate_item_id();
        let now = Utc::now();

        debug!(id = %id, name = %new_item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, price_cents, category_id,
                image, image_name, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&id)
        .bind(&new_item.name)
        .bind(&new_item.description)
        .bind(new_item.price_cents)
        .bind(&new_item.category_id)
        .bind(&new_item.image)
        .bind(&new_item.image_name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        // Fetch back through the join so the caller gets the category name
        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", &id))
    }

    /// Gets a menu item by its ID, joined with its category name.
    ///
    /// ## Returns
    /// * `Ok(Some(MenuItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items m \
             JOIN categories c ON c.id = m.category_id \
             WHERE m.id = ?1"
        );

        let item = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Applies a partial update to an existing menu item.
    ///
    /// ## Behavior
    /// Read-merge-write inside a transaction: only the patch's named (Some)
    /// fields overwrite the stored row; everything else keeps its value.
    /// A patch without an image keeps the stored blob — the form sends no
    /// image bytes when the picture was not touched.
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - The updated row
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    /// * `Err(DbError::ConstraintViolation)` - New category_id is invalid
    pub async fn update(&self, id: &str, patch: &MenuItemPatch) -> DbResult<MenuItem> {
        debug!(id = %id, "Updating menu item");

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items m \
             JOIN categories c ON c.id = m.category_id \
             WHERE m.id = ?1"
        );
        let current = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))?;

        let name = patch.name.clone().unwrap_or(current.name);
        let description = patch.description.clone().unwrap_or(current.description);
        let price_cents = patch.price_cents.unwrap_or(current.price_cents);
        let category_id = patch.category_id.clone().unwrap_or(current.category_id);
        let image = patch.image.clone().or(current.image);
        let image_name = patch.image_name.clone().or(current.image_name);
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                category_id = ?5,
                image = ?6,
                image_name = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&name)
        .bind(&description)
        .bind(price_cents)
        .bind(&category_id)
        .bind(&image)
        .bind(&image_name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))
    }

    /// Deletes a menu item.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    /// Searches menu items by case-insensitive substring on the item name
    /// or its category name.
    ///
    /// ## Behavior
    /// - Empty (or whitespace) term returns every item, like `list_all`
    /// - `%` / `_` / `\` in the term are escaped, so they match literally
    /// - Results are blob-free summaries ordered by item name
    pub async fn search(&self, term: &str) -> DbResult<Vec<MenuItemSummary>> {
        let term = term.trim();

        debug!(term = %term, "Searching menu items");

        if term.is_empty() {
            return self.list_all().await;
        }

        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

        let summaries = sqlx::query_as::<_, MenuItemSummary>(
            r#"
            SELECT m.id, m.name, m.price_cents, c.name AS category_name
            FROM menu_items m
            JOIN categories c ON c.id = m.category_id
            WHERE lower(m.name) LIKE ?1 ESCAPE '\'
               OR lower(c.name) LIKE ?1 ESCAPE '\'
            ORDER BY m.name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = summaries.len(), "Search returned items");
        Ok(summaries)
    }

    /// Lists every menu item as a summary, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<MenuItemSummary>> {
        let summaries = sqlx::query_as::<_, MenuItemSummary>(
            r#"
            SELECT m.id, m.name, m.price_cents, c.name AS category_name
            FROM menu_items m
            JOIN categories c ON c.id = m.category_id
            ORDER BY m.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Counts menu items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new menu item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Escapes LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("latte"), "latte");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
