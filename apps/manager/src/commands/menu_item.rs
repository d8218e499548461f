//! # Menu Item Commands
//!
//! The command surface the front end invokes for CRUD, search and
//! navigation. Every function is generic over [`MenuStore`], so the SQLite
//! implementation and the front end vary independently.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Insert / Save Flow                                   │
//! │                                                                         │
//! │  User fills the form, presses Insert                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FormSession::validated()  ── ValidationError? ──► message, store      │
//! │       │                                            untouched           │
//! │       ▼                                                                 │
//! │  store.create(new_item)    ── ConstraintViolation? ──► message         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Reload result set, point the cursor at the stored row,                │
//! │  repopulate the form (id now filled in)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::FormState;
use cantina_core::validation::validate_search_query;
use cantina_core::{Category, MenuItem};
use cantina_db::MenuStore;

// =============================================================================
// DTOs
// =============================================================================

/// Menu item DTO for the front end.
///
/// Decouples the domain model from what the form displays; the image blob
/// stays behind (the front end only needs to know one exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    /// Price formatted for the price field, e.g. "4.50".
    pub price_display: String,
    pub category_id: String,
    pub category_name: String,
    pub has_image: bool,
    pub image_name: Option<String>,
}

impl From<MenuItem> for MenuItemDto {
    fn from(item: MenuItem) -> Self {
        MenuItemDto {
            price_display: item.price().to_decimal_string(),
            has_image: item.has_image(),
            id: item.id,
            name: item.name,
            description: item.description,
            price_cents: item.price_cents,
            category_id: item.category_id,
            category_name: item.category_name,
            image_name: item.image_name,
        }
    }
}

/// Category DTO for the category selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        CategoryDto {
            id: category.id,
            name: category.name,
        }
    }
}

// =============================================================================
// Loading & Search
// =============================================================================

/// Reloads the category selector from the store.
pub async fn load_categories<S: MenuStore>(
    store: &S,
    form: &FormState,
) -> Result<Vec<CategoryDto>, ApiError> {
    let categories = store.categories().await?;
    form.with_session_mut(|s| s.set_categories(categories.clone()));
    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

/// Replaces the navigable result set with items matching `query`.
///
/// An empty query lists every item. The first match (if any) is fetched in
/// full and shown in the form. Returns the number of matches.
pub async fn search_items<S: MenuStore>(
    store: &S,
    form: &FormState,
    query: &str,
) -> Result<usize, ApiError> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_items command");

    let summaries = store.search(&query).await?;
    let count = summaries.len();
    let first_id = summaries.first().map(|s| s.id.clone());

    form.with_session_mut(|s| s.set_results(summaries));

    match first_id {
        Some(id) => {
            let item = store.read(&id).await?;
            form.with_session_mut(|s| s.populate(&item));
        }
        None => form.with_session_mut(|s| s.clear_fields()),
    }

    info!(count, "search complete");
    Ok(count)
}

/// Reloads categories and the full result set; shows the first record.
///
/// The Refresh button, and the shared tail of every mutating command.
pub async fn refresh<S: MenuStore>(store: &S, form: &FormState) -> Result<usize, ApiError> {
    load_categories(store, form).await?;
    search_items(store, form, "").await
}

// =============================================================================
// Navigation
// =============================================================================

/// Moves to the next record of the result set and repopulates the form.
/// Returns None (a no-op) on the last record.
pub async fn show_next<S: MenuStore>(
    store: &S,
    form: &FormState,
) -> Result<Option<MenuItemDto>, ApiError> {
    let moved = form.with_session_mut(|s| {
        if s.select_next() {
            s.current_summary().map(|c| c.id.clone())
        } else {
            None
        }
    });

    show_selected(store, form, moved).await
}

/// Moves to the previous record of the result set and repopulates the form.
/// Returns None (a no-op) on the first record.
pub async fn show_previous<S: MenuStore>(
    store: &S,
    form: &FormState,
) -> Result<Option<MenuItemDto>, ApiError> {
    let moved = form.with_session_mut(|s| {
        if s.select_previous() {
            s.current_summary().map(|c| c.id.clone())
        } else {
            None
        }
    });

    show_selected(store, form, moved).await
}

async fn show_selected<S: MenuStore>(
    store: &S,
    form: &FormState,
    id: Option<String>,
) -> Result<Option<MenuItemDto>, ApiError> {
    let Some(id) = id else { return Ok(None) };

    let item = store.read(&id).await?;
    form.with_session_mut(|s| s.populate(&item));
    Ok(Some(MenuItemDto::from(item)))
}

// =============================================================================
// CRUD
// =============================================================================

/// Inserts the form's content as a new item.
///
/// Fails with a validation message when an existing record is shown — that
/// is what Save is for.
pub async fn insert_item<S: MenuStore>(
    store: &S,
    form: &FormState,
) -> Result<MenuItemDto, ApiError> {
    let (existing_id, validated) =
        form.with_session(|s| (s.fields().id.clone(), s.validated()));

    if existing_id.is_some() {
        return Err(ApiError::validation(
            "Cannot insert: this is an existing item. Use save instead.",
        ));
    }

    let created = store.create(validated?.into_new_item()).await?;
    info!(id = %created.id, name = %created.name, "Menu item created");

    reload_and_show(store, form, &created).await?;
    Ok(MenuItemDto::from(created))
}

/// Saves the form's content over the shown item.
pub async fn save_item<S: MenuStore>(
    store: &S,
    form: &FormState,
) -> Result<MenuItemDto, ApiError> {
    let (existing_id, validated) =
        form.with_session(|s| (s.fields().id.clone(), s.validated()));

    let Some(id) = existing_id else {
        return Err(ApiError::validation(
            "Cannot save: no item selected. Use insert for new items.",
        ));
    };

    let updated = store.update(&id, validated?.into_patch()).await?;
    info!(id = %updated.id, "Menu item updated");

    reload_and_show(store, form, &updated).await?;
    Ok(MenuItemDto::from(updated))
}

/// Deletes the shown item, then shows the first remaining record.
pub async fn delete_item<S: MenuStore>(store: &S, form: &FormState) -> Result<(), ApiError> {
    let Some(id) = form.with_session(|s| s.fields().id.clone()) else {
        return Err(ApiError::validation("No item selected to delete"));
    };

    store.delete(&id).await?;
    info!(id = %id, "Menu item deleted");

    search_items(store, form, "").await?;
    Ok(())
}

/// Clears the form fields (the Clear button). Purely local.
pub fn clear_form(form: &FormState) {
    form.with_session_mut(|s| s.clear_fields());
}

/// Reloads the full result set and points the form at `item`.
async fn reload_and_show<S: MenuStore>(
    store: &S,
    form: &FormState,
    item: &MenuItem,
) -> Result<(), ApiError> {
    let summaries = store.list_all().await?;
    form.with_session_mut(|s| {
        s.set_results(summaries);
        s.populate(item);
    });
    Ok(())
}

// =============================================================================
// Command-Level Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormState;
    use cantina_db::{Database, DbConfig};

    async fn setup() -> (Database, FormState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let form = FormState::new();
        refresh(&db, &form).await.unwrap();
        (db, form)
    }

    fn fill_form(form: &FormState, name: &str, price: &str, category: &str) {
        form.with_session_mut(|s| {
            let category_id = s.category_id_by_name(category);
            let fields = s.fields_mut();
            fields.id = None;
            fields.name = name.to_string();
            fields.description = format!("{name} description");
            fields.price_input = price.to_string();
            fields.category_id = category_id;
            fields.image = None;
            fields.image_name = None;
        });
    }

    #[tokio::test]
    async fn test_insert_search_navigate_update_delete_flow() {
        let (db, form) = setup().await;

        // Insert three items
        for (name, price) in [("Latte", "3.50"), ("Mocha", "4.00"), ("Espresso", "2.20")] {
            fill_form(&form, name, price, "Beverages");
            insert_item(&db, &form).await.unwrap();
        }

        // Alphabetical result set: Espresso, Latte, Mocha
        let count = search_items(&db, &form, "").await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(
            form.with_session(|s| s.fields().name.clone()),
            "Espresso".to_string()
        );

        // Navigate: next → Latte, next → Mocha, next → no-op
        let shown = show_next(&db, &form).await.unwrap().unwrap();
        assert_eq!(shown.name, "Latte");
        let shown = show_next(&db, &form).await.unwrap().unwrap();
        assert_eq!(shown.name, "Mocha");
        assert!(show_next(&db, &form).await.unwrap().is_none());

        // Previous from the middle works; the form follows the cursor
        show_previous(&db, &form).await.unwrap().unwrap();
        assert_eq!(form.with_session(|s| s.fields().name.clone()), "Latte");

        // Update the shown item's price
        form.with_session_mut(|s| s.fields_mut().price_input = "3.75".to_string());
        let updated = save_item(&db, &form).await.unwrap();
        assert_eq!(updated.price_cents, 375);
        assert_eq!(db.read(&updated.id).await.unwrap().price_cents, 375);

        // Delete it; reading it back reports NotFound
        let deleted_id = updated.id.clone();
        delete_item(&db, &form).await.unwrap();
        let err = db.read(&deleted_id).await.unwrap_err();
        assert!(matches!(err, cantina_db::DbError::NotFound { .. }));
        assert_eq!(form.with_session(|s| s.results().len()), 2);
    }

    #[tokio::test]
    async fn test_search_filters_and_populates_first_match() {
        let (db, form) = setup().await;

        fill_form(&form, "Iced Latte", "4.00", "Beverages");
        insert_item(&db, &form).await.unwrap();
        clear_form(&form);
        fill_form(&form, "Cheesecake", "4.50", "Desserts");
        insert_item(&db, &form).await.unwrap();

        let count = search_items(&db, &form, "LATTE").await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(form.with_session(|s| s.fields().name.clone()), "Iced Latte");

        // No matches: the form clears rather than showing a stale record
        let count = search_items(&db, &form, "ramen").await.unwrap();
        assert_eq!(count, 0);
        assert!(form.with_session(|s| s.fields().id.is_none()));
    }

    #[tokio::test]
    async fn test_insert_with_invalid_input_leaves_store_untouched() {
        let (db, form) = setup().await;

        fill_form(&form, "", "4.50", "Desserts");
        let err = insert_item(&db, &form).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(db.list_all().await.unwrap().len(), 0);

        // The typed fields survive the failure
        assert_eq!(
            form.with_session(|s| s.fields().price_input.clone()),
            "4.50"
        );
    }

    #[tokio::test]
    async fn test_insert_on_existing_record_is_rejected() {
        let (db, form) = setup().await;

        fill_form(&form, "Latte", "3.50", "Beverages");
        insert_item(&db, &form).await.unwrap();

        // The form now shows the stored record (id filled in)
        let err = insert_item(&db, &form).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(db.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_selection_is_rejected() {
        let (db, form) = setup().await;

        fill_form(&form, "Latte", "3.50", "Beverages");
        let err = save_item(&db, &form).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_load_categories_fills_selector() {
        let (db, form) = setup().await;

        let categories = load_categories(&db, &form).await.unwrap();
        assert_eq!(categories.len(), 6);
        assert!(form
            .with_session(|s| s.category_id_by_name("desserts"))
            .is_some());
    }
}
