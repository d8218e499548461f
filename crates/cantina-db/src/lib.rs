//! # cantina-db: Database Layer for Cantina
//!
//! This crate provides database access for the Cantina menu manager.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cantina Data Flow                                │
//! │                                                                         │
//! │  Command (search_items)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cantina-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │(menu_item.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ MenuItemRepo  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ CategoryRepo  │    │ 002_seed.sql │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   store::MenuStore — the capability trait the presentation     │   │
//! │  │   layer is written against                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys ON)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu items, categories)
//! - [`store`] - The MenuStore capability trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cantina_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cantina.db")).await?;
//! let results = db.menu_items().search("latte").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::MenuStore;

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::menu_item::MenuItemRepository;

// =============================================================================
// Integration Tests (in-memory store)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cantina_core::{MenuItemPatch, NewMenuItem};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }

    async fn category_id(db: &Database, name: &str) -> String {
        db.categories()
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("seeded category {name}"))
            .id
    }

    fn new_item(name: &str, price_cents: i64, category_id: &str) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            description: format!("{name} description"),
            price_cents,
            category_id: category_id.to_string(),
            image: None,
            image_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let db = test_db().await;
        let desserts = category_id(&db, "Desserts").await;

        let image = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let created = db
            .menu_items()
            .insert(&NewMenuItem {
                name: "Cheesecake".to_string(),
                description: "Baked New York style".to_string(),
                price_cents: 450,
                category_id: desserts.clone(),
                image: Some(image.clone()),
                image_name: Some("cheesecake.png".to_string()),
            })
            .await
            .unwrap();

        let read = db.menu_items().get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(read.name, "Cheesecake");
        assert_eq!(read.description, "Baked New York style");
        assert_eq!(read.price_cents, 450);
        assert_eq!(read.category_id, desserts);
        assert_eq!(read.category_name, "Desserts");
        assert_eq!(read.image.as_deref(), Some(image.as_slice()));
        assert_eq!(read.image_name.as_deref(), Some("cheesecake.png"));
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_update_changes_only_named_fields() {
        let db = test_db().await;
        let desserts = category_id(&db, "Desserts").await;

        let created = db
            .menu_items()
            .insert(&NewMenuItem {
                image: Some(vec![1, 2, 3]),
                image_name: Some("pic.png".to_string()),
                ..new_item("Cheesecake", 450, &desserts)
            })
            .await
            .unwrap();

        let updated = db
            .menu_items()
            .update(
                &created.id,
                &MenuItemPatch {
                    price_cents: Some(500),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 500);
        // Unnamed fields retain prior values, including the image blob
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.category_id, created.category_id);
        assert_eq!(updated.image, created.image);
        assert_eq!(updated.image_name, created.image_name);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let db = test_db().await;

        let err = db
            .menu_items()
            .update(
                "no-such-id",
                &MenuItemPatch {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_read_is_not_found() {
        let db = test_db().await;
        let lunch = category_id(&db, "Lunch").await;

        let created = db.menu_items().insert(&new_item("Club Sandwich", 725, &lunch)).await.unwrap();

        db.menu_items().delete(&created.id).await.unwrap();

        assert!(db.menu_items().get_by_id(&created.id).await.unwrap().is_none());
        let err = db.read(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Deleting again also reports NotFound
        let err = db.menu_items().delete(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_with_invalid_category_leaves_store_unchanged() {
        let db = test_db().await;

        let err = db
            .menu_items()
            .insert(&new_item("Orphan", 100, "not-a-category"))
            .await
            .unwrap_err();

        assert!(err.is_constraint_violation(), "got {err:?}");
        assert_eq!(db.menu_items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_with_invalid_category_leaves_store_unchanged() {
        let db = test_db().await;
        let snacks = category_id(&db, "Snacks").await;

        let created = db.menu_items().insert(&new_item("Pretzel", 250, &snacks)).await.unwrap();

        let err = db
            .menu_items()
            .update(
                &created.id,
                &MenuItemPatch {
                    category_id: Some("not-a-category".to_string()),
                    price_cents: Some(999),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");

        let unchanged = db.menu_items().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.price_cents, 250);
        assert_eq!(unchanged.category_id, snacks);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_and_category() {
        let db = test_db().await;
        let beverages = category_id(&db, "Beverages").await;
        let desserts = category_id(&db, "Desserts").await;

        db.menu_items().insert(&new_item("Latte", 350, &beverages)).await.unwrap();
        db.menu_items().insert(&new_item("Iced LATTE", 400, &beverages)).await.unwrap();
        db.menu_items().insert(&new_item("Cheesecake", 450, &desserts)).await.unwrap();

        let results = db.menu_items().search("latte").await.unwrap();
        let names: Vec<&str> = results.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Iced LATTE", "Latte"]);

        // Category-name match: "desser" finds the cheesecake
        let results = db.menu_items().search("DESSER").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Cheesecake");

        // No match
        assert!(db.menu_items().search("ramen").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_returns_every_item() {
        let db = test_db().await;
        let lunch = category_id(&db, "Lunch").await;

        db.menu_items().insert(&new_item("Soup", 300, &lunch)).await.unwrap();
        db.menu_items().insert(&new_item("Burger", 650, &lunch)).await.unwrap();

        let all = db.menu_items().list_all().await.unwrap();
        assert_eq!(all.len(), 2);

        let searched = db.menu_items().search("").await.unwrap();
        assert_eq!(searched, all);

        let searched = db.menu_items().search("   ").await.unwrap();
        assert_eq!(searched, all);
    }

    #[tokio::test]
    async fn test_search_escapes_like_wildcards() {
        let db = test_db().await;
        let snacks = category_id(&db, "Snacks").await;

        db.menu_items().insert(&new_item("100% Juice", 275, &snacks)).await.unwrap();
        db.menu_items().insert(&new_item("Apple Juice", 250, &snacks)).await.unwrap();

        let results = db.menu_items().search("100%").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "100% Juice");

        // A bare % must not match everything
        let results = db.menu_items().search("%").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_constraint_violation() {
        let db = test_db().await;

        let err = db.categories().insert("Desserts").await.unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_referenced_category_cannot_be_deleted() {
        let db = test_db().await;
        let desserts = category_id(&db, "Desserts").await;

        db.menu_items().insert(&new_item("Cheesecake", 450, &desserts)).await.unwrap();

        let err = db.categories().delete(&desserts).await.unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");

        // An unreferenced category deletes fine
        let extra = db.categories().insert("Specials").await.unwrap();
        db.categories().delete(&extra.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_menu_store_trait_surface() {
        let db = test_db().await;
        let desserts = category_id(&db, "Desserts").await;

        // Exercise the capability trait the presentation layer sees
        async fn scenario<S: MenuStore>(store: &S, category_id: &str) {
            let created = store
                .create(NewMenuItem {
                    name: "Cheesecake".to_string(),
                    description: "Baked New York style".to_string(),
                    price_cents: 450,
                    category_id: category_id.to_string(),
                    image: None,
                    image_name: None,
                })
                .await
                .unwrap();

            let read = store.read(&created.id).await.unwrap();
            assert_eq!(read, created);

            assert_eq!(store.search("cheese").await.unwrap().len(), 1);
            assert_eq!(store.list_all().await.unwrap().len(), 1);
            assert_eq!(store.categories().await.unwrap().len(), 6);

            store.delete(&created.id).await.unwrap();
            let err = store.read(&created.id).await.unwrap_err();
            assert!(matches!(err, DbError::NotFound { .. }));
        }

        scenario(&db, &desserts).await;
    }
}
