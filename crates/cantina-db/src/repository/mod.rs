//! # Repository Module
//!
//! Database repository implementations for Cantina.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Command layer                                                         │
//! │       │                                                                 │
//! │       │  db.menu_items().search("latte")                               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  MenuItemRepository                                                    │
//! │  ├── insert(&self, new_item)                                           │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── update(&self, id, patch)                                          │
//! │  ├── delete(&self, id)                                                 │
//! │  └── search(&self, term) / list_all(&self)                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu_item::MenuItemRepository`] - Menu item CRUD and search
//! - [`category::CategoryRepository`] - Category lookup set

pub mod category;
pub mod menu_item;
