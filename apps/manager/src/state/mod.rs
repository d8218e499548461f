//! # State Module
//!
//! Application state for the menu manager.
//!
//! Two pieces of state exist, managed separately so the command surface
//! declares exactly what it touches:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌────────────────────────────────┐     │
//! │  │      Database       │        │           FormState            │     │
//! │  │  (cantina-db)       │        │                                │     │
//! │  │                     │        │  Arc<Mutex<FormSession>>       │     │
//! │  │  SqlitePool inside, │        │  fields / result set / cursor  │     │
//! │  │  inherently         │        │  locked briefly, never across  │     │
//! │  │  thread-safe        │        │  a store round-trip            │     │
//! │  └─────────────────────┘        └────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod form;

pub use form::{FormFields, FormSession, FormState, ValidatedFields};
