//! # cantina-core: Pure Domain Logic for Cantina
//!
//! This crate is the **heart** of the Cantina menu manager. It contains the
//! domain types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cantina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (form screen)                      │   │
//! │  │    Search box ──► Field editors ──► Insert/Save/Delete/Print   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command surface                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cantina-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                 │   │
//! │  │   │   types   │  │   money   │  │ validation │                 │   │
//! │  │   │ MenuItem  │  │   Money   │  │   rules    │                 │   │
//! │  │   │ Category  │  │  parsing  │  │   checks   │                 │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           cantina-db / cantina-report (I/O layers)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Category, patch/summary shapes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, file system access is FORBIDDEN here
//! 3. **Integer Money**: All prices are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cantina_core::Money` instead of
// `use cantina_core::money::Money`

pub use error::ValidationError;
pub use money::{Money, ParseMoneyError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a menu item name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a menu item description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum size of an item image blob in bytes (4 MiB).
///
/// Images are stored inline in the menu_items row; a bound keeps a stray
/// upload from bloating the store and the rendered report.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum length of a search query.
pub const MAX_QUERY_LEN: usize = 100;
