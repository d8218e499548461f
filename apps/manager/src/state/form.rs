//! # Form State
//!
//! Manages the menu form session: the editable fields, the current result
//! set and the navigation cursor.
//!
//! ## The Only State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Form Session States                                 │
//! │                                                                         │
//! │   "form is empty"          "showing record N of the result set"        │
//! │  ┌───────────────┐  populate  ┌──────────────────────────────┐         │
//! │  │ fields blank  │ ─────────► │ fields mirror record N       │         │
//! │  │ cursor: None  │            │ cursor: Some(N)              │         │
//! │  └───────▲───────┘ ◄───────── └──────────────────────────────┘         │
//! │          │            clear        │            ▲                        │
//! │          │                   next/previous ─────┘ (no-op at ends)       │
//! │                                                                         │
//! │  Front End Action         Session Change                               │
//! │  ────────────────         ──────────────                               │
//! │  Type into a field ─────► fields_mut()                                 │
//! │  Search ────────────────► set_results(summaries), cursor = 0           │
//! │  Next / Previous ───────► select_next() / select_previous()            │
//! │  Insert / Save ─────────► validated() → NewMenuItem / patch            │
//! │  Clear ─────────────────► clear_fields()                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>`; commands lock it briefly and
//! never hold the lock across a store round-trip.

use std::sync::{Arc, Mutex};

use cantina_core::validation::{
    validate_category_selection, validate_description, validate_image, validate_item_name,
    validate_price_input,
};
use cantina_core::{
    Category, MenuItem, MenuItemPatch, MenuItemSummary, Money, NewMenuItem, ValidationError,
};

// =============================================================================
// Form Fields
// =============================================================================

/// The visible fields of the form, mirroring MenuItem attributes.
///
/// `price_input` holds the raw text the user typed; it only becomes a
/// `Money` when the form validates.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    /// Read-only id of the shown record; None while composing a new item.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price_input: String,
    pub category_id: Option<String>,
    /// Pending image bytes (either loaded from the record or freshly chosen).
    pub image: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

/// Fields that passed validation, ready to hit the store.
#[derive(Debug, Clone)]
pub struct ValidatedFields {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category_id: String,
    pub image: Option<Vec<u8>>,
    pub image_name: Option<String>,
}

impl ValidatedFields {
    /// Insert payload for a brand-new item.
    pub fn into_new_item(self) -> NewMenuItem {
        NewMenuItem {
            name: self.name,
            description: self.description,
            price_cents: self.price.cents(),
            category_id: self.category_id,
            image: self.image,
            image_name: self.image_name,
        }
    }

    /// Update payload for the shown item.
    ///
    /// The form always carries every field, so the patch names them all —
    /// except the image, which is only named when bytes are present. An
    /// untouched picture therefore stays untouched in the store.
    pub fn into_patch(self) -> MenuItemPatch {
        MenuItemPatch {
            name: Some(self.name),
            description: Some(self.description),
            price_cents: Some(self.price.cents()),
            category_id: Some(self.category_id),
            image: self.image,
            image_name: self.image_name,
        }
    }
}

// =============================================================================
// Form Session
// =============================================================================

/// The form session: fields + result set + cursor + known categories.
#[derive(Debug, Default)]
pub struct FormSession {
    fields: FormFields,
    categories: Vec<Category>,
    results: Vec<MenuItemSummary>,
    cursor: Option<usize>,
}

impl FormSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // --- categories --------------------------------------------------------

    /// Replaces the known category set (drives the category selector).
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a category id by case-insensitive name.
    pub fn category_id_by_name(&self, name: &str) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .map(|c| c.id.clone())
    }

    // --- fields ------------------------------------------------------------

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Clears every field (the Clear button). The result set survives, but
    /// nothing is selected afterwards.
    pub fn clear_fields(&mut self) {
        self.fields = FormFields::default();
        self.cursor = None;
    }

    /// Fills the fields from a full record and aligns the cursor with it.
    pub fn populate(&mut self, item: &MenuItem) {
        self.fields = FormFields {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            description: item.description.clone(),
            price_input: item.price().to_decimal_string(),
            category_id: Some(item.category_id.clone()),
            image: item.image.clone(),
            image_name: item.image_name.clone(),
        };
        self.select_by_id(&item.id);
    }

    // --- result set & cursor ------------------------------------------------

    /// Replaces the navigable result set; selects the first row if any.
    pub fn set_results(&mut self, results: Vec<MenuItemSummary>) {
        self.cursor = if results.is_empty() { None } else { Some(0) };
        self.results = results;
    }

    pub fn results(&self) -> &[MenuItemSummary] {
        &self.results
    }

    /// The summary under the cursor.
    pub fn current_summary(&self) -> Option<&MenuItemSummary> {
        self.cursor.and_then(|i| self.results.get(i))
    }

    /// `(position, total)` for the "record N of M" display, 1-based.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.cursor.map(|i| (i + 1, self.results.len()))
    }

    /// Moves the cursor forward. Returns false (no-op) on the last record
    /// or with an empty result set.
    pub fn select_next(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.results.len() => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor back. Returns false (no-op) on the first record or
    /// with an empty result set.
    pub fn select_previous(&mut self) -> bool {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Points the cursor at the row with the given id, if present.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if let Some(index) = self.results.iter().position(|s| s.id == id) {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    // --- validation ---------------------------------------------------------

    /// Runs the form validation of spec'd order: name, description, price,
    /// category, image. The first failure wins; the store is never touched.
    pub fn validated(&self) -> Result<ValidatedFields, ValidationError> {
        validate_item_name(&self.fields.name)?;
        validate_description(&self.fields.description)?;
        let price = validate_price_input(&self.fields.price_input)?;
        let category_id =
            validate_category_selection(self.fields.category_id.as_deref(), &self.categories)?;
        validate_image(self.fields.image.as_deref())?;

        Ok(ValidatedFields {
            name: self.fields.name.trim().to_string(),
            description: self.fields.description.trim().to_string(),
            price,
            category_id,
            image: self.fields.image.clone(),
            image_name: self.fields.image_name.clone(),
        })
    }
}

// =============================================================================
// Shared Form State
// =============================================================================

/// Shared handle to the form session.
///
/// ## Thread Safety
/// `Arc<Mutex<FormSession>>`: commands lock, read or mutate, and release
/// before any await. The closure accessors make holding the guard across
/// an await impossible.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    session: Arc<Mutex<FormSession>>,
}

impl FormState {
    /// Creates a new empty form state.
    pub fn new() -> Self {
        FormState {
            session: Arc::new(Mutex::new(FormSession::new())),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FormSession) -> R,
    {
        let session = self.session.lock().expect("form mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FormSession) -> R,
    {
        let mut session = self.session.lock().expect("form mutex poisoned");
        f(&mut session)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
