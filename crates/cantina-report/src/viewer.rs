//! # Report Viewer
//!
//! Preview-side operations on a rendered report document.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Viewer                                      │
//! │                                                                         │
//! │  ReportViewer::open(path)                                              │
//! │       │  validates the PDF, counts pages                               │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │ current_page ◄── next_page / previous_page│  no-op at either end    │
//! │  │ zoom_percent ◄── zoom_in / zoom_out       │  clamped to 30%..300%   │
//! │  │ save_copy(dest)                           │  appends .pdf if absent │
//! │  │ send_to_printer(&queue)                   │  PrintQueue seam        │
//! │  └───────────────────────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One open document at a time; every operation is local and synchronous.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Zoom Constants
// =============================================================================

/// Minimum zoom level in percent.
pub const ZOOM_MIN: u32 = 30;
/// Maximum zoom level in percent.
pub const ZOOM_MAX: u32 = 300;
/// Zoom step applied by zoom_in / zoom_out.
pub const ZOOM_STEP: u32 = 10;
/// Zoom level a freshly opened document starts at.
pub const ZOOM_DEFAULT: u32 = 70;

/// Default file name offered when saving a copy.
pub const DEFAULT_SAVE_NAME: &str = "CafeteriaItem.pdf";

// =============================================================================
// Print Queue Seam
// =============================================================================

/// The printing subsystem as the viewer sees it: accept a document.
///
/// The real implementation spools to the OS; tests substitute a recorder.
pub trait PrintQueue {
    /// Submits the document at `document` for printing.
    fn submit(&self, document: &Path) -> ReportResult<()>;
}

/// Spools documents through the system `lp` command.
#[derive(Debug, Clone)]
pub struct LpPrintQueue {
    /// Spooler binary, `lp` unless overridden.
    command: String,
    /// Optional named printer (`lp -d <printer>`).
    printer: Option<String>,
}

impl LpPrintQueue {
    /// Creates a queue that submits to the default printer.
    pub fn new() -> Self {
        LpPrintQueue {
            command: "lp".to_string(),
            printer: None,
        }
    }

    /// Targets a specific named printer.
    pub fn with_printer(mut self, printer: impl Into<String>) -> Self {
        self.printer = Some(printer.into());
        self
    }
}

impl Default for LpPrintQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintQueue for LpPrintQueue {
    fn submit(&self, document: &Path) -> ReportResult<()> {
        let mut cmd = Command::new(&self.command);
        if let Some(printer) = &self.printer {
            cmd.arg("-d").arg(printer);
        }
        cmd.arg(document);

        let status = cmd
            .status()
            .map_err(|e| ReportError::PrintFailed(format!("{}: {e}", self.command)))?;

        if !status.success() {
            return Err(ReportError::PrintFailed(format!(
                "{} exited with {status}",
                self.command
            )));
        }

        info!(document = %document.display(), "Document submitted to print spooler");
        Ok(())
    }
}

// =============================================================================
// Report Viewer
// =============================================================================

/// An open report document with a page cursor and zoom level.
#[derive(Debug)]
pub struct ReportViewer {
    path: PathBuf,
    page_count: usize,
    current_page: usize,
    zoom_percent: u32,
}

impl ReportViewer {
    /// Opens and validates a rendered document.
    ///
    /// ## Returns
    /// * `Err(ReportError::Io)` - the file is missing/unreadable
    /// * `Err(ReportError::InvalidDocument)` - not parseable as a PDF, or
    ///   it contains no pages
    pub fn open(path: impl Into<PathBuf>) -> ReportResult<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("document not found: {}", path.display()),
            )));
        }

        let document = lopdf::Document::load(&path)
            .map_err(|e| ReportError::InvalidDocument(e.to_string()))?;
        let page_count = document.get_pages().len();

        if page_count == 0 {
            return Err(ReportError::InvalidDocument(
                "document has no pages".to_string(),
            ));
        }

        debug!(path = %path.display(), pages = page_count, "Opened report document");

        Ok(ReportViewer {
            path,
            page_count,
            current_page: 0,
            zoom_percent: ZOOM_DEFAULT,
        })
    }

    /// Path of the open document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current page, zero-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Current zoom level in percent.
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// Moves to the next page; a no-op on the last page.
    pub fn next_page(&mut self) {
        if self.current_page + 1 < self.page_count {
            self.current_page += 1;
        }
    }

    /// Moves to the previous page; a no-op on the first page.
    pub fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }

    /// Increases zoom by one step, clamped at the maximum.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_add(ZOOM_STEP));
    }

    /// Decreases zoom by one step, clamped at the minimum.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_sub(ZOOM_STEP));
    }

    /// Sets the zoom level, clamping to the fixed 30%..300% range.
    pub fn set_zoom(&mut self, percent: u32) {
        self.zoom_percent = percent.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Persists a copy of the document to a user-chosen path.
    ///
    /// A missing `.pdf` extension is appended rather than rejected.
    /// Returns the path actually written.
    pub fn save_copy(&self, dest: impl Into<PathBuf>) -> ReportResult<PathBuf> {
        let mut dest = dest.into();

        let has_pdf_ext = dest
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !has_pdf_ext {
            let mut name = dest.file_name().unwrap_or_default().to_os_string();
            name.push(".pdf");
            dest.set_file_name(name);
        }

        fs::copy(&self.path, &dest)?;
        info!(dest = %dest.display(), "Report copy saved");
        Ok(dest)
    }

    /// Submits the document to the printing subsystem.
    pub fn send_to_printer(&self, queue: &dyn PrintQueue) -> ReportResult<()> {
        queue.submit(&self.path)
    }
}
