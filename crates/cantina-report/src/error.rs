//! # Report Error Types
//!
//! Error types for report generation and preview.
//!
//! Note what is NOT an error: an undecodable image blob. The printable text
//! fields remain useful without the picture, so rendering logs a warning,
//! omits the image block and continues.

use thiserror::Error;

/// Report operation errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Document assembly failed (font registration, PDF serialization).
    #[error("failed to render report: {0}")]
    Render(String),

    /// Reading or writing the document file failed.
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file handed to the preview is not a readable PDF.
    #[error("not a valid report document: {0}")]
    InvalidDocument(String),

    /// The printing subsystem rejected the document.
    #[error("print submission failed: {0}")]
    PrintFailed(String),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
