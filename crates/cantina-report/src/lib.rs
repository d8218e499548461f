//! # cantina-report: Report Rendering and Preview for Cantina
//!
//! Turns one menu item record into a printable PDF, and drives the preview
//! side of that document (pages, zoom, save, print submission).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Report Pipeline                                  │
//! │                                                                         │
//! │  Command (preview_item)                                                │
//! │       │  MenuItem fetched through the data-access layer                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cantina-report (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐         ┌────────────────┐                │   │
//! │  │   │ ReportGenerator│ ──PDF──►│  ReportViewer  │                │   │
//! │  │   │ (generator.rs) │  file   │  (viewer.rs)   │                │   │
//! │  │   │                │         │                │                │   │
//! │  │   │ printpdf       │         │ lopdf          │                │   │
//! │  │   │ fixed template │         │ pages/zoom/    │                │   │
//! │  │   │ image embed    │         │ save/print     │                │   │
//! │  │   └────────────────┘         └───────┬────────┘                │   │
//! │  │                                      │                          │   │
//! │  │                              PrintQueue trait                   │   │
//! │  │                        (lp spooler / test recorder)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`generator`] - Fixed-template PDF rendering of one menu item
//! - [`viewer`] - Page navigation, zoom, save-copy, print submission
//! - [`error`] - Report error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod generator;
pub mod viewer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ReportError, ReportResult};
pub use generator::ReportGenerator;
pub use viewer::{LpPrintQueue, PrintQueue, ReportViewer, DEFAULT_SAVE_NAME};

// =============================================================================
// Integration Tests (render → parse back)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cantina_core::MenuItem;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    fn temp_pdf_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cantina-report-{tag}-{}.pdf", uuid::Uuid::new_v4()))
    }

    fn sample_item(image: Option<Vec<u8>>) -> MenuItem {
        MenuItem {
            id: "4be1f7a2-0000-0000-0000-00000000c0de".to_string(),
            name: "Cheesecake".to_string(),
            description: "Baked New York style with a graham cracker crust.".to_string(),
            price_cents: 450,
            category_id: "c0000000-0000-0000-0000-000000000006".to_string(),
            category_name: "Desserts".to_string(),
            image_name: image.as_ref().map(|_| "cheesecake.png".to_string()),
            image,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// A small but fully valid PNG, produced by the same image library the
    /// generator decodes with.
    fn tiny_png() -> Vec<u8> {
        use printpdf::image_crate::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([186, 106, 56])));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
            .expect("encode test png");
        png
    }

    fn extracted_text(path: &Path) -> String {
        let doc = lopdf::Document::load(path).expect("load rendered pdf");
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages).expect("extract text")
    }

    struct RecordingQueue {
        submitted: RefCell<Vec<PathBuf>>,
    }

    impl RecordingQueue {
        fn new() -> Self {
            RecordingQueue {
                submitted: RefCell::new(Vec::new()),
            }
        }
    }

    impl PrintQueue for RecordingQueue {
        fn submit(&self, document: &Path) -> ReportResult<()> {
            self.submitted.borrow_mut().push(document.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_report_contains_item_fields() {
        let path = temp_pdf_path("fields");
        ReportGenerator::new()
            .render_to_file(&sample_item(None), &path)
            .unwrap();

        let text = extracted_text(&path);
        assert!(text.contains("Cheesecake"), "missing name in: {text}");
        assert!(text.contains("4.50"), "missing price in: {text}");
        assert!(text.contains("Desserts"), "missing category in: {text}");
        assert!(text.contains("Cafeteria Menu"), "missing header in: {text}");
        assert!(text.contains("Page 1"), "missing footer in: {text}");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_report_embeds_decodable_image() {
        let path = temp_pdf_path("image");
        ReportGenerator::new()
            .render_to_file(&sample_item(Some(tiny_png())), &path)
            .unwrap();

        // The document stays loadable and keeps its text content
        let text = extracted_text(&path);
        assert!(text.contains("Cheesecake"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_undecodable_image_is_omitted_not_fatal() {
        let path = temp_pdf_path("badimage");
        let item = sample_item(Some(vec![0x00, 0x01, 0x02, 0x03]));

        // The render succeeds; the text fields are still printable
        ReportGenerator::new().render_to_file(&item, &path).unwrap();
        let text = extracted_text(&path);
        assert!(text.contains("Cheesecake"));
        assert!(text.contains("4.50"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_long_description_paginates() {
        let path = temp_pdf_path("paginate");
        let mut item = sample_item(None);
        item.description = "rich and creamy slice ".repeat(400);

        ReportGenerator::new().render_to_file(&item, &path).unwrap();

        let viewer = ReportViewer::open(&path).unwrap();
        assert!(viewer.page_count() > 1, "expected spill-over pages");

        let text = extracted_text(&path);
        assert!(text.contains("Page 2"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_viewer_navigation_no_ops_at_ends() {
        let path = temp_pdf_path("nav");
        let mut item = sample_item(None);
        item.description = "wide slice of cake ".repeat(400);
        ReportGenerator::new().render_to_file(&item, &path).unwrap();

        let mut viewer = ReportViewer::open(&path).unwrap();
        assert!(viewer.page_count() > 1, "need several pages for this test");
        let last = viewer.page_count() - 1;

        // Previous from the first page is a no-op
        assert_eq!(viewer.current_page(), 0);
        viewer.previous_page();
        assert_eq!(viewer.current_page(), 0);

        // Walk to the end; next from the last page is a no-op
        for _ in 0..viewer.page_count() + 3 {
            viewer.next_page();
        }
        assert_eq!(viewer.current_page(), last);

        viewer.previous_page();
        assert_eq!(viewer.current_page(), last - 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_viewer_zoom_clamps_to_fixed_range() {
        let path = temp_pdf_path("zoom");
        ReportGenerator::new()
            .render_to_file(&sample_item(None), &path)
            .unwrap();

        let mut viewer = ReportViewer::open(&path).unwrap();
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_DEFAULT);

        viewer.zoom_in();
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_DEFAULT + viewer::ZOOM_STEP);

        for _ in 0..100 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_MAX);

        for _ in 0..100 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_MIN);

        viewer.set_zoom(9999);
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_MAX);
        viewer.set_zoom(1);
        assert_eq!(viewer.zoom_percent(), viewer::ZOOM_MIN);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_viewer_save_copy_appends_pdf_extension() {
        let path = temp_pdf_path("save");
        ReportGenerator::new()
            .render_to_file(&sample_item(None), &path)
            .unwrap();
        let viewer = ReportViewer::open(&path).unwrap();

        let dest = std::env::temp_dir().join(format!("cantina-copy-{}", uuid::Uuid::new_v4()));
        let written = viewer.save_copy(&dest).unwrap();

        assert_eq!(written.extension().unwrap(), "pdf");
        assert!(written.exists());
        assert_eq!(
            std::fs::read(&written).unwrap(),
            std::fs::read(&path).unwrap()
        );

        let _ = std::fs::remove_file(&written);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_viewer_print_submits_document_path() {
        let path = temp_pdf_path("print");
        ReportGenerator::new()
            .render_to_file(&sample_item(None), &path)
            .unwrap();
        let viewer = ReportViewer::open(&path).unwrap();

        let queue = RecordingQueue::new();
        viewer.send_to_printer(&queue).unwrap();

        assert_eq!(queue.submitted.borrow().as_slice(), &[path.clone()]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_viewer_rejects_missing_and_invalid_documents() {
        let missing = std::env::temp_dir().join("cantina-no-such-file.pdf");
        assert!(matches!(
            ReportViewer::open(&missing),
            Err(ReportError::Io(_))
        ));

        let garbage = temp_pdf_path("garbage");
        std::fs::write(&garbage, b"this is not a pdf").unwrap();
        assert!(matches!(
            ReportViewer::open(&garbage),
            Err(ReportError::InvalidDocument(_))
        ));

        let _ = std::fs::remove_file(&garbage);
    }
}
