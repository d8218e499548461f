//! # Menu Item Report Generator
//!
//! Renders one fully-populated menu item into a fixed-layout PDF.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cafeteria Menu          ← header, 25pt bold      │
//! │  ═══════════════════════════════════════════  ← full-width rule        │
//! │                                                                         │
//! │              Menu Item Details - Cheesecake   ← item title, 18pt       │
//! │                                                                         │
//! │                   ┌───────────────┐                                     │
//! │                   │   item image  │           ← framed, omitted when    │
//! │                   └───────────────┘             the blob is absent or   │
//! │                                                 undecodable             │
//! │   ┌──────────┬──────────────────────────┐                               │
//! │   │  Field   │  Value                   │    ← labeled field table     │
//! │   ├──────────┼──────────────────────────┤                               │
//! │   │  ID      │  4be1…                   │                               │
//! │   │  Name    │  Cheesecake              │                               │
//! │   │  Category│  Desserts                │                               │
//! │   │  Price   │  $4.50                   │    ← always two decimals     │
//! │   └──────────┴──────────────────────────┘                               │
//! │                                                                         │
//! │   Description                                 ← section heading         │
//! │   Baked New York style…                       ← wrapped body text,      │
//! │                                                 spills onto more pages  │
//! │  ───────────────────────────────────────────  ← footer rule             │
//! │                   Page 1                      ← page number             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An undecodable image blob is a WARNING, not a failure: the text fields
//! are still worth printing, so the image block is skipped and rendering
//! continues.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate;
use printpdf::image_crate::GenericImageView;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, PolygonMode, Rgb, WindingOrder,
};
use tracing::{debug, warn};

use crate::error::{ReportError, ReportResult};
use cantina_core::MenuItem;

// =============================================================================
// Layout Constants (US Letter, millimetres)
// =============================================================================

const PAGE_WIDTH: f64 = 215.9;
const PAGE_HEIGHT: f64 = 279.4;
const MARGIN: f64 = 21.0;

/// Lowest y the body may reach; below this lives the footer.
const BODY_FLOOR: f64 = 28.0;

/// Side of the square image box.
const IMAGE_SIDE: f64 = 53.0;
/// Padding between the image and its frame.
const FRAME_PAD: f64 = 2.5;

const LABEL_COL_WIDTH: f64 = 50.0;
const ROW_HEIGHT: f64 = 11.0;

/// Approximate mm per point for Helvetica width estimation (0.5 em average).
const PT_TO_MM: f64 = 0.352_778;

// =============================================================================
// Report Generator
// =============================================================================

/// Renders menu item reports with a fixed template.
///
/// ## Usage
/// ```rust,ignore
/// let generator = ReportGenerator::new();
/// generator.render_to_file(&item, Path::new("/tmp/cheesecake.pdf"))?;
/// ```
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    /// Title shown in the branded header band.
    header_title: String,
}

impl ReportGenerator {
    /// Creates a generator with the default header.
    pub fn new() -> Self {
        ReportGenerator {
            header_title: "Cafeteria Menu".to_string(),
        }
    }

    /// Overrides the header title (e.g. a venue name).
    pub fn with_header_title(mut self, title: impl Into<String>) -> Self {
        self.header_title = title.into();
        self
    }

    /// Renders the report for one menu item and writes it to `output_path`.
    ///
    /// ## Failure Modes
    /// * `ReportError::Render` - document assembly or serialization failed
    /// * `ReportError::Io` - the output file could not be written
    ///
    /// A corrupt image blob is NOT a failure mode (see module docs).
    pub fn render_to_file(&self, item: &MenuItem, output_path: &Path) -> ReportResult<()> {
        debug!(item = %item.id, path = %output_path.display(), "Rendering menu item report");

        let (doc, page, layer) = PdfDocument::new(
            format!("Menu Item - {}", item.name),
            Mm(PAGE_WIDTH as f32),
            Mm(PAGE_HEIGHT as f32),
            "Layer 1",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(e.to_string()))?;

        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            regular: &regular,
            bold: &bold,
            page_number: 1,
            cursor: PAGE_HEIGHT - MARGIN,
        };
        writer.draw_footer();

        // Branded header band with full-width rule
        writer.cursor -= 10.0;
        writer.centered_text(&self.header_title, 25.0, true);
        writer.cursor -= 8.0;
        writer.rule(MARGIN, PAGE_WIDTH - MARGIN, writer.cursor, 1.5);
        writer.cursor -= 14.0;

        // Item title
        writer.centered_text(&format!("Menu Item Details - {}", item.name), 18.0, true);
        writer.cursor -= 10.0;

        // Image block (optional, degrades gracefully)
        if let Some(bytes) = item.image.as_deref() {
            writer.draw_image_block(item, bytes);
        }

        // Labeled field table
        writer.draw_field_table(item);
        writer.cursor -= 12.0;

        // Description section (the only part that can spill over pages)
        writer.text(MARGIN, "Description", 16.0, true);
        writer.cursor -= 8.0;
        let usable = PAGE_WIDTH - 2.0 * MARGIN;
        let max_chars = (usable / (12.0 * 0.5 * PT_TO_MM)) as usize;
        for line in wrap_text(item.description.trim(), max_chars.max(16)) {
            writer.ensure_room(6.0);
            writer.text(MARGIN, &line, 12.0, false);
            writer.cursor -= 6.0;
        }

        let file = File::create(output_path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ReportError::Render(e.to_string()))?;

        debug!(path = %output_path.display(), "Report written");
        Ok(())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Page Writer
// =============================================================================

/// Tracks the current page, layer and vertical cursor while the template
/// is laid down top to bottom.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    page_number: usize,
    cursor: f64,
}

impl PageWriter<'_> {
    /// Starts a fresh page when fewer than `needed` millimetres remain.
    fn ensure_room(&mut self, needed: f64) {
        if self.cursor - needed >= BODY_FLOOR {
            return;
        }

        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_number += 1;
        self.cursor = PAGE_HEIGHT - MARGIN;
        self.draw_footer();
    }

    /// Footer rule and centered page number, drawn once per page.
    fn draw_footer(&mut self) {
        self.rule(MARGIN, PAGE_WIDTH - MARGIN, 20.0, 1.5);
        let label = format!("Page {}", self.page_number);
        let x = (PAGE_WIDTH - estimate_width(&label, 12.0)) / 2.0;
        self.layer.set_fill_color(ink());
        self.layer.use_text(label, 12.0, Mm(x as f32), Mm(12.0), self.regular);
    }

    fn text(&self, x: f64, text: &str, size: f64, bold: bool) {
        let font = if bold { self.bold } else { self.regular };
        self.layer.set_fill_color(ink());
        self.layer
            .use_text(text, size as f32, Mm(x as f32), Mm(self.cursor as f32), font);
    }

    fn centered_text(&self, text: &str, size: f64, bold: bool) {
        let x = ((PAGE_WIDTH - estimate_width(text, size)) / 2.0).max(MARGIN);
        self.text(x, text, size, bold);
    }

    /// Horizontal rule at absolute height `y`.
    fn rule(&self, x1: f64, x2: f64, y: f64, thickness: f64) {
        self.layer.set_outline_color(ink());
        self.layer.set_outline_thickness(thickness as f32);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1 as f32), Mm(y as f32)), false),
                (Point::new(Mm(x2 as f32), Mm(y as f32)), false),
            ],
            is_closed: false,
        });
    }

    /// Stroked rectangle; `(x, y)` is the bottom-left corner.
    fn rect_stroke(&self, x: f64, y: f64, w: f64, h: f64, thickness: f64) {
        self.layer.set_outline_color(ink());
        self.layer.set_outline_thickness(thickness as f32);
        self.layer.add_line(Line {
            points: rect_points(x, y, w, h),
            is_closed: true,
        });
    }

    /// Filled rectangle; `(x, y)` is the bottom-left corner.
    fn rect_fill(&self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.layer.set_fill_color(color);
        self.layer.add_polygon(Polygon {
            rings: vec![rect_points(x, y, w, h)],
            mode: PolygonMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    /// Framed, centered image block. Decode failures skip the block.
    fn draw_image_block(&mut self, item: &MenuItem, bytes: &[u8]) {
        let decoded = match image_crate::load_from_memory(bytes) {
            Ok(img) => img,
            Err(e) => {
                warn!(
                    item = %item.id,
                    image_name = item.image_name.as_deref().unwrap_or("unnamed"),
                    error = %e,
                    "Image blob is undecodable; rendering report without it"
                );
                return;
            }
        };

        let px_w = decoded.width() as f64;
        let px_h = decoded.height() as f64;
        if px_w < 1.0 || px_h < 1.0 {
            warn!(item = %item.id, "Image has no pixels; rendering report without it");
            return;
        }

        // Natural printed size at 300 dpi, scaled to fit the square box
        let natural_w = px_w * 25.4 / 300.0;
        let natural_h = px_h * 25.4 / 300.0;
        let scale = (IMAGE_SIDE / natural_w).min(IMAGE_SIDE / natural_h);
        let shown_w = natural_w * scale;
        let shown_h = natural_h * scale;

        let frame_side = IMAGE_SIDE + 2.0 * FRAME_PAD;
        let frame_x = (PAGE_WIDTH - frame_side) / 2.0;
        let frame_y = self.cursor - frame_side;
        self.rect_stroke(frame_x, frame_y, frame_side, frame_side, 1.2);

        let image_x = (PAGE_WIDTH - shown_w) / 2.0;
        let image_y = frame_y + (frame_side - shown_h) / 2.0;

        Image::from_dynamic_image(&decoded).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(image_x as f32)),
                translate_y: Some(Mm(image_y as f32)),
                rotate: None,
                scale_x: Some(scale as f32),
                scale_y: Some(scale as f32),
                dpi: Some(300.0),
            },
        );

        self.cursor = frame_y - 12.0;
    }

    /// The Field/Value table with a dark header row.
    fn draw_field_table(&mut self, item: &MenuItem) {
        let x0 = MARGIN;
        let table_width = PAGE_WIDTH - 2.0 * MARGIN;
        let value_col = table_width - LABEL_COL_WIDTH;

        let rows = [
            ("ID", item.id.clone()),
            ("Name", item.name.clone()),
            ("Category", item.category_name.clone()),
            ("Price", format!("{}", item.price())),
        ];

        // Header row: filled band with white bold captions
        let header_y = self.cursor - ROW_HEIGHT;
        self.rect_fill(x0, header_y, table_width, ROW_HEIGHT, ink());
        self.layer.set_fill_color(paper());
        self.layer.use_text("Field", 13.0, Mm((x0 + 3.0) as f32), Mm((header_y + 3.5) as f32), self.bold);
        self.layer.use_text(
            "Value",
            13.0,
            Mm((x0 + LABEL_COL_WIDTH + 3.0) as f32),
            Mm((header_y + 3.5) as f32),
            self.bold,
        );

        // Data rows with a full grid
        let row_count = rows.len();
        let mut row_y = header_y;
        for (label, value) in rows {
            row_y -= ROW_HEIGHT;
            self.rect_stroke(x0, row_y, LABEL_COL_WIDTH, ROW_HEIGHT, 0.8);
            self.rect_stroke(x0 + LABEL_COL_WIDTH, row_y, value_col, ROW_HEIGHT, 0.8);

            self.layer.set_fill_color(ink());
            self.layer
                .use_text(label, 12.0, Mm((x0 + 3.0) as f32), Mm((row_y + 3.5) as f32), self.bold);
            let shown = truncate_to_width(&value, value_col - 6.0, 12.0);
            self.layer.use_text(
                shown,
                12.0,
                Mm((x0 + LABEL_COL_WIDTH + 3.0) as f32),
                Mm((row_y + 3.5) as f32),
                self.regular,
            );
        }

        // Outer border over the whole table
        let table_height = ROW_HEIGHT * (row_count as f64 + 1.0);
        self.rect_stroke(x0, self.cursor - table_height, table_width, table_height, 1.2);

        self.cursor -= table_height;
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// The template's ink color (near-black coffee tone).
fn ink() -> Color {
    Color::Rgb(Rgb::new(0.10, 0.08, 0.07, None))
}

/// White, for text on the filled table header.
fn paper() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn rect_points(x: f64, y: f64, w: f64, h: f64) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x as f32), Mm(y as f32)), false),
        (Point::new(Mm((x + w) as f32), Mm(y as f32)), false),
        (Point::new(Mm((x + w) as f32), Mm((y + h) as f32)), false),
        (Point::new(Mm(x as f32), Mm((y + h) as f32)), false),
    ]
}

/// Rough Helvetica width estimate (average glyph ≈ half an em).
fn estimate_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5 * PT_TO_MM
}

/// Truncates with an ellipsis once the estimated width exceeds `max_mm`.
fn truncate_to_width(text: &str, max_mm: f64, font_size: f64) -> String {
    if estimate_width(text, font_size) <= max_mm {
        return text.to_string();
    }

    let char_mm = font_size * 0.5 * PT_TO_MM;
    let keep = ((max_mm / char_mm) as usize).saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

/// Greedy word wrap by character budget.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = word.to_string();
            } else if line.chars().count() + 1 + word.chars().count() <= max_chars {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            }

            // A single word longer than the budget is hard-split
            while line.chars().count() > max_chars {
                let head: String = line.chars().take(max_chars).collect();
                let tail: String = line.chars().skip(max_chars).collect();
                lines.push(head);
                line = tail;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_budget() {
        let lines = wrap_text("a quick brown fox jumps over the lazy dog", 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), "a quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn test_wrap_text_hard_splits_long_words() {
        let lines = wrap_text("aaaaaaaaaaaaaaaaaaaa", 8);
        assert_eq!(lines, vec!["aaaaaaaa", "aaaaaaaa", "aaaa"]);
    }

    #[test]
    fn test_wrap_text_keeps_paragraph_breaks() {
        let lines = wrap_text("first\nsecond", 20);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 100.0, 12.0), "short");

        let long = "a very long value that will not fit in the column at all";
        let shown = truncate_to_width(long, 20.0, 12.0);
        assert!(shown.ends_with('…'));
        assert!(shown.chars().count() < long.chars().count());
    }
}
