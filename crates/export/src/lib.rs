//! Region export capabilities for rendered transcript surfaces.
//!
//! This crate provides:
//! - A plain-data region model (`RegionContent`) published by rendering
//!   surfaces and resolved by id through `RegionRegistry`
//! - Full-content layout independent of any viewport
//! - Text extraction via `TextExtractDevice`
//! - Bitmap rasterization and PNG encoding via `BitmapDevice`
//!
//! Notes:
//! - Layout always covers every line of the region, so exports include
//!   content the live viewport has scrolled past.
//! - Devices receive laid-out lines, never raw paragraphs; anything that
//!   can consume lines can act as an export backend.

pub mod error;
pub mod raster;
pub mod region;

pub use error::{ExportError, ExportResult};
pub use raster::{BitmapDevice, RegionImage, encode_png, rasterize_region, write_region_image};
pub use region::{
    DEFAULT_WRAP_COLUMNS, LineRole, RegionContent, RegionLayout, RegionLine, RegionParagraph,
    RegionRegistry, wrap_text,
};

/// Paint target for laid-out region content.
pub trait RegionDevice {
    /// Announces the extent of the upcoming paint in rows and columns.
    fn begin(&mut self, rows: usize, columns: usize);

    /// Draws one laid-out line at `row`.
    fn draw_line(&mut self, row: usize, line: &RegionLine);
}

/// Replays a layout against a device, top to bottom.
pub fn paint_region(layout: &RegionLayout, device: &mut dyn RegionDevice) {
    device.begin(layout.lines.len(), layout.columns);

    for (row, line) in layout.lines.iter().enumerate() {
        device.draw_line(row, line);
    }
}

/// A [`RegionDevice`] that records drawn lines for text extraction.
#[derive(Debug, Default)]
pub struct TextExtractDevice {
    lines: Vec<String>,
}

impl TextExtractDevice {
    /// Consumes the device into the extracted plain text.
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

impl RegionDevice for TextExtractDevice {
    fn begin(&mut self, rows: usize, _columns: usize) {
        self.lines = Vec::with_capacity(rows);
    }

    fn draw_line(&mut self, _row: usize, line: &RegionLine) {
        self.lines.push(line.text.clone());
    }
}

/// Extracts the rendered text of a region, fully laid out.
pub fn extract_region_text(content: &RegionContent) -> String {
    let layout = content.layout();
    let mut device = TextExtractDevice::default();
    paint_region(&layout, &mut device);
    device.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_text_matches_layout_lines() {
        let mut content = RegionContent::new(80);
        content.push(RegionParagraph::new(
            Some("new goal started".to_string()),
            "ship the release notes",
        ));
        content.push(RegionParagraph::new(None, "done"));

        assert_eq!(
            extract_region_text(&content),
            "new goal started\nship the release notes\n\ndone"
        );
    }

    #[test]
    fn empty_region_extracts_to_empty_text() {
        let content = RegionContent::new(80);
        assert_eq!(extract_region_text(&content), "");
    }

    #[test]
    fn paint_visits_lines_in_order() {
        struct RowRecorder {
            rows: Vec<usize>,
        }

        impl RegionDevice for RowRecorder {
            fn begin(&mut self, _rows: usize, _columns: usize) {}

            fn draw_line(&mut self, row: usize, _line: &RegionLine) {
                self.rows.push(row);
            }
        }

        let mut content = RegionContent::new(80);
        content.push(RegionParagraph::new(None, "a"));
        content.push(RegionParagraph::new(None, "b"));

        let mut recorder = RowRecorder { rows: Vec::new() };
        paint_region(&content.layout(), &mut recorder);

        assert_eq!(recorder.rows, [0, 1, 2]);
    }
}
