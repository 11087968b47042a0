//! Region rasterization to bitmap.
//!
//! Draws laid-out region lines into an RGBA buffer with an 8x8 bitmap
//! font, then encodes the buffer as PNG.

use std::path::Path;

use font8x8::legacy::BASIC_LEGACY;
use image::{ImageBuffer, Rgba};
use snafu::{OptionExt, ResultExt};

use crate::error::{
    EncodePngSnafu, ExportResult, InvalidRasterDimensionsSnafu, WriteImageFileSnafu,
};
use crate::region::{LineRole, RegionContent, RegionLine};
use crate::{RegionDevice, paint_region};

pub type RegionImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Side length of one unscaled glyph cell.
const GLYPH_CELL: u32 = 8;
/// Integer upscale applied to every glyph pixel.
const RASTER_SCALE: u32 = 2;
/// Vertical padding between laid-out rows.
const ROW_GAP: u32 = 6;
/// Outer margin around the painted content.
const MARGIN: u32 = 16;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 27, 255]);
const BODY_COLOR: Rgba<u8> = Rgba([228, 228, 231, 255]);
const HEADING_COLOR: Rgba<u8> = Rgba([125, 211, 252, 255]);

const fn row_height() -> u32 {
    GLYPH_CELL * RASTER_SCALE + ROW_GAP
}

/// Width in pixels of a raster covering `columns` glyph cells.
pub const fn raster_width(columns: usize) -> u32 {
    MARGIN * 2 + columns as u32 * GLYPH_CELL * RASTER_SCALE
}

/// Height in pixels of a raster covering `rows` laid-out lines.
pub const fn raster_height(rows: usize) -> u32 {
    MARGIN * 2 + rows as u32 * row_height()
}

/// Bitmap rendering device.
#[derive(Debug, Default)]
pub struct BitmapDevice {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl BitmapDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the device into the finished RGBA image.
    pub fn into_image(self) -> ExportResult<RegionImage> {
        let width = self.width;
        let height = self.height;

        ImageBuffer::from_raw(width, height, self.buffer).context(InvalidRasterDimensionsSnafu {
            stage: "assemble-region-image",
            width,
            height,
        })
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        // Clip to the raster extent.
        if x >= self.width || y >= self.height {
            return;
        }

        let offset = ((y * self.width + x) * 4) as usize;
        self.buffer[offset..offset + 4].copy_from_slice(&color.0);
    }

    fn draw_glyph(&mut self, column: u32, top: u32, ch: char, color: Rgba<u8>) {
        let glyph = glyph_bitmap(ch);
        let left = MARGIN + column * GLYPH_CELL * RASTER_SCALE;

        for (glyph_y, bits) in glyph.iter().enumerate() {
            for glyph_x in 0..GLYPH_CELL {
                if bits & (1 << glyph_x) == 0 {
                    continue;
                }

                for scale_y in 0..RASTER_SCALE {
                    for scale_x in 0..RASTER_SCALE {
                        let x = left + glyph_x * RASTER_SCALE + scale_x;
                        let y = top + glyph_y as u32 * RASTER_SCALE + scale_y;
                        self.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

impl RegionDevice for BitmapDevice {
    fn begin(&mut self, rows: usize, columns: usize) {
        self.width = raster_width(columns);
        self.height = raster_height(rows);
        self.buffer = vec![0u8; (self.width * self.height * 4) as usize];

        for chunk in self.buffer.chunks_exact_mut(4) {
            chunk.copy_from_slice(&BACKGROUND.0);
        }
    }

    fn draw_line(&mut self, row: usize, line: &RegionLine) {
        let color = match line.role {
            LineRole::Heading => HEADING_COLOR,
            LineRole::Body => BODY_COLOR,
            LineRole::Blank => return,
        };

        let top = MARGIN + row as u32 * row_height();
        for (column, ch) in line.text.chars().enumerate() {
            self.draw_glyph(column as u32, top, ch, color);
        }
    }
}

fn glyph_bitmap(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        // Non-ASCII renders as a substitute glyph rather than a gap.
        BASIC_LEGACY[b'?' as usize]
    }
}

/// Rasterizes the full logical content of a region into an RGBA image.
pub fn rasterize_region(content: &RegionContent) -> ExportResult<RegionImage> {
    let layout = content.layout();
    let mut device = BitmapDevice::new();
    paint_region(&layout, &mut device);
    device.into_image()
}

/// Encodes a region image as PNG bytes.
pub fn encode_png(image: &RegionImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .context(EncodePngSnafu {
            stage: "encode-region-png",
        })?;

    Ok(bytes)
}

/// Rasterizes `content` and writes the encoded PNG to `path`.
pub fn write_region_image(content: &RegionContent, path: &Path) -> ExportResult<()> {
    let image = rasterize_region(content)?;
    let bytes = encode_png(&image)?;

    std::fs::write(path, bytes).context(WriteImageFileSnafu {
        stage: "write-region-image",
        path: path.to_path_buf(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionParagraph;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample_content() -> RegionContent {
        let mut content = RegionContent::new(16);
        content.push(RegionParagraph::new(
            Some("new goal started".to_string()),
            "hello",
        ));
        content
    }

    #[test]
    fn raster_dimensions_follow_layout_extent() {
        let content = sample_content();
        let rows = content.layout().lines.len();

        let image = rasterize_region(&content).expect("rasterize sample region");

        assert_eq!(image.width(), raster_width(16));
        assert_eq!(image.height(), raster_height(rows));
    }

    #[test]
    fn raster_paints_glyph_pixels_over_background() {
        let image = rasterize_region(&sample_content()).expect("rasterize sample region");

        assert!(image.pixels().any(|pixel| *pixel != BACKGROUND));
    }

    #[test]
    fn empty_region_rasterizes_to_margins_only() {
        let content = RegionContent::new(16);

        let image = rasterize_region(&content).expect("rasterize empty region");

        assert_eq!(image.height(), raster_height(0));
        assert!(image.pixels().all(|pixel| *pixel == BACKGROUND));
    }

    #[test]
    fn encoded_output_is_png() {
        let image = rasterize_region(&sample_content()).expect("rasterize sample region");

        let bytes = encode_png(&image).expect("encode sample region");

        assert_eq!(bytes[..8], PNG_SIGNATURE);
    }

    #[test]
    fn non_ascii_falls_back_to_substitute_glyph() {
        assert_eq!(glyph_bitmap('é'), glyph_bitmap('?'));
        assert_eq!(glyph_bitmap('a'), BASIC_LEGACY[b'a' as usize]);
    }
}
