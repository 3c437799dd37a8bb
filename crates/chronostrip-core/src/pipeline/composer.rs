//! Barcode composition: one pixel column per color, plus date labels.

use image::RgbImage;

use crate::types::Color;

use super::temporal::TimestampedPath;

/// Fixed multiplier converting column count to canvas row count.
pub const HEIGHT_RATIO: f64 = 0.25;

/// Number of evenly spaced date labels across the strip.
const LABEL_SEGMENTS: u32 = 4;

/// Date label text format.
const LABEL_FORMAT: &str = "%Y:%m:%d";

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
const GLYPH_SCALE: u32 = 2;
const GLYPH_ADVANCE: u32 = GLYPH_COLS + 1;
const BOTTOM_MARGIN: u32 = 5;

/// Derived barcode dimensions. Rows follow from columns via
/// [`HEIGHT_RATIO`] and are never configured independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeSpec {
    pub columns: u32,
    pub rows: u32,
}

impl BarcodeSpec {
    /// Dimensions for a strip of `columns` colors.
    ///
    /// Zero colors yield an empty (0x0) spec; a non-empty strip always has
    /// at least one row.
    pub fn for_columns(columns: usize) -> Self {
        let columns = columns as u32;
        // Truncating, not rounding: 6 columns give 1 row, not 2.
        let rows = if columns == 0 {
            0
        } else {
            (((columns as f64) * HEIGHT_RATIO) as u32).max(1)
        };
        Self { columns, rows }
    }
}

/// Render a color sequence as a barcode canvas.
///
/// Column x is filled top to bottom with `colors[x]`. Every cell carries an
/// explicit value so the canvas can be handed straight to the encoder.
pub fn compose(colors: &[Color]) -> RgbImage {
    let spec = BarcodeSpec::for_columns(colors.len());
    let mut canvas = RgbImage::new(spec.columns, spec.rows);

    for (x, color) in colors.iter().enumerate() {
        let pixel: image::Rgb<u8> = (*color).into();
        for y in 0..spec.rows {
            canvas.put_pixel(x as u32, y, pixel);
        }
    }

    canvas
}

/// Overlay date labels at fixed horizontal intervals.
///
/// Each label shows the timeline entry nearest its own center column, so
/// this is only meaningful when the strip was composed from a
/// chronologically sorted sequence. Strips too small to hold a label are
/// left untouched.
pub fn overlay_dates(canvas: &mut RgbImage, timeline: &[TimestampedPath]) {
    if timeline.is_empty() {
        return;
    }

    let (width, height) = canvas.dimensions();
    let label_width = label_width_px();
    let label_height = GLYPH_ROWS * GLYPH_SCALE;
    let x_step = width / LABEL_SEGMENTS;

    if x_step < label_width + 2 || height < label_height + BOTTOM_MARGIN + 1 {
        tracing::debug!("Canvas {width}x{height} too small for date labels, skipping overlay");
        return;
    }

    let y = height - label_height - BOTTOM_MARGIN;
    let x_offset = (x_step - label_width) / 2;

    for segment in 0..LABEL_SEGMENTS {
        let x = segment * x_step + x_offset;
        let center = x + label_width / 2;
        let index = ((center as usize) * timeline.len() / (width as usize))
            .min(timeline.len() - 1);
        let text = timeline[index].taken_at.format(LABEL_FORMAT).to_string();

        // White halo first, black glyphs on top, so labels read on both
        // light and dark strips.
        for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
            draw_text(canvas, x as i64 + dx, y as i64 + dy, &text, Color::WHITE);
        }
        draw_text(canvas, x as i64, y as i64, &text, Color::BLACK);
    }
}

/// Pixel width of one "YYYY:MM:DD" label.
fn label_width_px() -> u32 {
    let chars = 10u32;
    chars * GLYPH_ADVANCE * GLYPH_SCALE - GLYPH_SCALE
}

/// Draw text with the built-in digit glyphs. Unknown characters advance
/// without drawing; out-of-bounds pixels are clipped.
fn draw_text(canvas: &mut RgbImage, x: i64, y: i64, text: &str, color: Color) {
    let (width, height) = canvas.dimensions();
    let pixel: image::Rgb<u8> = color.into();
    let mut pen_x = x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (gy, row) in rows.iter().enumerate() {
                for gx in 0..GLYPH_COLS {
                    if row & (1 << (GLYPH_COLS - 1 - gx)) == 0 {
                        continue;
                    }
                    for sy in 0..GLYPH_SCALE {
                        for sx in 0..GLYPH_SCALE {
                            let px = pen_x + (gx * GLYPH_SCALE + sx) as i64;
                            let py = y + (gy as u32 * GLYPH_SCALE + sy) as i64;
                            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                                canvas.put_pixel(px as u32, py as u32, pixel);
                            }
                        }
                    }
                }
            }
        }
        pen_x += (GLYPH_ADVANCE * GLYPH_SCALE) as i64;
    }
}

/// 5x7 bitmap rows for the label alphabet (digits and ':').
/// Bit 4 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}
