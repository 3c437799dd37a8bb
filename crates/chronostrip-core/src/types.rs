//! Core data types for the chronostrip pipeline.

use std::path::PathBuf;

/// A single RGB color, the unit of reduction for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// Per-slot result of reducing one image to its average color.
///
/// The worker pool writes exactly one outcome per submitted path, at the
/// slot matching the path's input index. A `Failed` slot records a decode
/// failure without disturbing the slots around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOutcome {
    Resolved(Color),
    Failed,
}

impl ColorOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ColorOutcome::Failed)
    }

    /// The resolved color, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            ColorOutcome::Resolved(c) => Some(*c),
            ColorOutcome::Failed => None,
        }
    }
}

/// Counters describing one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files found under the input directory
    pub discovered: usize,

    /// Files rejected by the image type probe
    pub skipped_non_image: usize,

    /// Images dropped in chronological mode for lack of a usable timestamp
    pub missing_timestamp: usize,

    /// Images that could not be decoded (recorded per-slot, never fatal)
    pub failed: usize,

    /// Final strip width in columns
    pub columns: u32,

    /// Final strip height in rows (derived from columns)
    pub rows: u32,

    /// Where the barcode was written
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_pixel() {
        let px: image::Rgb<u8> = Color::new(10, 20, 30).into();
        assert_eq!(px.0, [10, 20, 30]);
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(ColorOutcome::Failed.is_failed());
        assert_eq!(ColorOutcome::Failed.color(), None);

        let ok = ColorOutcome::Resolved(Color::WHITE);
        assert!(!ok.is_failed());
        assert_eq!(ok.color(), Some(Color::WHITE));
    }
}
