//! Average color reduction for a single image.

use std::path::Path;

use crate::error::PipelineError;
use crate::types::Color;

/// Decode an image and reduce it to its per-channel mean color.
///
/// Channel averaging is done in plain RGB space with u64 accumulators;
/// chronostrip deliberately does no color-space-aware (linear/Lab)
/// averaging.
pub fn average_color(path: &Path) -> Result<Color, PipelineError> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {}", e),
        })?
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;

    let img = reader.decode().map_err(|e| PipelineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    let pixel_count = (rgb.width() as u64) * (rgb.height() as u64);
    if pixel_count == 0 {
        return Err(PipelineError::Decode {
            path: path.to_path_buf(),
            message: "Image has no pixels".to_string(),
        });
    }

    let mut sums = [0u64; 3];
    for px in rgb.pixels() {
        sums[0] += px.0[0] as u64;
        sums[1] += px.0[1] as u64;
        sums[2] += px.0[2] as u64;
    }

    Ok(Color::new(
        (sums[0] / pixel_count) as u8,
        (sums[1] / pixel_count) as u8,
        (sums[2] / pixel_count) as u8,
    ))
}
