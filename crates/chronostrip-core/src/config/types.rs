//! Sub-configuration structs and the output format enum.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Worker pool and discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of worker threads claiming images from the shared cursor
    pub threads: usize,

    /// File extensions accepted during discovery
    pub supported_formats: Vec<String>,

    /// Probe file headers before processing, rejecting non-image files
    pub check_types: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "tiff".to_string(),
                "tif".to_string(),
                "bmp".to_string(),
                "gif".to_string(),
                "webp".to_string(),
            ],
            check_types: true,
        }
    }
}

/// Barcode output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeConfig {
    /// Default output format when the CLI does not override it
    pub format: OutputFormat,

    /// Overlay date labels on chronologically sorted strips
    pub date_labels: bool,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            date_labels: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Raster format the barcode is encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Tiff,
    Bmp,
}

impl OutputFormat {
    /// The `image` crate format this maps to.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Bmp => "bmp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("tif".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert!("webm".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Tiff.to_string(), "tiff");
    }

    #[test]
    fn test_default_formats_cover_common_extensions() {
        let config = ProcessingConfig::default();
        for ext in ["jpg", "jpeg", "png", "tiff"] {
            assert!(config.supported_formats.iter().any(|f| f == ext));
        }
    }
}
