//! CLI command implementations

pub mod accents;
pub mod average;
pub mod blur;
pub mod color;
pub mod colorize;
pub mod convert;
pub mod info;
pub mod resize;
pub mod trim;

use anyhow::{Context, Result};
use image::ImageFormat;
use imtools_analyze::format::parse_format;
use imtools_analyze::{AnalyzerConfig, ImageAnalyzer};
use std::path::Path;
use tracing::debug;

/// Load analyzer config, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(p) => AnalyzerConfig::from_file(p)
            .with_context(|| format!("Failed to load config: {}", p.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Open image from path
pub fn open_image(path: &Path, config: &AnalyzerConfig) -> Result<ImageAnalyzer> {
    ImageAnalyzer::open_with_config(path, config.clone())
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Pick the output format: explicit name, output extension, source format, PNG
pub fn output_format(
    explicit: Option<&str>,
    output: &Path,
    analyzer: &ImageAnalyzer,
) -> Result<ImageFormat> {
    if let Some(name) = explicit {
        return parse_format(name).with_context(|| format!("Bad --format '{}'", name));
    }
    let format = ImageFormat::from_path(output)
        .ok()
        .or(analyzer.image_format())
        .unwrap_or(ImageFormat::Png);
    debug!(format = ?format, output = %output.display(), "Output format");
    Ok(format)
}

/// Save image to path
pub fn save_image(analyzer: &ImageAnalyzer, output: &Path, format: Option<&str>) -> Result<()> {
    let format = output_format(format, output, analyzer)?;
    analyzer
        .save(output, format)
        .with_context(|| format!("Failed to save: {}", output.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_output_format_resolution() {
        let analyzer = ImageAnalyzer::from_image(
            DynamicImage::ImageRgb8(RgbImage::new(1, 1)),
            AnalyzerConfig::default(),
        )
        .unwrap();

        let f = output_format(Some("jpg"), Path::new("out.png"), &analyzer).unwrap();
        assert_eq!(f, ImageFormat::Jpeg);
        let f = output_format(None, Path::new("out.webp"), &analyzer).unwrap();
        assert_eq!(f, ImageFormat::WebP);
        let f = output_format(None, Path::new("out"), &analyzer).unwrap();
        assert_eq!(f, ImageFormat::Png);
        assert!(output_format(Some("psd"), Path::new("out"), &analyzer).is_err());
    }
}
