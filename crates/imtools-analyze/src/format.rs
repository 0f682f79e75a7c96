//! Image format names.
//!
//! Formats are reported with upper-case names (`PNG`, `JPEG`) and parsed
//! from names or file extensions in any case.

use image::ImageFormat;

use crate::{AnalyzeError, AnalyzeResult};

/// Upper-case name of a format.
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Gif => "GIF",
        ImageFormat::WebP => "WEBP",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Ico => "ICO",
        _ => "UNKNOWN",
    }
}

/// Parses a format name or extension, e.g. `png`, `JPG`, `.tiff`.
pub fn parse_format(name: &str) -> AnalyzeResult<ImageFormat> {
    let ext = name.trim().trim_start_matches('.');
    ImageFormat::from_extension(ext)
        .ok_or_else(|| AnalyzeError::invalid_parameter(format!("unknown image format '{}'", name)))
}

/// Returns `true` if the encoder for `format` can store an alpha channel.
pub fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg)
}
