//! Image resize and resampling operations.
//!
//! Resampling kernels come from [`image::imageops`]; this module decides the
//! target geometry.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Catmull-Rom cubic (sharper than bilinear)
//! - [`Filter::Gaussian`] - Soft, no ringing
//! - [`Filter::Lanczos3`] - High-quality sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use image::{DynamicImage, RgbImage};
//! use imtools_ops::resize::{resize, Filter};
//!
//! let img = DynamicImage::ImageRgb8(RgbImage::new(1920, 1080));
//!
//! // Bestfit keeps the aspect ratio inside the box
//! let fitted = resize(&img, 640, 640, Filter::Lanczos3, true).unwrap();
//! assert_eq!((fitted.width(), fitted.height()), (640, 360));
//!
//! // Exact stretches to the box
//! let exact = resize(&img, 640, 640, Filter::Bilinear, false).unwrap();
//! assert_eq!((exact.width(), exact.height()), (640, 640));
//! ```

use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Catmull-Rom cubic interpolation.
    #[default]
    Bicubic,
    /// Gaussian resampling.
    Gaussian,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// The matching [`image`] crate filter.
    #[inline]
    pub fn filter_type(self) -> FilterType {
        match self {
            Filter::Nearest => FilterType::Nearest,
            Filter::Bilinear => FilterType::Triangle,
            Filter::Bicubic => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Gaussian => "gaussian",
            Filter::Lanczos3 => "lanczos",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_lowercase().as_str() {
            "nearest" | "point" => Ok(Filter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "catrom" | "catmull-rom" => Ok(Filter::Bicubic),
            "gaussian" | "gauss" => Ok(Filter::Gaussian),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown filter '{}' (nearest, bilinear, bicubic, gaussian, lanczos)",
                other
            ))),
        }
    }
}

/// Resizes an image.
///
/// With `bestfit` the aspect ratio is kept and the result fits inside
/// `width x height`; without it the image is stretched to exactly that size.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if either target dimension is zero.
pub fn resize(
    img: &DynamicImage,
    width: u32,
    height: u32,
    filter: Filter,
    bestfit: bool,
) -> OpsResult<DynamicImage> {
    trace!(width, height, %filter, bestfit, "resize");

    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    let (dst_w, dst_h) = if bestfit {
        fit_dimensions(img.width(), img.height(), width, height)
    } else {
        (width, height)
    };

    debug!(src_w = img.width(), src_h = img.height(), dst_w, dst_h, "Resizing");
    Ok(img.resize_exact(dst_w, dst_h, filter.filter_type()))
}

/// Downsamples so that neither side exceeds `max_side`.
///
/// Images that already fit are returned as an unscaled copy; this never
/// upscales. `max_side` is expected to be non-zero.
pub fn fit_within(img: &DynamicImage, max_side: u32, filter: Filter) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_side && h <= max_side {
        return img.clone();
    }

    let (dst_w, dst_h) = fit_dimensions(w, h, max_side, max_side);
    debug!(src_w = w, src_h = h, dst_w, dst_h, "Downsampling to fit");
    img.resize_exact(dst_w, dst_h, filter.filter_type())
}

/// Averages the whole image into a single pixel.
///
/// Color is weighted by alpha, so fully transparent pixels add nothing to
/// the RGB result and only lower the averaged alpha. An image with no
/// opaque coverage at all averages to transparent black.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] for an empty image.
pub fn average(img: &DynamicImage) -> OpsResult<Rgba<u8>> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot average an empty {}x{} image",
            w, h
        )));
    }

    // Premultiplied sums: [r*a, g*a, b*a, a]
    let rgba = img.to_rgba32f();
    let mut sum = [0f64; 4];
    for px in rgba.pixels() {
        let a = px[3] as f64;
        sum[0] += px[0] as f64 * a;
        sum[1] += px[1] as f64 * a;
        sum[2] += px[2] as f64 * a;
        sum[3] += a;
    }

    let n = w as f64 * h as f64;
    let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let alpha = sum[3] / n;
    let rgb = if sum[3] > 1e-12 {
        [sum[0] / sum[3], sum[1] / sum[3], sum[2] / sum[3]]
    } else {
        [0.0; 3]
    };
    trace!(w, h, alpha, "average");

    Ok(Rgba([to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), to_u8(alpha)]))
}

/// Calculates the aspect-preserving dimensions for a target size.
///
/// # Example
///
/// ```rust
/// use imtools_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360));
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale_w = max_w as f64 / src_w.max(1) as f64;
    let scale_h = max_h as f64 / src_h.max(1) as f64;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));

    (new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, RgbaImage};

    #[test]
    fn test_fit_dimensions() {
        // Wide image into square box
        assert_eq!(fit_dimensions(1920, 1080, 640, 640), (640, 360));

        // Tall image into square box
        assert_eq!(fit_dimensions(1080, 1920, 640, 640), (360, 640));

        // Smaller images scale up to touch the box
        assert_eq!(fit_dimensions(320, 240, 640, 480), (640, 480));

        // Extreme aspect never collapses to zero
        assert_eq!(fit_dimensions(10_000, 1, 500, 500), (500, 1));
    }

    #[test]
    fn test_filter_names() {
        assert_eq!("lanczos".parse::<Filter>().unwrap(), Filter::Lanczos3);
        assert_eq!("Catrom".parse::<Filter>().unwrap(), Filter::Bicubic);
        assert_eq!("linear".parse::<Filter>().unwrap(), Filter::Bilinear);
        assert!("sinc".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::Bicubic);
    }

    #[test]
    fn test_resize_bestfit_and_exact() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(100, 50));
        let fit = resize(&img, 40, 40, Filter::Bilinear, true).unwrap();
        assert_eq!(fit.dimensions(), (40, 20));

        let exact = resize(&img, 40, 40, Filter::Bilinear, false).unwrap();
        assert_eq!(exact.dimensions(), (40, 40));

        assert!(resize(&img, 0, 40, Filter::Bilinear, true).is_err());
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let small = DynamicImage::ImageRgb8(RgbImage::new(30, 20));
        assert_eq!(fit_within(&small, 500, Filter::Lanczos3).dimensions(), (30, 20));

        let large = DynamicImage::ImageRgb8(RgbImage::new(1000, 250));
        assert_eq!(fit_within(&large, 500, Filter::Lanczos3).dimensions(), (500, 125));
    }

    #[test]
    fn test_average_of_two_halves() {
        let mut buf = RgbImage::from_pixel(4, 2, Rgb([0, 0, 0]));
        for y in 0..2 {
            for x in 2..4 {
                buf.put_pixel(x, y, Rgb([200, 100, 50]));
            }
        }
        let avg = average(&DynamicImage::ImageRgb8(buf)).unwrap();
        let expected = [100u8, 50, 25, 255];
        for (got, want) in avg.0.iter().zip(expected) {
            assert!(got.abs_diff(want) <= 1, "{:?} vs {:?}", avg, expected);
        }
    }

    #[test]
    fn test_average_leaves_source_alone() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([9, 8, 7, 255])));
        let avg = average(&img).unwrap();
        assert_eq!(avg, Rgba([9, 8, 7, 255]));
        assert_eq!(img.dimensions(), (8, 8));
    }

    #[test]
    fn test_average_weights_color_by_alpha() {
        let mut buf = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        buf.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
        let avg = average(&DynamicImage::ImageRgba8(buf)).unwrap();
        assert_eq!(avg, Rgba([200, 100, 50, 64]));

        // Half-transparent pixel counts half as much as an opaque one
        let mut buf = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 255, 255]));
        buf.put_pixel(1, 0, Rgba([255, 0, 0, 128]));
        let avg = average(&DynamicImage::ImageRgba8(buf)).unwrap();
        assert!(avg[0].abs_diff(85) <= 1, "{:?}", avg);
        assert!(avg[2].abs_diff(170) <= 1, "{:?}", avg);
    }

    #[test]
    fn test_average_fully_transparent() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([90, 90, 90, 0])));
        assert_eq!(average(&img).unwrap(), Rgba([0, 0, 0, 0]));
    }
}
