//! Geometric operations: crop and fuzzy border trim.
//!
//! # Example
//!
//! ```rust
//! use image::{DynamicImage, Rgb, RgbImage};
//! use imtools_ops::transform::{crop, trim_bounds};
//! use imtools_ops::Rect;
//!
//! let mut buf = RgbImage::from_pixel(16, 16, Rgb([0, 0, 0]));
//! buf.put_pixel(4, 6, Rgb([255, 255, 255]));
//! let img = DynamicImage::ImageRgb8(buf);
//!
//! assert_eq!(trim_bounds(&img, 0.0).unwrap(), Some(Rect::new(4, 6, 1, 1)));
//! let cropped = crop(&img, Rect::new(0, 0, 8, 8)).unwrap();
//! assert_eq!(cropped.width(), 8);
//! ```

use image::{DynamicImage, GenericImageView, Rgba};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult, Rect};

/// Crops `rect` out of the image, keeping its pixel layout.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the rectangle is empty or extends past
/// the image.
pub fn crop(img: &DynamicImage, rect: Rect) -> OpsResult<DynamicImage> {
    let bounds = Rect::from_size(img.width(), img.height());
    if rect.is_empty() || !bounds.contains_rect(&rect) {
        return Err(OpsError::InvalidDimensions(format!(
            "crop region {}x{}+{}+{} outside {}x{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            bounds.width,
            bounds.height
        )));
    }
    Ok(img.crop_imm(rect.x, rect.y, rect.width, rect.height))
}

/// Normalized distance between two RGBA pixels in `[0, 1]`.
///
/// Root mean square of the channel deltas over 255. Two fully transparent
/// pixels are equal whatever their color channels hold.
#[inline]
pub fn pixel_distance(a: Rgba<u8>, b: Rgba<u8>) -> f64 {
    if a[3] == 0 && b[3] == 0 {
        return 0.0;
    }
    let sum: f64 = a
        .0
        .iter()
        .zip(b.0.iter())
        .map(|(&p, &q)| {
            let d = p as f64 - q as f64;
            d * d
        })
        .sum();
    (sum / 4.0).sqrt() / 255.0
}

/// Bounding box left after peeling off the border color.
///
/// The border color is the top-left pixel; pixels within `fuzz` of it (see
/// [`pixel_distance`]) count as border. Trimming only happens when that color
/// frames the image, i.e. all four outer edges match it. Rows and columns are
/// then peeled inward one edge at a time. An unframed image keeps its full
/// bounds; a uniform one returns `None`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `fuzz` is outside `[0, 1]`.
pub fn trim_bounds(img: &DynamicImage, fuzz: f64) -> OpsResult<Option<Rect>> {
    if !(0.0..=1.0).contains(&fuzz) {
        return Err(OpsError::InvalidParameter(format!(
            "trim fuzz must be in [0, 1], got {}",
            fuzz
        )));
    }

    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Ok(None);
    }

    let rgba = img.to_rgba8();
    let border = *rgba.get_pixel(0, 0);
    trace!(?border, fuzz, "trim_bounds");

    let is_border = |x: u32, y: u32| pixel_distance(*rgba.get_pixel(x, y), border) <= fuzz;
    let row_is_border = |y: u32, left: u32, right: u32| (left..right).all(|x| is_border(x, y));
    let col_is_border = |x: u32, top: u32, bottom: u32| (top..bottom).all(|y| is_border(x, y));

    let framed = row_is_border(0, 0, w)
        && row_is_border(h - 1, 0, w)
        && col_is_border(0, 0, h)
        && col_is_border(w - 1, 0, h);
    if !framed {
        return Ok(Some(Rect::from_size(w, h)));
    }

    // Half-open bounds, shrunk edge by edge
    let (mut top, mut bottom, mut left, mut right) = (0u32, h, 0u32, w);
    while top < bottom && row_is_border(top, left, right) {
        top += 1;
    }
    if top == bottom {
        return Ok(None);
    }
    // Row `top` holds content, so every loop below stops before crossing it
    while row_is_border(bottom - 1, left, right) {
        bottom -= 1;
    }
    while col_is_border(left, top, bottom) {
        left += 1;
    }
    while col_is_border(right - 1, top, bottom) {
        right -= 1;
    }

    Ok(Some(Rect::new(left, top, right - left, bottom - top)))
}

/// Removes border rows and columns matching the top-left color.
///
/// Returns the trimmed image and the region it was cut from. Uniform and
/// unframed images come back unchanged with their full bounds. Content that
/// reaches an edge after the first pass leaves the result unframed, so a
/// second trim with the same fuzz is a no-op.
pub fn trim(img: &DynamicImage, fuzz: f64) -> OpsResult<(DynamicImage, Rect)> {
    let full = Rect::from_size(img.width(), img.height());
    match trim_bounds(img, fuzz)? {
        Some(rect) if rect != full => {
            debug!(
                from_w = full.width,
                from_h = full.height,
                x = rect.x,
                y = rect.y,
                w = rect.width,
                h = rect.height,
                "Trimmed"
            );
            Ok((crop(img, rect)?, rect))
        }
        _ => Ok((img.clone(), full)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{ColorType, Luma, GrayImage, RgbaImage};

    fn framed(w: u32, h: u32, inner: Rect, border: Rgba<u8>, fill: Rgba<u8>) -> DynamicImage {
        let mut buf = RgbaImage::from_pixel(w, h, border);
        for y in inner.y..inner.bottom() {
            for x in inner.x..inner.right() {
                buf.put_pixel(x, y, fill);
            }
        }
        DynamicImage::ImageRgba8(buf)
    }

    #[test]
    fn test_pixel_distance() {
        let black = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        assert_relative_eq!(pixel_distance(black, black), 0.0);
        assert_relative_eq!(pixel_distance(black, white), (0.75f64).sqrt(), epsilon = 1e-9);
        assert_relative_eq!(
            pixel_distance(Rgba([255, 0, 0, 0]), Rgba([0, 255, 0, 0])),
            0.0
        );
    }

    #[test]
    fn test_trim_removes_border() {
        let inner = Rect::new(3, 2, 5, 4);
        let img = framed(12, 9, inner, Rgba([255, 255, 255, 255]), Rgba([10, 90, 10, 255]));
        let (out, rect) = trim(&img, 0.0).unwrap();
        assert_eq!(rect, inner);
        assert_eq!(out.dimensions(), (5, 4));
        assert_eq!(out.to_rgba8().get_pixel(0, 0), &Rgba([10, 90, 10, 255]));
    }

    #[test]
    fn test_trim_fuzz_absorbs_near_border() {
        let img = framed(
            10,
            10,
            Rect::new(2, 2, 6, 6),
            Rgba([250, 250, 250, 255]),
            Rgba([240, 240, 240, 255]),
        );
        let (strict, _) = trim(&img, 0.0).unwrap();
        assert_eq!(strict.dimensions(), (6, 6));

        let (loose, rect) = trim(&img, 0.1).unwrap();
        assert_eq!(loose.dimensions(), (10, 10));
        assert_eq!(rect, Rect::from_size(10, 10));
    }

    #[test]
    fn test_trim_is_idempotent() {
        let img = framed(
            20,
            14,
            Rect::new(4, 5, 9, 3),
            Rgba([0, 0, 0, 0]),
            Rgba([200, 20, 20, 255]),
        );
        let (once, _) = trim(&img, 0.05).unwrap();
        let (twice, rect) = trim(&once, 0.05).unwrap();
        assert_eq!(once.dimensions(), twice.dimensions());
        assert_eq!(rect, Rect::from_size(9, 3));
    }

    #[test]
    fn test_trim_keeps_content_touching_edges() {
        // Red square with a white bar along its bottom row
        let mut buf = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        for y in 5..15 {
            for x in 5..15 {
                let px = if y == 14 { Rgba([255, 255, 255, 255]) } else { Rgba([220, 0, 0, 255]) };
                buf.put_pixel(x, y, px);
            }
        }
        let img = DynamicImage::ImageRgba8(buf);

        let (once, rect) = trim(&img, 0.1).unwrap();
        assert_eq!(rect, Rect::new(5, 5, 10, 10));
        let (twice, rect) = trim(&once, 0.1).unwrap();
        assert_eq!(twice.dimensions(), (10, 10));
        assert_eq!(rect, Rect::from_size(10, 10));
    }

    #[test]
    fn test_trim_logo_with_stripe_twice() {
        let mut buf = RgbaImage::from_pixel(60, 40, Rgba([0, 0, 0, 0]));
        for y in 10..30 {
            for x in 15..45 {
                let px = if (18..22).contains(&y) { Rgba([250, 250, 250, 255]) } else { Rgba([20, 30, 110, 255]) };
                buf.put_pixel(x, y, px);
            }
        }
        let img = DynamicImage::ImageRgba8(buf);

        let (once, _) = trim(&img, 0.1).unwrap();
        assert_eq!(once.dimensions(), (30, 20));
        let (twice, _) = trim(&once, 0.1).unwrap();
        assert_eq!(twice.dimensions(), (30, 20));
    }

    #[test]
    fn test_unframed_image_keeps_bounds() {
        // Top-left color stops at the right edge
        let mut buf = RgbaImage::from_pixel(6, 4, Rgba([0, 0, 0, 255]));
        for y in 0..4 {
            buf.put_pixel(5, y, Rgba([255, 255, 255, 255]));
        }
        let img = DynamicImage::ImageRgba8(buf);
        assert_eq!(trim_bounds(&img, 0.0).unwrap(), Some(Rect::from_size(6, 4)));
        assert_eq!(trim(&img, 0.0).unwrap().0.dimensions(), (6, 4));
    }

    #[test]
    fn test_trim_uniform_image_unchanged() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(7, 3, Luma([128])));
        let (out, rect) = trim(&img, 0.0).unwrap();
        assert_eq!(out.dimensions(), (7, 3));
        assert_eq!(out.color(), ColorType::L8);
        assert_eq!(rect, Rect::from_size(7, 3));
        assert_eq!(trim_bounds(&img, 0.0).unwrap(), None);
    }

    #[test]
    fn test_trim_rejects_bad_fuzz() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        assert!(trim(&img, -0.1).is_err());
        assert!(trim(&img, 1.5).is_err());
        assert!(trim(&img, f64::NAN).is_err());
    }

    #[test]
    fn test_crop_bounds_checked() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(8, 8));
        assert!(crop(&img, Rect::new(4, 4, 4, 4)).is_ok());
        assert!(crop(&img, Rect::new(4, 4, 5, 4)).is_err());
        assert!(crop(&img, Rect::new(0, 0, 0, 4)).is_err());
    }
}
