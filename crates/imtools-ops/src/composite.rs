//! Alpha compositing onto a solid background.
//!
//! Encoders without an alpha channel (JPEG, BMP) need an opaque image; the
//! analyzer flattens onto its background color before handing pixels over.

use image::{DynamicImage, Rgba};
use tracing::{debug, trace};

/// Porter-Duff "over" for straight (non-premultiplied) RGBA.
///
/// ```rust
/// use imtools_ops::composite::over_pixel;
///
/// let half_red = [1.0, 0.0, 0.0, 0.5];
/// let white = [1.0, 1.0, 1.0, 1.0];
/// assert_eq!(over_pixel(half_red, white), [1.0, 0.5, 0.5, 1.0]);
/// ```
#[inline]
pub fn over_pixel(fg: [f32; 4], bg: [f32; 4]) -> [f32; 4] {
    let fg_a = fg[3];
    let bg_a = bg[3];
    let out_a = fg_a + bg_a * (1.0 - fg_a);

    if out_a < 1e-8 {
        return [0.0, 0.0, 0.0, 0.0];
    }

    let inv_out_a = 1.0 / out_a;
    [
        (fg[0] * fg_a + bg[0] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[1] * fg_a + bg[1] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[2] * fg_a + bg[2] * bg_a * (1.0 - fg_a)) * inv_out_a,
        out_a,
    ]
}

/// Composites the image over `background` and drops the alpha channel.
///
/// Images without alpha are only converted to RGB. A fully transparent
/// background discards alpha without blending.
pub fn flatten(img: &DynamicImage, background: Rgba<u8>) -> DynamicImage {
    if !img.color().has_alpha() || background[3] == 0 {
        trace!(color = ?img.color(), "flatten: dropping alpha");
        return DynamicImage::ImageRgb8(img.to_rgb8());
    }

    debug!(?background, "Flattening onto background");
    let bg = background.0.map(|v| v as f32 / 255.0);
    let mut rgba = img.to_rgba32f();
    for px in rgba.pixels_mut() {
        px.0 = over_pixel(px.0, bg);
    }
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba32F(rgba).to_rgb8())
}
