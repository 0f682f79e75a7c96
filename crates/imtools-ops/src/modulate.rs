//! Brightness, saturation and hue modulation in HSL space.
//!
//! Percentages follow the usual modulate convention: 100 leaves a channel
//! alone, 0 removes it, 200 doubles it. Hue is a rotation where 0 and 200
//! both mean a half turn.
//!
//! ```rust
//! use image::{DynamicImage, Rgb, RgbImage};
//! use imtools_ops::modulate::{colorize, Shade};
//!
//! let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([200, 40, 40])));
//! let black = colorize(&img, Shade::Black).unwrap();
//! assert_eq!(black.to_rgb8().get_pixel(0, 0), &Rgb([0, 0, 0]));
//! ```

use std::fmt;
use std::str::FromStr;

use image::DynamicImage;
use imtools_color::hsl::{hsl_to_rgb, rgb_to_hsl};
use tracing::debug;

use crate::layout::{from_rgba_f32, to_rgba_f32};
use crate::{OpsError, OpsResult};

/// Target shade for [`colorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// Lightness scaled to zero.
    Black,
    /// Lightness scaled by 255%.
    White,
}

impl Shade {
    /// Brightness percentage that produces this shade.
    pub fn brightness_pct(self) -> f32 {
        match self {
            Shade::Black => 0.0,
            Shade::White => 255.0,
        }
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shade::Black => "black",
            Shade::White => "white",
        })
    }
}

impl FromStr for Shade {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_lowercase().as_str() {
            "black" => Ok(Shade::Black),
            "white" => Ok(Shade::White),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown shade '{}' (black, white)",
                other
            ))),
        }
    }
}

/// Scales lightness and saturation and rotates hue.
///
/// Alpha is untouched. Results are clamped to the displayable range.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] for negative or non-finite percentages.
pub fn modulate(
    img: &DynamicImage,
    brightness_pct: f32,
    saturation_pct: f32,
    hue_pct: f32,
) -> OpsResult<DynamicImage> {
    for (name, v) in [
        ("brightness", brightness_pct),
        ("saturation", saturation_pct),
        ("hue", hue_pct),
    ] {
        if !v.is_finite() || v < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "{} percentage must be >= 0, got {}",
                name, v
            )));
        }
    }
    debug!(brightness_pct, saturation_pct, hue_pct, "Modulating");

    let l_scale = brightness_pct / 100.0;
    let s_scale = saturation_pct / 100.0;
    let hue_shift = (hue_pct - 100.0) / 200.0;

    let (w, h, mut data) = to_rgba_f32(img);
    for px in data.chunks_exact_mut(4) {
        let [hue, s, l] = rgb_to_hsl([px[0], px[1], px[2]]);
        let rgb = hsl_to_rgb([
            hue + hue_shift,
            (s * s_scale).clamp(0.0, 1.0),
            (l * l_scale).clamp(0.0, 1.0),
        ]);
        px[0] = rgb[0].clamp(0.0, 1.0);
        px[1] = rgb[1].clamp(0.0, 1.0);
        px[2] = rgb[2].clamp(0.0, 1.0);
    }

    from_rgba_f32(w, h, data, img.color())
}

/// Recolors a logo-style image towards black or white.
///
/// Equivalent to `modulate(img, 0 | 255, 100, 0)`. Black is exact; white
/// saturates every pixel whose lightness is at least 40%, darker pixels
/// become light tints. Alpha is preserved.
pub fn colorize(img: &DynamicImage, shade: Shade) -> OpsResult<DynamicImage> {
    modulate(img, shade.brightness_pct(), 100.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb(rgb)))
    }

    #[test]
    fn test_identity() {
        let img = solid([12, 150, 220]);
        let out = modulate(&img, 100.0, 100.0, 100.0).unwrap();
        let px = out.to_rgb8().get_pixel(1, 1).0;
        for (a, b) in px.iter().zip([12u8, 150, 220]) {
            assert!(a.abs_diff(b) <= 1);
        }
    }

    #[test]
    fn test_desaturate_gives_grey() {
        let out = modulate(&solid([200, 40, 40]), 100.0, 0.0, 100.0).unwrap();
        let [r, g, b] = out.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_hue_half_turn() {
        let out = modulate(&solid([255, 0, 0]), 100.0, 100.0, 0.0).unwrap();
        assert_eq!(out.to_rgb8().get_pixel(0, 0), &Rgb([0, 255, 255]));
    }

    #[test]
    fn test_colorize_keeps_alpha() {
        let mut buf = RgbaImage::from_pixel(2, 1, Rgba([200, 210, 220, 255]));
        buf.put_pixel(1, 0, Rgba([200, 210, 220, 0]));
        let img = DynamicImage::ImageRgba8(buf);

        let white = colorize(&img, Shade::White).unwrap().to_rgba8();
        assert_eq!(white.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(white.get_pixel(1, 0)[3], 0);

        let black = colorize(&img, Shade::Black).unwrap().to_rgba8();
        assert_eq!(black.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_shade_parse() {
        assert_eq!("WHITE".parse::<Shade>().unwrap(), Shade::White);
        assert!("grey".parse::<Shade>().is_err());
        assert_eq!(Shade::Black.to_string(), "black");
    }

    #[test]
    fn test_rejects_negative() {
        assert!(modulate(&solid([0, 0, 0]), -1.0, 100.0, 100.0).is_err());
    }
}
