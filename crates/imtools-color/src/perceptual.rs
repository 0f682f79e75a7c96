//! Perceived brightness and saturation.
//!
//! Brightness uses the weighted quadratic mean
//!
//! ```text
//! B = sqrt(0.241 * R² + 0.691 * G² + 0.068 * B²)
//! ```
//!
//! over 0-255 channels, so pure white scores about 255 and pure black 0.
//! Green dominates, blue barely counts.
//!
//! Saturation is `(max - min) / max`, which is undefined for pure black.
//! [`saturation`] reports that case as [`ColorError::DivisionByZero`] instead
//! of returning NaN.
//!
//! # Example
//!
//! ```rust
//! use imtools_color::{brightness, saturation, Color};
//!
//! let grey = Color::new(128, 128, 128);
//! assert!(brightness(Color::WHITE)? > brightness(grey)?);
//! assert_eq!(saturation(grey)?, 0.0);
//! assert!(saturation(Color::BLACK).is_err());
//! # Ok::<(), imtools_color::ColorError>(())
//! ```

use crate::error::{ColorError, ColorResult};
use crate::hex::parse_hex;
use crate::rgb::Color;

/// Brightness weight for the red channel.
pub const BRIGHTNESS_WEIGHT_R: f64 = 0.241;

/// Brightness weight for the green channel.
pub const BRIGHTNESS_WEIGHT_G: f64 = 0.691;

/// Brightness weight for the blue channel.
pub const BRIGHTNESS_WEIGHT_B: f64 = 0.068;

/// A color given either as a hex string or as an already parsed triple.
///
/// Resolved once with [`ColorInput::resolve`]; the math functions only ever
/// see a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorInput<'a> {
    /// Unparsed hex string, e.g. `"#ff8000"` or `"f80"`.
    Hex(&'a str),
    /// Parsed channels.
    Triple(Color),
}

impl ColorInput<'_> {
    /// Turns the input into a [`Color`], parsing hex strings.
    pub fn resolve(self) -> ColorResult<Color> {
        match self {
            ColorInput::Hex(hex) => parse_hex(hex),
            ColorInput::Triple(color) => Ok(color),
        }
    }
}

impl<'a> From<&'a str> for ColorInput<'a> {
    fn from(hex: &'a str) -> Self {
        ColorInput::Hex(hex)
    }
}

impl<'a> From<&'a String> for ColorInput<'a> {
    fn from(hex: &'a String) -> Self {
        ColorInput::Hex(hex.as_str())
    }
}

impl From<Color> for ColorInput<'_> {
    fn from(color: Color) -> Self {
        ColorInput::Triple(color)
    }
}

impl From<[u8; 3]> for ColorInput<'_> {
    fn from(rgb: [u8; 3]) -> Self {
        ColorInput::Triple(rgb.into())
    }
}

impl From<(u8, u8, u8)> for ColorInput<'_> {
    fn from(rgb: (u8, u8, u8)) -> Self {
        ColorInput::Triple(rgb.into())
    }
}

impl Color {
    /// Perceived brightness of this color, 0 for black.
    #[inline]
    pub fn brightness(self) -> f64 {
        let r = self.r as f64;
        let g = self.g as f64;
        let b = self.b as f64;
        (BRIGHTNESS_WEIGHT_R * r * r + BRIGHTNESS_WEIGHT_G * g * g + BRIGHTNESS_WEIGHT_B * b * b)
            .sqrt()
    }

    /// Saturation `(max - min) / max` in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// [`ColorError::DivisionByZero`] for pure black.
    #[inline]
    pub fn saturation(self) -> ColorResult<f64> {
        let max = self.max_channel();
        if max == 0 {
            return Err(ColorError::DivisionByZero);
        }
        let min = self.min_channel();
        Ok((max - min) as f64 / max as f64)
    }
}

/// Perceived brightness of a color or hex string.
///
/// # Errors
///
/// Only fails when given a hex string that does not parse.
pub fn brightness<'a>(input: impl Into<ColorInput<'a>>) -> ColorResult<f64> {
    Ok(input.into().resolve()?.brightness())
}

/// Saturation of a color or hex string.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] for a bad hex string,
/// [`ColorError::DivisionByZero`] for pure black.
pub fn saturation<'a>(input: impl Into<ColorInput<'a>>) -> ColorResult<f64> {
    input.into().resolve()?.saturation()
}
