//! # imtools-color
//!
//! Stateless color math used throughout imtools.
//!
//! This crate is the leaf of the workspace and has no image dependencies:
//!
//! - [`Color`] - 8-bit RGB triple, no alpha
//! - [`parse_hex`] - `#rgb` / `#rrggbb` parsing with shorthand expansion
//! - [`brightness`] - perceived brightness, `sqrt(0.241 R² + 0.691 G² + 0.068 B²)`
//! - [`saturation`] - `(max - min) / max` over the three channels
//! - [`hsl`] - HSL conversions used by the modulate operation
//!
//! Functions that accept either a parsed triple or a raw hex string take
//! `impl Into<ColorInput>`; the input is resolved once into a [`Color`]
//! before any arithmetic happens.
//!
//! ## Example
//!
//! ```rust
//! use imtools_color::{brightness, parse_hex, saturation, Color};
//!
//! let teal = parse_hex("#008080")?;
//! assert_eq!(teal, Color::new(0, 128, 128));
//!
//! // Both representations are accepted
//! assert_eq!(brightness(teal)?, brightness("008080")?);
//! assert_eq!(saturation("#f00")?, 1.0);
//! # Ok::<(), imtools_color::ColorError>(())
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! imtools-color (this crate)
//!    ^
//!    |
//!    +-- imtools-ops (image operations)
//!    +-- imtools-analyze (accent colors, analyzer)
//!    +-- imtools-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod hex;
pub mod hsl;
pub mod perceptual;
pub mod rgb;

pub use error::{ColorError, ColorResult};
pub use hex::parse_hex;
pub use perceptual::{brightness, saturation, ColorInput};
pub use rgb::Color;

/// Prelude module for convenient imports.
///
/// ```
/// use imtools_color::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ColorError, ColorResult};
    pub use crate::hex::parse_hex;
    pub use crate::perceptual::{
        brightness, saturation, ColorInput, BRIGHTNESS_WEIGHT_B, BRIGHTNESS_WEIGHT_G,
        BRIGHTNESS_WEIGHT_R,
    };
    pub use crate::rgb::Color;
}
