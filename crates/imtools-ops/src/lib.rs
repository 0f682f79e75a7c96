//! # imtools-ops
//!
//! Image operations behind the imtools analyzer.
//!
//! Decoding, encoding and pixel storage come from the [`image`] crate; this
//! crate adds the handful of operations the analyzer needs on top of a
//! [`image::DynamicImage`].
//!
//! # Modules
//!
//! - [`resize`] - Bestfit resize and the 1x1 area-average probe
//! - [`filter`] - Box and gaussian blur
//! - [`transform`] - Fuzzy trim and crop
//! - [`modulate`] - HSL brightness/saturation/hue modulation, colorize
//! - [`composite`] - Flattening onto a background color
//! - [`rect`] - Canvas/page geometry
//!
//! # Example
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use imtools_ops::{resize, transform};
//!
//! let mut buf = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
//! for y in 5..15 {
//!     for x in 10..30 {
//!         buf.put_pixel(x, y, Rgba([200, 0, 0, 255]));
//!     }
//! }
//! let img = DynamicImage::ImageRgba8(buf);
//!
//! let (trimmed, bounds) = transform::trim(&img, 0.1).unwrap();
//! assert_eq!((bounds.width, bounds.height), (20, 10));
//!
//! let small = resize::fit_within(&trimmed, 8, resize::Filter::Lanczos3);
//! assert_eq!((small.width(), small.height()), (8, 4));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod layout;
pub mod composite;
pub mod filter;
pub mod modulate;
pub mod rect;
pub mod resize;
pub mod transform;

pub use error::{OpsError, OpsResult};
pub use filter::BlurOptions;
pub use modulate::Shade;
pub use rect::Rect;
pub use resize::Filter;
