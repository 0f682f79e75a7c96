//! # imtools-analyze
//!
//! Image analysis on top of [`imtools_ops`] and [`imtools_color`].
//!
//! The central type is [`ImageAnalyzer`], which owns one decoded image and
//! answers questions about it:
//!
//! - [`ImageAnalyzer::accent_colors`] - prominent colors, optionally capped by
//!   perceived brightness
//! - [`ImageAnalyzer::average_color`] - area-averaged color
//! - [`ImageAnalyzer::has_transparency`] - alpha channel present
//!
//! It also carries the small set of edits needed before re-encoding a logo
//! or thumbnail: trim, resize, blur, colorize, save.
//!
//! ## Accent colors
//!
//! ```text
//! image ──fit_within(sample_size)──► temp PNG ──► PaletteExtractor
//!                                                     │ ranked colors
//!                                                     ▼
//!                                        brightness < max_brightness
//! ```
//!
//! The extractor is pluggable through the [`PaletteExtractor`] trait; the
//! default [`KmeansExtractor`] clusters in CIE Lab.
//!
//! ## Example
//!
//! ```rust,no_run
//! use imtools_analyze::{AccentOptions, ImageAnalyzer};
//!
//! let mut analyzer = ImageAnalyzer::open("logo.png")?;
//! analyzer.trim(0.1)?;
//!
//! let accents = analyzer.accent_colors(&AccentOptions::with_count(3).max_brightness(200.0))?;
//! for color in accents {
//!     println!("{}", color);
//! }
//! # Ok::<(), imtools_analyze::AnalyzeError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod analyzer;
mod config;
mod error;
pub mod format;
pub mod palette;
pub mod probe;

pub use analyzer::ImageAnalyzer;
pub use config::{AccentOptions, AnalyzerConfig, DEFAULT_TRIM_FUZZ};
pub use error::{AnalyzeError, AnalyzeResult};
pub use palette::{KmeansExtractor, KmeansOptions, PaletteError, PaletteExtractor};

pub use imtools_color::Color;
pub use imtools_ops::{BlurOptions, Filter, Rect, Shade};
