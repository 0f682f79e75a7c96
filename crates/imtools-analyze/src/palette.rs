//! Palette extraction and the brightness ceiling filter.
//!
//! A [`PaletteExtractor`] turns a raster into colors ranked by how much of
//! the image they cover. [`KmeansExtractor`] clusters opaque pixels in CIE Lab
//! with `kmeans_colors` and ranks clusters by membership.
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use imtools_analyze::palette::{KmeansExtractor, PaletteExtractor};
//!
//! let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
//! for x in 0..3 {
//!     img.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
//! }
//!
//! let colors = KmeansExtractor::default().extract(&img, 2).unwrap();
//! assert_eq!(colors.len(), 2);
//! assert!(colors[0].b > 200); // blue covers most of the image
//! ```

use std::collections::HashSet;

use image::RgbaImage;
use imtools_color::Color;
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, LinSrgb, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Largest palette the k-means extractor can produce; larger requests are
/// clamped to it.
pub const MAX_COLORS: usize = 256;

/// Palette extractor failure.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Extractor-specific failure.
    #[error("{0}")]
    Failed(String),
}

/// Source of ranked colors for a raster.
pub trait PaletteExtractor {
    /// Returns up to `count` colors, most prevalent first.
    fn extract(&self, image: &RgbaImage, count: usize) -> Result<Vec<Color>, PaletteError>;
}

impl<F> PaletteExtractor for F
where
    F: Fn(&RgbaImage, usize) -> Result<Vec<Color>, PaletteError>,
{
    fn extract(&self, image: &RgbaImage, count: usize) -> Result<Vec<Color>, PaletteError> {
        self(image, count)
    }
}

/// K-means tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmeansOptions {
    /// Iteration cap per run.
    pub max_iter: usize,
    /// Convergence threshold on centroid movement (Lab units).
    pub converge: f32,
    /// RNG seed; fixed so repeated runs agree.
    pub seed: u64,
}

impl Default for KmeansOptions {
    fn default() -> Self {
        Self {
            max_iter: 20,
            converge: 1e-4,
            seed: 0,
        }
    }
}

/// K-means clustering in CIE Lab.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KmeansExtractor {
    /// Clustering parameters.
    pub options: KmeansOptions,
}

impl KmeansExtractor {
    /// Extractor with custom parameters.
    pub fn new(options: KmeansOptions) -> Self {
        Self { options }
    }
}

impl PaletteExtractor for KmeansExtractor {
    fn extract(&self, image: &RgbaImage, count: usize) -> Result<Vec<Color>, PaletteError> {
        let opaque: Vec<[u8; 3]> = image
            .pixels()
            .filter(|px| px[3] > 0)
            .map(|px| [px[0], px[1], px[2]])
            .collect();

        // k-means++ seeding needs k distinct points
        let distinct = opaque.iter().collect::<HashSet<_>>().len();
        let k = count.min(distinct).min(MAX_COLORS);
        if k == 0 {
            return Ok(Vec::new());
        }

        let lab: Vec<Lab> = opaque
            .iter()
            .map(|&[r, g, b]| Srgb::<u8>::new(r, g, b).into_linear().into_color())
            .collect();
        trace!(pixels = lab.len(), k, "kmeans");
        let opts = &self.options;
        let result = get_kmeans(k, opts.max_iter, opts.converge, false, &lab, opts.seed);

        let mut members = vec![0usize; result.centroids.len()];
        for &idx in &result.indices {
            if let Some(n) = members.get_mut(idx as usize) {
                *n += 1;
            }
        }

        let mut ranked: Vec<(usize, Color)> = result
            .centroids
            .iter()
            .zip(members)
            .filter(|&(_, n)| n > 0)
            .map(|(&centroid, n)| (n, lab_to_color(centroid)))
            .collect();
        // Stable: equal counts keep centroid order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        debug!(clusters = ranked.len(), score = result.score, "Palette extracted");
        Ok(ranked.into_iter().map(|(_, c)| c).collect())
    }
}

fn lab_to_color(lab: Lab) -> Color {
    let linear: LinSrgb = lab.into_color();
    let rgb: Srgb<f32> = Srgb::from_linear(linear);
    let rgb: Srgb<u8> = rgb.into_format();
    Color::new(rgb.red, rgb.green, rgb.blue)
}

/// Returns `true` if `color` is acceptable under `ceiling`.
///
/// No ceiling, or a negative one, accepts everything. Otherwise the color
/// must be strictly darker than the ceiling.
#[inline]
pub fn passes_ceiling(color: Color, ceiling: Option<f64>) -> bool {
    match ceiling {
        Some(max) if max >= 0.0 => color.brightness() < max,
        _ => true,
    }
}

/// Keeps colors darker than `ceiling`, preserving order.
pub fn filter_by_brightness(colors: Vec<Color>, ceiling: Option<f64>) -> Vec<Color> {
    colors
        .into_iter()
        .filter(|&c| passes_ceiling(c, ceiling))
        .collect()
}
