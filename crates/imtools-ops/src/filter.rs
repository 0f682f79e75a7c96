//! Blur filters.
//!
//! Both blurs are separable: a horizontal pass over rows, then the same pass
//! over the transposed image. With the `parallel` feature rows are processed
//! on the rayon pool.
//!
//! - [`box_blur`] - Sliding-window average, cost independent of radius
//! - [`convolve`] - Separable convolution with a 1-D [`Kernel`]
//! - [`blur`] - [`DynamicImage`] entry point driven by [`BlurOptions`]
//!
//! # Example
//!
//! ```rust
//! use imtools_ops::filter::{convolve, Kernel};
//!
//! let src = vec![0.5f32; 16 * 16 * 4];
//! let kernel = Kernel::gaussian(3, 1.0).unwrap();
//! let blurred = convolve(&src, 16, 16, 4, &kernel).unwrap();
//! assert_eq!(blurred.len(), src.len());
//! ```

use image::DynamicImage;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::layout::{from_rgba_f32, to_rgba_f32};
use crate::{OpsError, OpsResult};

/// Blur parameters.
///
/// A `radius` of zero derives the window from `sigma`: `ceil(3 * sigma)` for
/// the gaussian kernel and `ceil(sigma)` for the box window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurOptions {
    /// Blur strength (standard deviation for the gaussian kernel).
    pub sigma: f32,
    /// Explicit window radius in pixels, 0 for automatic.
    pub radius: u32,
    /// Use a true gaussian kernel instead of the box approximation.
    pub gaussian: bool,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            sigma: 8.0,
            radius: 0,
            gaussian: false,
        }
    }
}

impl BlurOptions {
    /// Box blur of the given strength.
    pub fn with_sigma(sigma: f32) -> Self {
        Self {
            sigma,
            ..Self::default()
        }
    }

    /// Gaussian blur of the given strength.
    pub fn gaussian(sigma: f32) -> Self {
        Self {
            sigma,
            radius: 0,
            gaussian: true,
        }
    }

    /// Window radius actually used.
    pub fn effective_radius(&self) -> usize {
        if self.radius > 0 {
            return self.radius as usize;
        }
        let scale = if self.gaussian { 3.0 } else { 1.0 };
        ((self.sigma * scale).ceil() as usize).max(1)
    }

    /// Returns `true` if these options leave the image untouched.
    pub fn is_identity(&self) -> bool {
        self.sigma == 0.0 && self.radius == 0
    }

    fn validate(&self) -> OpsResult<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "blur sigma must be a finite value >= 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// One-dimensional convolution kernel, applied along both axes.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Normalized weights, odd length.
    pub weights: Vec<f32>,
}

impl Kernel {
    /// Creates a kernel from raw weights.
    pub fn new(weights: Vec<f32>) -> OpsResult<Self> {
        if weights.len() % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel length must be odd".into(),
            ));
        }
        Ok(Self { weights })
    }

    /// Normalized gaussian of `2 * radius + 1` taps.
    ///
    /// ```rust
    /// use imtools_ops::filter::Kernel;
    ///
    /// let k = Kernel::gaussian(2, 1.0).unwrap();
    /// assert_eq!(k.len(), 5);
    /// ```
    pub fn gaussian(radius: usize, sigma: f32) -> OpsResult<Self> {
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "gaussian sigma must be > 0, got {}",
                sigma
            )));
        }
        let sigma2 = 2.0 * sigma * sigma;
        let half = radius as i64;

        let mut weights: Vec<f32> = (-half..=half)
            .map(|x| (-((x * x) as f32) / sigma2).exp())
            .collect();
        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { weights })
    }

    /// Flat kernel of `2 * radius + 1` taps.
    pub fn box_blur(radius: usize) -> Self {
        let size = 2 * radius + 1;
        Self {
            weights: vec![1.0 / size as f32; size],
        }
    }

    /// Number of taps.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false` for a constructed kernel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Half-size of the kernel.
    #[inline]
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

/// Separable convolution with edge clamping.
pub fn convolve(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, taps = kernel.len(), "convolve");
    check_len(src, width, height, channels)?;

    let weights = kernel.weights.as_slice();
    Ok(separable(src, width, height, channels, |row, out| {
        kernel_row(row, out, channels, weights)
    }))
}

/// Fast box blur using a sliding window.
///
/// ```rust
/// use imtools_ops::filter::box_blur;
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let result = box_blur(&src, 16, 16, 4, 3).unwrap();
/// assert!((result[0] - 0.5).abs() < 1e-6);
/// ```
pub fn box_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "box_blur");
    check_len(src, width, height, channels)?;

    Ok(separable(src, width, height, channels, |row, out| {
        box_row(row, out, channels, radius)
    }))
}

/// Blurs an image, keeping its dimensions and pixel layout.
///
/// Color is filtered premultiplied by alpha so transparent pixels do not
/// bleed their RGB into visible neighbours.
pub fn blur(img: &DynamicImage, opts: &BlurOptions) -> OpsResult<DynamicImage> {
    opts.validate()?;
    if opts.is_identity() {
        return Ok(img.clone());
    }

    let radius = opts.effective_radius();
    debug!(sigma = opts.sigma, radius, gaussian = opts.gaussian, "Applying blur");

    let (w, h, mut data) = to_rgba_f32(img);
    if w == 0 || h == 0 {
        return Ok(img.clone());
    }
    premultiply(&mut data);

    let mut out = if opts.gaussian {
        let sigma = if opts.sigma > 0.0 {
            opts.sigma
        } else {
            radius as f32 / 3.0
        };
        convolve(&data, w, h, 4, &Kernel::gaussian(radius, sigma)?)?
    } else {
        box_blur(&data, w, h, 4, radius)?
    };

    unpremultiply(&mut out);
    from_rgba_f32(w, h, out, img.color())
}

fn check_len(src: &[f32], width: usize, height: usize, channels: usize) -> OpsResult<()> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(OpsError::InvalidDimensions(
            "width, height, and channels must be > 0".into(),
        ));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    Ok(())
}

/// Runs `pass` over rows, then over columns via transposition.
fn separable<F>(src: &[f32], width: usize, height: usize, channels: usize, pass: F) -> Vec<f32>
where
    F: Fn(&[f32], &mut [f32]) + Sync + Send,
{
    let horizontal = map_rows(src, width * channels, &pass);
    let transposed = transpose(&horizontal, width, height, channels);
    let vertical = map_rows(&transposed, height * channels, &pass);
    transpose(&vertical, height, width, channels)
}

fn map_rows<F>(src: &[f32], stride: usize, pass: &F) -> Vec<f32>
where
    F: Fn(&[f32], &mut [f32]) + Sync + Send,
{
    let mut dst = vec![0.0f32; src.len()];

    #[cfg(feature = "parallel")]
    {
        dst.par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .for_each(|(out, row)| pass(row, out));
    }
    #[cfg(not(feature = "parallel"))]
    {
        dst.chunks_mut(stride)
            .zip(src.chunks(stride))
            .for_each(|(out, row)| pass(row, out));
    }

    dst
}

/// Rows become columns: `(x, y)` moves from `y * width + x` to `x * height + y`.
fn transpose(src: &[f32], width: usize, height: usize, channels: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            let s = (y * width + x) * channels;
            let d = (x * height + y) * channels;
            dst[d..d + channels].copy_from_slice(&src[s..s + channels]);
        }
    }
    dst
}

fn box_row(src: &[f32], dst: &mut [f32], channels: usize, radius: usize) {
    let width = src.len() / channels;
    let inv_size = 1.0 / (2 * radius + 1) as f32;

    for c in 0..channels {
        // Window for x = 0, left edge clamped to the first pixel
        let mut sum = src[c] * radius as f32;
        for kx in 0..=radius {
            sum += src[kx.min(width - 1) * channels + c];
        }

        for x in 0..width {
            dst[x * channels + c] = sum * inv_size;

            let left = x.saturating_sub(radius);
            let right = (x + radius + 1).min(width - 1);
            sum -= src[left * channels + c];
            sum += src[right * channels + c];
        }
    }
}

fn kernel_row(src: &[f32], dst: &mut [f32], channels: usize, weights: &[f32]) {
    let width = src.len() / channels;
    let radius = weights.len() / 2;

    for x in 0..width {
        for c in 0..channels {
            let mut acc = 0.0f32;
            for (k, w) in weights.iter().enumerate() {
                let sx = (x + k).saturating_sub(radius).min(width - 1);
                acc += src[sx * channels + c] * w;
            }
            dst[x * channels + c] = acc;
        }
    }
}

fn premultiply(rgba: &mut [f32]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        px[0] *= a;
        px[1] *= a;
        px[2] *= a;
    }
}

fn unpremultiply(rgba: &mut [f32]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a > 1e-6 {
            px[0] /= a;
            px[1] /= a;
            px[2] /= a;
        } else {
            px[0] = 0.0;
            px[1] = 0.0;
            px[2] = 0.0;
        }
    }
}
