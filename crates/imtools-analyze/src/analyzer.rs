//! The image analyzer.
//!
//! An [`ImageAnalyzer`] owns one decoded image for its whole life. Queries
//! (`accent_colors`, `average_color`, `has_transparency`) never modify it;
//! edits (`trim`, `resize`, `blur`, `colorize`) replace it in place.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader, Rgba};
use imtools_color::{Color, ColorInput};
use imtools_ops::{composite, filter, modulate, resize, transform};
use imtools_ops::{BlurOptions, Filter, Rect, Shade};
use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

use crate::config::{AccentOptions, AnalyzerConfig};
use crate::format::{format_name, parse_format, supports_alpha};
use crate::palette::{filter_by_brightness, KmeansExtractor, PaletteExtractor};
use crate::probe::WorkingCopy;
use crate::{AnalyzeError, AnalyzeResult};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A decoded image plus the state needed to analyze and re-encode it.
#[derive(Debug, Clone)]
pub struct ImageAnalyzer {
    image: DynamicImage,
    format: Option<ImageFormat>,
    source: Option<PathBuf>,
    page: Rect,
    background: Rgba<u8>,
    config: AnalyzerConfig,
}

impl ImageAnalyzer {
    /// Decodes the image at `path` with default settings.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::ImageLoad`] if the file is missing, unreadable or not
    /// a supported image.
    pub fn open(path: impl AsRef<Path>) -> AnalyzeResult<Self> {
        Self::open_with_config(path, AnalyzerConfig::default())
    }

    /// Decodes the image at `path` with the given settings.
    pub fn open_with_config(path: impl AsRef<Path>, config: AnalyzerConfig) -> AnalyzeResult<Self> {
        let path = path.as_ref();
        trace!(path = %path.display(), "open");

        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| AnalyzeError::image_load(path, ImageError::IoError(e)))?;
        let format = reader.format();
        let image = reader
            .decode()
            .map_err(|e| AnalyzeError::image_load(path, e))?;

        debug!(
            path = %path.display(),
            format = format.map(format_name).unwrap_or("UNKNOWN"),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Loaded image"
        );

        let mut analyzer = Self::from_image(image, config)?;
        analyzer.format = format;
        analyzer.source = Some(path.to_path_buf());
        Ok(analyzer)
    }

    /// Wraps an already decoded image. The format stays unknown until set.
    pub fn from_image(image: DynamicImage, config: AnalyzerConfig) -> AnalyzeResult<Self> {
        config.validate()?;
        let background = match config.background_color()? {
            Some(c) => Rgba([c.r, c.g, c.b, 255]),
            None => TRANSPARENT,
        };
        Ok(Self {
            page: Rect::from_size(image.width(), image.height()),
            image,
            format: None,
            source: None,
            background,
            config,
        })
    }

    /// Ranked accent colors using the k-means extractor.
    ///
    /// See [`accent_colors_with`](Self::accent_colors_with).
    pub fn accent_colors(&self, opts: &AccentOptions) -> AnalyzeResult<Vec<Color>> {
        self.accent_colors_with(&KmeansExtractor::new(self.config.kmeans), opts)
    }

    /// Ranked accent colors from a caller-supplied extractor.
    ///
    /// The image is downsampled to fit `sample_size` (never upscaled),
    /// written to a temporary PNG and read back as the raster handed to the
    /// extractor. Colors at or above `max_brightness` are dropped; order is
    /// kept. The temporary file is removed before returning, whether or not
    /// extraction succeeded.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::InvalidParameter`] if `sample_size` is zero
    /// - [`AnalyzeError::ImageEncode`] if the downsample cannot round-trip
    /// - [`AnalyzeError::PaletteExtraction`] if the extractor fails
    pub fn accent_colors_with<E>(&self, extractor: &E, opts: &AccentOptions) -> AnalyzeResult<Vec<Color>>
    where
        E: PaletteExtractor + ?Sized,
    {
        trace!(count = opts.count, sample_size = opts.sample_size, max_brightness = ?opts.max_brightness, "accent_colors");

        if opts.sample_size == 0 {
            return Err(AnalyzeError::invalid_parameter("sample_size must be > 0"));
        }
        if opts.count == 0 {
            return Ok(Vec::new());
        }

        let sample = resize::fit_within(&self.image, opts.sample_size, Filter::Lanczos3);
        let scratch = self.scratch_file()?;

        let result = extract_from_disk(&sample, scratch.path(), extractor, opts);

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(path = %scratch_path.display(), error = %e, "Failed to remove temporary sample");
        }

        let colors = result?;
        debug!(kept = colors.len(), "Accent colors");
        Ok(colors)
    }

    fn scratch_file(&self) -> AnalyzeResult<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("accent-").suffix(".png");
        let file = match &self.config.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }

    /// Area-averaged color of the whole image.
    ///
    /// Computed on a working copy; the image itself is unchanged.
    pub fn average_color(&self) -> AnalyzeResult<Color> {
        let px = WorkingCopy::of(&self.image, "average_color").average()?;
        Ok(Color::new(px[0], px[1], px[2]))
    }

    /// Returns `true` if the pixel layout has an alpha channel.
    ///
    /// This is a property of the layout, not of the pixels: a fully opaque
    /// RGBA image still reports `true`.
    pub fn has_transparency(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Trims borders matching the top-left color within `fuzz`.
    ///
    /// Returns the new dimensions. The page is reset to the trimmed size at
    /// the origin.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::Ops`] if `fuzz` is outside `[0, 1]`.
    pub fn trim(&mut self, fuzz: f64) -> AnalyzeResult<(u32, u32)> {
        let (trimmed, bounds) = transform::trim(&self.image, fuzz)?;
        trace!(fuzz, x = bounds.x, y = bounds.y, "trim");
        self.replace_image(trimmed);
        Ok(bounds.size())
    }

    /// [`trim`](Self::trim) with the configured fuzz.
    pub fn trim_default(&mut self) -> AnalyzeResult<(u32, u32)> {
        self.trim(self.config.trim_fuzz)
    }

    /// Upper-case name of the current format, `UNKNOWN` if not known.
    pub fn format(&self) -> &'static str {
        self.format.map(format_name).unwrap_or("UNKNOWN")
    }

    /// Current format.
    pub fn image_format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Sets the format by name or extension (`png`, `jpg`, ...).
    pub fn set_format(&mut self, name: &str) -> AnalyzeResult<()> {
        self.format = Some(parse_format(name)?);
        Ok(())
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Canvas geometry.
    pub fn page(&self) -> Rect {
        self.page
    }

    /// Sets the canvas geometry.
    pub fn set_page(&mut self, page: Rect) {
        self.page = page;
    }

    /// Background used when flattening; transparent by default.
    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Sets an opaque background color from a hex string or triple.
    pub fn set_background<'a>(&mut self, color: impl Into<ColorInput<'a>>) -> AnalyzeResult<()> {
        let c = color.into().resolve()?;
        self.background = Rgba([c.r, c.g, c.b, 255]);
        Ok(())
    }

    /// Makes the background transparent again.
    pub fn clear_background(&mut self) {
        self.background = TRANSPARENT;
    }

    /// Resizes the image; see [`imtools_ops::resize::resize`].
    pub fn resize(&mut self, width: u32, height: u32, filter: Filter, bestfit: bool) -> AnalyzeResult<()> {
        let resized = resize::resize(&self.image, width, height, filter, bestfit)?;
        self.replace_image(resized);
        Ok(())
    }

    /// Blurs the image in place.
    pub fn blur(&mut self, opts: &BlurOptions) -> AnalyzeResult<()> {
        self.image = filter::blur(&self.image, opts)?;
        Ok(())
    }

    /// Recolors towards black or white.
    pub fn colorize(&mut self, shade: Shade) -> AnalyzeResult<()> {
        self.image = modulate::colorize(&self.image, shade)?;
        Ok(())
    }

    /// Modulates brightness, saturation and hue (percent, 100 = unchanged).
    pub fn modulate(&mut self, brightness: f32, saturation: f32, hue: f32) -> AnalyzeResult<()> {
        self.image = modulate::modulate(&self.image, brightness, saturation, hue)?;
        Ok(())
    }

    /// Encodes the image to `path` as `format`.
    ///
    /// Formats that cannot store alpha get the image flattened onto the
    /// background first. Pixel depth is reduced where the encoder requires.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::ImageEncode`] if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>, format: ImageFormat) -> AnalyzeResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), format = format_name(format), "Saving image");

        let encodable = encodable_for(&self.image, format, self.background);
        encodable
            .save_with_format(path, format)
            .map_err(|e| AnalyzeError::image_encode(path, e))
    }

    /// The current image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Path the image was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Consumes the analyzer, returning the image.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    fn replace_image(&mut self, image: DynamicImage) {
        self.page = Rect::from_size(image.width(), image.height());
        self.image = image;
    }
}

fn extract_from_disk<E>(
    sample: &DynamicImage,
    scratch: &Path,
    extractor: &E,
    opts: &AccentOptions,
) -> AnalyzeResult<Vec<Color>>
where
    E: PaletteExtractor + ?Sized,
{
    let rgba = DynamicImage::ImageRgba8(sample.to_rgba8());
    rgba.save_with_format(scratch, ImageFormat::Png)
        .map_err(|e| AnalyzeError::image_encode(scratch, e))?;

    let raster = image::open(scratch)
        .map_err(|e| AnalyzeError::image_encode(scratch, e))?
        .to_rgba8();
    trace!(w = raster.width(), h = raster.height(), path = %scratch.display(), "sample raster");

    let mut colors = extractor.extract(&raster, opts.count)?;
    colors.truncate(opts.count);
    Ok(filter_by_brightness(colors, opts.max_brightness))
}

fn encodable_for(img: &DynamicImage, format: ImageFormat, background: Rgba<u8>) -> Cow<'_, DynamicImage> {
    if !supports_alpha(format) {
        return Cow::Owned(composite::flatten(img, background));
    }
    match (format, img.color()) {
        (ImageFormat::Png | ImageFormat::Tiff, ColorType::Rgb32F) => {
            Cow::Owned(DynamicImage::ImageRgb16(img.to_rgb16()))
        }
        (ImageFormat::Png | ImageFormat::Tiff, ColorType::Rgba32F) => {
            Cow::Owned(DynamicImage::ImageRgba16(img.to_rgba16()))
        }
        (ImageFormat::Png | ImageFormat::Tiff, _) => Cow::Borrowed(img),
        (_, color) if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}
