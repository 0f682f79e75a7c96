//! Scoped working copies for destructive reads.
//!
//! Sampling operations that shrink or otherwise rewrite pixels run on a
//! [`WorkingCopy`]. The analyzer's image is never touched, and the copy is
//! released when the sampling call returns.

use image::{DynamicImage, GenericImageView, Rgba};
use imtools_ops::resize;
use tracing::trace;

use crate::AnalyzeResult;

/// An owned copy of an image that lives for one operation.
#[derive(Debug)]
pub struct WorkingCopy {
    image: DynamicImage,
    purpose: &'static str,
}

impl WorkingCopy {
    /// Clones `source` for the named operation.
    pub fn of(source: &DynamicImage, purpose: &'static str) -> Self {
        trace!(purpose, w = source.width(), h = source.height(), "working copy");
        Self {
            image: source.clone(),
            purpose,
        }
    }

    /// Collapses the copy to a single area-averaged pixel.
    pub fn average(self) -> AnalyzeResult<Rgba<u8>> {
        Ok(resize::average(&self.image)?)
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        trace!(
            purpose = self.purpose,
            w = self.image.width(),
            h = self.image.height(),
            "working copy released"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_source_untouched() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([10, 20, 30])));
        let px = WorkingCopy::of(&src, "test").average().unwrap();
        assert_eq!(px, Rgba([10, 20, 30, 255]));
        assert_eq!(src.dimensions(), (6, 4));
    }
}
