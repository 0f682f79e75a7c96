//! Conversion between a [`DynamicImage`] and the interleaved RGBA f32 buffer
//! the float operations work on.

use image::{ColorType, DynamicImage, Rgba32FImage};

use crate::{OpsError, OpsResult};

/// Unpacks an image into `(width, height, rgba_f32)`.
pub(crate) fn to_rgba_f32(img: &DynamicImage) -> (usize, usize, Vec<f32>) {
    let buf = img.to_rgba32f();
    let (w, h) = buf.dimensions();
    (w as usize, h as usize, buf.into_raw())
}

/// Packs an RGBA f32 buffer back into the pixel layout of `like`.
///
/// Values are clamped to `[0, 1]` on the way to integer layouts.
pub(crate) fn from_rgba_f32(
    width: usize,
    height: usize,
    data: Vec<f32>,
    like: ColorType,
) -> OpsResult<DynamicImage> {
    let buf = Rgba32FImage::from_raw(width as u32, height as u32, data).ok_or_else(|| {
        OpsError::InvalidDimensions(format!("buffer does not hold {}x{} RGBA", width, height))
    })?;
    let img = DynamicImage::ImageRgba32F(buf);

    Ok(match like {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => img,
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_layout_preserved() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])));
        let (w, h, data) = to_rgba_f32(&src);
        assert_eq!((w, h), (3, 2));
        assert_eq!(data.len(), 3 * 2 * 4);

        let back = from_rgba_f32(w, h, data, src.color()).unwrap();
        assert_eq!(back.color(), ColorType::Rgb8);
        assert_eq!(back.to_rgb8().get_pixel(2, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_wrong_buffer_size() {
        assert!(from_rgba_f32(4, 4, vec![0.0; 8], ColorType::Rgba8).is_err());
    }
}
