//! HSL conversions.
//!
//! Used by the modulate operation in `imtools-ops`. All components are
//! normalized: RGB and saturation/lightness in `[0, 1]`, hue in turns
//! (`[0, 1)`, where 1.0 is a full revolution).

/// Converts normalized RGB to `[hue, saturation, lightness]`.
///
/// # Example
///
/// ```
/// use imtools_color::hsl::rgb_to_hsl;
///
/// let [h, s, l] = rgb_to_hsl([1.0, 0.0, 0.0]);
/// assert_eq!((h, s, l), (0.0, 1.0, 0.5));
/// ```
pub fn rgb_to_hsl(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f32::EPSILON {
        return [0.0, 0.0, lightness];
    }

    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    [(sector / 6.0).rem_euclid(1.0), saturation, lightness]
}

/// Converts `[hue, saturation, lightness]` back to normalized RGB.
///
/// Hue may be outside `[0, 1)`; it is wrapped.
pub fn hsl_to_rgb(hsl: [f32; 3]) -> [f32; 3] {
    let [h, s, l] = hsl;
    if s <= 0.0 {
        return [l, l, l];
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = l - c / 2.0;
    [
        (r1 + m).clamp(0.0, 1.0),
        (g1 + m).clamp(0.0, 1.0),
        (b1 + m).clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb_eq(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert_abs_diff_eq!(a[i], b[i], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_primaries() {
        assert_rgb_eq(rgb_to_hsl([0.0, 1.0, 0.0]), [1.0 / 3.0, 1.0, 0.5]);
        assert_rgb_eq(rgb_to_hsl([0.0, 0.0, 1.0]), [2.0 / 3.0, 1.0, 0.5]);
    }

    #[test]
    fn test_greys_have_no_saturation() {
        let [_, s, l] = rgb_to_hsl([0.25, 0.25, 0.25]);
        assert_eq!(s, 0.0);
        assert_abs_diff_eq!(l, 0.25);
        assert_rgb_eq(hsl_to_rgb([0.7, 0.0, 0.25]), [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            [0.2, 0.4, 0.6],
            [0.9, 0.1, 0.3],
            [1.0, 1.0, 0.0],
            [0.5, 0.0, 0.5],
            [0.05, 0.8, 0.75],
        ];
        for rgb in samples {
            assert_rgb_eq(hsl_to_rgb(rgb_to_hsl(rgb)), rgb);
        }
    }

    #[test]
    fn test_hue_wraps() {
        assert_rgb_eq(hsl_to_rgb([1.0, 1.0, 0.5]), [1.0, 0.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb([-0.5, 1.0, 0.5]), hsl_to_rgb([0.5, 1.0, 0.5]));
    }

    #[test]
    fn test_zero_lightness_is_black() {
        assert_rgb_eq(hsl_to_rgb([0.3, 0.8, 0.0]), [0.0, 0.0, 0.0]);
    }
}
