//! Rectangle type for crop bounds and canvas (page) geometry.
//!
//! Coordinates follow the usual image convention: origin at the top-left,
//! X to the right, Y downward.
//!
//! ```rust
//! use imtools_ops::Rect;
//!
//! let rect = Rect::new(10, 20, 100, 50);
//! assert_eq!(rect.right(), 110);
//! assert_eq!(rect.bottom(), 70);
//! assert!(Rect::from_size(200, 100).contains_rect(&rect));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge X coordinate (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge Y coordinate (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `other` lies entirely inside this rectangle.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Size as `(width, height)`.
    #[inline]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.size(), (10, 4));
        assert!(!r.is_empty());
        assert!(Rect::from_size(0, 5).is_empty());
    }

    #[test]
    fn test_contains() {
        let outer = Rect::from_size(10, 10);
        assert!(outer.contains_rect(&outer));
        assert!(outer.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!outer.contains_rect(&Rect::new(2, 2, 9, 8)));
    }
}
