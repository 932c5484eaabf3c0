//! Core geometry type: Region.
//!
//! Layout output is expressed in the host's pixel space as `f32`, matching what taffy
//! produces. Regions are axis-aligned boxes relative to the masonry container's origin.

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle in container coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The x coordinate one past the right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The y coordinate one past the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Translate by a parent origin.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Region {
        Region {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Whether the region has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Region::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn offset_keeps_size() {
        let r = Region::new(1.0, 2.0, 3.0, 4.0).offset(10.0, 10.0);
        assert_eq!(r, Region::new(11.0, 12.0, 3.0, 4.0));
    }

    #[test]
    fn empty_region() {
        assert!(Region::default().is_empty());
        assert!(Region::new(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!Region::new(0.0, 0.0, 5.0, 1.0).is_empty());
    }
}
