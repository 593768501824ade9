//! Clip rectangle derivation for scissor-based content clipping.
//!
//! Every control carries three nested clip rectangles (its own, one for its
//! docked children, one for its non-docked children), each intersected with
//! the corresponding parent rectangle. Intersections clamp at the overlap
//! boundary: width/height never go negative.

use glint_core::math::Vec2;

/// A clip rectangle defining a region for scissor clipping.
///
/// # Examples
/// ```
/// use glint_ui::clip::ClipRect;
/// use glint_core::math::Vec2;
///
/// let clip = ClipRect::from_bounds(10.0, 20.0, 400.0, 300.0);
/// assert!(clip.contains(Vec2::new(100.0, 100.0)));
/// assert!(!clip.contains(Vec2::new(500.0, 100.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    /// Minimum point (top-left corner).
    pub min: Vec2,
    /// Maximum point (bottom-right corner).
    pub max: Vec2,
}

impl ClipRect {
    /// A clip rect that encompasses everything (no clipping).
    pub fn infinite() -> Self {
        Self {
            min: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            max: Vec2::new(f32::INFINITY, f32::INFINITY),
        }
    }

    /// Create a clip rect from position and size.
    pub fn from_bounds(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width.max(0.0), y + height.max(0.0)),
        }
    }

    /// Create a clip rect from a top-left corner and a size vector.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::from_bounds(pos.x, pos.y, size.x, size.y)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the rect has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside this clip rect.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check whether `other` lies fully inside this rect.
    pub fn contains_rect(&self, other: &ClipRect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Compute the intersection of two clip rects.
    ///
    /// If the rects do not overlap the result collapses to a zero-extent
    /// rect at the overlap boundary; it is never flipped.
    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let min = Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Vec2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        ClipRect {
            min,
            max: max.max(min),
        }
    }
}

impl Default for ClipRect {
    fn default() -> Self {
        Self::infinite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping() {
        let a = ClipRect::from_bounds(0.0, 0.0, 100.0, 100.0);
        let b = ClipRect::from_bounds(50.0, 50.0, 100.0, 100.0);
        let i = a.intersect(&b);
        assert_eq!(i.min, Vec2::new(50.0, 50.0));
        assert_eq!(i.max, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn intersect_disjoint_clamps_to_zero_extent() {
        let a = ClipRect::from_bounds(0.0, 0.0, 10.0, 10.0);
        let b = ClipRect::from_bounds(50.0, 50.0, 10.0, 10.0);
        let i = a.intersect(&b);
        assert!(i.width() >= 0.0);
        assert!(i.height() >= 0.0);
        assert!(i.is_degenerate());
    }

    #[test]
    fn infinite_is_identity_for_intersection() {
        let a = ClipRect::from_bounds(5.0, 5.0, 20.0, 20.0);
        let i = ClipRect::infinite().intersect(&a);
        assert_eq!(i, a);
    }
}
