//! Geometric primitives for layout inference.
//!
//! Rectangles are in page pixel space with the origin at the top-left corner
//! and Y growing downward, as reported by a rendered DOM.

use serde::{Deserialize, Serialize};

/// A rectangle in page pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use readflow::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if this rectangle intersects with another.
    ///
    /// Touching edges do not count, so a rectangle with zero area never
    /// intersects anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use readflow::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let r3 = Rect::new(200.0, 200.0, 100.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if the vertical extents of two rectangles overlap.
    ///
    /// This is the "same visual line" test used when grouping inline leaves:
    /// `a.y < b.y + b.height && b.y < a.y + a.height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use readflow::geometry::Rect;
    ///
    /// let word = Rect::new(0.0, 10.0, 40.0, 12.0);
    /// let next_word = Rect::new(50.0, 12.0, 30.0, 12.0);
    /// let next_line = Rect::new(0.0, 30.0, 40.0, 12.0);
    ///
    /// assert!(word.overlaps_vertically(&next_word));
    /// assert!(!word.overlaps_vertically(&next_line));
    /// ```
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let r = Rect::new(5.0, 10.0, 100.0, 50.0);
        assert_eq!(r.x, 5.0);
        assert_eq!(r.y, 10.0);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
        let r3 = Rect::new(200.0, 200.0, 100.0, 100.0);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&r3));
        assert!(!r3.intersects(&r1));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let left = Rect::new(0.0, 0.0, 50.0, 50.0);
        let right = Rect::new(50.0, 0.0, 50.0, 50.0);
        assert!(!left.intersects(&right));
    }

    #[test]
    fn test_zero_area_never_intersects() {
        let page = Rect::new(0.0, 0.0, 500.0, 500.0);
        let point = Rect::new(100.0, 100.0, 0.0, 0.0);
        assert!(!page.intersects(&point));
        assert!(!point.intersects(&page));
    }

    #[test]
    fn test_vertical_overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 20.0);
        let b = Rect::new(300.0, 19.0, 10.0, 5.0);
        let c = Rect::new(0.0, 20.0, 10.0, 5.0);

        assert!(a.overlaps_vertically(&b));
        assert!(b.overlaps_vertically(&a));
        assert!(!a.overlaps_vertically(&c));
        assert!(!c.overlaps_vertically(&a));
    }

    #[test]
    fn test_rect_area() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.area(), 5000.0);
    }
}
