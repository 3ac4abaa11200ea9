//! Geometric primitives for widget placement.
//!
//! Rectangles are kept in PDF coordinate space: the origin is the bottom-left
//! corner of the page and the y axis points up (ISO 32000-1:2008, Section 8.3).

/// A rectangle in PDF document space, stored as its lower-left and
/// upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the lower-left corner
    pub llx: f32,
    /// Y coordinate of the lower-left corner
    pub lly: f32,
    /// X coordinate of the upper-right corner
    pub urx: f32,
    /// Y coordinate of the upper-right corner
    pub ury: f32,
}

impl Rect {
    /// Create a new rectangle from its lower-left and upper-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use form_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(100.0, 700.0, 300.0, 720.0);
    /// assert_eq!(rect.width(), 200.0);
    /// assert_eq!(rect.height(), 20.0);
    /// ```
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// Left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.llx
    }

    /// Right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.urx
    }

    /// Top edge y-coordinate (y axis points up).
    pub fn top(&self) -> f32 {
        self.ury
    }

    /// Bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.lly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 20.0);
        assert_eq!(rect.top(), 70.0);
    }
}
