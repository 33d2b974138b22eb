//! Plain geometry shared by the field, the visibility predicate and the
//! connector. All coordinates are CSS pixels in document space (origin at the
//! top-left of the page, y growing downwards) unless a type says otherwise.

use glam::Vec2;

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width * 0.5
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.top)
    }

    /// Overlap with `other`, or `None` when they do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

/// Size of the page the background canvas has to cover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Full scroll height of the document.
    pub document_height: f32,
}

impl PageMetrics {
    /// The scrolled viewport in document space.
    pub fn viewport_at(&self, scroll_x: f32, scroll_y: f32) -> Rect {
        Rect::new(scroll_x, scroll_y, self.viewport_width, self.viewport_height)
    }
}

/// Vertical slice of the document currently on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBand {
    pub top: f32,
    pub bottom: f32,
}

impl ViewBand {
    pub fn new(scroll_top: f32, viewport_height: f32) -> Self {
        Self {
            top: scroll_top,
            bottom: scroll_top + viewport_height,
        }
    }

    /// Strict containment of `y` in the band grown by `margin` on both sides.
    #[inline]
    pub fn contains_with_margin(&self, y: f32, margin: f32) -> bool {
        y > self.top - margin && y < self.bottom + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn view_band_margin_is_exclusive() {
        let band = ViewBand::new(500.0, 800.0);
        assert!(band.contains_with_margin(450.0, 100.0));
        assert!(!band.contains_with_margin(400.0, 100.0));
        assert!(band.contains_with_margin(1399.0, 100.0));
        assert!(!band.contains_with_margin(1400.0, 100.0));
    }
}
