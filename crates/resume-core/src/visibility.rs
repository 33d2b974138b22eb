use crate::constants::{VISIBLE_BAND_FRACTION, VISIBLE_RATIO_THRESHOLD};
use crate::error::{check_fraction, ParamsError};
use crate::geometry::Rect;

/// Decides whether a section counts as "in view".
///
/// Both rectangles are in the same coordinate space. How the geometry is
/// sampled (observer callbacks, polling on scroll) is up to the caller.
pub trait VisibilitySource {
    fn is_visible(&self, section: &Rect, viewport: &Rect) -> bool;
}

/// Visible when at least `threshold` of the section's area lies inside the
/// top `band_fraction` of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBand {
    pub band_fraction: f32,
    pub threshold: f32,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            band_fraction: VISIBLE_BAND_FRACTION,
            threshold: VISIBLE_RATIO_THRESHOLD,
        }
    }
}

impl ViewportBand {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_fraction("band fraction", self.band_fraction)?;
        check_fraction("visibility threshold", self.threshold)
    }

    /// The part of `viewport` that can trigger visibility.
    pub fn band(&self, viewport: &Rect) -> Rect {
        Rect {
            height: viewport.height * self.band_fraction,
            ..*viewport
        }
    }

    /// Fraction of `section` inside the band; zero for empty sections.
    pub fn ratio(&self, section: &Rect, viewport: &Rect) -> f32 {
        let area = section.area();
        if area <= 0.0 {
            return 0.0;
        }
        section
            .intersection(&self.band(viewport))
            .map_or(0.0, |i| i.area() / area)
    }
}

impl VisibilitySource for ViewportBand {
    fn is_visible(&self, section: &Rect, viewport: &Rect) -> bool {
        let ratio = self.ratio(section, viewport);
        ratio > 0.0 && ratio >= self.threshold
    }
}

impl<F> VisibilitySource for F
where
    F: Fn(&Rect, &Rect) -> bool,
{
    fn is_visible(&self, section: &Rect, viewport: &Rect) -> bool {
        self(section, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 1000.0, 1200.0, 800.0)
    }

    #[test]
    fn section_in_bottom_forty_percent_is_not_visible() {
        let band = ViewportBand::default();
        // Band ends at 1000 + 480 = 1480.
        let low = Rect::new(100.0, 1500.0, 800.0, 200.0);
        assert!(!band.is_visible(&low, &viewport()));
    }

    #[test]
    fn threshold_is_inclusive() {
        let band = ViewportBand::default();
        // 10px of a 100px section inside the band.
        let edge = Rect::new(0.0, 1470.0, 100.0, 100.0);
        assert!((band.ratio(&edge, &viewport()) - 0.1).abs() < 1e-6);
        assert!(band.is_visible(&edge, &viewport()));
        let less = Rect::new(0.0, 1471.0, 100.0, 100.0);
        assert!(!band.is_visible(&less, &viewport()));
    }

    #[test]
    fn tall_section_needs_ten_percent_of_its_own_area() {
        let band = ViewportBand::default();
        // 480px visible out of 6000px is 8%.
        let tall = Rect::new(0.0, 0.0, 1000.0, 6000.0);
        assert!(!band.is_visible(&tall, &viewport()));
    }

    #[test]
    fn zero_area_section_is_never_visible() {
        let band = ViewportBand::default();
        let flat = Rect::new(0.0, 1100.0, 500.0, 0.0);
        assert!(!band.is_visible(&flat, &viewport()));
    }
}
