//! Box layout constraints.

use horizon_quill_render::Size;

/// Minimum and maximum sizes a render box may take.
///
/// Maximums may be `f32::INFINITY` for unbounded axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl BoxConstraints {
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Exactly `size`.
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Anything from zero up to `size`.
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// A fixed width and any height up to `max_height`.
    pub const fn tight_for_width(width: f32, max_height: f32) -> Self {
        Self::new(width, width, 0.0, max_height)
    }

    pub fn constrain_width(&self, width: f32) -> f32 {
        width.clamp(self.min_width, self.max_width)
    }

    pub fn constrain_height(&self, height: f32) -> f32 {
        height.clamp(self.min_height, self.max_height)
    }

    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            self.constrain_width(size.width),
            self.constrain_height(size.height),
        )
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Whether the mins do not exceed the maxes.
    pub fn is_normalized(&self) -> bool {
        self.min_width >= 0.0
            && self.min_width <= self.max_width
            && self.min_height >= 0.0
            && self.min_height <= self.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain() {
        let c = BoxConstraints::new(10.0, 100.0, 0.0, 40.0);
        assert_eq!(c.constrain(Size::new(5.0, 50.0)), Size::new(10.0, 40.0));
        assert!(c.is_normalized());
        assert!(c.has_bounded_width());
    }

    #[test]
    fn test_unbounded_height() {
        let c = BoxConstraints::tight_for_width(200.0, f32::INFINITY);
        assert_eq!(c.constrain_height(1.0e6), 1.0e6);
        assert!(!c.has_bounded_height());
        assert_eq!(BoxConstraints::loose(Size::new(3.0, 4.0)).min_width, 0.0);
        assert_eq!(BoxConstraints::tight(Size::new(3.0, 4.0)).min_height, 4.0);
    }
}
