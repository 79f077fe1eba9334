//! Numeric ranges and world-coordinate windows.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// A degenerate range holding a single value.
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// World-coordinate window of a drawing area.
///
/// Unlike [`Range`], the ends are kept in the order given: an axis may run
/// from a larger origin to a smaller extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X value at the left edge.
    pub x_origin: f64,
    /// Y value at the bottom edge.
    pub y_origin: f64,
    /// X value at the right edge.
    pub x_extent: f64,
    /// Y value at the top edge.
    pub y_extent: f64,
}

impl Viewport {
    /// Create a world window from its corner values.
    pub const fn new(x_origin: f64, y_origin: f64, x_extent: f64, y_extent: f64) -> Self {
        Self {
            x_origin,
            y_origin,
            x_extent,
            y_extent,
        }
    }

    /// The unit square, used for overlays drawn in normalized coordinates.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Check whether both axes have a non-zero, finite span.
    pub fn is_valid(&self) -> bool {
        let x_span = self.x_extent - self.x_origin;
        let y_span = self.y_extent - self.y_origin;
        x_span.is_finite() && y_span.is_finite() && x_span != 0.0 && y_span != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_new_orders_bounds() {
        let range = Range::new(5.0, -5.0);
        assert_eq!(range.min, -5.0);
        assert_eq!(range.max, 5.0);
        assert!(range.is_valid());
    }

    #[test]
    fn expand_ignores_non_finite() {
        let mut range = Range::point(1.0);
        range.expand_to_include(f64::NAN);
        range.expand_to_include(3.0);
        assert_eq!(range, Range::new(1.0, 3.0));
    }

    #[test]
    fn viewport_rejects_degenerate_axis() {
        assert!(Viewport::UNIT.is_valid());
        assert!(!Viewport::new(0.0, 1.0, 10.0, 1.0).is_valid());
    }
}
