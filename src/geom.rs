//! Geometric primitives used by the plotting pipeline.
//!
//! Three coordinate systems are in play:
//! - world coordinates ([`Point`]) are the data values of an area;
//! - surface fractions ([`FracRect`]) run from 0 to 1 with the origin in the
//!   lower-left corner of the surface;
//! - screen pixels ([`ScreenPoint`], [`ScreenRect`]) are used by render
//!   backends, with the origin in the upper-left corner.

/// A point in world (data) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X value in world coordinates.
    pub x: f64,
    /// Y value in world coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle expressed as fractions of the surface width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FracRect {
    /// Left edge, as a fraction of the surface width.
    pub left: f64,
    /// Bottom edge, as a fraction of the surface height.
    pub bottom: f64,
    /// Right edge, as a fraction of the surface width.
    pub right: f64,
    /// Top edge, as a fraction of the surface height.
    pub top: f64,
}

impl FracRect {
    /// Create a rectangle from its lower-left and upper-right corners.
    pub const fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// The whole surface.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Width as a fraction of the surface width.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height as a fraction of the surface height.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Move the rectangle up by `dy`.
    pub fn raised(&self, dy: f64) -> Self {
        Self::new(self.left, self.bottom + dy, self.right, self.top + dy)
    }

    /// Check whether a fractional point lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_keeps_size() {
        let rect = FracRect::new(0.1, 0.2, 0.9, 0.5);
        let raised = rect.raised(0.3);
        assert!((raised.height() - rect.height()).abs() < 1e-12);
        assert!((raised.bottom - 0.5).abs() < 1e-12);
        assert!(raised.contains(Point::new(0.5, 0.7)));
    }
}
