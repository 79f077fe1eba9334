//! Coordinate transforms between world, surface-fraction and screen space.

use crate::geom::{FracRect, Point, ScreenPoint, ScreenRect};
use crate::view::Viewport;

/// Mapping from an area's world coordinates onto the surface.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Transform {
    frame: FracRect,
    world: Viewport,
}

impl Transform {
    /// Create a transform for an area occupying `frame` with world window
    /// `world`. Returns `None` when either rectangle is degenerate.
    pub(crate) fn new(frame: FracRect, world: Viewport) -> Option<Self> {
        if !frame.is_valid() || !world.is_valid() {
            return None;
        }
        Some(Self { frame, world })
    }

    /// Map a world point to surface fractions.
    pub(crate) fn world_to_frac(&self, point: Point) -> Point {
        let x_norm = (point.x - self.world.x_origin) / (self.world.x_extent - self.world.x_origin);
        let y_norm = (point.y - self.world.y_origin) / (self.world.y_extent - self.world.y_origin);
        Point::new(
            self.frame.left + x_norm * self.frame.width(),
            self.frame.bottom + y_norm * self.frame.height(),
        )
    }

    /// Map a world point straight to screen pixels.
    pub(crate) fn world_to_screen(&self, point: Point, size: (f32, f32)) -> ScreenPoint {
        frac_to_screen(self.world_to_frac(point), size)
    }

    /// Screen rectangle covered by the area.
    pub(crate) fn screen_rect(&self, size: (f32, f32)) -> ScreenRect {
        frac_rect_to_screen(self.frame, size)
    }
}

/// Map a surface fraction to screen pixels (Y axis flipped).
pub(crate) fn frac_to_screen(point: Point, size: (f32, f32)) -> ScreenPoint {
    let (width, height) = size;
    let sx = point.x * width as f64;
    let sy = (1.0 - point.y) * height as f64;
    ScreenPoint::new(sx as f32, sy as f32)
}

/// Map a fractional rectangle to a screen rectangle.
pub(crate) fn frac_rect_to_screen(rect: FracRect, size: (f32, f32)) -> ScreenRect {
    let min = frac_to_screen(Point::new(rect.left, rect.top), size);
    let max = frac_to_screen(Point::new(rect.right, rect.bottom), size);
    ScreenRect::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_corners_map_to_frame() {
        let frame = FracRect::new(0.2, 0.1, 0.8, 0.6);
        let transform =
            Transform::new(frame, Viewport::new(0.0, -5.0, 10.0, 5.0)).expect("valid transform");
        let low = transform.world_to_frac(Point::new(0.0, -5.0));
        let high = transform.world_to_frac(Point::new(10.0, 5.0));
        assert!((low.x - 0.2).abs() < 1e-12 && (low.y - 0.1).abs() < 1e-12);
        assert!((high.x - 0.8).abs() < 1e-12 && (high.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn screen_flips_y() {
        let screen = frac_to_screen(Point::new(0.25, 0.25), (100.0, 200.0));
        assert_eq!(screen, ScreenPoint::new(25.0, 150.0));
    }

    #[test]
    fn degenerate_world_is_rejected() {
        let frame = FracRect::FULL;
        assert!(Transform::new(frame, Viewport::new(0.0, 0.0, 0.0, 1.0)).is_none());
    }
}
