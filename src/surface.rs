//! Drawing surface contract.
//!
//! A surface is a window or printable document addressed in fractions of its
//! width and height, with the origin in the lower-left corner. Drawing happens
//! inside areas: rectangles of the surface with their own world coordinate
//! window, tick counts, and character height. Every primitive is expressed in
//! the world coordinates of the area it is drawn into.

use crate::axis::AxisDomain;
use crate::error::SurfaceError;
use crate::geom::{FracRect, Point};
use crate::style::Color;
use crate::view::Viewport;

/// Handle of an open area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaId(pub u32);

/// Kind of target a surface draws onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceKind {
    /// Interactive window.
    #[default]
    Window,
    /// Printable document.
    Print,
    /// Encapsulated printable document.
    EncapsulatedPrint,
}

/// Event reported by an interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface was exposed or resized and must be redrawn.
    Redraw,
    /// The user asked to leave the event loop.
    Quit,
}

/// Position and size of a window, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowGeometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl WindowGeometry {
    /// Create a window geometry.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Placement of a new area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSpec {
    /// Rectangle occupied on the surface.
    pub frame: FracRect,
    /// World coordinates at the corners of `frame`.
    pub world: Viewport,
    /// Major tick intervals along X.
    pub x_intervals: u32,
    /// Major tick intervals along Y.
    pub y_intervals: u32,
    /// Character height as a fraction of the surface height, 0 for the
    /// surface default.
    pub char_height: f64,
}

impl AreaSpec {
    /// An area whose world window is the unit square.
    pub fn overlay(frame: FracRect) -> Self {
        Self {
            frame,
            world: Viewport::UNIT,
            x_intervals: 1,
            y_intervals: 1,
            char_height: 0.0,
        }
    }
}

/// Drawing attribute of an area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaAttr {
    /// Foreground color.
    Foreground(Color),
    /// Line thickness in device units.
    LineThickness(u32),
    /// Line key: a dash pattern on monochrome surfaces, a color otherwise.
    LineKey(usize),
    /// Color key, with solid lines.
    ColorKey(usize),
}

/// Horizontal justification of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Anchor at the start of the text.
    Left,
    /// Anchor at the middle of the text.
    #[default]
    Center,
    /// Anchor at the end of the text.
    Right,
}

/// Justification, size, and rotation of a text string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextPlacement {
    /// Justification.
    pub justify: Justify,
    /// Character height as a fraction of the surface height, 0 for the
    /// area default.
    pub height: f64,
    /// Rotation in degrees, counterclockwise.
    pub angle: f64,
}

impl TextPlacement {
    /// Unrotated text with the area's default height.
    pub fn new(justify: Justify) -> Self {
        Self {
            justify,
            height: 0.0,
            angle: 0.0,
        }
    }

    /// Set the character height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the rotation.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Labels drawn around an area's grid perimeter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLabel {
    /// Label under the X axis.
    pub x_label: Option<String>,
    /// Draw numeric annotations at the X ticks.
    pub x_annotations: bool,
    /// Label beside the Y axis.
    pub y_label: Option<String>,
    /// Draw annotations at the Y ticks.
    pub y_annotations: bool,
    /// Text for each Y tick, replacing the numeric values.
    pub y_tick_labels: Option<Vec<String>>,
    /// Rotation of the Y label in degrees.
    pub angle: f64,
}

/// Annotated axis line drawn beside an area.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAnnotation {
    /// Distance from the area edge, in character widths.
    pub offset: u32,
    /// Values at the axis ends and tick count.
    pub domain: AxisDomain,
    /// Draw the axis line itself, for axes detached from the grid.
    pub draw_axis: bool,
    /// Axis label.
    pub label: Option<String>,
    /// Draw annotations at the ticks.
    pub annotate: bool,
    /// Text for each tick, replacing the numeric values.
    pub tick_labels: Option<Vec<String>>,
    /// Rotation of the label in degrees.
    pub angle: f64,
}

/// A window or printable document that plots draw onto.
pub trait Surface {
    /// Kind of target.
    fn kind(&self) -> SurfaceKind;

    /// Current position and size.
    fn geometry(&self) -> WindowGeometry;

    /// Whether the surface can only show one color.
    fn is_monochrome(&self) -> bool;

    /// Convert a length in fractions of the surface height into fractions
    /// of the surface width.
    fn y_frac_to_x_frac(&self, y_frac: f64) -> f64;

    /// Make the surface visible.
    fn map(&mut self) -> Result<(), SurfaceError>;

    /// Block until the next event.
    fn wait_event(&mut self) -> Result<SurfaceEvent, SurfaceError>;

    /// Clear the whole surface.
    fn erase(&mut self);

    /// Close the surface. Open areas become invalid.
    fn close(&mut self);

    /// Open an area.
    fn open_area(&mut self, spec: &AreaSpec) -> Result<AreaId, SurfaceError>;

    /// Release an area. Drawings already made stay on the surface.
    fn close_area(&mut self, area: AreaId);

    /// Clear the inside of an area's frame.
    fn erase_area(&mut self, area: AreaId);

    /// Change a drawing attribute of an area.
    fn set_attr(&mut self, area: AreaId, attr: AreaAttr);

    /// Draw a line segment.
    fn line(&mut self, area: AreaId, from: Point, to: Point);

    /// Draw a single point.
    fn point(&mut self, area: AreaId, at: Point);

    /// Draw marker glyph number `mark`.
    fn mark(&mut self, area: AreaId, at: Point, mark: usize);

    /// Draw a single character centered on `at`.
    fn glyph(&mut self, area: AreaId, at: Point, glyph: char);

    /// Draw a circular arc counterclockwise from `start` to `end` degrees,
    /// as chords of `step` degrees.
    fn arc(&mut self, area: AreaId, center: Point, radius: f64, start: f64, end: f64, step: f64);

    /// Draw a text string.
    fn text(&mut self, area: AreaId, at: Point, text: &str, placement: TextPlacement);

    /// Draw the area perimeter with grid lines at the major ticks.
    fn grid(&mut self, area: AreaId);

    /// Draw the area perimeter, ticks, and labels.
    fn grid_label(&mut self, area: AreaId, labels: &GridLabel);

    /// Draw an X axis annotation under the area.
    fn annotate_x(&mut self, area: AreaId, axis: &AxisAnnotation);

    /// Draw a Y axis annotation left of the area.
    fn annotate_y(&mut self, area: AreaId, axis: &AxisAnnotation);

    /// Draw marker glyph `mark` at the end of the Y annotation at `offset`.
    fn annotate_y_mark(&mut self, area: AreaId, offset: u32, mark: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_uses_unit_world() {
        let spec = AreaSpec::overlay(FracRect::FULL);
        assert_eq!(spec.world, Viewport::UNIT);
        assert_eq!((spec.x_intervals, spec.y_intervals), (1, 1));
    }

    #[test]
    fn text_placement_builders() {
        let placement = TextPlacement::new(Justify::Right)
            .with_height(0.008)
            .with_angle(90.0);
        assert_eq!(placement.justify, Justify::Right);
        assert_eq!(placement.height, 0.008);
        assert_eq!(placement.angle, 90.0);
    }
}
