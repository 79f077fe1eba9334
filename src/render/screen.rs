//! Replay of a recording into screen-space render commands.
//!
//! These types are backend-agnostic and are used by render backends (such as
//! the GPUI backend) to describe how the recorded plot should be painted.

use std::collections::HashMap;

use crate::axis::{AxisDomain, AxisFormatter};
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::layout::default_char_height;
use crate::render::{DrawCommand, RecordingSurface};
use crate::style::{Color, Theme, dash_pattern};
use crate::surface::{
    AreaAttr, AreaId, AreaSpec, AxisAnnotation, GridLabel, Justify, Surface, TextPlacement,
};
use crate::transform::{Transform, frac_rect_to_screen, frac_to_screen};

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Marker shape for points and marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Square marker.
    Square,
    /// Cross marker.
    Cross,
}

impl MarkerShape {
    /// Shape used for marker number `mark`.
    pub fn for_mark(mark: usize) -> Self {
        match mark % 3 {
            0 => Self::Circle,
            1 => Self::Square,
            _ => Self::Cross,
        }
    }
}

/// Marker styling.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Justification relative to the anchor.
    pub justify: Justify,
    /// Rotation in degrees, counterclockwise.
    pub angle: f32,
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub(crate) fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Screen-space render command.
#[derive(Debug, Clone)]
pub enum RenderCommand {
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw markers.
    Points {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text.
    Text {
        /// Anchor position, on the text baseline.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

#[derive(Debug, Clone, Copy)]
struct Pen {
    color: Color,
    width: f32,
    dash: &'static [f32],
}

#[derive(Debug, Clone, Copy)]
struct AreaState {
    spec: AreaSpec,
    transform: Option<Transform>,
    pen: Pen,
}

struct Replay<'a> {
    size: (f32, f32),
    theme: &'a Theme,
    monochrome: bool,
    formatter: &'a AxisFormatter,
    areas: HashMap<AreaId, AreaState>,
    out: RenderList,
}

/// Replay everything recorded on `surface` into screen commands for a
/// surface of `size` pixels.
pub fn render_recording(surface: &RecordingSurface, size: (f32, f32), theme: &Theme) -> RenderList {
    render_recording_with(surface, size, theme, &AxisFormatter::default())
}

/// Like [`render_recording`], formatting numeric tick annotations with
/// `formatter`.
pub fn render_recording_with(
    surface: &RecordingSurface,
    size: (f32, f32),
    theme: &Theme,
    formatter: &AxisFormatter,
) -> RenderList {
    let mut replay = Replay {
        size,
        theme,
        monochrome: surface.is_monochrome(),
        formatter,
        areas: HashMap::new(),
        out: RenderList::new(),
    };
    for command in surface.commands() {
        let area = command.area();
        if !replay.areas.contains_key(&area) {
            let Some(spec) = surface.area_spec(area) else {
                continue;
            };
            replay.open(area, *spec);
        }
        replay.apply(command);
    }
    replay.out
}

impl Replay<'_> {
    fn open(&mut self, area: AreaId, spec: AreaSpec) {
        let pen = Pen {
            color: self.theme.foreground,
            width: 1.0,
            dash: &[],
        };
        self.areas.insert(
            area,
            AreaState {
                spec,
                transform: Transform::new(spec.frame, spec.world),
                pen,
            },
        );
    }

    fn apply(&mut self, command: &DrawCommand) {
        let area = command.area();
        let Some(state) = self.areas.get(&area).copied() else {
            return;
        };
        match command {
            DrawCommand::OpenArea { spec, .. } => self.open(area, *spec),
            DrawCommand::CloseArea(_) => {}
            DrawCommand::EraseArea(_) => {
                let rect = frac_rect_to_screen(state.spec.frame, self.size);
                self.out.push(RenderCommand::Rect {
                    rect,
                    style: RectStyle {
                        fill: self.theme.background,
                        stroke: self.theme.background,
                        stroke_width: 0.0,
                    },
                });
            }
            DrawCommand::SetAttr { attr, .. } => self.set_attr(area, *attr),
            DrawCommand::Line { from, to, .. } => self.world_polyline(&state, &[*from, *to]),
            DrawCommand::Point { at, .. } => {
                self.marker(&state, *at, 2.0, MarkerShape::Square);
            }
            DrawCommand::Mark { at, mark, .. } => {
                self.marker(&state, *at, 7.0, MarkerShape::for_mark(*mark));
            }
            DrawCommand::Glyph { at, glyph, .. } => {
                if let Some(transform) = state.transform {
                    let position = frac_to_screen(transform.world_to_frac(*at), self.size);
                    self.push_text(
                        &state,
                        position,
                        glyph.to_string(),
                        TextPlacement::new(Justify::Center),
                    );
                }
            }
            DrawCommand::Arc {
                center,
                radius,
                start,
                end,
                step,
                ..
            } => {
                let points = arc_points(*center, *radius, *start, *end, *step);
                self.world_polyline(&state, &points);
            }
            DrawCommand::Text {
                at, text, placement, ..
            } => {
                if let Some(transform) = state.transform {
                    let position = frac_to_screen(transform.world_to_frac(*at), self.size);
                    self.push_text(&state, position, text.clone(), *placement);
                }
            }
            DrawCommand::Grid(_) => self.grid(&state, true),
            DrawCommand::GridLabel { labels, .. } => self.grid_label(&state, labels),
            DrawCommand::AnnotateX { axis, .. } => self.annotate_x(&state, axis),
            DrawCommand::AnnotateY { axis, .. } => self.annotate_y(&state, axis),
            DrawCommand::AnnotateYMark { offset, mark, .. } => {
                let frame = state.spec.frame;
                let x = frame.left - self.char_width(&state) * *offset as f64;
                let position = frac_to_screen(Point::new(x, frame.top), self.size);
                self.push_marker(position, 7.0, MarkerShape::for_mark(*mark), state.pen.color);
            }
        }
    }

    fn set_attr(&mut self, area: AreaId, attr: AreaAttr) {
        let monochrome = self.monochrome;
        let theme = self.theme;
        let Some(state) = self.areas.get_mut(&area) else {
            return;
        };
        match attr {
            AreaAttr::Foreground(color) => state.pen.color = color,
            AreaAttr::LineThickness(width) => state.pen.width = width.max(1) as f32,
            AreaAttr::LineKey(key) => {
                if monochrome {
                    state.pen.dash = dash_pattern(key);
                } else {
                    state.pen.color = theme.key_color(key);
                    state.pen.dash = &[];
                }
            }
            AreaAttr::ColorKey(key) => {
                state.pen.color = theme.key_color(key);
                state.pen.dash = &[];
            }
        }
    }

    fn char_height(&self, state: &AreaState) -> f64 {
        if state.spec.char_height > 0.0 {
            state.spec.char_height
        } else {
            default_char_height(state.spec.frame.height())
        }
    }

    fn char_width(&self, state: &AreaState) -> f64 {
        let (width, height) = self.size;
        if width <= 0.0 {
            return self.char_height(state);
        }
        self.char_height(state) * height as f64 / width as f64
    }

    fn world_polyline(&mut self, state: &AreaState, points: &[Point]) {
        let Some(transform) = state.transform else {
            return;
        };
        let clip = transform.screen_rect(self.size);
        let screen: Vec<ScreenPoint> = points
            .iter()
            .map(|point| transform.world_to_screen(*point, self.size))
            .collect();
        self.screen_polyline(&screen, Some(clip), state.pen);
    }

    fn frac_polyline(&mut self, points: &[Point], pen: Pen) {
        let screen: Vec<ScreenPoint> = points
            .iter()
            .map(|point| frac_to_screen(*point, self.size))
            .collect();
        self.screen_polyline(&screen, None, pen);
    }

    fn screen_polyline(&mut self, points: &[ScreenPoint], clip: Option<ScreenRect>, pen: Pen) {
        let mut segments = Vec::new();
        for window in points.windows(2) {
            let clipped = match clip {
                Some(rect) => clip_segment(window[0], window[1], rect),
                None => Some((window[0], window[1])),
            };
            if let Some((start, end)) = clipped {
                dash_segment(start, end, pen.dash, &mut segments);
            }
        }
        if segments.is_empty() {
            return;
        }
        self.out.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle {
                color: pen.color,
                width: pen.width,
            },
        });
    }

    fn marker(&mut self, state: &AreaState, at: Point, size: f32, shape: MarkerShape) {
        let Some(transform) = state.transform else {
            return;
        };
        if !state.spec.frame.contains(transform.world_to_frac(at)) {
            return;
        }
        let position = transform.world_to_screen(at, self.size);
        self.push_marker(position, size, shape, state.pen.color);
    }

    fn push_marker(&mut self, position: ScreenPoint, size: f32, shape: MarkerShape, color: Color) {
        self.out.push(RenderCommand::Points {
            points: vec![position],
            style: MarkerStyle { color, size, shape },
        });
    }

    fn push_text(
        &mut self,
        state: &AreaState,
        position: ScreenPoint,
        text: String,
        placement: TextPlacement,
    ) {
        if text.trim().is_empty() {
            return;
        }
        let height = if placement.height > 0.0 {
            placement.height
        } else {
            self.char_height(state)
        };
        self.out.push(RenderCommand::Text {
            position,
            text,
            style: TextStyle {
                color: state.pen.color,
                size: (height * self.size.1 as f64).max(6.0) as f32,
                justify: placement.justify,
                angle: placement.angle as f32,
            },
        });
    }

    fn frac_text(&mut self, state: &AreaState, at: Point, text: String, placement: TextPlacement) {
        let position = frac_to_screen(at, self.size);
        self.push_text(state, position, text, placement);
    }

    fn grid(&mut self, state: &AreaState, lines: bool) {
        let frame = state.spec.frame;
        let rect = frac_rect_to_screen(frame, self.size);
        self.out.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: Color::new(0.0, 0.0, 0.0, 0.0),
                stroke: self.theme.foreground,
                stroke_width: 1.0,
            },
        });
        let pen = Pen {
            color: Color::new(
                self.theme.foreground.r,
                self.theme.foreground.g,
                self.theme.foreground.b,
                0.25,
            ),
            width: 1.0,
            dash: if lines { &[2.0, 3.0] } else { &[] },
        };
        let tick = self.char_height(state) * 0.5;
        let tick_x = self.char_width(state) * 0.5;
        for x in frac_ticks(frame.left, frame.right, state.spec.x_intervals) {
            if lines {
                self.frac_polyline(&[Point::new(x, frame.bottom), Point::new(x, frame.top)], pen);
            } else {
                self.frac_polyline(
                    &[Point::new(x, frame.bottom), Point::new(x, frame.bottom + tick)],
                    pen,
                );
            }
        }
        for y in frac_ticks(frame.bottom, frame.top, state.spec.y_intervals) {
            if lines {
                self.frac_polyline(&[Point::new(frame.left, y), Point::new(frame.right, y)], pen);
            } else {
                self.frac_polyline(
                    &[Point::new(frame.left, y), Point::new(frame.left + tick_x, y)],
                    pen,
                );
            }
        }
    }

    fn grid_label(&mut self, state: &AreaState, labels: &GridLabel) {
        self.grid(state, false);
        let world = state.spec.world;
        let x_axis = AxisAnnotation {
            offset: 0,
            domain: AxisDomain::new(world.x_origin, world.x_extent, state.spec.x_intervals),
            draw_axis: false,
            label: labels.x_label.clone(),
            annotate: labels.x_annotations,
            tick_labels: None,
            angle: 0.0,
        };
        self.annotate_x(state, &x_axis);
        let y_axis = AxisAnnotation {
            offset: 0,
            domain: AxisDomain::new(world.y_origin, world.y_extent, state.spec.y_intervals),
            draw_axis: false,
            label: labels.y_label.clone(),
            annotate: labels.y_annotations,
            tick_labels: labels.y_tick_labels.clone(),
            angle: labels.angle,
        };
        self.annotate_y(state, &y_axis);
    }

    fn annotate_x(&mut self, state: &AreaState, axis: &AxisAnnotation) {
        let frame = state.spec.frame;
        let ch = self.char_height(state);
        let y = frame.bottom - ch * axis.offset as f64;
        if axis.draw_axis {
            self.frac_polyline(
                &[Point::new(frame.left, y), Point::new(frame.right, y)],
                state.pen,
            );
        }
        if axis.annotate {
            let xs = frac_ticks(frame.left, frame.right, axis.domain.intervals);
            for (tick, (x, value)) in xs.into_iter().zip(axis.domain.ticks()).enumerate() {
                let text = tick_text(self.formatter, axis, tick, value);
                self.frac_text(
                    state,
                    Point::new(x, y - 1.5 * ch),
                    text,
                    TextPlacement::new(Justify::Center),
                );
            }
        }
        if let Some(label) = axis.label.clone() {
            self.frac_text(
                state,
                Point::new((frame.left + frame.right) * 0.5, y - 3.5 * ch),
                label,
                TextPlacement::new(Justify::Center),
            );
        }
    }

    fn annotate_y(&mut self, state: &AreaState, axis: &AxisAnnotation) {
        let frame = state.spec.frame;
        let chx = self.char_width(state);
        let x = frame.left - chx * axis.offset as f64;
        if axis.draw_axis {
            self.frac_polyline(
                &[Point::new(x, frame.bottom), Point::new(x, frame.top)],
                state.pen,
            );
        }
        if axis.annotate {
            let ys = frac_ticks(frame.bottom, frame.top, axis.domain.intervals);
            for (tick, (y, value)) in ys.into_iter().zip(axis.domain.ticks()).enumerate() {
                let text = tick_text(self.formatter, axis, tick, value);
                self.frac_text(
                    state,
                    Point::new(x - 0.5 * chx, y),
                    text,
                    TextPlacement::new(Justify::Right),
                );
            }
        }
        if let Some(label) = axis.label.clone() {
            self.frac_text(
                state,
                Point::new(x - 5.0 * chx, (frame.bottom + frame.top) * 0.5),
                label,
                TextPlacement::new(Justify::Center).with_angle(axis.angle),
            );
        }
    }
}

fn tick_text(formatter: &AxisFormatter, axis: &AxisAnnotation, tick: usize, value: f64) -> String {
    match &axis.tick_labels {
        Some(labels) => labels.get(tick).cloned().unwrap_or_default(),
        None => formatter.format(value),
    }
}

fn frac_ticks(lo: f64, hi: f64, intervals: u32) -> Vec<f64> {
    let intervals = intervals.max(1);
    let step = (hi - lo) / intervals as f64;
    (0..=intervals).map(|tick| lo + step * tick as f64).collect()
}

/// Chord points of a counterclockwise arc from `start` to `end` degrees.
pub(crate) fn arc_points(center: Point, radius: f64, start: f64, end: f64, step: f64) -> Vec<Point> {
    let mut end = end;
    while end <= start {
        end += 360.0;
    }
    let step = if step > 0.0 { step } else { 5.0 };
    let mut points = Vec::new();
    let mut angle = start;
    loop {
        let clamped = angle.min(end);
        let radians = clamped.to_radians();
        points.push(Point::new(
            center.x + radius * radians.cos(),
            center.y + radius * radians.sin(),
        ));
        if clamped >= end {
            break;
        }
        angle += step;
    }
    points
}

/// Split a segment into its dashes, or pass it through when `pattern` is
/// empty.
fn dash_segment(start: ScreenPoint, end: ScreenPoint, pattern: &[f32], out: &mut Vec<LineSegment>) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    if pattern.is_empty() || length <= f32::EPSILON {
        out.push(LineSegment::new(start, end));
        return;
    }
    let at = |distance: f32| {
        ScreenPoint::new(
            start.x + dx * distance / length,
            start.y + dy * distance / length,
        )
    };
    let mut travelled = 0.0_f32;
    let mut index = 0;
    while travelled < length {
        let run = pattern[index % pattern.len()].max(0.5);
        let next = (travelled + run).min(length);
        if index % 2 == 0 {
            out.push(LineSegment::new(at(travelled), at(next)));
        }
        travelled = next;
        index += 1;
    }
}

fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let clipped = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = clipped;
            out_start = region_code(start, rect);
        } else {
            end = clipped;
            out_end = region_code(end, rect);
        }
    }

    fn region_code(point: ScreenPoint, rect: ScreenRect) -> u8 {
        let mut code = 0;
        if point.x < rect.min.x {
            code |= LEFT;
        } else if point.x > rect.max.x {
            code |= RIGHT;
        }
        if point.y < rect.min.y {
            code |= TOP;
        } else if point.y > rect.max.y {
            code |= BOTTOM;
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::geom::FracRect;
    use crate::view::Viewport;

    fn line_segments(list: &RenderList) -> usize {
        list.commands()
            .iter()
            .map(|command| match command {
                RenderCommand::LineSegments { segments, .. } => segments.len(),
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn clip_segment_inside() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let clipped = clip_segment(ScreenPoint::new(5.0, 5.0), ScreenPoint::new(15.0, 5.0), rect)
            .expect("segment crosses the rectangle");
        assert_eq!(clipped.1, ScreenPoint::new(10.0, 5.0));
        assert!(
            clip_segment(ScreenPoint::new(12.0, 1.0), ScreenPoint::new(15.0, 5.0), rect).is_none()
        );
    }

    #[test]
    fn dashes_split_segment() {
        let mut out = Vec::new();
        dash_segment(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(18.0, 0.0),
            &[6.0, 3.0],
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].start, ScreenPoint::new(9.0, 0.0));
    }

    #[test]
    fn arc_wraps_past_full_turn() {
        let points = arc_points(Point::new(0.0, 0.0), 1.0, 270.0, 0.0, 45.0);
        assert_eq!(points.len(), 3);
        let last = points[2];
        assert!((last.x - 1.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    }

    #[test]
    fn replay_maps_lines_into_area() {
        let mut surface = RecordingSurface::window(200.0, 100.0);
        let spec = AreaSpec {
            frame: FracRect::new(0.0, 0.0, 1.0, 1.0),
            world: Viewport::new(0.0, 0.0, 10.0, 10.0),
            x_intervals: 5,
            y_intervals: 5,
            char_height: 0.0,
        };
        let area = surface.open_area(&spec).expect("area");
        surface.line(area, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        surface.erase_area(area);
        let list = render_recording(&surface, (200.0, 100.0), &Theme::default());
        assert_eq!(line_segments(&list), 1);
        let rects = list
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 1);
    }

    #[test]
    fn custom_formatter_annotates_ticks() {
        let mut surface = RecordingSurface::window(200.0, 100.0);
        let spec = AreaSpec {
            frame: FracRect::new(0.2, 0.2, 0.9, 0.9),
            world: Viewport::new(0.0, 0.0, 4.0, 4.0),
            x_intervals: 2,
            y_intervals: 2,
            char_height: 0.02,
        };
        let area = surface.open_area(&spec).expect("area");
        surface.annotate_x(
            area,
            &AxisAnnotation {
                offset: 0,
                domain: AxisDomain::new(0.0, 4.0, 2),
                draw_axis: false,
                label: None,
                annotate: true,
                tick_labels: None,
                angle: 0.0,
            },
        );
        let volts = AxisFormatter::Custom(Arc::new(|value| format!("{value} V")));
        let list = render_recording_with(&surface, (200.0, 100.0), &Theme::default(), &volts);
        let texts: Vec<&str> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["0 V", "2 V", "4 V"]);
    }

    #[test]
    fn monochrome_line_key_dashes() {
        let mut surface = RecordingSurface::window(100.0, 100.0).with_monochrome(true);
        let area = surface
            .open_area(&AreaSpec::overlay(FracRect::FULL))
            .expect("area");
        surface.set_attr(area, AreaAttr::LineKey(1));
        surface.line(area, Point::new(0.0, 0.5), Point::new(1.0, 0.5));
        let list = render_recording(&surface, (100.0, 100.0), &Theme::default());
        assert!(line_segments(&list) > 1);
    }
}
