use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, ShapedLine, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextStyle,
};
use crate::style::Color;
use crate::surface::Justify;

/// Paint `list` with its origin at `origin`, the top-left corner of the
/// canvas in window coordinates.
pub(crate) fn paint_list(list: &RenderList, origin: ScreenPoint, window: &mut Window, cx: &mut App) {
    for command in list.commands() {
        match command {
            RenderCommand::LineSegments { segments, style } => {
                paint_lines(window, origin, segments, *style);
            }
            RenderCommand::Points { points, style } => {
                paint_points(window, origin, points, *style);
            }
            RenderCommand::Rect { rect, style } => {
                paint_rect(window, origin, *rect, *style);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                paint_text(window, cx, offset(origin, *position), text, style);
            }
        }
    }
}

fn paint_lines(window: &mut Window, origin: ScreenPoint, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        builder.move_to(to_point(offset(origin, segment.start)));
        builder.line_to(to_point(offset(origin, segment.end)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_points(window: &mut Window, origin: ScreenPoint, points: &[ScreenPoint], style: MarkerStyle) {
    if points.is_empty() {
        return;
    }

    let size = style.size.max(2.0);
    let half = size * 0.5;
    match style.shape {
        MarkerShape::Circle | MarkerShape::Square => {
            let radius = if style.shape == MarkerShape::Circle {
                half
            } else {
                0.0
            };
            for pt in points {
                let pt = offset(origin, *pt);
                let bounds = Bounds::from_corners(
                    point(px(pt.x - half), px(pt.y - half)),
                    point(px(pt.x + half), px(pt.y + half)),
                );
                window.paint_quad(quad(
                    bounds,
                    Corners::all(px(radius)),
                    to_rgba(style.color),
                    Edges::all(px(0.0)),
                    to_rgba(style.color),
                    BorderStyle::default(),
                ));
            }
        }
        MarkerShape::Cross => {
            let mut builder = PathBuilder::stroke(px(1.0));
            for pt in points {
                let pt = offset(origin, *pt);
                builder.move_to(point(px(pt.x - half), px(pt.y)));
                builder.line_to(point(px(pt.x + half), px(pt.y)));
                builder.move_to(point(px(pt.x), px(pt.y - half)));
                builder.line_to(point(px(pt.x), px(pt.y + half)));
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, to_rgba(style.color));
            }
        }
    }
}

fn paint_rect(window: &mut Window, origin: ScreenPoint, rect: ScreenRect, style: RectStyle) {
    let rect = ScreenRect::new(offset(origin, rect.min), offset(origin, rect.max));
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    ));
}

/// Paint text anchored on its baseline. Text turned more than 45 degrees is
/// set one glyph per row, reading upward from the anchor.
fn paint_text(window: &mut Window, cx: &mut App, anchor: ScreenPoint, text: &str, style: &TextStyle) {
    if text.is_empty() {
        return;
    }
    let vertical = (style.angle.rem_euclid(180.0) - 90.0).abs() < 45.0;
    if !vertical {
        let shaped = shape(window, text, style);
        let x = anchor.x - justify_offset(style.justify, f32::from(shaped.width));
        let y = anchor.y - f32::from(shaped.ascent);
        let line_height = shaped.ascent + shaped.descent;
        let _ = shaped.paint(point(px(x), px(y)), line_height, window, cx);
        return;
    }

    let glyphs: Vec<ShapedLine> = text
        .chars()
        .map(|glyph| shape(window, &glyph.to_string(), style))
        .collect();
    let row = style.size * 1.1;
    let column = row * glyphs.len() as f32;
    // Rows run bottom to top, so the column grows upward from its baseline.
    let base = anchor.y + justify_offset(style.justify, column);
    for (index, shaped) in glyphs.into_iter().enumerate() {
        let x = anchor.x - f32::from(shaped.width) * 0.5;
        let y = base - row * index as f32 - f32::from(shaped.ascent);
        let line_height = shaped.ascent + shaped.descent;
        let _ = shaped.paint(point(px(x), px(y)), line_height, window, cx);
    }
}

fn shape(window: &Window, text: &str, style: &TextStyle) -> ShapedLine {
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None)
}

fn justify_offset(justify: Justify, extent: f32) -> f32 {
    match justify {
        Justify::Left => 0.0,
        Justify::Center => extent * 0.5,
        Justify::Right => extent,
    }
}

fn offset(origin: ScreenPoint, pt: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(origin.x + pt.x, origin.y + pt.y)
}

fn to_point(pt: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(pt.x), px(pt.y))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(rect.min), to_point(rect.max))
}
