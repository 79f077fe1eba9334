//! In-memory recording surface.
//!
//! [`RecordingSurface`] implements [`Surface`] by recording every call as a
//! [`DrawCommand`]. Tests inspect the recording directly; the GPUI backend
//! replays it into screen-space commands (see `screen`).

mod screen;

pub use screen::{
    LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextStyle, render_recording, render_recording_with,
};

use std::collections::{HashMap, VecDeque};

use crate::error::SurfaceError;
use crate::geom::Point;
use crate::surface::{
    AreaAttr, AreaId, AreaSpec, AxisAnnotation, GridLabel, Surface, SurfaceEvent, SurfaceKind,
    TextPlacement, WindowGeometry,
};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An area was opened.
    OpenArea {
        /// New area.
        area: AreaId,
        /// Its placement.
        spec: AreaSpec,
    },
    /// An area was released.
    CloseArea(AreaId),
    /// The inside of an area was cleared.
    EraseArea(AreaId),
    /// A drawing attribute changed.
    SetAttr {
        /// Target area.
        area: AreaId,
        /// New attribute value.
        attr: AreaAttr,
    },
    /// Line segment.
    Line {
        /// Target area.
        area: AreaId,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Single point.
    Point {
        /// Target area.
        area: AreaId,
        /// Position.
        at: Point,
    },
    /// Marker glyph.
    Mark {
        /// Target area.
        area: AreaId,
        /// Position.
        at: Point,
        /// Marker number.
        mark: usize,
    },
    /// Character glyph.
    Glyph {
        /// Target area.
        area: AreaId,
        /// Position.
        at: Point,
        /// Character drawn.
        glyph: char,
    },
    /// Circular arc.
    Arc {
        /// Target area.
        area: AreaId,
        /// Center.
        center: Point,
        /// Radius in world units.
        radius: f64,
        /// Start angle in degrees.
        start: f64,
        /// End angle in degrees.
        end: f64,
        /// Chord step in degrees.
        step: f64,
    },
    /// Text string.
    Text {
        /// Target area.
        area: AreaId,
        /// Anchor.
        at: Point,
        /// Content.
        text: String,
        /// Justification, size and rotation.
        placement: TextPlacement,
    },
    /// Grid perimeter and lines.
    Grid(AreaId),
    /// Grid perimeter with labels.
    GridLabel {
        /// Target area.
        area: AreaId,
        /// Labels.
        labels: GridLabel,
    },
    /// X axis annotation.
    AnnotateX {
        /// Target area.
        area: AreaId,
        /// Axis description.
        axis: AxisAnnotation,
    },
    /// Y axis annotation.
    AnnotateY {
        /// Target area.
        area: AreaId,
        /// Axis description.
        axis: AxisAnnotation,
    },
    /// Marker at the end of a Y annotation.
    AnnotateYMark {
        /// Target area.
        area: AreaId,
        /// Annotation offset.
        offset: u32,
        /// Marker number.
        mark: usize,
    },
}

impl DrawCommand {
    /// Area the command applies to.
    pub fn area(&self) -> AreaId {
        match self {
            Self::OpenArea { area, .. }
            | Self::SetAttr { area, .. }
            | Self::Line { area, .. }
            | Self::Point { area, .. }
            | Self::Mark { area, .. }
            | Self::Glyph { area, .. }
            | Self::Arc { area, .. }
            | Self::Text { area, .. }
            | Self::GridLabel { area, .. }
            | Self::AnnotateX { area, .. }
            | Self::AnnotateY { area, .. }
            | Self::AnnotateYMark { area, .. } => *area,
            Self::CloseArea(area) | Self::EraseArea(area) | Self::Grid(area) => *area,
        }
    }
}

/// Surface that records every call in memory.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    kind: SurfaceKind,
    geometry: WindowGeometry,
    monochrome: bool,
    area_budget: Option<usize>,
    events: VecDeque<SurfaceEvent>,
    specs: HashMap<AreaId, AreaSpec>,
    open: Vec<AreaId>,
    next_area: u32,
    mapped: bool,
    closed: bool,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a surface of the given kind and geometry.
    pub fn new(kind: SurfaceKind, geometry: WindowGeometry) -> Self {
        Self {
            kind,
            geometry,
            monochrome: false,
            area_budget: None,
            events: VecDeque::new(),
            specs: HashMap::new(),
            open: Vec::new(),
            next_area: 0,
            mapped: false,
            closed: false,
            commands: Vec::new(),
        }
    }

    /// Create an interactive window surface of the given size.
    pub fn window(width: f64, height: f64) -> Self {
        Self::new(SurfaceKind::Window, WindowGeometry::new(0.0, 0.0, width, height))
    }

    /// Report the surface as monochrome.
    pub fn with_monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = monochrome;
        self
    }

    /// Limit the number of simultaneously open areas.
    pub fn with_area_budget(mut self, budget: usize) -> Self {
        self.area_budget = Some(budget);
        self
    }

    /// Queue events for [`Surface::wait_event`].
    pub fn with_events(mut self, events: impl IntoIterator<Item = SurfaceEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Queue one event.
    pub fn push_event(&mut self, event: SurfaceEvent) {
        self.events.push_back(event);
    }

    /// Change the surface size, as a window resize would.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    /// All commands recorded since the last erase.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Placement of an area opened on this surface.
    pub fn area_spec(&self, area: AreaId) -> Option<&AreaSpec> {
        self.specs.get(&area)
    }

    /// Areas currently open.
    pub fn open_areas(&self) -> &[AreaId] {
        &self.open
    }

    /// Whether [`Surface::map`] was called.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Whether [`Surface::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Recorded line segments, in drawing order.
    pub fn lines(&self) -> Vec<(AreaId, Point, Point)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { area, from, to } => Some((*area, *from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Recorded single points, in drawing order.
    pub fn points(&self) -> Vec<(AreaId, Point)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Point { area, at } => Some((*area, *at)),
                _ => None,
            })
            .collect()
    }

    /// Recorded marker glyphs, in drawing order.
    pub fn marks(&self) -> Vec<(AreaId, Point, usize)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Mark { area, at, mark } => Some((*area, *at, *mark)),
                _ => None,
            })
            .collect()
    }

    /// Recorded character glyphs, in drawing order.
    pub fn glyphs(&self) -> Vec<(AreaId, Point, char)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Glyph { area, at, glyph } => Some((*area, *at, *glyph)),
                _ => None,
            })
            .collect()
    }

    /// Recorded text strings, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DrawCommand) {
        if self.closed {
            log::warn!("drawing on a closed surface: {command:?}");
            return;
        }
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    fn is_monochrome(&self) -> bool {
        self.monochrome
    }

    fn y_frac_to_x_frac(&self, y_frac: f64) -> f64 {
        if self.geometry.width <= 0.0 {
            return y_frac;
        }
        y_frac * self.geometry.height / self.geometry.width
    }

    fn map(&mut self) -> Result<(), SurfaceError> {
        if self.closed {
            return Err(SurfaceError::Closed);
        }
        self.mapped = true;
        Ok(())
    }

    fn wait_event(&mut self) -> Result<SurfaceEvent, SurfaceError> {
        if self.closed {
            return Err(SurfaceError::Closed);
        }
        Ok(self.events.pop_front().unwrap_or(SurfaceEvent::Quit))
    }

    fn erase(&mut self) {
        self.commands.clear();
        let open = &self.open;
        self.specs.retain(|area, _| open.contains(area));
    }

    fn close(&mut self) {
        self.open.clear();
        self.closed = true;
    }

    fn open_area(&mut self, spec: &AreaSpec) -> Result<AreaId, SurfaceError> {
        if self.closed {
            return Err(SurfaceError::Closed);
        }
        if let Some(budget) = self.area_budget
            && self.open.len() >= budget
        {
            return Err(SurfaceError::AreaUnavailable);
        }
        let area = AreaId(self.next_area);
        self.next_area += 1;
        self.specs.insert(area, *spec);
        self.open.push(area);
        self.record(DrawCommand::OpenArea { area, spec: *spec });
        Ok(area)
    }

    fn close_area(&mut self, area: AreaId) {
        self.open.retain(|open| *open != area);
        self.record(DrawCommand::CloseArea(area));
    }

    fn erase_area(&mut self, area: AreaId) {
        self.record(DrawCommand::EraseArea(area));
    }

    fn set_attr(&mut self, area: AreaId, attr: AreaAttr) {
        self.record(DrawCommand::SetAttr { area, attr });
    }

    fn line(&mut self, area: AreaId, from: Point, to: Point) {
        self.record(DrawCommand::Line { area, from, to });
    }

    fn point(&mut self, area: AreaId, at: Point) {
        self.record(DrawCommand::Point { area, at });
    }

    fn mark(&mut self, area: AreaId, at: Point, mark: usize) {
        self.record(DrawCommand::Mark { area, at, mark });
    }

    fn glyph(&mut self, area: AreaId, at: Point, glyph: char) {
        self.record(DrawCommand::Glyph { area, at, glyph });
    }

    fn arc(&mut self, area: AreaId, center: Point, radius: f64, start: f64, end: f64, step: f64) {
        self.record(DrawCommand::Arc {
            area,
            center,
            radius,
            start,
            end,
            step,
        });
    }

    fn text(&mut self, area: AreaId, at: Point, text: &str, placement: TextPlacement) {
        self.record(DrawCommand::Text {
            area,
            at,
            text: text.to_string(),
            placement,
        });
    }

    fn grid(&mut self, area: AreaId) {
        self.record(DrawCommand::Grid(area));
    }

    fn grid_label(&mut self, area: AreaId, labels: &GridLabel) {
        self.record(DrawCommand::GridLabel {
            area,
            labels: labels.clone(),
        });
    }

    fn annotate_x(&mut self, area: AreaId, axis: &AxisAnnotation) {
        self.record(DrawCommand::AnnotateX {
            area,
            axis: axis.clone(),
        });
    }

    fn annotate_y(&mut self, area: AreaId, axis: &AxisAnnotation) {
        self.record(DrawCommand::AnnotateY {
            area,
            axis: axis.clone(),
        });
    }

    fn annotate_y_mark(&mut self, area: AreaId, offset: u32, mark: usize) {
        self.record(DrawCommand::AnnotateYMark { area, offset, mark });
    }
}
