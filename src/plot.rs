//! Plot master: the channels of one plot and the surface they are drawn on.

use chrono::Local;

use crate::axis::{AxisDomain, DEFAULT_INTERVALS, auto_ends, auto_intervals, auto_range, setup_axis};
use crate::datasource::{ChannelId, SampleSet};
use crate::error::{PlotError, Result};
use crate::geometry::{Geometry, GridPass, SamplePass};
use crate::layout::Titles;
use crate::slave::{Continuity, PlotSlave, SlaveAttr, SlaveId};
use crate::stream::{StreamStats, StreamStyle};
use crate::style::Color;
use crate::surface::{Surface, SurfaceEvent, WindowGeometry};

/// Format of the reference time in axis labels.
pub const REFERENCE_FORMAT: &str = "%m/%d/%y %H:%M:%S%.3f";

/// X label used when no time range is known.
pub const ELAPSED_LABEL: &str = "elapsed seconds";

/// Rendering switches of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotAttributes {
    /// Connect samples with lines.
    pub line: bool,
    /// Draw a point at each sample.
    pub point: bool,
    /// Draw each channel's marker at each sample.
    pub mark: bool,
    /// Draw status codes at samples that carry one.
    pub show_status: bool,
    /// Fill under the line. Recorded only; no geometry draws fills.
    pub fill_under: bool,
    /// Fold time beyond the X extent back into the axis.
    pub wrap_x: bool,
    /// Draw the X axis label.
    pub x_label: bool,
    /// Draw the X tick annotations.
    pub x_annotations: bool,
    /// Draw the Y axis labels.
    pub y_label: bool,
    /// Draw the Y tick annotations.
    pub y_annotations: bool,
    /// Draw without color: line keys become dash patterns.
    pub monochrome: bool,
    /// Impedance overlay color.
    pub alt_foreground_1: Option<Color>,
    /// Admittance overlay color.
    pub alt_foreground_2: Option<Color>,
}

impl Default for PlotAttributes {
    fn default() -> Self {
        Self {
            line: true,
            point: false,
            mark: false,
            show_status: false,
            fill_under: false,
            wrap_x: false,
            x_label: true,
            x_annotations: true,
            y_label: true,
            y_annotations: true,
            monochrome: false,
            alt_foreground_1: None,
            alt_foreground_2: None,
        }
    }
}

/// One plot-wide attribute change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotAttr {
    /// Connect samples with lines.
    Line(bool),
    /// Draw points.
    Point(bool),
    /// Draw markers.
    Mark(bool),
    /// Draw status codes.
    ShowStatus(bool),
    /// Fill under the line.
    FillUnder(bool),
    /// Wrap time at the X extent.
    WrapX(bool),
    /// Draw the X label.
    XLabel(bool),
    /// Draw X annotations.
    XAnnotations(bool),
    /// Draw Y labels.
    YLabel(bool),
    /// Draw Y annotations.
    YAnnotations(bool),
    /// Draw without color.
    Monochrome(bool),
    /// Impedance overlay color.
    AltForeground1(Color),
    /// Admittance overlay color.
    AltForeground2(Color),
}

impl PlotAttributes {
    /// Apply one attribute change.
    pub fn apply(&mut self, attr: PlotAttr) {
        match attr {
            PlotAttr::Line(on) => self.line = on,
            PlotAttr::Point(on) => self.point = on,
            PlotAttr::Mark(on) => self.mark = on,
            PlotAttr::ShowStatus(on) => self.show_status = on,
            PlotAttr::FillUnder(on) => self.fill_under = on,
            PlotAttr::WrapX(on) => self.wrap_x = on,
            PlotAttr::XLabel(on) => self.x_label = on,
            PlotAttr::XAnnotations(on) => self.x_annotations = on,
            PlotAttr::YLabel(on) => self.y_label = on,
            PlotAttr::YAnnotations(on) => self.y_annotations = on,
            PlotAttr::Monochrome(on) => self.monochrome = on,
            PlotAttr::AltForeground1(color) => self.alt_foreground_1 = Some(color),
            PlotAttr::AltForeground2(color) => self.alt_foreground_2 = Some(color),
        }
    }
}

/// The channels of one plot, drawn on an owned surface.
///
/// A plot is built once, given a geometry and channels, then drawn with
/// [`plot`](Self::plot) (grid and every sample) and kept current with
/// [`draw_samples`](Self::draw_samples) in incremental mode.
#[derive(Debug)]
pub struct PlotMaster<S: Surface> {
    surface: S,
    geometry: Option<Geometry>,
    attrs: PlotAttributes,
    x_domain: AxisDomain,
    titles: Titles,
    reference_text: String,
    x_label: String,
    window: WindowGeometry,
    slaves: Vec<PlotSlave>,
}

impl<S: Surface> PlotMaster<S> {
    /// Create a plot drawing on `surface` for the samples of `data`.
    ///
    /// The X extent starts at the time offset of the newest sample.
    pub fn new(surface: S, data: &dyn SampleSet) -> Self {
        let extent = data
            .last_index()
            .map(|last| data.time_offset(last))
            .filter(|offset| offset.is_finite())
            .unwrap_or(0.0);
        let attrs = PlotAttributes {
            monochrome: surface.is_monochrome(),
            ..PlotAttributes::default()
        };
        let window = surface.geometry();
        log::debug!("plot created on {:?} surface", surface.kind());
        Self {
            surface,
            geometry: None,
            attrs,
            x_domain: AxisDomain::new(0.0, extent, DEFAULT_INTERVALS),
            titles: Titles::default(),
            reference_text: String::new(),
            x_label: String::new(),
            window,
            slaves: Vec::new(),
        }
    }

    /// Choose the axis arrangement.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    /// Axis arrangement, once chosen.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Change one rendering attribute.
    pub fn set_attr(&mut self, attr: PlotAttr) {
        self.attrs.apply(attr);
    }

    /// Replace every rendering attribute.
    pub fn set_attributes(&mut self, attrs: PlotAttributes) {
        self.attrs = attrs;
    }

    /// Rendering attributes.
    pub fn attributes(&self) -> &PlotAttributes {
        &self.attrs
    }

    /// Set the titles; `None` leaves a title unchanged.
    pub fn set_titles(
        &mut self,
        top: Option<&str>,
        left: Option<&str>,
        bottom: Option<&str>,
        right: Option<&str>,
    ) {
        for (slot, title) in [
            (&mut self.titles.top, top),
            (&mut self.titles.left, left),
            (&mut self.titles.bottom, bottom),
            (&mut self.titles.right, right),
        ] {
            if let Some(title) = title {
                *slot = Some(title.to_string());
            }
        }
    }

    /// Titles around the plot.
    pub fn titles(&self) -> &Titles {
        &self.titles
    }

    /// Add a channel of `data` to the plot.
    ///
    /// The new slave's marker is its position and its line key the
    /// position plus one; neither changes afterwards.
    pub fn add_channel(&mut self, data: &dyn SampleSet, channel: ChannelId) -> Result<SlaveId> {
        let source = data
            .channel(channel)
            .ok_or(PlotError::UnknownChannel(channel))?;
        let kind = source.value_kind();
        if !kind.is_numeric() {
            return Err(PlotError::unsupported_channel(source.name(), kind));
        }
        let position = self.slaves.len();
        let time_label = format!("sec past {}", reference_text(data));
        let slave = PlotSlave::new(channel, position, setup_axis(source), time_label);
        log::debug!(
            "added {} as slave {position}, axis {:?}",
            source.name(),
            slave.domain()
        );
        self.slaves.push(slave);
        Ok(SlaveId(position))
    }

    /// Slaves in insertion order.
    pub fn slaves(&self) -> &[PlotSlave] {
        &self.slaves
    }

    /// Look up one slave.
    pub fn slave(&self, id: SlaveId) -> Result<&PlotSlave> {
        self.slaves.get(id.0).ok_or(PlotError::UnknownSlave(id))
    }

    fn slave_mut(&mut self, id: SlaveId) -> Result<&mut PlotSlave> {
        self.slaves.get_mut(id.0).ok_or(PlotError::UnknownSlave(id))
    }

    /// Change one attribute of a slave.
    pub fn set_slave_attr(&mut self, id: SlaveId, attr: SlaveAttr) -> Result<()> {
        self.slave_mut(id)?.apply(attr);
        Ok(())
    }

    /// Range a slave's axis to the data observed so far.
    pub fn auto_range_axis(&mut self, id: SlaveId, data: &dyn SampleSet) -> Result<()> {
        let slave = self.slave_mut(id)?;
        let channel = data
            .channel(slave.channel)
            .ok_or(PlotError::UnknownChannel(slave.channel))?;
        slave.domain = auto_range(channel, slave.domain);
        Ok(())
    }

    /// Reset a slave's axis to the channel's defaults.
    pub fn setup_axis(&mut self, id: SlaveId, data: &dyn SampleSet) -> Result<()> {
        let slave = self.slave_mut(id)?;
        let channel = data
            .channel(slave.channel)
            .ok_or(PlotError::UnknownChannel(slave.channel))?;
        let setup = setup_axis(channel);
        slave.domain = setup.domain;
        slave.annotations = setup.annotations;
        Ok(())
    }

    /// X axis domain used by time geometries.
    pub fn x_domain(&self) -> AxisDomain {
        self.x_domain
    }

    /// X axis label used by time geometries.
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Reference time text, empty when no time range is known.
    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    /// Window geometry recorded at the last plot or shutdown.
    pub fn window_geometry(&self) -> WindowGeometry {
        self.window
    }

    /// Drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Range the X axis to the time span of `data`.
    ///
    /// With fewer than two samples, or a collapsed domain, the axis falls
    /// back to `[0, 100]` labeled as elapsed seconds.
    pub fn refresh_x_domain(&mut self, data: &dyn SampleSet) {
        let span = match (data.first_index(), data.last_index()) {
            (Some(first), Some(last)) if data.sample_count() > 1 => {
                Some((data.time_offset(first), data.time_offset(last)))
            }
            _ => None,
        };
        match span {
            Some((first, last)) if self.x_domain.origin != self.x_domain.extent => {
                let (origin, extent) = auto_ends(first, last);
                self.x_domain = AxisDomain::new(origin, extent, auto_intervals(origin, extent));
                self.reference_text = reference_text(data);
                self.x_label = format!("sec past {}", self.reference_text);
            }
            _ => {
                self.x_domain = AxisDomain::default();
                self.x_label = ELAPSED_LABEL.to_string();
                self.reference_text.clear();
            }
        }
        log::debug!("x domain {:?} ({})", self.x_domain, self.x_label);
    }

    fn checked_geometry(&self) -> Result<Geometry> {
        let geometry = self.geometry.ok_or(PlotError::GeometryUndefined)?;
        let needed = geometry.min_channels();
        if self.slaves.len() < needed {
            return Err(PlotError::NotEnoughChannels {
                needed,
                have: self.slaves.len(),
            });
        }
        Ok(geometry)
    }

    /// Draw titles and grids, opening one area per plotted channel.
    pub fn draw_grid(&mut self, data: &dyn SampleSet) -> Result<()> {
        let geometry = self.checked_geometry()?;
        let mut pass = GridPass {
            geometry,
            surface: &mut self.surface,
            slaves: &mut self.slaves,
            data,
            attrs: &self.attrs,
            titles: &self.titles,
            x_domain: self.x_domain,
            x_label: &self.x_label,
            now: Local::now(),
        };
        let result = (geometry.routines().grid)(&mut pass);
        if let Err(err) = &result {
            log::warn!("{geometry} grid failed: {err}");
        }
        result
    }

    /// Draw slots `begin..=end` of `data`, wrapping at the capacity.
    ///
    /// Incremental calls continue each channel's line from where the last
    /// call stopped; batch calls start afresh.
    pub fn draw_samples(
        &mut self,
        data: &dyn SampleSet,
        begin: usize,
        end: usize,
        incremental: bool,
    ) -> Result<StreamStats> {
        let geometry = self.checked_geometry()?;
        let capacity = data.capacity();
        for index in [begin, end] {
            if index >= capacity {
                return Err(PlotError::IndexOutOfRange { index, capacity });
            }
        }
        let style = StreamStyle {
            line: self.attrs.line,
            point: self.attrs.point,
            mark: self.attrs.mark,
            show_status: self.attrs.show_status,
            wrap_extent: self.attrs.wrap_x.then_some(self.x_domain.extent),
        };
        let mut pass = SamplePass {
            surface: &mut self.surface,
            slaves: &mut self.slaves,
            data,
            style,
            begin,
            end,
            incremental,
        };
        (geometry.routines().samples)(&mut pass)
    }

    /// Draw the grid and every sample of `data` in batch mode.
    pub fn plot(&mut self, data: &dyn SampleSet) -> Result<()> {
        self.window = self.surface.geometry();
        self.draw_grid(data)?;
        if let (Some(first), Some(last)) = (data.first_index(), data.last_index()) {
            self.draw_samples(data, first, last, false)?;
        }
        Ok(())
    }

    /// Redraw from scratch after an expose or resize.
    pub fn replot(&mut self, data: &dyn SampleSet) -> Result<()> {
        self.refresh_x_domain(data);
        self.surface.erase();
        self.plot(data)
    }

    /// Clear every channel's area; the next streaming call starts afresh.
    pub fn erase_samples(&mut self) {
        for slave in &mut self.slaves {
            slave.continuity = Continuity::default();
            if let Some(area) = slave.area {
                self.surface.erase_area(area);
            }
        }
    }

    /// Show the surface and redraw on every expose until asked to quit.
    pub fn run_window_loop(&mut self, data: &dyn SampleSet) -> Result<()> {
        self.refresh_x_domain(data);
        self.surface.map()?;
        self.attrs.monochrome = self.surface.is_monochrome();
        loop {
            match self.surface.wait_event()? {
                SurfaceEvent::Redraw => self.plot(data)?,
                SurfaceEvent::Quit => break,
            }
        }
        self.window = self.surface.geometry();
        Ok(())
    }

    /// Close every area and the surface, returning the surface and its last
    /// geometry.
    pub fn shutdown(mut self) -> (S, WindowGeometry) {
        for slave in &mut self.slaves {
            if let Some(area) = slave.area.take() {
                self.surface.close_area(area);
            }
        }
        self.window = self.surface.geometry();
        self.surface.close();
        log::debug!("plot shut down at {:?}", self.window);
        (self.surface, self.window)
    }
}

fn reference_text(data: &dyn SampleSet) -> String {
    data.reference_time()
        .map(|reference| reference.format(REFERENCE_FORMAT).to_string())
        .unwrap_or_default()
}
