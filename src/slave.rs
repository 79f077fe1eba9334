//! Per-channel plot state.

use crate::axis::{AxisDomain, AxisSetup};
use crate::datasource::ChannelId;
use crate::geom::{FracRect, Point};
use crate::style::Color;
use crate::surface::AreaId;

/// Identifier of a slave within its plot, equal to its insertion position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlaveId(pub usize);

/// Where the line of a channel left off.
///
/// The streamer takes a record in and hands the updated record back, so the
/// line continues seamlessly across incremental calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuity {
    /// No point has been drawn yet; the next sample is an anchor.
    pub first: bool,
    /// A missing sample was seen; the next sample is an anchor.
    pub skip: bool,
    /// Last point drawn, in world coordinates.
    pub last: Point,
}

impl Default for Continuity {
    fn default() -> Self {
        Self {
            first: true,
            skip: false,
            last: Point::default(),
        }
    }
}

/// Per-slave attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlaveAttr {
    /// Designate (or undesignate) the channel supplying X values.
    XChannel(bool),
    /// Foreground color override.
    Foreground(Color),
    /// Background color override.
    Background(Color),
}

/// One plotted channel.
#[derive(Debug, Clone)]
pub struct PlotSlave {
    pub(crate) channel: ChannelId,
    pub(crate) x_channel: bool,
    pub(crate) domain: AxisDomain,
    pub(crate) annotations: Option<Vec<String>>,
    pub(crate) area: Option<AreaId>,
    pub(crate) mark: usize,
    pub(crate) line_key: usize,
    pub(crate) foreground: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) bounds: FracRect,
    pub(crate) continuity: Continuity,
    pub(crate) time_label: String,
}

impl PlotSlave {
    /// Create the slave at `position` in its plot.
    pub(crate) fn new(
        channel: ChannelId,
        position: usize,
        setup: AxisSetup,
        time_label: String,
    ) -> Self {
        Self {
            channel,
            x_channel: false,
            domain: setup.domain,
            annotations: setup.annotations,
            area: None,
            mark: position,
            line_key: position + 1,
            foreground: None,
            background: None,
            bounds: FracRect::default(),
            continuity: Continuity::default(),
            time_label,
        }
    }

    /// Channel plotted by this slave.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Whether this slave supplies X values.
    pub fn is_x_channel(&self) -> bool {
        self.x_channel
    }

    /// Axis domain.
    pub fn domain(&self) -> AxisDomain {
        self.domain
    }

    /// Replace the axis domain.
    pub fn set_domain(&mut self, domain: AxisDomain) {
        self.domain = domain;
    }

    /// Labels of the Y ticks, for enumerated channels.
    pub fn annotations(&self) -> Option<&[String]> {
        self.annotations.as_deref()
    }

    /// Area drawn by the last grid phase.
    pub fn area(&self) -> Option<AreaId> {
        self.area
    }

    /// Marker glyph number.
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Line and color key.
    pub fn line_key(&self) -> usize {
        self.line_key
    }

    /// Foreground override.
    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// Background override.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Surface rectangle of the drawn grid.
    pub fn bounds(&self) -> FracRect {
        self.bounds
    }

    /// Continuity left by the last streaming call.
    pub fn continuity(&self) -> Continuity {
        self.continuity
    }

    /// Label of the time axis, `"sec past <reference>"`.
    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub(crate) fn apply(&mut self, attr: SlaveAttr) {
        match attr {
            SlaveAttr::XChannel(flag) => self.x_channel = flag,
            SlaveAttr::Foreground(color) => self.foreground = Some(color),
            SlaveAttr::Background(color) => self.background = Some(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slave(position: usize) -> PlotSlave {
        let setup = AxisSetup {
            domain: AxisDomain::new(0.0, 1.0, 5),
            annotations: None,
        };
        PlotSlave::new(ChannelId(7), position, setup, "sec past now".to_string())
    }

    #[test]
    fn keys_follow_position() {
        let slave = slave(2);
        assert_eq!(slave.mark(), 2);
        assert_eq!(slave.line_key(), 3);
        assert!(slave.continuity().first);
        assert_eq!(slave.area(), None);
    }

    #[test]
    fn attributes_apply() {
        let mut slave = slave(0);
        slave.apply(SlaveAttr::XChannel(true));
        slave.apply(SlaveAttr::Foreground(Color::WHITE));
        assert!(slave.is_x_channel());
        assert_eq!(slave.foreground(), Some(Color::WHITE));
        assert_eq!(slave.background(), None);
    }
}
