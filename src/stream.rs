//! Incremental sample streaming.
//!
//! The streamer walks an inclusive, possibly wrapping slot range of the
//! circular sample buffer and draws each sample of one channel either as an
//! anchor (a point with no line into it) or as a continuation of the last
//! point drawn. Where the line left off is carried in a [`Continuity`]
//! record, handed in and returned, so an incremental call continues exactly
//! where the previous call stopped.
//!
//! Per sample, in order:
//! - missing: remember the gap, draw nothing;
//! - first sample, after a gap, or flagged restart: anchor;
//! - already drawn by an earlier call (`filled`): nothing, keep walking;
//! - otherwise: continuation.
//!
//! Array channels draw their whole element vector as a polyline at every
//! anchor or continuation sample, independently of the continuity point.

use crate::datasource::{ChannelSource, SampleSet, ring_indices};
use crate::geom::Point;
use crate::slave::Continuity;
use crate::surface::{AreaId, Surface};

/// Rendering switches used while streaming.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamStyle {
    /// Connect consecutive samples with lines.
    pub line: bool,
    /// Draw a point at each sample.
    pub point: bool,
    /// Draw the channel's marker glyph at each sample.
    pub mark: bool,
    /// Draw non-blank status codes instead of points.
    pub show_status: bool,
    /// Fold time offsets beyond this extent back into the axis.
    pub wrap_extent: Option<f64>,
}

/// Source of the X value of each sample.
#[derive(Clone, Copy)]
pub enum XSource<'a> {
    /// Seconds past the reference time.
    Time,
    /// Buffer slot number.
    Index,
    /// Value of another channel at the same slot.
    Channel(&'a dyn ChannelSource),
}

impl std::fmt::Debug for XSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "XSource::Time"),
            Self::Index => write!(f, "XSource::Index"),
            Self::Channel(channel) => write!(f, "XSource::Channel({})", channel.name()),
        }
    }
}

/// What one streaming call drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStats {
    /// Samples drawn as anchors.
    pub anchors: usize,
    /// Samples drawn as continuations.
    pub continuations: usize,
    /// Line segments drawn, including array polylines.
    pub segments: usize,
    /// Samples skipped as missing.
    pub missing: usize,
    /// Samples skipped as already drawn.
    pub filled: usize,
}

impl StreamStats {
    /// Add the counts of another call.
    pub fn merge(&mut self, other: StreamStats) {
        self.anchors += other.anchors;
        self.continuations += other.continuations;
        self.segments += other.segments;
        self.missing += other.missing;
        self.filled += other.filled;
    }
}

/// One streaming call over a slot range.
#[derive(Clone, Copy)]
pub struct SampleStream<'a> {
    /// Sample set holding the slots.
    pub data: &'a dyn SampleSet,
    /// Rendering switches.
    pub style: StreamStyle,
    /// First slot to draw.
    pub begin: usize,
    /// Last slot to draw, inclusive.
    pub end: usize,
    /// Continue from the given continuity instead of starting afresh.
    pub incremental: bool,
}

/// Channel being streamed and where it is drawn.
#[derive(Clone, Copy)]
pub struct StreamTarget<'a> {
    /// Area to draw into.
    pub area: AreaId,
    /// Channel supplying Y values.
    pub channel: &'a dyn ChannelSource,
    /// Source of X values.
    pub x: XSource<'a>,
    /// Marker glyph number.
    pub mark: usize,
}

impl SampleStream<'_> {
    /// Stream one channel and return its updated continuity.
    ///
    /// Channels that never delivered data (or whose X channel never did)
    /// draw nothing and keep their continuity.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        target: &StreamTarget<'_>,
        continuity: Continuity,
    ) -> (Continuity, StreamStats) {
        let mut stats = StreamStats::default();
        let x_channel = match target.x {
            XSource::Channel(channel) => Some(channel),
            _ => None,
        };
        if !target.channel.has_data() || x_channel.is_some_and(|channel| !channel.has_data()) {
            log::debug!("channel {} has no data, not drawn", target.channel.name());
            return (continuity, stats);
        }

        let mut state = if self.incremental {
            continuity
        } else {
            Continuity::default()
        };
        let elements = match x_channel {
            Some(channel) => channel.element_count().min(target.channel.element_count()),
            None => target.channel.element_count(),
        };
        let stair = target.channel.value_kind().is_enum() && x_channel.is_none();

        for index in ring_indices(self.begin, self.end, self.data.capacity()) {
            let flags = target.channel.flags(index);
            let (missing, restart) = match x_channel {
                Some(channel) => {
                    let x_flags = channel.flags(index);
                    (
                        flags.missing || x_flags.missing,
                        flags.restart || x_flags.restart,
                    )
                }
                None => (flags.missing, flags.restart),
            };

            if missing {
                state.skip = true;
                stats.missing += 1;
            } else if state.first || state.skip || restart {
                if elements > 1 {
                    stats.segments += self.array(surface, target, index, elements);
                } else {
                    let at = self.sample_point(target, index);
                    self.glyphs(surface, target, index, at);
                    state.last = at;
                }
                state.skip = false;
                stats.anchors += 1;
            } else if flags.filled {
                stats.filled += 1;
            } else {
                if elements > 1 {
                    stats.segments += self.array(surface, target, index, elements);
                } else {
                    let at = self.sample_point(target, index);
                    if self.style.line {
                        if stair {
                            let hold = Point::new(at.x, state.last.y);
                            surface.line(target.area, state.last, hold);
                            state.last = hold;
                            stats.segments += 1;
                        }
                        surface.line(target.area, state.last, at);
                        stats.segments += 1;
                    }
                    self.glyphs(surface, target, index, at);
                    state.last = at;
                }
                stats.continuations += 1;
            }
            state.first = false;
        }

        log::trace!(
            "streamed {} [{}..={}]: {stats:?}",
            target.channel.name(),
            self.begin,
            self.end
        );
        (state, stats)
    }

    fn sample_point(&self, target: &StreamTarget<'_>, index: usize) -> Point {
        let x = match target.x {
            XSource::Time => {
                let offset = self.data.time_offset(index);
                match self.style.wrap_extent {
                    Some(extent) => wrap(offset, extent),
                    None => offset,
                }
            }
            XSource::Index => index as f64,
            XSource::Channel(channel) => channel.value(index),
        };
        Point::new(x, target.channel.value(index))
    }

    fn glyphs<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        target: &StreamTarget<'_>,
        index: usize,
        at: Point,
    ) {
        if self.style.mark {
            surface.mark(target.area, at, target.mark);
        }
        let code = target.channel.status_code(index);
        if self.style.show_status && code != ' ' {
            surface.glyph(target.area, at, code);
        } else if self.style.point {
            surface.point(target.area, at);
        }
    }

    /// Draw the element vector of slot `index` as a polyline.
    fn array<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        target: &StreamTarget<'_>,
        index: usize,
        elements: usize,
    ) -> usize {
        let element_point = |element: usize| {
            let x = match target.x {
                XSource::Channel(channel) => channel.element(index, element),
                XSource::Time | XSource::Index => element as f64,
            };
            Point::new(x, target.channel.element(index, element))
        };
        let mut previous = element_point(0);
        for element in 1..elements {
            let next = element_point(element);
            surface.line(target.area, previous, next);
            previous = next;
        }
        elements.saturating_sub(1)
    }
}

/// Fold `x` into `(.., extent]` by whole multiples of `extent`.
pub fn wrap(x: f64, extent: f64) -> f64 {
    if !(extent > 0.0) || !(x > extent) || !x.is_finite() {
        return x;
    }
    x - extent * ((x / extent).ceil() - 1.0)
}
