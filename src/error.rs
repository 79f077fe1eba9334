//! Error types for syncplot.
//!
//! Configuration mistakes and surface failures are reported through
//! [`PlotError`]. Data anomalies (missing samples, restarts, already-drawn
//! samples) are never errors; the streamer handles them in-line.

use thiserror::Error;

use crate::datasource::{AppendError, ChannelId, ValueKind};
use crate::slave::SlaveId;

/// Result type alias for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised by a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The surface could not allocate another drawing area.
    #[error("no drawing area available")]
    AreaUnavailable,

    /// The surface was closed while still in use.
    #[error("surface is closed")]
    Closed,

    /// The interactive event loop failed.
    #[error("event loop failed: {0}")]
    Loop(String),
}

/// Errors that can occur while configuring or drawing a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Channel values cannot be drawn as numbers.
    #[error("channel {name} has non-numeric values ({kind:?})")]
    UnsupportedChannel { name: String, kind: ValueKind },

    /// Channel id not present in the sample set.
    #[error("unknown channel {0:?}")]
    UnknownChannel(ChannelId),

    /// Slave id not registered with the plot.
    #[error("unknown slave {0:?}")]
    UnknownSlave(SlaveId),

    /// Drawing was requested before a geometry was chosen.
    #[error("plot geometry has not been set")]
    GeometryUndefined,

    /// The geometry needs more channels than the plot has.
    #[error("geometry needs at least {needed} channels, plot has {have}")]
    NotEnoughChannels { needed: usize, have: usize },

    /// Sample index is beyond the sample set capacity.
    #[error("sample index {index} out of range (capacity {capacity})")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// Sample row rejected by the store.
    #[error("append rejected: {0}")]
    Append(#[from] AppendError),

    /// Drawing surface failure.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

impl PlotError {
    /// Create an UnsupportedChannel error.
    pub fn unsupported_channel(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::UnsupportedChannel {
            name: name.into(),
            kind,
        }
    }

    /// Check whether the error is a resource exhaustion the caller may retry.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::Surface(SurfaceError::AreaUnavailable))
    }
}
