//! syncplot draws synchronous instrument-channel samples as strip charts,
//! X/Y plots, index plots, and Smith charts.
//!
//! A [`PlotMaster`] owns a drawing [`Surface`] and one [`PlotSlave`] per
//! plotted channel. Channel data lives behind the [`SampleSet`] and
//! [`ChannelSource`] traits; [`SyncStore`] is a ring-buffered
//! implementation. Streaming new samples is incremental: each slave keeps
//! its pen position between calls so a caller can draw slot ranges as they
//! arrive.
//!
//! ```
//! use syncplot::{ChannelStore, Geometry, PlotMaster, RecordingSurface, Sample, SyncStore, ValueKind};
//!
//! let mut store = SyncStore::new(16);
//! let volts = store.add_channel(ChannelStore::new("volts", ValueKind::Double).with_limits(0.0, 10.0));
//! store.push(0.0, &[Sample::value(1.0)]).unwrap();
//! store.push(1.0, &[Sample::value(2.0)]).unwrap();
//!
//! let mut plot = PlotMaster::new(RecordingSurface::window(640.0, 480.0), &store);
//! plot.set_geometry(Geometry::TimeY);
//! plot.add_channel(&store, volts).unwrap();
//! plot.plot(&store).unwrap();
//! assert_eq!(plot.surface().lines().len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod axis;
pub mod datasource;
pub mod error;
pub mod geom;
pub mod geometry;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod layout;
pub mod plot;
pub mod render;
pub mod slave;
pub mod stream;
pub mod style;
pub mod surface;
mod transform;
pub mod view;

pub use axis::{AxisDomain, AxisFormatter, AxisSetup};
pub use datasource::{
    AppendError, ChannelId, ChannelSource, ChannelStore, Sample, SampleFlags, SampleSet, SyncStore,
    ValueKind,
};
pub use error::{PlotError, Result, SurfaceError};
pub use geom::{FracRect, Point, ScreenPoint, ScreenRect};
pub use geometry::Geometry;
pub use layout::Titles;
pub use plot::{PlotAttr, PlotAttributes, PlotMaster};
pub use render::{
    DrawCommand, LineSegment, LineStyle, MarkerShape, MarkerStyle, RecordingSurface, RectStyle,
    RenderCommand, RenderList, TextStyle, render_recording, render_recording_with,
};
pub use slave::{Continuity, PlotSlave, SlaveAttr, SlaveId};
pub use stream::{StreamStats, StreamStyle};
pub use style::{Color, Theme};
pub use surface::{AreaAttr, AreaId, AreaSpec, Surface, SurfaceEvent, SurfaceKind, WindowGeometry};
pub use view::{Range, Viewport};
