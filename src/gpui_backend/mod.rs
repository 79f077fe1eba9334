//! GPUI integration for syncplot.
//!
//! This module provides a GPUI view that owns a [`PlotMaster`](crate::plot::PlotMaster)
//! drawing on a [`RecordingSurface`](crate::render::RecordingSurface) and
//! paints the recording every frame. Resizing the view replots; a right
//! click closes the window.

mod config;
mod paint;
mod view;

pub use config::PlotViewConfig;
pub use view::{GpuiPlotView, PlotHandle};
