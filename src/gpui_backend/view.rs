use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{MouseButton, MouseDownEvent, Window, canvas, div};

use crate::datasource::{Sample, SampleSet, SyncStore};
use crate::error::Result;
use crate::geom::ScreenPoint;
use crate::geometry::Geometry;
use crate::plot::PlotMaster;
use crate::render::{RecordingSurface, RenderList, render_recording_with};
use crate::stream::StreamStats;

use super::config::PlotViewConfig;
use super::paint::{paint_list, to_hsla};

/// A GPUI view that paints a [`PlotMaster`] and the samples it plots.
///
/// The plot draws on a [`RecordingSurface`]; every frame the recording is
/// replayed at the current canvas size. A size change replots from scratch.
#[derive(Clone)]
pub struct GpuiPlotView {
    plot: Arc<RwLock<PlotMaster<RecordingSurface>>>,
    data: Arc<RwLock<SyncStore>>,
    size: Arc<RwLock<Option<(f32, f32)>>>,
    config: PlotViewConfig,
}

impl GpuiPlotView {
    /// Create a new GPUI view for a configured plot and its sample store.
    ///
    /// Uses the default [`PlotViewConfig`].
    pub fn new(plot: PlotMaster<RecordingSurface>, data: SyncStore) -> Self {
        Self::with_config(plot, data, PlotViewConfig::default())
    }

    /// Create a new GPUI view with a custom configuration.
    pub fn with_config(
        plot: PlotMaster<RecordingSurface>,
        data: SyncStore,
        config: PlotViewConfig,
    ) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            data: Arc::new(RwLock::new(data)),
            size: Arc::new(RwLock::new(None)),
            config,
        }
    }

    /// Get a handle for streaming samples into the plot.
    ///
    /// This is useful for streaming updates from async tasks.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
            data: Arc::clone(&self.data),
        }
    }

    /// Replot if the canvas size changed, then replay the recording.
    fn prepare(&self, width: f32, height: f32) -> RenderList {
        let width = width.max(self.config.min_size_px);
        let height = height.max(self.config.min_size_px);
        let data = self.data.read().expect("data lock");
        let mut plot = self.plot.write().expect("plot lock");
        let mut last = self.size.write().expect("size lock");
        if *last != Some((width, height)) {
            *last = Some((width, height));
            plot.surface_mut().set_size(width as f64, height as f64);
            if let Err(err) = plot.replot(&*data) {
                log::warn!("replot at {width}x{height} failed: {err}");
            }
        }
        render_recording_with(
            plot.surface(),
            (width, height),
            &self.config.theme,
            &self.config.formatter,
        )
    }

    fn on_mouse_down(&mut self, _ev: &MouseDownEvent, window: &mut Window) {
        if self.config.close_on_right_click {
            log::debug!("right click, closing plot window");
            window.remove_window();
        }
    }
}

impl Render for GpuiPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let view = self.clone();
        let background = to_hsla(self.config.theme.background);

        div()
            .size_full()
            .bg(background)
            .child(
                canvas(
                    move |bounds, _, _| {
                        let origin = ScreenPoint::new(
                            f32::from(bounds.origin.x),
                            f32::from(bounds.origin.y),
                        );
                        let list = view.prepare(
                            f32::from(bounds.size.width),
                            f32::from(bounds.size.height),
                        );
                        (origin, list)
                    },
                    move |_, (origin, list), window, cx| {
                        paint_list(&list, origin, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, _| {
                    this.on_mouse_down(ev, window);
                }),
            )
    }
}

/// A handle for streaming into a plot held inside a `GpuiPlotView`.
///
/// The handle clones cheaply and can be moved into async tasks. Callers
/// notify the view after appending so the new samples are painted.
///
/// Every path locks the sample store before the plot.
#[derive(Clone)]
pub struct PlotHandle {
    plot: Arc<RwLock<PlotMaster<RecordingSurface>>>,
    data: Arc<RwLock<SyncStore>>,
}

impl PlotHandle {
    /// Append one row of samples and draw it in incremental mode.
    ///
    /// A time plot without X wrapping replots instead once the row lands
    /// past the X extent.
    pub fn push(&self, offset: f64, row: &[Sample]) -> Result<StreamStats> {
        let mut data = self.data.write().expect("data lock");
        let slot = data.push(offset, row)?;
        let mut plot = self.plot.write().expect("plot lock");
        if plot.slaves().iter().all(|slave| slave.area().is_none()) {
            // Nothing drawn yet; the first frame plots everything.
            return Ok(StreamStats::default());
        }
        let time_plot = plot.geometry().is_some_and(Geometry::is_time);
        if time_plot && !plot.attributes().wrap_x && offset > plot.x_domain().extent {
            plot.replot(&*data)?;
            return Ok(StreamStats::default());
        }
        plot.draw_samples(&*data, slot, slot, true)
    }

    /// Redraw the grid and every stored sample.
    pub fn replot(&self) -> Result<()> {
        let data = self.data.read().expect("data lock");
        self.plot.write().expect("plot lock").replot(&*data)
    }

    /// Read the plot and its samples.
    ///
    /// Both are locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&PlotMaster<RecordingSurface>, &dyn SampleSet) -> R) -> R {
        let data = self.data.read().expect("data lock");
        let plot = self.plot.read().expect("plot lock");
        f(&plot, &*data)
    }

    /// Mutate the plot and its samples.
    ///
    /// Both are locked for the duration of the callback.
    pub fn write<R>(
        &self,
        f: impl FnOnce(&mut PlotMaster<RecordingSurface>, &mut SyncStore) -> R,
    ) -> R {
        let mut data = self.data.write().expect("data lock");
        let mut plot = self.plot.write().expect("plot lock");
        f(&mut plot, &mut data)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::datasource::{ChannelId, ChannelStore, ValueKind};

    fn view() -> GpuiPlotView {
        let mut data = SyncStore::new(64);
        data.add_channel(ChannelStore::new("volts", ValueKind::Double).with_limits(0.0, 10.0));
        let mut plot = PlotMaster::new(RecordingSurface::window(320.0, 240.0), &data);
        plot.set_geometry(Geometry::TimeY);
        plot.add_channel(&data, ChannelId(0)).expect("volts");
        GpuiPlotView::new(plot, data)
    }

    #[test]
    fn frames_and_pushes_interleave() {
        let view = view();
        let handle = view.plot_handle();
        let writer = thread::spawn(move || {
            for step in 0..200 {
                let value = step as f64 * 0.05;
                handle.push(value, &[Sample::value(value)]).expect("push");
            }
        });
        for frame in 0..200 {
            let width = 300.0 + (frame % 3) as f32;
            let _ = view.prepare(width, 200.0);
        }
        writer.join().expect("writer");
        let count = view.plot_handle().read(|_, data| data.sample_count());
        assert_eq!(count, 64);
    }

    #[test]
    fn prepare_replots_only_on_resize() {
        let view = view();
        let first = view.prepare(320.0, 240.0);
        let again = view.prepare(320.0, 240.0);
        assert_eq!(first.commands().len(), again.commands().len());
        assert_eq!(*view.size.read().expect("size lock"), Some((320.0, 240.0)));
        view.prepare(8.0, 8.0);
        assert_eq!(*view.size.read().expect("size lock"), Some((16.0, 16.0)));
    }
}
