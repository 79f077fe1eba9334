use std::time::Duration;

use gpui::prelude::*;
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

use syncplot::gpui_backend::{GpuiPlotView, PlotHandle, PlotViewConfig};
use syncplot::{
    ChannelStore, Geometry, PlotAttr, PlotMaster, RecordingSurface, Sample, SyncStore, Theme,
    ValueKind,
};

fn build_view() -> GpuiPlotView {
    let mut store = SyncStore::new(2_000).with_reference_time(chrono::Local::now());
    let sine = store.add_channel(ChannelStore::new("probe:sine", ValueKind::Double).with_limits(-1.5, 1.5));
    let mode = store.add_channel(
        ChannelStore::new("probe:mode", ValueKind::Enum).with_states(["idle", "ramp", "hold"]),
    );
    let _ = store.push(0.0, &[Sample::value(0.0), Sample::value(0.0)]);

    let mut plot = PlotMaster::new(RecordingSurface::window(1_000.0, 700.0), &store);
    plot.set_geometry(Geometry::TimeYShared);
    plot.set_titles(Some("Probe stream"), None, None, None);
    plot.set_attr(PlotAttr::WrapX(true));
    for channel in [sine, mode] {
        if let Err(err) = plot.add_channel(&store, channel) {
            eprintln!("{err}");
        }
    }
    plot.refresh_x_domain(&store);

    let config = PlotViewConfig {
        theme: Theme {
            background: syncplot::Color::rgb8(0x10, 0x14, 0x1c),
            foreground: syncplot::Color::rgb8(0xd0, 0xd4, 0xdc),
            ..Theme::default()
        },
        ..Default::default()
    };
    GpuiPlotView::with_config(plot, store, config)
}

fn spawn_updates(
    window: &mut gpui::Window,
    cx: &mut gpui::App,
    view: gpui::Entity<GpuiPlotView>,
    handle: PlotHandle,
) {
    window
        .spawn(cx, move |cx: &mut AsyncWindowContext| {
            let mut cx = cx.clone();
            async move {
                let mut t = 0.0_f64;
                loop {
                    Timer::after(Duration::from_millis(50)).await;
                    t += 0.05;
                    let mode = ((t / 20.0) as usize % 3) as f64;
                    let row = [Sample::value(t.sin() + 0.2 * (t * 7.0).cos()), Sample::value(mode)];
                    if let Err(err) = handle.push(t, &row) {
                        eprintln!("stream stopped: {err}");
                        break;
                    }
                    let _ = cx.update(|_, cx| {
                        view.update(cx, |_view, view_cx| view_cx.notify());
                    });
                }
            }
        })
        .detach();
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(1_000.0), px(700.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let plot_view = build_view();
            let handle = plot_view.plot_handle();
            let view = cx.new(|_| plot_view);
            spawn_updates(window, cx, view.clone(), handle);
            view
        })
        .unwrap();
    });
}
