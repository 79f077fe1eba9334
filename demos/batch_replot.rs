//! Plot a finished acquisition in every geometry, replaying each recording
//! as it would be painted.

use syncplot::{
    ChannelStore, Geometry, PlotAttr, PlotMaster, RecordingSurface, RenderCommand, Sample,
    SlaveAttr, SlaveId, SurfaceEvent, SyncStore, Theme, ValueKind, render_recording,
};

fn acquisition() -> SyncStore {
    let mut store = SyncStore::new(400).with_reference_time(chrono::Local::now());
    store.add_channel(ChannelStore::new("gap:real", ValueKind::Float).with_limits(-1.0, 1.0));
    store.add_channel(ChannelStore::new("gap:imag", ValueKind::Float).with_limits(-1.0, 1.0));
    store.add_channel(
        ChannelStore::new("rf:state", ValueKind::Enum).with_states(["off", "standby", "on"]),
    );
    for i in 0..400 {
        let t = i as f64 * 0.05;
        let radius = 0.8 * (-t / 30.0).exp();
        let state = ((i / 90) % 3) as f64;
        let row = [
            Sample::value(radius * t.cos()),
            Sample::value(radius * t.sin()),
            Sample::value(state),
        ];
        if let Err(err) = store.push(t, &row) {
            eprintln!("row {i} rejected: {err}");
        }
    }
    store
}

fn main() {
    let store = acquisition();
    for geometry in Geometry::ALL {
        let surface = RecordingSurface::window(900.0, 700.0)
            .with_events([SurfaceEvent::Redraw, SurfaceEvent::Quit]);
        let mut plot = PlotMaster::new(surface, &store);
        plot.set_geometry(geometry);
        plot.set_titles(Some(&geometry.to_string()), None, Some("gap monitor"), None);
        plot.set_attr(PlotAttr::Mark(true));
        for id in 0..store.channel_count() {
            if let Err(err) = plot.add_channel(&store, syncplot::ChannelId(id)) {
                eprintln!("{geometry}: {err}");
            }
        }
        if geometry.uses_x_channel() {
            let _ = plot.set_slave_attr(SlaveId(0), SlaveAttr::XChannel(true));
        }
        if let Err(err) = plot.run_window_loop(&store) {
            eprintln!("{geometry}: {err}");
            continue;
        }

        let list = render_recording(plot.surface(), (900.0, 700.0), &Theme::default());
        let segments: usize = list
            .commands()
            .iter()
            .map(|command| match command {
                RenderCommand::LineSegments { segments, .. } => segments.len(),
                _ => 0,
            })
            .sum();
        println!(
            "{geometry:<20} {:>6} calls {:>7} segments",
            plot.surface().commands().len(),
            segments
        );
    }
}
