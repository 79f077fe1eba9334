use syncplot::{
    ChannelId, ChannelStore, DrawCommand, Geometry, PlotAttr, PlotError, PlotMaster,
    RecordingSurface, RenderCommand, Sample, SampleSet, SlaveAttr, SlaveId, SurfaceEvent,
    SyncStore, Theme, ValueKind, render_recording,
};

fn store(capacity: usize, rows: usize) -> SyncStore {
    let mut store = SyncStore::new(capacity);
    store.add_channel(ChannelStore::new("volts", ValueKind::Double).with_limits(0.0, 100.0));
    store.add_channel(ChannelStore::new("amps", ValueKind::Double).with_limits(-5.0, 5.0));
    for step in 0..rows {
        let value = step as f64;
        store
            .push(value, &[Sample::value(value * 10.0), Sample::value(value - 2.0)])
            .expect("row");
    }
    store
}

fn master(store: &SyncStore, geometry: Geometry) -> PlotMaster<RecordingSurface> {
    let mut master = PlotMaster::new(RecordingSurface::window(800.0, 600.0), store);
    master.set_geometry(geometry);
    master.add_channel(store, ChannelId(0)).expect("volts");
    master.add_channel(store, ChannelId(1)).expect("amps");
    master
}

#[test]
fn single_sample_anchors_every_channel() {
    let store = store(8, 1);
    let mut master = master(&store, Geometry::TimeYShared);
    master.draw_grid(&store).expect("grid");
    let stats = master.draw_samples(&store, 0, 0, false).expect("samples");
    assert_eq!(stats.anchors, 2);
    assert_eq!(stats.segments, 0);
    assert!(master.surface().lines().is_empty());
    assert!(master.slaves().iter().all(|slave| slave.area().is_some()));
}

#[test]
fn streaming_row_by_row_matches_batch_plot() {
    let store = store(16, 6);

    let mut batch = master(&store, Geometry::TimeY);
    batch.plot(&store).expect("batch");

    let mut streamed = master(&store, Geometry::TimeY);
    streamed.draw_grid(&store).expect("grid");
    for slot in 0..6 {
        streamed
            .draw_samples(&store, slot, slot, true)
            .expect("slot");
    }

    assert_eq!(batch.surface().lines().len(), 10);
    assert_eq!(batch.surface().lines(), streamed.surface().lines());
}

#[test]
fn missing_sample_breaks_the_line() {
    let mut store = store(8, 2);
    store
        .push(2.0, &[Sample::missing(), Sample::value(0.0)])
        .expect("row");
    for step in 3..5 {
        let value = step as f64;
        store
            .push(value, &[Sample::value(value * 10.0), Sample::value(value - 2.0)])
            .expect("row");
    }
    let mut master = master(&store, Geometry::TimeY);
    master.draw_grid(&store).expect("grid");
    let stats = master.draw_samples(&store, 0, 4, false).expect("samples");
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.anchors, 3);
    assert_eq!(stats.segments, 6);
}

#[test]
fn wrapped_ring_is_drawn_oldest_first() {
    let store = store(4, 6);
    assert_eq!(store.first_index(), Some(2));
    assert_eq!(store.last_index(), Some(1));
    let mut master = master(&store, Geometry::TimeYShared);
    master.plot(&store).expect("plot");
    let lines = master.surface().lines();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].1.x, 2.0);
    assert_eq!(lines[2].2.x, 5.0);
}

#[test]
fn xy_plot_pairs_with_the_flagged_channel() {
    let store = store(8, 4);
    let mut master = master(&store, Geometry::Xy);
    master
        .set_slave_attr(SlaveId(1), SlaveAttr::XChannel(true))
        .expect("slave");
    master.draw_grid(&store).expect("grid");
    let stats = master.draw_samples(&store, 0, 3, false).expect("samples");
    assert_eq!(stats.segments, 3);
    let lines = master.surface().lines();
    assert_eq!((lines[0].1.x, lines[0].1.y), (-2.0, 0.0));
    assert_eq!((lines[2].2.x, lines[2].2.y), (1.0, 30.0));
}

#[test]
fn geometry_errors_are_reported() {
    let store = store(8, 2);
    let mut master = PlotMaster::new(RecordingSurface::window(800.0, 600.0), &store);
    master.add_channel(&store, ChannelId(0)).expect("volts");
    assert!(matches!(
        master.draw_grid(&store),
        Err(PlotError::GeometryUndefined)
    ));
    master.set_geometry(Geometry::SmithImpedance);
    assert!(matches!(
        master.plot(&store),
        Err(PlotError::NotEnoughChannels { needed: 2, have: 1 })
    ));
    master.set_geometry(Geometry::TimeY);
    assert!(matches!(
        master.draw_samples(&store, 0, 8, false),
        Err(PlotError::IndexOutOfRange { index: 8, capacity: 8 })
    ));
}

#[test]
fn smith_chart_overlays_arcs_and_streams_points() {
    let mut store = SyncStore::new(8);
    store.add_channel(ChannelStore::new("real", ValueKind::Float).with_limits(-1.0, 1.0));
    store.add_channel(ChannelStore::new("imag", ValueKind::Float).with_limits(-1.0, 1.0));
    for step in 0..5 {
        let angle = step as f64 * 0.5;
        store
            .push(step as f64, &[
                Sample::value(0.5 * angle.cos()),
                Sample::value(0.5 * angle.sin()),
            ])
            .expect("row");
    }
    let mut master = master(&store, Geometry::SmithImmittance);
    master.set_attr(PlotAttr::Point(true));
    master.plot(&store).expect("plot");

    let arcs = master
        .surface()
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::Arc { .. }))
        .count();
    assert!(arcs > 0);
    assert_eq!(master.surface().points().len(), 5);
    assert!(master.surface().lines().len() >= 4);
}

#[test]
fn erased_plot_restarts_streaming() {
    let store = store(8, 3);
    let mut master = master(&store, Geometry::TimeY);
    master.plot(&store).expect("plot");
    master.erase_samples();
    assert!(master.slaves().iter().all(|slave| slave.continuity().first));
    let stats = master.draw_samples(&store, 2, 2, true).expect("samples");
    assert_eq!(stats.anchors, 2);
    assert_eq!(stats.continuations, 0);
}

#[test]
fn window_loop_plots_on_redraw_until_quit() {
    let store = store(8, 3);
    let surface =
        RecordingSurface::window(640.0, 480.0).with_events([SurfaceEvent::Redraw, SurfaceEvent::Quit]);
    let mut master = PlotMaster::new(surface, &store);
    master.set_geometry(Geometry::IndexYShared);
    master.add_channel(&store, ChannelId(0)).expect("volts");
    master.run_window_loop(&store).expect("loop");
    assert!(master.surface().is_mapped());
    assert_eq!(master.surface().lines().len(), 2);

    let (surface, geometry) = master.shutdown();
    assert!(surface.is_closed());
    assert_eq!(geometry.width, 640.0);
}

#[test]
fn recording_replays_into_screen_commands() {
    let store = store(8, 4);
    let mut master = master(&store, Geometry::TimeYShared);
    master.set_titles(Some("Bench supply"), None, None, None);
    master.plot(&store).expect("plot");

    let list = render_recording(master.surface(), (800.0, 600.0), &Theme::default());
    let segments: usize = list
        .commands()
        .iter()
        .map(|command| match command {
            RenderCommand::LineSegments { segments, .. } => segments.len(),
            _ => 0,
        })
        .sum();
    assert!(segments >= 6);
    assert!(list.commands().iter().any(|command| matches!(
        command,
        RenderCommand::Text { text, .. } if text == "Bench supply"
    )));
}
