//! Stream samples into a strip chart as they arrive, wrapping the time axis.

use syncplot::{
    ChannelStore, Geometry, PlotAttr, PlotMaster, RecordingSurface, Sample, SampleSet, SyncStore,
    ValueKind,
};

fn main() -> syncplot::Result<()> {
    let mut store = SyncStore::new(256);
    let current = store.add_channel(
        ChannelStore::new("beam:current", ValueKind::Double).with_limits(0.0, 500.0),
    );
    let vacuum =
        store.add_channel(ChannelStore::new("vac:pressure", ValueKind::Double).with_limits(0.0, 10.0));

    let mut plot = PlotMaster::new(RecordingSurface::window(800.0, 500.0), &store);
    plot.set_geometry(Geometry::TimeY);
    plot.set_attr(PlotAttr::WrapX(true));
    plot.add_channel(&store, current)?;
    plot.add_channel(&store, vacuum)?;

    for i in 0..1_000 {
        let t = i as f64 * 0.1;
        let row = if i % 97 == 13 {
            // A dropped reading on the vacuum gauge.
            [Sample::value(400.0 - t * 0.2), Sample::missing()]
        } else {
            [
                Sample::value(400.0 - t * 0.2),
                Sample::value(2.0 + (t * 0.3).sin()).with_status(if i % 250 == 0 { 'A' } else { ' ' }),
            ]
        };
        let slot = store.push(t, &row)?;
        if i == 0 {
            plot.refresh_x_domain(&store);
            plot.plot(&store)?;
            continue;
        }
        let stats = plot.draw_samples(&store, slot, slot, true)?;
        if stats.anchors > 0 {
            println!("slot {slot}: line restarted at t={t:.1}");
        }
    }

    println!(
        "{} samples held, {} surface calls recorded",
        store.sample_count(),
        plot.surface().commands().len()
    );
    Ok(())
}
