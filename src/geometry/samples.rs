//! Sample routines: stream each plotted channel into its area.

use crate::error::{PlotError, Result};
use crate::geometry::grid::y_slaves;
use crate::geometry::{SamplePass, x_channel_index};
use crate::stream::{SampleStream, StreamStats, StreamStyle, StreamTarget, XSource};
use crate::surface::Surface;

fn stream_slave<S: Surface + ?Sized>(
    pass: &mut SamplePass<'_, S>,
    index: usize,
    x: XSource<'_>,
    style: StreamStyle,
) -> Result<StreamStats> {
    let data = pass.data;
    let slave = &mut pass.slaves[index];
    let channel = data
        .channel(slave.channel)
        .ok_or(PlotError::UnknownChannel(slave.channel))?;
    let Some(area) = slave.area else {
        log::warn!("{} has no drawing area, grid not drawn yet", channel.name());
        return Ok(StreamStats::default());
    };
    let stream = SampleStream {
        data,
        style,
        begin: pass.begin,
        end: pass.end,
        incremental: pass.incremental,
    };
    let target = StreamTarget {
        area,
        channel,
        x,
        mark: slave.mark,
    };
    let (continuity, stats) = stream.draw(&mut *pass.surface, &target, slave.continuity);
    slave.continuity = continuity;
    Ok(stats)
}

/// Time offset against value, wrapping X when asked to.
pub(super) fn time<S: Surface + ?Sized>(pass: &mut SamplePass<'_, S>) -> Result<StreamStats> {
    let style = pass.style;
    let mut total = StreamStats::default();
    for index in 0..pass.slaves.len() {
        total.merge(stream_slave(pass, index, XSource::Time, style)?);
    }
    Ok(total)
}

/// Slot number (or element number for arrays) against value.
pub(super) fn index<S: Surface + ?Sized>(pass: &mut SamplePass<'_, S>) -> Result<StreamStats> {
    let style = StreamStyle {
        wrap_extent: None,
        ..pass.style
    };
    let mut total = StreamStats::default();
    for index in 0..pass.slaves.len() {
        total.merge(stream_slave(pass, index, XSource::Index, style)?);
    }
    Ok(total)
}

/// X channel value against each other channel's value.
pub(super) fn xy<S: Surface + ?Sized>(pass: &mut SamplePass<'_, S>) -> Result<StreamStats> {
    let style = StreamStyle {
        wrap_extent: None,
        ..pass.style
    };
    let data = pass.data;
    let x_index = x_channel_index(pass.slaves);
    let Some(x_slave) = pass.slaves.get(x_index) else {
        return Ok(StreamStats::default());
    };
    let x_channel = data
        .channel(x_slave.channel)
        .ok_or(PlotError::UnknownChannel(x_slave.channel))?;
    let mut total = StreamStats::default();
    for index in y_slaves(pass.slaves.len(), Some(x_index)) {
        total.merge(stream_slave(pass, index, XSource::Channel(x_channel), style)?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisDomain, AxisSetup};
    use crate::datasource::{ChannelId, ChannelStore, Sample, SyncStore, ValueKind};
    use crate::geom::{FracRect, Point};
    use crate::render::RecordingSurface;
    use crate::slave::{Continuity, PlotSlave, SlaveAttr};
    use crate::surface::AreaSpec;

    fn setup() -> (SyncStore, Vec<PlotSlave>, RecordingSurface) {
        let mut store = SyncStore::new(4);
        store.add_channel(ChannelStore::new("a", ValueKind::Double));
        store.add_channel(ChannelStore::new("b", ValueKind::Double));
        for step in 0..4 {
            let value = step as f64;
            store
                .push(value * 10.0, &[Sample::value(value), Sample::value(-value)])
                .expect("row");
        }
        let mut surface = RecordingSurface::window(400.0, 400.0);
        let slaves = (0..2)
            .map(|position| {
                let setup = AxisSetup {
                    domain: AxisDomain::default(),
                    annotations: None,
                };
                let mut slave = PlotSlave::new(ChannelId(position), position, setup, String::new());
                slave.area = surface.open_area(&AreaSpec::overlay(FracRect::FULL)).ok();
                slave
            })
            .collect();
        (store, slaves, surface)
    }

    fn pass<'a>(
        surface: &'a mut RecordingSurface,
        slaves: &'a mut [PlotSlave],
        store: &'a SyncStore,
    ) -> SamplePass<'a, RecordingSurface> {
        SamplePass {
            surface,
            slaves,
            data: store,
            style: StreamStyle {
                line: true,
                wrap_extent: Some(25.0),
                ..StreamStyle::default()
            },
            begin: 0,
            end: 3,
            incremental: false,
        }
    }

    #[test]
    fn time_wraps_and_streams_every_channel() {
        let (store, mut slaves, mut surface) = setup();
        let stats = time(&mut pass(&mut surface, &mut slaves, &store)).expect("stream");
        assert_eq!(stats.anchors, 2);
        assert_eq!(stats.segments, 6);
        let last = surface.lines().last().map(|(_, _, to)| *to);
        assert_eq!(last, Some(Point::new(5.0, -3.0)));
        assert!(slaves.iter().all(|slave| !slave.continuity().first));
    }

    #[test]
    fn index_uses_slot_numbers() {
        let (store, mut slaves, mut surface) = setup();
        index(&mut pass(&mut surface, &mut slaves, &store)).expect("stream");
        assert_eq!(surface.lines()[2].2, Point::new(3.0, 3.0));
    }

    #[test]
    fn xy_pairs_channels_and_skips_x() {
        let (store, mut slaves, mut surface) = setup();
        slaves[1].apply(SlaveAttr::XChannel(true));
        let stats = xy(&mut pass(&mut surface, &mut slaves, &store)).expect("stream");
        assert_eq!(stats.segments, 3);
        assert_eq!(surface.lines()[0].1, Point::new(0.0, 0.0));
        assert_eq!(surface.lines()[2].2, Point::new(-3.0, 3.0));
        assert_eq!(slaves[1].continuity(), Continuity::default());
    }

    #[test]
    fn slave_without_area_is_skipped() {
        let (store, mut slaves, mut surface) = setup();
        slaves[0].area = None;
        let stats = time(&mut pass(&mut surface, &mut slaves, &store)).expect("stream");
        assert_eq!(stats.anchors, 1);
        assert!(slaves[0].continuity().first);
    }
}
