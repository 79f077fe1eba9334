//! Rectangular grids: one per channel, or one shared by all channels.

use crate::axis::AxisDomain;
use crate::error::{PlotError, Result};
use crate::geom::FracRect;
use crate::geometry::{GridPass, x_channel_index};
use crate::layout::layout;
use crate::plot::PlotAttributes;
use crate::surface::{AreaAttr, AreaSpec, AxisAnnotation, GridLabel, Surface};
use crate::view::Viewport;

/// Line thickness of enumerated channels.
const ENUM_THICKNESS: u32 = 3;

/// Left and bottom margins of a separate grid, in character heights.
const SEPARATE_MARGIN_X: f64 = 12.0;
const SEPARATE_MARGIN_Y: f64 = 6.0;

/// Spacing of floating Y axes on a shared grid, in character widths.
const AXIS_SPACING: u32 = 6;

/// X axis of a grid, and the slave supplying it if any.
struct XAxis {
    domain: AxisDomain,
    label: Option<String>,
    x_slave: Option<usize>,
}

fn time_axis<S: Surface + ?Sized>(pass: &GridPass<'_, S>) -> XAxis {
    let domain = if pass.x_domain.origin == pass.x_domain.extent {
        AxisDomain::default()
    } else {
        pass.x_domain
    };
    XAxis {
        domain,
        label: Some(pass.x_label.to_string()),
        x_slave: None,
    }
}

/// Index axis spanning the longest array, or the requested sample count for
/// scalar channels.
fn index_axis<S: Surface + ?Sized>(pass: &GridPass<'_, S>) -> Result<XAxis> {
    let mut widest = 0_usize;
    for slave in pass.slaves.iter() {
        let channel = pass
            .data
            .channel(slave.channel)
            .ok_or(PlotError::UnknownChannel(slave.channel))?;
        widest = widest.max(channel.element_count());
    }
    let mut extent = widest as f64;
    if widest == 1 {
        extent = pass.data.requested_count().saturating_sub(1) as f64;
    }
    if extent <= 0.0 {
        extent = 1.0;
    }
    Ok(XAxis {
        domain: AxisDomain::new(0.0, extent, 1),
        label: None,
        x_slave: None,
    })
}

fn channel_axis<S: Surface + ?Sized>(pass: &GridPass<'_, S>) -> Result<XAxis> {
    let index = x_channel_index(pass.slaves);
    let slave = &pass.slaves[index];
    let channel = pass
        .data
        .channel(slave.channel)
        .ok_or(PlotError::UnknownChannel(slave.channel))?;
    Ok(XAxis {
        domain: slave.domain,
        label: Some(channel.name().to_string()),
        x_slave: Some(index),
    })
}

pub(super) fn time_separate<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = time_axis(pass);
    separate(pass, &axis)
}

pub(super) fn time_shared<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = time_axis(pass);
    shared(pass, &axis)
}

pub(super) fn index_separate<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = index_axis(pass)?;
    separate(pass, &axis)
}

pub(super) fn index_shared<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = index_axis(pass)?;
    shared(pass, &axis)
}

pub(super) fn xy_separate<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = channel_axis(pass)?;
    separate(pass, &axis)
}

pub(super) fn xy_shared<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let axis = channel_axis(pass)?;
    shared(pass, &axis)
}

/// Close the X slave's area, if any; it is never drawn into.
pub(super) fn release_x_slave<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>, index: usize) {
    let slave = &mut pass.slaves[index];
    if let Some(area) = slave.area.take() {
        pass.surface.close_area(area);
    }
    slave.bounds = FracRect::default();
}

/// Positions of the slaves drawn as Y channels.
pub(super) fn y_slaves(count: usize, x_slave: Option<usize>) -> Vec<usize> {
    (0..count).filter(|index| Some(*index) != x_slave).collect()
}

fn non_empty(label: &Option<String>) -> Option<String> {
    label.clone().filter(|label| !label.is_empty())
}

fn grid_label(
    attrs: &PlotAttributes,
    x_label: &Option<String>,
    y_label: &str,
    annotations: Option<&[String]>,
) -> GridLabel {
    GridLabel {
        x_label: non_empty(x_label).filter(|_| attrs.x_label),
        x_annotations: attrs.x_annotations,
        y_label: Some(y_label.to_string()).filter(|_| attrs.y_label),
        y_annotations: attrs.y_annotations,
        y_tick_labels: annotations.map(<[String]>::to_vec),
        angle: 0.0,
    }
}

/// One grid per Y channel, stacked bottom-up in insertion order.
fn separate<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>, axis: &XAxis) -> Result<()> {
    let rows = y_slaves(pass.slaves.len(), axis.x_slave);
    if let Some(index) = axis.x_slave {
        release_x_slave(pass, index);
    }
    let layout = layout(&mut *pass.surface, pass.titles, rows.len(), pass.now)?;
    let color = !pass.attrs.monochrome;
    log::debug!(
        "{} grid: {} row(s), x {:?}",
        pass.geometry,
        rows.len(),
        axis.domain
    );

    for (row, &index) in rows.iter().enumerate() {
        let cell = layout.grid(row);
        let frame = FracRect::new(
            cell.left + SEPARATE_MARGIN_X * layout.char_width,
            cell.bottom + SEPARATE_MARGIN_Y * layout.char_height,
            cell.right,
            cell.top,
        );
        let slave = &mut pass.slaves[index];
        let channel = pass
            .data
            .channel(slave.channel)
            .ok_or(PlotError::UnknownChannel(slave.channel))?;
        if let Some(area) = slave.area.take() {
            pass.surface.close_area(area);
        }
        let spec = AreaSpec {
            frame,
            world: Viewport::new(
                axis.domain.origin,
                slave.domain.origin,
                axis.domain.extent,
                slave.domain.extent,
            ),
            x_intervals: axis.domain.intervals,
            y_intervals: slave.domain.intervals,
            char_height: layout.char_height,
        };
        let area = pass.surface.open_area(&spec)?;
        slave.area = Some(area);
        slave.bounds = frame;

        if let Some(foreground) = slave.foreground.filter(|_| color) {
            pass.surface.set_attr(area, AreaAttr::Foreground(foreground));
        } else if pass.attrs.line && channel.value_kind().is_enum() && axis.x_slave.is_none() {
            pass.surface
                .set_attr(area, AreaAttr::LineThickness(ENUM_THICKNESS));
        }
        let labels = grid_label(
            pass.attrs,
            &axis.label,
            channel.name(),
            slave.annotations.as_deref(),
        );
        pass.surface.grid_label(area, &labels);
    }
    Ok(())
}

/// All Y channels on one grid, each with its own floating Y axis.
fn shared<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>, axis: &XAxis) -> Result<()> {
    let rows = y_slaves(pass.slaves.len(), axis.x_slave);
    if let Some(index) = axis.x_slave {
        release_x_slave(pass, index);
    }
    let layout = layout(&mut *pass.surface, pass.titles, 1, pass.now)?;
    let cell = layout.grid(0);
    let frame = FracRect::new(
        cell.left + f64::from(AXIS_SPACING) * layout.char_width * rows.len() as f64,
        cell.bottom + f64::from(AXIS_SPACING) * layout.char_height,
        cell.right,
        cell.top,
    );
    let color = !pass.attrs.monochrome;
    log::debug!(
        "{} grid: {} axes, x {:?}",
        pass.geometry,
        rows.len(),
        axis.domain
    );

    for (position, &index) in rows.iter().enumerate() {
        let floating = position > 0;
        let offset = AXIS_SPACING * position as u32;
        let slave = &mut pass.slaves[index];
        let channel = pass
            .data
            .channel(slave.channel)
            .ok_or(PlotError::UnknownChannel(slave.channel))?;
        if let Some(area) = slave.area.take() {
            pass.surface.close_area(area);
        }
        let spec = AreaSpec {
            frame,
            world: Viewport::new(
                axis.domain.origin,
                slave.domain.origin,
                axis.domain.extent,
                slave.domain.extent,
            ),
            x_intervals: axis.domain.intervals,
            y_intervals: slave.domain.intervals,
            char_height: layout.char_height,
        };
        let area = pass.surface.open_area(&spec)?;
        slave.area = Some(area);
        slave.bounds = frame;

        if let Some(foreground) = slave.foreground.filter(|_| color) {
            pass.surface.set_attr(area, AreaAttr::Foreground(foreground));
        } else if pass.attrs.line {
            let keyed = if axis.x_slave.is_some() {
                floating || color
            } else {
                if channel.value_kind().is_enum() {
                    pass.surface
                        .set_attr(area, AreaAttr::LineThickness(ENUM_THICKNESS));
                }
                slave.line_key > 1 || color
            };
            if keyed {
                pass.surface.set_attr(area, AreaAttr::LineKey(slave.line_key));
            }
        } else if color {
            pass.surface.set_attr(area, AreaAttr::ColorKey(slave.line_key));
        }

        if !floating {
            pass.surface.grid(area);
            pass.surface.annotate_x(
                area,
                &AxisAnnotation {
                    offset: 0,
                    domain: axis.domain,
                    draw_axis: false,
                    label: non_empty(&axis.label).filter(|_| pass.attrs.x_label),
                    annotate: pass.attrs.x_annotations,
                    tick_labels: None,
                    angle: 0.0,
                },
            );
        }
        pass.surface.annotate_y(
            area,
            &AxisAnnotation {
                offset,
                domain: slave.domain,
                draw_axis: floating,
                label: Some(channel.name().to_string()).filter(|_| pass.attrs.y_label),
                annotate: pass.attrs.y_annotations,
                tick_labels: slave.annotations.clone(),
                angle: 90.0,
            },
        );
        if pass.attrs.mark {
            pass.surface.annotate_y_mark(area, offset, slave.mark);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{ChannelStore, Sample, SyncStore, ValueKind};
    use crate::geometry::Geometry;
    use crate::layout::Titles;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::slave::{PlotSlave, SlaveAttr};
    use crate::axis::setup_axis;
    use crate::datasource::SampleSet;
    use crate::surface::AreaId;
    use chrono::Local;

    fn store() -> SyncStore {
        let mut store = SyncStore::new(8).with_requested_count(8);
        store.add_channel(ChannelStore::new("volts", ValueKind::Double).with_limits(0.0, 100.0));
        store.add_channel(ChannelStore::new("amps", ValueKind::Float).with_limits(-5.0, 5.0));
        store.add_channel(ChannelStore::new("mode", ValueKind::Enum).with_states(["off", "on"]));
        store
            .push(
                0.0,
                &[Sample::value(1.0), Sample::value(2.0), Sample::value(1.0)],
            )
            .expect("row");
        store
    }

    fn slaves(store: &SyncStore) -> Vec<PlotSlave> {
        (0..store.channel_count())
            .map(|position| {
                let id = crate::datasource::ChannelId(position);
                let setup = setup_axis(store.channel(id).expect("channel"));
                PlotSlave::new(id, position, setup, "sec past now".to_string())
            })
            .collect()
    }

    fn run(
        geometry: Geometry,
        surface: &mut RecordingSurface,
        slaves: &mut [PlotSlave],
        store: &SyncStore,
        attrs: &PlotAttributes,
    ) -> Result<()> {
        let titles = Titles::default();
        let mut pass = GridPass {
            geometry,
            surface,
            slaves,
            data: store,
            attrs,
            titles: &titles,
            x_domain: AxisDomain::new(0.0, 60.0, 6),
            x_label: "sec past now",
            now: Local::now(),
        };
        (geometry.routines().grid)(&mut pass)
    }

    fn attrs_of(surface: &RecordingSurface, area: AreaId) -> Vec<AreaAttr> {
        surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::SetAttr { area: target, attr } if *target == area => Some(*attr),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn separate_grids_stack_bottom_up() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        run(
            Geometry::TimeY,
            &mut surface,
            &mut slaves,
            &store,
            &PlotAttributes::default(),
        )
        .expect("grid");

        assert!(slaves.iter().all(|slave| slave.area().is_some()));
        assert!(slaves[0].bounds().top < slaves[1].bounds().bottom);
        assert!(slaves[1].bounds().top < slaves[2].bounds().bottom);
        let spec = surface
            .area_spec(slaves[1].area().expect("area"))
            .expect("spec");
        assert_eq!(spec.world, Viewport::new(0.0, -5.0, 60.0, 5.0));
        assert_eq!(spec.x_intervals, 6);

        let labels: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::GridLabel { labels, .. } => Some(labels.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].x_label.as_deref(), Some("sec past now"));
        assert_eq!(labels[2].y_label.as_deref(), Some("mode"));
        assert_eq!(
            labels[2].y_tick_labels,
            Some(vec!["off".to_string(), "on".to_string()])
        );
        let mode_area = slaves[2].area().expect("area");
        assert_eq!(
            attrs_of(&surface, mode_area),
            vec![AreaAttr::LineThickness(ENUM_THICKNESS)]
        );
    }

    #[test]
    fn shared_grid_floats_extra_axes() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let attrs = PlotAttributes {
            mark: true,
            ..PlotAttributes::default()
        };
        run(Geometry::TimeYShared, &mut surface, &mut slaves, &store, &attrs).expect("grid");

        let frame = slaves[0].bounds();
        assert!(slaves.iter().all(|slave| slave.bounds() == frame));
        let grids = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Grid(_)))
            .count();
        assert_eq!(grids, 1);
        let axes: Vec<(u32, bool)> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::AnnotateY { axis, .. } => Some((axis.offset, axis.draw_axis)),
                _ => None,
            })
            .collect();
        assert_eq!(axes, vec![(0, false), (6, true), (12, true)]);
        let marks = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::AnnotateYMark { .. }))
            .count();
        assert_eq!(marks, 3);
        assert_eq!(
            attrs_of(&surface, slaves[0].area().expect("area")),
            vec![AreaAttr::LineKey(1)]
        );
    }

    #[test]
    fn monochrome_shared_grid_keys_only_extra_axes() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let attrs = PlotAttributes {
            monochrome: true,
            ..PlotAttributes::default()
        };
        run(Geometry::TimeYShared, &mut surface, &mut slaves, &store, &attrs).expect("grid");
        assert!(attrs_of(&surface, slaves[0].area().expect("area")).is_empty());
        assert_eq!(
            attrs_of(&surface, slaves[1].area().expect("area")),
            vec![AreaAttr::LineKey(2)]
        );
        assert_eq!(
            attrs_of(&surface, slaves[2].area().expect("area")),
            vec![AreaAttr::LineThickness(ENUM_THICKNESS), AreaAttr::LineKey(3)]
        );
    }

    #[test]
    fn xy_grid_skips_x_channel() {
        let store = store();
        let mut slaves = slaves(&store);
        slaves[1].apply(SlaveAttr::XChannel(true));
        let mut surface = RecordingSurface::window(800.0, 600.0);
        run(
            Geometry::Xy,
            &mut surface,
            &mut slaves,
            &store,
            &PlotAttributes::default(),
        )
        .expect("grid");
        assert_eq!(slaves[1].area(), None);
        let spec = surface
            .area_spec(slaves[0].area().expect("area"))
            .expect("spec");
        assert_eq!(spec.world, Viewport::new(-5.0, 0.0, 5.0, 100.0));
        assert!(slaves[0].bounds().top < slaves[2].bounds().bottom);
        assert!(attrs_of(&surface, slaves[2].area().expect("area")).is_empty());
    }

    #[test]
    fn index_axis_spans_requested_samples() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        run(
            Geometry::IndexY,
            &mut surface,
            &mut slaves,
            &store,
            &PlotAttributes::default(),
        )
        .expect("grid");
        let spec = surface
            .area_spec(slaves[0].area().expect("area"))
            .expect("spec");
        assert_eq!(spec.world.x_extent, 7.0);
        assert_eq!(spec.x_intervals, 1);
    }

    #[test]
    fn label_toggles_are_honored() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let attrs = PlotAttributes {
            x_label: false,
            y_annotations: false,
            ..PlotAttributes::default()
        };
        run(Geometry::TimeY, &mut surface, &mut slaves, &store, &attrs).expect("grid");
        let label = surface
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::GridLabel { labels, .. } => Some(labels.clone()),
                _ => None,
            })
            .expect("label");
        assert_eq!(label.x_label, None);
        assert!(!label.y_annotations);
        assert_eq!(label.y_label.as_deref(), Some("volts"));
    }

    #[test]
    fn regrid_closes_previous_areas() {
        let store = store();
        let mut slaves = slaves(&store);
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let attrs = PlotAttributes::default();
        run(Geometry::TimeY, &mut surface, &mut slaves, &store, &attrs).expect("grid");
        run(Geometry::TimeY, &mut surface, &mut slaves, &store, &attrs).expect("grid");
        assert_eq!(surface.open_areas().len(), 3);
    }
}
