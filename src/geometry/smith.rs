//! Smith chart overlays.
//!
//! The overlay is drawn in a unit-square area. Constant-resistance circles
//! of radius `r/12` touch the right pole `(1, .5)` for impedance and the
//! left pole `(0, .5)` for admittance; constant-reactance arcs of radius
//! `.25`, `.5` and `1` leave the same pole upwards and downwards. The
//! immittance chart draws the admittance family as a keyed, unlabeled
//! underlay beneath a full impedance chart.

use crate::error::{PlotError, Result};
use crate::geom::{FracRect, Point};
use crate::geometry::grid::{release_x_slave, y_slaves};
use crate::geometry::{Geometry, GridPass, x_channel_index};
use crate::layout::layout;
use crate::surface::{AreaAttr, AreaId, AreaSpec, Justify, Surface, TextPlacement};
use crate::view::Viewport;

/// Arc resolution in degrees.
const ARC_STEP: f64 = 5.0;

/// Offset of circle labels from the circle edge.
const LABEL_GAP: f64 = 0.015;

/// Labels of the resistance circles, indexed by `r - 1`.
const CIRCLE_LABELS: [&str; 6] = ["5", "2", "1", "0.5", "0.2", "0"];

/// One reactance arc with its label.
struct ReactanceArc {
    radius: f64,
    /// Center above the pole rather than below.
    upper: bool,
    start: f64,
    end: f64,
    label: &'static str,
    label_at: Point,
    justify: Justify,
}

const fn arc(
    radius: f64,
    upper: bool,
    (start, end): (f64, f64),
    label: &'static str,
    label_at: Point,
    justify: Justify,
) -> ReactanceArc {
    ReactanceArc {
        radius,
        upper,
        start,
        end,
        label,
        label_at,
        justify,
    }
}

const ADMITTANCE_ARCS: [ReactanceArc; 6] = [
    arc(0.25, true, (270.0, 37.0), "2", Point::new(0.19, 0.92), Justify::Right),
    arc(0.25, false, (323.0, 90.0), "2", Point::new(0.19, 0.08), Justify::Right),
    arc(0.5, true, (270.0, 0.0), "1", Point::new(0.5, 1.02), Justify::Center),
    arc(0.5, false, (0.0, 90.0), "1", Point::new(0.5, -0.02), Justify::Center),
    arc(1.0, true, (270.0, 323.0), "0.5", Point::new(0.81, 0.92), Justify::Left),
    arc(1.0, false, (37.0, 90.0), "0.5", Point::new(0.81, 0.08), Justify::Left),
];

const IMPEDANCE_ARCS: [ReactanceArc; 6] = [
    arc(0.25, true, (143.0, 270.0), "2", Point::new(0.81, 0.92), Justify::Left),
    arc(0.25, false, (90.0, 217.0), "2", Point::new(0.81, 0.08), Justify::Left),
    arc(0.5, true, (180.0, 270.0), "1", Point::new(0.5, 1.02), Justify::Center),
    arc(0.5, false, (90.0, 180.0), "1", Point::new(0.5, -0.02), Justify::Center),
    arc(1.0, true, (217.0, 270.0), "0.5", Point::new(0.19, 0.92), Justify::Right),
    arc(1.0, false, (90.0, 143.0), "0.5", Point::new(0.19, 0.08), Justify::Right),
];

/// Which pole a family of circles touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Impedance,
    Admittance,
}

impl Family {
    fn pole_x(self) -> f64 {
        match self {
            Self::Impedance => 1.0,
            Self::Admittance => 0.0,
        }
    }

    fn arcs(self) -> &'static [ReactanceArc; 6] {
        match self {
            Self::Impedance => &IMPEDANCE_ARCS,
            Self::Admittance => &ADMITTANCE_ARCS,
        }
    }
}

/// How one family is drawn.
struct Overlay {
    family: Family,
    axis: bool,
    outer_circle: bool,
    labels: bool,
}

fn draw_family<S: Surface + ?Sized>(surface: &mut S, area: AreaId, overlay: &Overlay) {
    if overlay.axis {
        surface.line(area, Point::new(0.0, 0.5), Point::new(1.0, 0.5));
    }
    let placement = TextPlacement::new(match overlay.family {
        Family::Impedance => Justify::Right,
        Family::Admittance => Justify::Left,
    });
    for r in (1..=6_usize).rev() {
        let radius = r as f64 / 12.0;
        let (x, label_x) = match overlay.family {
            Family::Impedance => (1.0 - radius, 1.0 - 2.0 * radius - LABEL_GAP),
            Family::Admittance => (radius, 2.0 * radius + LABEL_GAP),
        };
        if r != 6 || overlay.outer_circle {
            surface.arc(area, Point::new(x, 0.5), radius, 0.0, 360.0, ARC_STEP);
        }
        if overlay.labels {
            surface.text(area, Point::new(label_x, 0.5), CIRCLE_LABELS[r - 1], placement);
        }
    }
    let pole = overlay.family.pole_x();
    for reactance in overlay.family.arcs() {
        let center_y = if reactance.upper {
            0.5 + reactance.radius
        } else {
            0.5 - reactance.radius
        };
        surface.arc(
            area,
            Point::new(pole, center_y),
            reactance.radius,
            reactance.start,
            reactance.end,
            ARC_STEP,
        );
        if overlay.labels {
            surface.text(
                area,
                reactance.label_at,
                reactance.label,
                TextPlacement::new(reactance.justify),
            );
        }
    }
}

/// Smith grid: one overlay area, then one area per Y channel on the same
/// frame.
pub(super) fn grid<S: Surface + ?Sized>(pass: &mut GridPass<'_, S>) -> Result<()> {
    let layout = layout(&mut *pass.surface, pass.titles, 1, pass.now)?;
    let cell = layout.grid(0);
    let frame = FracRect::new(
        cell.left + 3.0 * layout.char_width,
        cell.bottom + 2.0 * layout.char_height,
        cell.right - layout.char_height,
        cell.top - 2.0 * layout.char_height,
    );
    let color = !pass.attrs.monochrome;
    let overlay = pass.surface.open_area(&AreaSpec::overlay(frame))?;
    log::debug!("{} overlay in {frame:?}", pass.geometry);

    if matches!(
        pass.geometry,
        Geometry::SmithAdmittance | Geometry::SmithImmittance
    ) {
        let admittance = pass.geometry == Geometry::SmithAdmittance;
        if let Some(foreground) = pass.attrs.alt_foreground_2.filter(|_| color) {
            pass.surface.set_attr(overlay, AreaAttr::Foreground(foreground));
        } else if !admittance || color {
            pass.surface.set_attr(overlay, AreaAttr::LineKey(1));
        }
        draw_family(
            &mut *pass.surface,
            overlay,
            &Overlay {
                family: Family::Admittance,
                axis: admittance,
                outer_circle: admittance,
                labels: admittance,
            },
        );
    }
    if matches!(
        pass.geometry,
        Geometry::SmithImpedance | Geometry::SmithImmittance
    ) {
        if let Some(foreground) = pass.attrs.alt_foreground_1.filter(|_| color) {
            pass.surface.set_attr(overlay, AreaAttr::Foreground(foreground));
        } else {
            pass.surface.set_attr(overlay, AreaAttr::LineKey(0));
        }
        draw_family(
            &mut *pass.surface,
            overlay,
            &Overlay {
                family: Family::Impedance,
                axis: true,
                outer_circle: true,
                labels: true,
            },
        );
    }
    pass.surface.close_area(overlay);

    let x_index = x_channel_index(pass.slaves);
    release_x_slave(pass, x_index);
    let x_domain = pass.slaves[x_index].domain;
    for index in y_slaves(pass.slaves.len(), Some(x_index)) {
        let slave = &mut pass.slaves[index];
        if pass.data.channel(slave.channel).is_none() {
            return Err(PlotError::UnknownChannel(slave.channel));
        }
        if let Some(area) = slave.area.take() {
            pass.surface.close_area(area);
        }
        let spec = AreaSpec {
            frame,
            world: Viewport::new(
                x_domain.origin,
                slave.domain.origin,
                x_domain.extent,
                slave.domain.extent,
            ),
            x_intervals: 1,
            y_intervals: 1,
            char_height: 0.0,
        };
        let area = pass.surface.open_area(&spec)?;
        slave.area = Some(area);
        slave.bounds = frame;
        if let Some(foreground) = slave.foreground.filter(|_| color) {
            pass.surface.set_attr(area, AreaAttr::Foreground(foreground));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisDomain, setup_axis};
    use crate::datasource::{ChannelId, ChannelStore, SampleSet, SyncStore, ValueKind};
    use crate::layout::Titles;
    use crate::plot::PlotAttributes;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::slave::PlotSlave;
    use crate::style::Color;
    use chrono::Local;

    fn draw(geometry: Geometry, attrs: &PlotAttributes) -> (RecordingSurface, Vec<PlotSlave>) {
        let mut store = SyncStore::new(4);
        store.add_channel(ChannelStore::new("re", ValueKind::Double).with_limits(-1.0, 1.0));
        store.add_channel(ChannelStore::new("im", ValueKind::Double).with_limits(-1.0, 1.0));
        let mut slaves: Vec<PlotSlave> = (0..2)
            .map(|position| {
                let id = ChannelId(position);
                let setup = setup_axis(store.channel(id).expect("channel"));
                PlotSlave::new(id, position, setup, String::new())
            })
            .collect();
        let mut surface = RecordingSurface::window(600.0, 600.0);
        let titles = Titles::default();
        let mut pass = GridPass {
            geometry,
            surface: &mut surface,
            slaves: &mut slaves,
            data: &store,
            attrs,
            titles: &titles,
            x_domain: AxisDomain::default(),
            x_label: "",
            now: Local::now(),
        };
        grid(&mut pass).expect("grid");
        (surface, slaves)
    }

    fn full_circles(surface: &RecordingSurface) -> Vec<(Point, f64)> {
        surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Arc {
                    center,
                    radius,
                    start,
                    end,
                    ..
                } if *start == 0.0 && *end == 360.0 => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn impedance_overlay() {
        let (surface, slaves) = draw(Geometry::SmithImpedance, &PlotAttributes::default());
        let circles = full_circles(&surface);
        assert_eq!(circles.len(), 6);
        assert_eq!(circles[0], (Point::new(0.5, 0.5), 0.5));
        assert!(circles.iter().all(|(center, radius)| (center.x + radius - 1.0).abs() < 1e-12));
        assert_eq!(surface.lines().len(), 1);
        let texts = surface.texts();
        assert_eq!(texts.len(), 12);
        assert_eq!(&texts[..6], &["0", "0.2", "0.5", "1", "2", "5"]);

        assert_eq!(slaves[0].area(), None);
        let area = slaves[1].area().expect("y area");
        let spec = surface.area_spec(area).expect("spec");
        assert_eq!(spec.world, Viewport::new(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(surface.open_areas(), &[area]);
    }

    #[test]
    fn admittance_overlay_is_labeled_and_keyed() {
        let (surface, _) = draw(Geometry::SmithAdmittance, &PlotAttributes::default());
        let circles = full_circles(&surface);
        assert_eq!(circles.len(), 6);
        assert!(circles.iter().all(|(center, radius)| (center.x - radius).abs() < 1e-12));
        assert_eq!(surface.texts().len(), 12);
        assert!(surface.commands().contains(&DrawCommand::SetAttr {
            area: AreaId(1),
            attr: AreaAttr::LineKey(1),
        }));
    }

    #[test]
    fn immittance_underlay_is_unlabeled() {
        let (surface, _) = draw(Geometry::SmithImmittance, &PlotAttributes::default());
        assert_eq!(full_circles(&surface).len(), 5 + 6);
        assert_eq!(surface.texts().len(), 12);
        assert_eq!(surface.lines().len(), 1);
        let keys: Vec<AreaAttr> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::SetAttr { attr, .. } => Some(*attr),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec![AreaAttr::LineKey(1), AreaAttr::LineKey(0)]);
    }

    #[test]
    fn alternate_colors_override_keys() {
        let red = Color::rgb8(255, 0, 0);
        let attrs = PlotAttributes {
            alt_foreground_1: Some(red),
            ..PlotAttributes::default()
        };
        let (surface, _) = draw(Geometry::SmithImpedance, &attrs);
        assert!(surface.commands().iter().any(|command| matches!(
            command,
            DrawCommand::SetAttr { attr: AreaAttr::Foreground(color), .. } if *color == red
        )));
    }

    #[test]
    fn reactance_arcs_leave_the_pole() {
        for (family, arcs) in [
            (Family::Admittance, &ADMITTANCE_ARCS),
            (Family::Impedance, &IMPEDANCE_ARCS),
        ] {
            for reactance in arcs.iter() {
                let center_y = if reactance.upper {
                    0.5 + reactance.radius
                } else {
                    0.5 - reactance.radius
                };
                let touches = [reactance.start, reactance.end].iter().any(|angle| {
                    let radians = angle.to_radians();
                    let x = family.pole_x() + reactance.radius * radians.cos();
                    let y = center_y + reactance.radius * radians.sin();
                    (x - family.pole_x()).abs() < 1e-9 && (y - 0.5).abs() < 1e-9
                });
                assert!(touches, "{family:?} arc {} {}", reactance.start, reactance.end);
            }
        }
    }
}
