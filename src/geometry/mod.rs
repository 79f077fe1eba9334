//! Plot geometries and their grid and sample routines.
//!
//! Each [`Geometry`] maps to a pair of routines: a grid routine that lays
//! out titles and opens one drawing area per plotted channel, and a sample
//! routine that streams a slot range into those areas. The pairs live in a
//! table indexed by the variant, so adding a geometry is one enum arm and
//! one table row.

mod grid;
mod samples;
mod smith;

use chrono::{DateTime, Local};

use crate::axis::AxisDomain;
use crate::datasource::SampleSet;
use crate::error::Result;
use crate::layout::Titles;
use crate::plot::PlotAttributes;
use crate::slave::PlotSlave;
use crate::stream::{StreamStats, StreamStyle};
use crate::surface::Surface;

/// Axis arrangement of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// Time against Y, one grid per channel.
    TimeY,
    /// Time against Y, all channels on one grid with floating Y axes.
    TimeYShared,
    /// X channel against Y, one grid per Y channel.
    Xy,
    /// X channel against Y, all Y channels on one grid.
    XyShared,
    /// Sample or element index against Y, one grid per channel.
    IndexY,
    /// Sample or element index against Y, all channels on one grid.
    IndexYShared,
    /// X channel against Y over an impedance Smith overlay.
    SmithImpedance,
    /// X channel against Y over an admittance Smith overlay.
    SmithAdmittance,
    /// X channel against Y over both Smith overlays.
    SmithImmittance,
}

impl Geometry {
    /// Every geometry, in declaration order.
    pub const ALL: [Geometry; 9] = [
        Geometry::TimeY,
        Geometry::TimeYShared,
        Geometry::Xy,
        Geometry::XyShared,
        Geometry::IndexY,
        Geometry::IndexYShared,
        Geometry::SmithImpedance,
        Geometry::SmithAdmittance,
        Geometry::SmithImmittance,
    ];

    /// Whether one channel supplies the X values.
    pub fn uses_x_channel(self) -> bool {
        matches!(
            self,
            Self::Xy
                | Self::XyShared
                | Self::SmithImpedance
                | Self::SmithAdmittance
                | Self::SmithImmittance
        )
    }

    /// Whether X is the time offset of each sample.
    pub fn is_time(self) -> bool {
        matches!(self, Self::TimeY | Self::TimeYShared)
    }

    /// Whether all channels share one grid.
    pub fn is_shared(self) -> bool {
        matches!(self, Self::TimeYShared | Self::XyShared | Self::IndexYShared)
    }

    /// Whether the grid is a Smith chart.
    pub fn is_smith(self) -> bool {
        matches!(
            self,
            Self::SmithImpedance | Self::SmithAdmittance | Self::SmithImmittance
        )
    }

    /// Fewest channels a plot of this geometry can draw.
    pub fn min_channels(self) -> usize {
        if self.uses_x_channel() { 2 } else { 1 }
    }

    pub(crate) fn routines<S: Surface + ?Sized>(self) -> Routines<S> {
        match self {
            Self::TimeY => Routines {
                grid: grid::time_separate,
                samples: samples::time,
            },
            Self::TimeYShared => Routines {
                grid: grid::time_shared,
                samples: samples::time,
            },
            Self::Xy => Routines {
                grid: grid::xy_separate,
                samples: samples::xy,
            },
            Self::XyShared => Routines {
                grid: grid::xy_shared,
                samples: samples::xy,
            },
            Self::IndexY => Routines {
                grid: grid::index_separate,
                samples: samples::index,
            },
            Self::IndexYShared => Routines {
                grid: grid::index_shared,
                samples: samples::index,
            },
            Self::SmithImpedance | Self::SmithAdmittance | Self::SmithImmittance => Routines {
                grid: smith::grid,
                samples: samples::xy,
            },
        }
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::TimeY => "time vs Y",
            Self::TimeYShared => "time vs multiple Y",
            Self::Xy => "X vs Y",
            Self::XyShared => "X vs multiple Y",
            Self::IndexY => "index vs Y",
            Self::IndexYShared => "index vs multiple Y",
            Self::SmithImpedance => "Smith impedance",
            Self::SmithAdmittance => "Smith admittance",
            Self::SmithImmittance => "Smith immittance",
        };
        f.write_str(name)
    }
}

/// Grid and sample routines of one geometry.
pub(crate) struct Routines<S: Surface + ?Sized> {
    pub(crate) grid: fn(&mut GridPass<'_, S>) -> Result<()>,
    pub(crate) samples: fn(&mut SamplePass<'_, S>) -> Result<StreamStats>,
}

/// Everything a grid routine reads and updates.
pub(crate) struct GridPass<'a, S: Surface + ?Sized> {
    pub(crate) geometry: Geometry,
    pub(crate) surface: &'a mut S,
    pub(crate) slaves: &'a mut [PlotSlave],
    pub(crate) data: &'a dyn SampleSet,
    pub(crate) attrs: &'a PlotAttributes,
    pub(crate) titles: &'a Titles,
    pub(crate) x_domain: AxisDomain,
    pub(crate) x_label: &'a str,
    pub(crate) now: DateTime<Local>,
}

/// Everything a sample routine reads and updates.
pub(crate) struct SamplePass<'a, S: Surface + ?Sized> {
    pub(crate) surface: &'a mut S,
    pub(crate) slaves: &'a mut [PlotSlave],
    pub(crate) data: &'a dyn SampleSet,
    pub(crate) style: StreamStyle,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) incremental: bool,
}

/// Position of the slave supplying X values: the first one flagged, or the
/// first slave when none is.
pub(crate) fn x_channel_index(slaves: &[PlotSlave]) -> usize {
    slaves
        .iter()
        .position(PlotSlave::is_x_channel)
        .unwrap_or(0)
}
