//! Axis domains, default ranging, and tick formatting.

use std::sync::Arc;

use crate::datasource::ChannelSource;

/// Interval count used when nothing better is known.
pub const DEFAULT_INTERVALS: u32 = 5;

/// Axis end points and major tick interval count.
///
/// `origin` is drawn at the low end of the axis and `extent` at the high end;
/// the two are not reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisDomain {
    /// Value at the start of the axis.
    pub origin: f64,
    /// Value at the end of the axis.
    pub extent: f64,
    /// Number of major tick intervals.
    pub intervals: u32,
}

impl AxisDomain {
    /// Create a domain.
    pub const fn new(origin: f64, extent: f64, intervals: u32) -> Self {
        Self {
            origin,
            extent,
            intervals,
        }
    }

    /// Width of the domain.
    pub fn span(&self) -> f64 {
        self.extent - self.origin
    }

    /// Check whether the domain can be mapped onto an axis.
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite() && self.extent.is_finite() && self.origin != self.extent
    }

    /// Values at each major tick, origin first.
    pub fn ticks(&self) -> Vec<f64> {
        let intervals = self.intervals.max(1);
        let step = self.span() / intervals as f64;
        (0..=intervals)
            .map(|tick| self.origin + step * tick as f64)
            .collect()
    }
}

impl Default for AxisDomain {
    fn default() -> Self {
        Self::new(0.0, 100.0, DEFAULT_INTERVALS)
    }
}

/// Result of default axis setup for one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSetup {
    /// Axis domain and tick count.
    pub domain: AxisDomain,
    /// Per-tick labels for enumerated channels.
    pub annotations: Option<Vec<String>>,
}

/// Choose a default axis for a channel.
///
/// Enumerated channels span their states, one tick per state, and are padded
/// with blank labels up to two states. Other channels use their display
/// limits, falling back to the observed data range and finally to an
/// arbitrary non-empty range anchored at zero.
pub fn setup_axis(channel: &dyn ChannelSource) -> AxisSetup {
    if channel.value_kind().is_enum() {
        let mut labels = channel.state_labels().to_vec();
        if labels.len() < 2 {
            labels.resize(2, " ".to_string());
        }
        let intervals = (labels.len() - 1) as u32;
        return AxisSetup {
            domain: AxisDomain::new(0.0, intervals as f64, intervals),
            annotations: Some(labels),
        };
    }

    let limits = channel.display_limits();
    let (mut origin, mut extent) = (limits.min, limits.max);
    if origin == extent
        && let Some(observed) = channel.data_range()
    {
        origin = observed.min;
        extent = observed.max;
    }
    if origin == extent {
        if origin == 0.0 {
            extent = 10.0;
        } else if origin < 0.0 {
            extent = 0.0;
        } else {
            origin = 0.0;
        }
    }
    AxisSetup {
        domain: AxisDomain::new(origin, extent, DEFAULT_INTERVALS),
        annotations: None,
    }
}

/// Range an axis to the channel's observed data, keeping the tick count.
///
/// Returns `current` unchanged when the channel holds no finite data.
pub fn auto_range(channel: &dyn ChannelSource, current: AxisDomain) -> AxisDomain {
    match channel.data_range() {
        Some(observed) => AxisDomain::new(observed.min, observed.max, current.intervals),
        None => current,
    }
}

/// Round a positive step to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Widen `[lo, hi]` to end points that are multiples of a nice step.
pub fn auto_ends(lo: f64, hi: f64) -> (f64, f64) {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return (lo, hi);
    }
    let step = nice_step(span / DEFAULT_INTERVALS as f64);
    ((lo / step).floor() * step, (hi / step).ceil() * step)
}

/// Choose an interval count so each interval is a nice step.
pub fn auto_intervals(lo: f64, hi: f64) -> u32 {
    let span = (hi - lo).abs();
    if !(span.is_finite() && span > 0.0) {
        return DEFAULT_INTERVALS;
    }
    let step = nice_step(span / DEFAULT_INTERVALS as f64);
    ((span / step).round() as u32).clamp(1, 10)
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Shortest decimal form, up to six fractional digits.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => {
                let text = format!("{value:.6}");
                let text = text.trim_end_matches('0').trim_end_matches('.');
                if text == "-0" {
                    "0".to_string()
                } else {
                    text.to_string()
                }
            }
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}
