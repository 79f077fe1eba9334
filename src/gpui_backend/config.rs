use crate::axis::AxisFormatter;
use crate::style::Theme;

/// Configuration for the GPUI plot view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Colors used when replaying the recording.
    pub theme: Theme,
    /// Formats numeric tick annotations.
    pub formatter: AxisFormatter,
    /// Close the window on a right click.
    pub close_on_right_click: bool,
    /// Smallest size, in pixels, the plot is replotted at.
    pub min_size_px: f32,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            formatter: AxisFormatter::default(),
            close_on_right_click: true,
            min_size_px: 16.0,
        }
    }
}
