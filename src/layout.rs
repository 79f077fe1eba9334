//! Title margins and grid stacking.

use chrono::{DateTime, Local};

use crate::error::SurfaceError;
use crate::geom::{FracRect, Point};
use crate::surface::{AreaSpec, Justify, Surface, SurfaceKind, TextPlacement};

/// Character height of titles, as a fraction of the surface height.
pub const TITLE_CHAR_HEIGHT: f64 = 0.012;

/// Character height of the print timestamp.
const TIMESTAMP_CHAR_HEIGHT: f64 = 0.008;

/// Format of the print timestamp.
pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %H:%M:%S";

/// Default character height for a grid `grid_height` tall.
pub fn default_char_height(grid_height: f64) -> f64 {
    (0.025 * grid_height).max(0.008)
}

/// Optional titles around the plot.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Titles {
    /// Title above the grids.
    pub top: Option<String>,
    /// Title left of the grids, rotated.
    pub left: Option<String>,
    /// Title below the grids.
    pub bottom: Option<String>,
    /// Title right of the grids, rotated.
    pub right: Option<String>,
}

impl Titles {
    /// Set the top title.
    pub fn with_top(mut self, title: impl Into<String>) -> Self {
        self.top = Some(title.into());
        self
    }

    /// Set the left title.
    pub fn with_left(mut self, title: impl Into<String>) -> Self {
        self.left = Some(title.into());
        self
    }

    /// Set the bottom title.
    pub fn with_bottom(mut self, title: impl Into<String>) -> Self {
        self.bottom = Some(title.into());
        self
    }

    /// Set the right title.
    pub fn with_right(mut self, title: impl Into<String>) -> Self {
        self.right = Some(title.into());
        self
    }
}

fn present(title: &Option<String>) -> Option<&str> {
    title.as_deref().filter(|title| !title.is_empty())
}

/// Space left for grids once titles are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Rectangle of the lowest grid.
    pub frame: FracRect,
    /// Height of each grid.
    pub grid_height: f64,
    /// Default character height for one grid.
    pub char_height: f64,
    /// `char_height` converted to a fraction of the surface width.
    pub char_width: f64,
}

impl GridLayout {
    /// Rectangle of grid `index`, counting from the bottom.
    pub fn grid(&self, index: usize) -> FracRect {
        self.frame.raised(self.grid_height * index as f64)
    }
}

/// Draw titles (and the timestamp on print surfaces) and split the remaining
/// space into `grids` equal rows.
pub fn layout<S: Surface + ?Sized>(
    surface: &mut S,
    titles: &Titles,
    grids: usize,
    now: DateTime<Local>,
) -> Result<GridLayout, SurfaceError> {
    let (mut left, mut bottom, mut right, mut top) = (0.0, 0.0, 0.98, 0.98);
    let ch = TITLE_CHAR_HEIGHT;
    let chx = surface.y_frac_to_x_frac(ch);

    let overlay = surface.open_area(&AreaSpec::overlay(FracRect::FULL))?;
    if surface.kind() == SurfaceKind::Print {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        surface.text(
            overlay,
            Point::new(0.98, 0.995),
            &stamp,
            TextPlacement::new(Justify::Right).with_height(TIMESTAMP_CHAR_HEIGHT),
        );
    }
    let centered = TextPlacement::new(Justify::Center).with_height(ch);
    if let Some(title) = present(&titles.top) {
        surface.text(overlay, Point::new(0.5, 1.0 - ch), title, centered);
        top = 1.0 - 3.0 * ch;
    }
    if let Some(title) = present(&titles.left) {
        surface.text(overlay, Point::new(2.0 * chx, 0.5), title, centered.with_angle(90.0));
        left = 4.0 * chx;
    }
    if let Some(title) = present(&titles.bottom) {
        surface.text(overlay, Point::new(0.5, 2.0 * ch), title, centered);
        bottom = 4.0 * ch;
    }
    if let Some(title) = present(&titles.right) {
        surface.text(
            overlay,
            Point::new(1.0 - 2.0 * chx, 0.5),
            title,
            centered.with_angle(90.0),
        );
        right = 1.0 - 4.0 * chx;
    }
    surface.close_area(overlay);

    let grid_height = (top - bottom) / grids.max(1) as f64;
    let char_height = default_char_height(grid_height);
    let layout = GridLayout {
        frame: FracRect::new(left, bottom, right, bottom + grid_height),
        grid_height,
        char_height,
        char_width: surface.y_frac_to_x_frac(char_height),
    };
    log::debug!("layout for {grids} grid(s): {layout:?}");
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;
    use crate::surface::WindowGeometry;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn untitled_layout_uses_default_margins() {
        let mut surface = RecordingSurface::window(1000.0, 500.0);
        let layout = layout(&mut surface, &Titles::default(), 1, Local::now()).expect("layout");
        assert!(close(layout.frame.left, 0.0));
        assert!(close(layout.frame.right, 0.98));
        assert!(close(layout.frame.top, 0.98));
        assert!(close(layout.char_height, 0.025 * 0.98));
        assert!(close(layout.char_width, layout.char_height * 0.5));
        assert!(surface.texts().is_empty());
        assert!(surface.open_areas().is_empty());
    }

    #[test]
    fn titles_reserve_margins() {
        let mut surface = RecordingSurface::window(1000.0, 1000.0);
        let titles = Titles::default()
            .with_top("Ring current")
            .with_left("mA")
            .with_bottom("time")
            .with_right("aux");
        let layout = layout(&mut surface, &titles, 1, Local::now()).expect("layout");
        let ch = TITLE_CHAR_HEIGHT;
        assert!(close(layout.frame.top, 1.0 - 3.0 * ch));
        assert!(close(layout.frame.left, 4.0 * ch));
        assert!(close(layout.frame.bottom, 4.0 * ch));
        assert!(close(layout.frame.right, 1.0 - 4.0 * ch));
        assert_eq!(surface.texts(), vec!["Ring current", "mA", "time", "aux"]);
    }

    #[test]
    fn empty_titles_are_ignored() {
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let titles = Titles::default().with_top("");
        let layout = layout(&mut surface, &titles, 1, Local::now()).expect("layout");
        assert!(close(layout.frame.top, 0.98));
    }

    #[test]
    fn grids_split_height_evenly() {
        let mut surface = RecordingSurface::window(800.0, 600.0);
        let layout = layout(&mut surface, &Titles::default(), 4, Local::now()).expect("layout");
        assert!(close(layout.grid_height, 0.98 / 4.0));
        assert!(close(layout.grid(3).top, 0.98));
        assert!(close(layout.grid(1).bottom, layout.grid(0).top));
        assert!(close(layout.char_height, 0.008));
    }

    #[test]
    fn print_surfaces_get_a_timestamp() {
        let mut surface =
            RecordingSurface::new(SurfaceKind::Print, WindowGeometry::new(0.0, 0.0, 850.0, 1100.0));
        let now = Local::now();
        layout(&mut surface, &Titles::default(), 1, now).expect("layout");
        assert_eq!(surface.texts(), vec![now.format(TIMESTAMP_FORMAT).to_string().as_str()]);
    }

    #[test]
    fn exhausted_surface_reports_failure() {
        let mut surface = RecordingSurface::window(800.0, 600.0).with_area_budget(0);
        assert_eq!(
            layout(&mut surface, &Titles::default(), 1, Local::now()),
            Err(SurfaceError::AreaUnavailable)
        );
    }
}
