//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Vertical offset of value and divergence labels below the bar top.
pub const LABEL_OFFSET_PX: f64 = 30.0;
/// Opacity of the hovered bar.
pub const HOVER_OPACITY: f64 = 0.6;
/// The hovered bar moves left by this much...
pub const HOVER_SHIFT_PX: f64 = 5.0;
/// ...and grows by this much.
pub const HOVER_GROW_PX: f64 = 10.0;
/// Duration of the hover emphasis transition (GUI only).
pub const EMPHASIS_TRANSITION: Duration = Duration::from_millis(300);
/// Duration of the line chart sweep.
pub const SWEEP_DURATION: Duration = Duration::from_millis(4000);
/// Inner and outer padding of the bar band scale.
pub const BAND_PADDING: f64 = 0.2;
/// Requested number of ticks on continuous axes.
pub const AXIS_TICKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors shared by the SVG and GUI renderers.
pub mod palette {
    use super::Rgb8;

    /// Bar chart canvas (`#00a3cc`).
    pub const BAR_BACKGROUND: Rgb8 = Rgb8::new(0x00, 0xa3, 0xcc);
    /// Bar fill (`#e6ffff`).
    pub const BAR_FILL: Rgb8 = Rgb8::new(0xe6, 0xff, 0xff);
    /// Horizontal grid (`#9FAAAE`).
    pub const GRID: Rgb8 = Rgb8::new(0x9f, 0xaa, 0xae);
    pub const REFERENCE_LINE: Rgb8 = Rgb8::new(0xff, 0x00, 0x00);
    /// steelblue
    pub const LINE_STROKE: Rgb8 = Rgb8::new(0x46, 0x82, 0xb4);
    pub const LINE_BACKGROUND: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);
    pub const TEXT: Rgb8 = Rgb8::new(0x00, 0x00, 0x00);
}

/// Title, axis descriptions and source note of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartText {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub source: String,
}

impl ChartText {
    pub fn bar_default() -> Self {
        Self {
            title: "Most loved programming languages in 2018".into(),
            x_label: "Languages".into(),
            y_label: "Love meter (%)".into(),
            source: "Source: Stack Overflow, 2018".into(),
        }
    }

    pub fn line_default() -> Self {
        Self {
            title: "U.S. Unemployment Rate, January 1969 - January 2019".into(),
            x_label: "Year".into(),
            y_label: "Rate (%)".into(),
            source: "Source: Bureau of Labor Statistics, 2018".into(),
        }
    }

    /// Replace the title unless `title` is blank.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        if let Some(t) = title.map(str::trim)
            && !t.is_empty()
        {
            self.title = t.to_string();
        }
        self
    }
}
