//! Canvas and plot-area geometry.

use serde::{Deserialize, Serialize};

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 60.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Size of the hosting window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Canvas size and the inner plot area, fixed when a chart is constructed.
///
/// The canvas is the viewport minus the horizontal margins and four top margins;
/// the plot area is the canvas minus the margins again. Plot content is drawn
/// translated by `(margin.left, margin.top)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub margin: Margin,
    pub svg_width: f64,
    pub svg_height: f64,
    /// Plot-area width.
    pub width: f64,
    /// Plot-area height.
    pub height: f64,
}

impl ChartGeometry {
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        let svg_width = (viewport.width - margin.left - margin.right).max(0.0);
        let svg_height = (viewport.height - margin.top * 4.0).max(0.0);
        Self {
            margin,
            svg_width,
            svg_height,
            width: (svg_width - margin.left - margin.right).max(0.0),
            height: (svg_height - margin.top - margin.bottom).max(0.0),
        }
    }

    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(viewport, Margin::default())
    }

    /// Canvas size for a pixel backend (at least 1×1).
    pub fn canvas_size_px(&self) -> (u32, u32) {
        (
            (self.svg_width.round() as u32).max(1),
            (self.svg_height.round() as u32).max(1),
        )
    }

    /// Translate a plot-area point into canvas coordinates.
    pub fn to_canvas(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x + self.margin.left, y + self.margin.top)
    }
}
