//! Bar chart geometry and the hover divergence overlay.
//!
//! [`BarChart`] is the static part: one bar and one value label per datum, in dataset
//! order. [`BarChartState`] adds the transient hover: while a bar is hovered every value
//! label is hidden, the hovered bar is faded and widened, a reference line marks its
//! height, and every other bar shows its signed difference to the hovered value.
//! Renderers only read [`BarScene`]s, so the SVG writer and the GUI share this logic.

use log::debug;
use serde::Serialize;

use super::layout::ChartGeometry;
use super::scale::{BandScale, LinearScale, Tick};
use super::types::{
    AXIS_TICKS, BAND_PADDING, HOVER_GROW_PX, HOVER_OPACITY, HOVER_SHIFT_PX, LABEL_OFFSET_PX,
};
use super::util::{format_divergence, value_label};
use crate::datasets::position_of;
use crate::error::DatasetError;
use crate::models::CategoryDatum;

/// Axis-aligned rectangle in plot-area pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, to: &BarRect, t: f64) -> BarRect {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        BarRect {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            width: mix(self.width, to.width),
            height: mix(self.height, to.height),
        }
    }
}

/// Centred text anchored at `(x, y)` in plot-area pixels, attached to bar `index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Horizontal line across the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarVisual {
    pub rect: BarRect,
    pub opacity: f64,
}

/// Everything added to the chart while bar `hovered` is under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverOverlay {
    pub hovered: usize,
    pub emphasized: BarRect,
    pub reference_line: ReferenceLine,
    /// One per bar except the hovered one, in dataset order.
    pub divergence_labels: Vec<TextLabel>,
}

/// What a renderer draws for one frame of the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarScene {
    pub bars: Vec<BarVisual>,
    pub value_labels: Vec<TextLabel>,
    pub value_label_opacity: f64,
    pub reference_line: Option<ReferenceLine>,
    pub divergence_labels: Vec<TextLabel>,
}

/// Static bar chart layout over a category dataset.
#[derive(Debug, Clone)]
pub struct BarChart {
    data: Vec<CategoryDatum>,
    geometry: ChartGeometry,
    x: BandScale,
    y: LinearScale,
}

impl BarChart {
    pub fn new(data: Vec<CategoryDatum>, geometry: ChartGeometry) -> Self {
        let x = BandScale::new(
            data.iter().map(|d| d.label.clone()).collect(),
            (0.0, geometry.width),
            BAND_PADDING,
        );
        let y = LinearScale::new((0.0, 100.0), (geometry.height, 0.0));
        Self {
            data,
            geometry,
            x,
            y,
        }
    }

    pub fn data(&self) -> &[CategoryDatum] {
        &self.data
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn x_ticks(&self) -> Vec<Tick> {
        self.x.ticks()
    }

    pub fn y_ticks(&self) -> Vec<Tick> {
        self.y.ticks(AXIS_TICKS)
    }

    pub fn bandwidth(&self) -> f64 {
        self.x.bandwidth()
    }

    /// Resting geometry of bar `i`.
    pub fn bar_rect(&self, i: usize) -> BarRect {
        let top = self.y.map(self.data[i].value);
        BarRect {
            x: self.x.position(i),
            y: top,
            width: self.x.bandwidth(),
            height: self.geometry.height - top,
        }
    }

    /// Geometry of bar `i` while hovered: shifted left and widened, same vertical extent.
    pub fn emphasized_rect(&self, i: usize) -> BarRect {
        let rest = self.bar_rect(i);
        BarRect {
            x: rest.x - HOVER_SHIFT_PX,
            width: rest.width + HOVER_GROW_PX,
            ..rest
        }
    }

    fn label_anchor(&self, i: usize) -> (f64, f64) {
        (
            self.x.position(i) + self.x.bandwidth() / 2.0,
            self.y.map(self.data[i].value) + LABEL_OFFSET_PX,
        )
    }

    pub fn value_labels(&self) -> Vec<TextLabel> {
        (0..self.data.len())
            .map(|i| {
                let (x, y) = self.label_anchor(i);
                TextLabel {
                    index: i,
                    x,
                    y,
                    text: value_label(self.data[i].value),
                }
            })
            .collect()
    }

    /// Overlay for hovering bar `i`; `None` if `i` is out of range.
    pub fn overlay(&self, i: usize) -> Option<HoverOverlay> {
        let hovered_value = self.data.get(i)?.value;
        let divergence_labels = self
            .data
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, d)| {
                let (x, y) = self.label_anchor(j);
                TextLabel {
                    index: j,
                    x,
                    y,
                    text: format_divergence(d.value - hovered_value),
                }
            })
            .collect();
        Some(HoverOverlay {
            hovered: i,
            emphasized: self.emphasized_rect(i),
            reference_line: ReferenceLine {
                x1: 0.0,
                x2: self.geometry.width,
                y: self.y.map(hovered_value),
            },
            divergence_labels,
        })
    }

    /// Scene with no bar hovered.
    pub fn resting_scene(&self) -> BarScene {
        BarScene {
            bars: (0..self.data.len())
                .map(|i| BarVisual {
                    rect: self.bar_rect(i),
                    opacity: 1.0,
                })
                .collect(),
            value_labels: self.value_labels(),
            value_label_opacity: 1.0,
            reference_line: None,
            divergence_labels: Vec::new(),
        }
    }
}

/// A bar chart plus the pointer hover over it.
#[derive(Debug, Clone)]
pub struct BarChartState {
    chart: BarChart,
    hovered: Option<usize>,
}

impl BarChartState {
    pub fn new(chart: BarChart) -> Self {
        Self {
            chart,
            hovered: None,
        }
    }

    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered bar `i`. Returns `false` when nothing changed.
    pub fn pointer_enter(&mut self, i: usize) -> bool {
        if i >= self.chart.len() || self.hovered == Some(i) {
            return false;
        }
        if self.hovered.is_some() {
            self.pointer_leave();
        }
        debug!("hover enter bar {i} ({})", self.chart.data[i].label);
        self.hovered = Some(i);
        true
    }

    pub fn pointer_enter_label(&mut self, label: &str) -> Result<(), DatasetError> {
        let i = position_of(&self.chart.data, label)?;
        self.pointer_enter(i);
        Ok(())
    }

    /// Pointer left the hovered bar. Returns `false` when nothing was hovered.
    pub fn pointer_leave(&mut self) -> bool {
        match self.hovered.take() {
            Some(i) => {
                debug!("hover leave bar {i}");
                true
            }
            None => false,
        }
    }

    /// Bar under a plot-area point. The hovered bar is tested with its widened geometry.
    pub fn hit_test(&self, point: (f64, f64)) -> Option<usize> {
        if let Some(i) = self.hovered
            && self.chart.emphasized_rect(i).contains(point)
        {
            return Some(i);
        }
        (0..self.chart.len()).find(|&i| self.chart.bar_rect(i).contains(point))
    }

    /// Feed the latest pointer position (`None` when outside the plot). Returns whether
    /// the hover changed.
    pub fn update_pointer(&mut self, point: Option<(f64, f64)>) -> bool {
        match point.and_then(|p| self.hit_test(p)) {
            Some(i) => self.pointer_enter(i),
            None => self.pointer_leave(),
        }
    }

    pub fn overlay(&self) -> Option<HoverOverlay> {
        self.hovered.and_then(|i| self.chart.overlay(i))
    }

    pub fn scene(&self) -> BarScene {
        let mut scene = self.chart.resting_scene();
        if let Some(overlay) = self.overlay() {
            scene.value_label_opacity = 0.0;
            scene.bars[overlay.hovered] = BarVisual {
                rect: overlay.emphasized,
                opacity: HOVER_OPACITY,
            };
            scene.reference_line = Some(overlay.reference_line);
            scene.divergence_labels = overlay.divergence_labels;
        }
        scene
    }
}
