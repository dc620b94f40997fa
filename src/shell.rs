//! View shell: which of the two charts is mounted, and the mounted chart itself.
//!
//! A chart is built when it is mounted, from the viewport at that moment, and dropped
//! when the other chart is selected. Its hover state and sweep start live and die with it.

use log::debug;
use std::time::Duration;

use crate::datasets;
use crate::error::DatasetError;
use crate::models::ChartKind;
use crate::viz::{
    BarChart, BarChartState, ChartGeometry, ChartText, LineChart, SweepAnimation, Viewport,
};

#[derive(Debug, Clone)]
pub struct BarView {
    pub state: BarChartState,
    pub text: ChartText,
}

#[derive(Debug, Clone)]
pub struct LineView {
    pub chart: LineChart,
    pub sweep: SweepAnimation,
    pub text: ChartText,
    /// Clock reading (seconds) of the first paint; the sweep runs from here.
    pub mounted_at: Option<f64>,
}

impl LineView {
    /// Elapsed sweep time at clock reading `now`, starting the sweep on the first call.
    pub fn sweep_elapsed(&mut self, now: f64) -> Duration {
        let start = *self.mounted_at.get_or_insert(now);
        Duration::from_secs_f64((now - start).max(0.0))
    }
}

#[derive(Debug, Clone)]
pub enum MountedChart {
    Bar(BarView),
    Line(LineView),
}

impl MountedChart {
    pub fn kind(&self) -> ChartKind {
        match self {
            MountedChart::Bar(_) => ChartKind::Bar,
            MountedChart::Line(_) => ChartKind::Line,
        }
    }
}

/// Selection behind the two chart buttons. Starts on the bar chart, nothing built yet.
#[derive(Debug, Clone, Default)]
pub struct ViewShell {
    selected: ChartKind,
    mounted: Option<MountedChart>,
}

impl ViewShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> ChartKind {
        self.selected
    }

    pub fn is_mounted(&self, kind: ChartKind) -> bool {
        self.selected == kind
    }

    /// Returns `true` when the line chart was mounted and the bar chart replaces it.
    pub fn show_bar_chart(&mut self) -> bool {
        self.select(ChartKind::Bar)
    }

    /// Returns `true` when the bar chart was mounted and the line chart replaces it.
    pub fn show_line_chart(&mut self) -> bool {
        self.select(ChartKind::Line)
    }

    fn select(&mut self, kind: ChartKind) -> bool {
        if self.selected == kind {
            return false;
        }
        debug!("switching view {:?} -> {:?}", self.selected, kind);
        self.selected = kind;
        self.mounted = None;
        true
    }

    /// Build the selected chart for `viewport` unless it is already built.
    pub fn mount(&mut self, viewport: Viewport) -> Result<&mut MountedChart, DatasetError> {
        let chart = match self.mounted.take() {
            Some(chart) => chart,
            None => {
                debug!("mounting {:?} chart at {viewport:?}", self.selected);
                build(self.selected, viewport)?
            }
        };
        Ok(self.mounted.insert(chart))
    }

    pub fn mounted(&self) -> Option<&MountedChart> {
        self.mounted.as_ref()
    }

    pub fn mounted_mut(&mut self) -> Option<&mut MountedChart> {
        self.mounted.as_mut()
    }
}

fn build(kind: ChartKind, viewport: Viewport) -> Result<MountedChart, DatasetError> {
    let geometry = ChartGeometry::from_viewport(viewport);
    Ok(match kind {
        ChartKind::Bar => MountedChart::Bar(BarView {
            state: BarChartState::new(BarChart::new(datasets::languages(), geometry)),
            text: ChartText::bar_default(),
        }),
        ChartKind::Line => {
            let chart = LineChart::new(datasets::unemployment()?, geometry);
            MountedChart::Line(LineView {
                sweep: chart.sweep(),
                chart,
                text: ChartText::line_default(),
                mounted_at: None,
            })
        }
    })
}
