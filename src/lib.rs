//! demo_charts
//!
//! Two small demonstration charts over built-in datasets, rendered to SVG or shown in a
//! desktop window (`demo-charts-gui`). Pairs with the `demo-charts` CLI.
//!
//! ### Features
//! - Bar chart with a hover overlay: the hovered bar is emphasized, a reference line marks
//!   its height, and every other bar shows its signed difference (`+3.8%`, `-30.0%`)
//! - Line chart whose path breaks at missing observations and is revealed by a linear
//!   4 second sweep
//! - Load replacement datasets from CSV/JSON, export the built-in ones
//!
//! ### Example
//! ```no_run
//! use demo_charts::datasets;
//! use demo_charts::viz::{self, BarChart, BarChartState, ChartGeometry, ChartText, Viewport};
//!
//! let geometry = ChartGeometry::from_viewport(Viewport::default());
//! let mut state = BarChartState::new(BarChart::new(datasets::languages(), geometry));
//! state.pointer_enter_label("Python")?;
//! viz::render_bar_chart(&state, &ChartText::bar_default(), "bar.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod datasets;
pub mod error;
pub mod models;
pub mod shell;
pub mod storage;
pub mod viz;

pub use error::DatasetError;
pub use models::{CategoryDatum, ChartKind, TimeSeriesDatum};
pub use shell::{MountedChart, ViewShell};
