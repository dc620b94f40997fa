use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use demo_charts::viz::{
    self, BarChart, BarChartState, ChartGeometry, ChartText, LineChart, Viewport,
};
use demo_charts::{CategoryDatum, TimeSeriesDatum, datasets, storage};

#[derive(Parser, Debug)]
#[command(
    name = "demo-charts",
    version,
    about = "Render the demonstration bar and line charts to SVG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the bar chart, optionally with one bar hovered.
    Bar(BarArgs),
    /// Render the line chart at a point of its reveal sweep.
    Line(LineArgs),
    /// Print every other bar's difference to the hovered one.
    Divergence(DivergenceArgs),
    /// Write a built-in dataset to CSV or JSON.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ViewportArgs {
    /// Window width the canvas is derived from.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,
    /// Window height the canvas is derived from.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,
}

impl ViewportArgs {
    fn geometry(&self) -> ChartGeometry {
        ChartGeometry::from_viewport(Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        })
    }
}

#[derive(Args, Debug)]
struct BarArgs {
    /// Output file (.svg).
    #[arg(long)]
    out: PathBuf,
    /// Categories file (label,value CSV or JSON) instead of the built-in languages.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Label of the bar under the pointer.
    #[arg(long)]
    hover: Option<String>,
    /// Custom chart title.
    #[arg(long)]
    title: Option<String>,
    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Args, Debug)]
struct LineArgs {
    /// Output file (.svg).
    #[arg(long)]
    out: PathBuf,
    /// Series file (date,rate CSV or JSON) instead of the built-in unemployment rates.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Milliseconds since mount; omit for the finished sweep.
    #[arg(long)]
    elapsed_ms: Option<u64>,
    /// Custom chart title.
    #[arg(long)]
    title: Option<String>,
    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Args, Debug)]
struct DivergenceArgs {
    /// Label of the hovered bar.
    #[arg(long)]
    hover: String,
    /// Categories file instead of the built-in languages.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DatasetKind {
    Bar,
    Line,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Which built-in dataset to write.
    #[arg(long, value_enum)]
    dataset: DatasetKind,
    /// Output file.
    #[arg(long)]
    out: PathBuf,
    /// Output format. If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Serialize)]
struct DivergenceRow<'a> {
    label: &'a str,
    divergence: f64,
    text: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Bar(args) => cmd_bar(args),
        Command::Line(args) => cmd_line(args),
        Command::Divergence(args) => cmd_divergence(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_categories(path: Option<&Path>) -> Result<Vec<CategoryDatum>> {
    match path {
        Some(p) => storage::load_categories(p)
            .with_context(|| format!("failed to read categories from {}", p.display())),
        None => Ok(datasets::languages()),
    }
}

fn load_series(path: Option<&Path>) -> Result<Vec<TimeSeriesDatum>> {
    match path {
        Some(p) => storage::load_series(p)
            .with_context(|| format!("failed to read series from {}", p.display())),
        None => Ok(datasets::unemployment()?),
    }
}

fn cmd_bar(args: BarArgs) -> Result<()> {
    let data = load_categories(args.data.as_deref())?;
    let mut state = BarChartState::new(BarChart::new(data, args.viewport.geometry()));
    if let Some(label) = args.hover.as_deref() {
        state.pointer_enter_label(label)?;
    }
    let text = ChartText::bar_default().with_title(args.title.as_deref());
    viz::render_bar_chart(&state, &text, &args.out)?;
    eprintln!("Wrote bar chart to {}", args.out.display());
    Ok(())
}

fn cmd_line(args: LineArgs) -> Result<()> {
    let data = load_series(args.data.as_deref())?;
    let chart = LineChart::new(data, args.viewport.geometry());
    let progress = match args.elapsed_ms {
        Some(ms) => chart.sweep().progress(Duration::from_millis(ms)),
        None => 1.0,
    };
    let text = ChartText::line_default().with_title(args.title.as_deref());
    viz::render_line_chart(&chart, &text, progress, &args.out)?;
    eprintln!(
        "Wrote line chart to {} ({:.0}% drawn)",
        args.out.display(),
        progress * 100.0
    );
    Ok(())
}

fn cmd_divergence(args: DivergenceArgs) -> Result<()> {
    let data = load_categories(args.data.as_deref())?;
    let chart = BarChart::new(data, ChartGeometry::from_viewport(Viewport::default()));
    let i = datasets::position_of(chart.data(), &args.hover)?;
    let hovered = chart.data()[i].value;
    let overlay = chart
        .overlay(i)
        .context("hovered bar has no overlay")?;
    let rows: Vec<DivergenceRow> = overlay
        .divergence_labels
        .iter()
        .map(|l| {
            let d = &chart.data()[l.index];
            DivergenceRow {
                label: &d.label,
                divergence: d.value - hovered,
                text: &l.text,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for r in &rows {
            println!("{:<12} {}", r.label, r.text);
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv"),
    }
    .to_ascii_lowercase();

    let out = &args.out;
    match (args.dataset, fmt.as_str()) {
        (DatasetKind::Bar, "csv") => storage::save_categories_csv(&datasets::languages(), out)?,
        (DatasetKind::Bar, "json") => storage::save_json(&datasets::languages(), out)?,
        (DatasetKind::Line, "csv") => storage::save_series_csv(&datasets::unemployment()?, out)?,
        (DatasetKind::Line, "json") => storage::save_json(&datasets::unemployment()?, out)?,
        (_, other) => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {:?} dataset to {}", args.dataset, args.out.display());
    Ok(())
}
