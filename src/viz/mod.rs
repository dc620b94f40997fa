//! Visualization: chart layout, scales, and **SVG** rendering.
//!
//! - [`bar`] and [`line`] hold the chart logic as plain geometry ("scenes")
//! - [`scale`] and [`layout`] map data to pixels
//! - this module draws scenes with plotters; the desktop GUI paints the same scenes with egui

pub mod bar;
pub mod layout;
pub mod line;
pub mod scale;
pub mod text;
pub mod types;
pub mod util;

pub use bar::{BarChart, BarChartState, BarScene, HoverOverlay};
pub use layout::{ChartGeometry, Margin, Viewport};
pub use line::{LineChart, LinePath, SweepAnimation};
pub use types::{ChartText, Rgb8, palette};

use anyhow::{Result, anyhow, bail};
use log::info;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

use scale::Tick;
use text::truncate_to_width;
use util::rgb_color;

const TICK_SIZE: i32 = 6;
const TICK_FONT_PX: u32 = 10;
const LABEL_FONT_PX: u32 = 14;

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn ensure_svg(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(()),
        _ => bail!("unsupported chart format for {} (only .svg)", path.display()),
    }
}

/// Write the bar chart, in its current hover state, to an `.svg` file.
pub fn render_bar_chart<P: AsRef<Path>>(
    state: &BarChartState,
    text: &ChartText,
    out_path: P,
) -> Result<()> {
    let out_path = out_path.as_ref();
    ensure_svg(out_path)?;
    let size = state.chart().geometry().canvas_size_px();
    let root = SVGBackend::new(out_path, size).into_drawing_area();
    draw_bar_chart(&root, state, text)?;
    info!("wrote bar chart to {}", out_path.display());
    Ok(())
}

/// Same as [`render_bar_chart`], returning the SVG document.
pub fn render_bar_chart_to_string(state: &BarChartState, text: &ChartText) -> Result<String> {
    let mut buffer = String::new();
    {
        let size = state.chart().geometry().canvas_size_px();
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        draw_bar_chart(&root, state, text)?;
    }
    Ok(buffer)
}

/// Write the line chart to an `.svg` file with the leading `progress` fraction of the
/// path drawn (1.0 = sweep finished).
pub fn render_line_chart<P: AsRef<Path>>(
    chart: &LineChart,
    text: &ChartText,
    progress: f64,
    out_path: P,
) -> Result<()> {
    let out_path = out_path.as_ref();
    ensure_svg(out_path)?;
    let size = chart.geometry().canvas_size_px();
    let root = SVGBackend::new(out_path, size).into_drawing_area();
    draw_line_chart(&root, chart, text, progress)?;
    info!("wrote line chart to {}", out_path.display());
    Ok(())
}

/// Same as [`render_line_chart`], returning the SVG document.
pub fn render_line_chart_to_string(
    chart: &LineChart,
    text: &ChartText,
    progress: f64,
) -> Result<String> {
    let mut buffer = String::new();
    {
        let size = chart.geometry().canvas_size_px();
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        draw_line_chart(&root, chart, text, progress)?;
    }
    Ok(buffer)
}

fn draw_bar_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    state: &BarChartState,
    text: &ChartText,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let chart = state.chart();
    let g = *chart.geometry();
    let at = |x: f64, y: f64| (px(x + g.margin.left), px(y + g.margin.top));
    let scene = state.scene();

    root.fill(&rgb_color(palette::BAR_BACKGROUND))
        .map_err(|e| anyhow!("{:?}", e))?;

    // horizontal grid behind the bars
    let grid = rgb_color(palette::GRID).stroke_width(1);
    for t in chart.y_ticks() {
        root.draw(&PathElement::new(
            vec![at(0.0, t.position), at(g.width, t.position)],
            grid,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let x_ticks: Vec<Tick> = chart
        .x_ticks()
        .into_iter()
        .map(|t| Tick {
            label: truncate_to_width(&t.label, TICK_FONT_PX, chart.bandwidth().max(0.0) as u32),
            ..t
        })
        .collect();
    draw_axes(root, &g, &x_ticks, &chart.y_ticks())?;

    for bar in &scene.bars {
        let r = bar.rect;
        let fill = rgb_color(palette::BAR_FILL).mix(bar.opacity).filled();
        root.draw(&Rectangle::new(
            [at(r.x, r.y), at(r.x + r.width, r.y + r.height)],
            fill,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    if scene.value_label_opacity > 0.0 {
        let ink = rgb_color(palette::TEXT).mix(scene.value_label_opacity);
        let style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&ink);
        for l in &scene.value_labels {
            root.draw(&Text::new(l.text.clone(), at(l.x, l.y), style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    if let Some(line) = scene.reference_line {
        root.draw(&PathElement::new(
            vec![at(line.x1, line.y), at(line.x2, line.y)],
            rgb_color(palette::REFERENCE_LINE).stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let ink = rgb_color(palette::TEXT);
    let divergence_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Center))
        .color(&ink);
    for l in &scene.divergence_labels {
        root.draw(&Text::new(
            l.text.clone(),
            at(l.x, l.y),
            divergence_style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    draw_annotations(root, &g, text)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_line_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &LineChart,
    text: &ChartText,
    progress: f64,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let g = *chart.geometry();
    let at = |(x, y): (f64, f64)| (px(x + g.margin.left), px(y + g.margin.top));

    root.fill(&rgb_color(palette::LINE_BACKGROUND))
        .map_err(|e| anyhow!("{:?}", e))?;
    draw_axes(root, &g, &chart.x_ticks(), &chart.y_ticks())?;

    // SVG strokes take whole pixels here; 2 is the closest to the GUI's 1.5
    let stroke = rgb_color(palette::LINE_STROKE).stroke_width(2);
    for segment in chart.path().revealed(progress) {
        if segment.len() < 2 {
            continue;
        }
        root.draw(&PathElement::new(
            segment.into_iter().map(at).collect::<Vec<_>>(),
            stroke,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    draw_annotations(root, &g, text)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Bottom and left axes with outward ticks, in the plot area's frame.
fn draw_axes<DB>(
    root: &DrawingArea<DB, Shift>,
    g: &ChartGeometry,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
) -> Result<()>
where
    DB: DrawingBackend,
{
    let at = |x: f64, y: f64| (px(x + g.margin.left), px(y + g.margin.top));
    let axis = rgb_color(palette::TEXT).stroke_width(1);
    let ink = rgb_color(palette::TEXT);

    root.draw(&PathElement::new(
        vec![at(0.0, g.height), at(g.width, g.height)],
        axis,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    let x_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Top))
        .color(&ink);
    for t in x_ticks {
        let (x, y) = at(t.position, g.height);
        root.draw(&PathElement::new(vec![(x, y), (x, y + TICK_SIZE)], axis))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(
            t.label.clone(),
            (x, y + TICK_SIZE + 3),
            x_style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.draw(&PathElement::new(vec![at(0.0, 0.0), at(0.0, g.height)], axis))
        .map_err(|e| anyhow!("{:?}", e))?;
    let y_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .pos(Pos::new(HPos::Right, VPos::Center))
        .color(&ink);
    for t in y_ticks {
        let (x, y) = at(0.0, t.position);
        root.draw(&PathElement::new(vec![(x - TICK_SIZE, y), (x, y)], axis))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(
            t.label.clone(),
            (x - TICK_SIZE - 3, y),
            y_style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Title, axis descriptions and source note, in canvas coordinates.
fn draw_annotations<DB>(
    root: &DrawingArea<DB, Shift>,
    g: &ChartGeometry,
    text: &ChartText,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let ink = rgb_color(palette::TEXT);
    let centered = Pos::new(HPos::Center, VPos::Center);

    let y_label = TextStyle::from(
        FontDesc::from((FontFamily::SansSerif, 16)).transform(FontTransform::Rotate270),
    )
    .pos(centered)
    .color(&ink);
    root.draw(&Text::new(
        text.y_label.clone(),
        (px(g.margin.left / 2.0), px(g.svg_height / 2.0)),
        y_label,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let bottom = px(g.svg_height - g.margin.bottom / 4.0);
    let x_label = TextStyle::from((FontFamily::SansSerif, 16))
        .pos(centered)
        .color(&ink);
    root.draw(&Text::new(
        text.x_label.clone(),
        (px(g.svg_width / 2.0), bottom),
        x_label,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let title = TextStyle::from((FontFamily::SansSerif, 24))
        .pos(centered)
        .color(&ink);
    root.draw(&Text::new(
        text.title.clone(),
        (px(g.svg_width / 2.0), px(g.margin.top * 0.6)),
        title,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let source = TextStyle::from((FontFamily::SansSerif, 12))
        .pos(Pos::new(HPos::Right, VPos::Center))
        .color(&ink);
    root.draw(&Text::new(
        text.source.clone(),
        (px(g.svg_width - g.margin.right), bottom),
        source,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
