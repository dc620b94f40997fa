/*!
 * Desktop shell for demo-charts
 *
 * Two buttons switch between the charts:
 * - bar chart with the hover divergence overlay (emphasis animated over 300 ms)
 * - line chart revealed by a single 4 s sweep when it is mounted
 *
 * A chart is built when it is mounted, from the window size at that moment.
 */

use eframe::egui;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use demo_charts::shell::{BarView, LineView};
use demo_charts::viz::scale::Tick;
use demo_charts::viz::types::{EMPHASIS_TRANSITION, HOVER_OPACITY};
use demo_charts::viz::{ChartGeometry, ChartText, Rgb8, Viewport, palette};
use demo_charts::{MountedChart, ViewShell};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("demo-charts"),
        ..Default::default()
    };

    eframe::run_native(
        "demo-charts",
        options,
        Box::new(|_cc| Ok(Box::new(ChartsApp::new()))),
    )
}

struct ChartsApp {
    shell: ViewShell,
    error_message: String,
}

fn color(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

impl ChartsApp {
    fn new() -> Self {
        Self {
            shell: ViewShell::new(),
            error_message: String::new(),
        }
    }
}

impl eframe::App for ChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("chart-buttons").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let bar = ui.button("Show bar chart").clicked();
                let line = ui.button("Show line chart").clicked();
                let remount =
                    (bar && self.shell.show_bar_chart()) || (line && self.shell.show_line_chart());
                if remount {
                    self.error_message.clear();
                }
            });
        });

        if self.error_message.is_empty() {
            let size = ctx.screen_rect().size();
            let viewport = Viewport {
                width: size.x as f64,
                height: size.y as f64,
            };
            if let Err(err) = self.shell.mount(viewport) {
                self.error_message = format!("Failed to load dataset: {err}");
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.error_message.is_empty() {
                ui.colored_label(Color32::RED, &self.error_message);
            }
            egui::ScrollArea::both().show(ui, |ui| {
                ui.vertical_centered(|ui| match self.shell.mounted_mut() {
                    Some(MountedChart::Bar(view)) => paint_bar_chart(ui, view),
                    Some(MountedChart::Line(view)) => paint_line_chart(ui, view),
                    None => {}
                });
            });
        });
    }
}

/// Maps plot-area coordinates of `g` into the painter's screen space.
#[derive(Clone, Copy)]
struct ChartFrame {
    origin: Pos2,
    g: ChartGeometry,
}

impl ChartFrame {
    fn canvas(&self, x: f64, y: f64) -> Pos2 {
        self.origin + Vec2::new(x as f32, y as f32)
    }

    fn plot(&self, x: f64, y: f64) -> Pos2 {
        self.canvas(x + self.g.margin.left, y + self.g.margin.top)
    }

    fn to_plot(&self, p: Pos2) -> (f64, f64) {
        (
            (p.x - self.origin.x) as f64 - self.g.margin.left,
            (p.y - self.origin.y) as f64 - self.g.margin.top,
        )
    }
}

fn allocate(ui: &mut egui::Ui, g: &ChartGeometry) -> (egui::Response, Painter, ChartFrame) {
    let (response, painter) = ui.allocate_painter(
        Vec2::new(g.svg_width as f32, g.svg_height as f32),
        Sense::hover(),
    );
    let frame = ChartFrame {
        origin: response.rect.min,
        g: *g,
    };
    (response, painter, frame)
}

fn paint_bar_chart(ui: &mut egui::Ui, view: &mut BarView) {
    let g = *view.state.chart().geometry();
    let (response, painter, frame) = allocate(ui, &g);
    view.state
        .update_pointer(response.hover_pos().map(|p| frame.to_plot(p)));

    let chart = view.state.chart();
    let scene = view.state.scene();
    let ink = color(palette::TEXT);

    painter.rect_filled(response.rect, 0.0, color(palette::BAR_BACKGROUND));
    for t in chart.y_ticks() {
        painter.line_segment(
            [frame.plot(0.0, t.position), frame.plot(g.width, t.position)],
            Stroke::new(1.0, color(palette::GRID)),
        );
    }
    paint_axes(&painter, &frame, &chart.x_ticks(), &chart.y_ticks());

    // Bars ease in and out of emphasis; labels and the reference line switch at once.
    let mut animating = false;
    for i in 0..chart.len() {
        let target = if view.state.hovered() == Some(i) { 1.0 } else { 0.0 };
        let t = ui.ctx().animate_value_with_time(
            egui::Id::new(("bar-emphasis", i)),
            target,
            EMPHASIS_TRANSITION.as_secs_f32(),
        );
        animating |= t != target;
        let r = chart.bar_rect(i).lerp(&chart.emphasized_rect(i), t as f64);
        let opacity = 1.0 - (1.0 - HOVER_OPACITY as f32) * t;
        painter.rect_filled(
            Rect::from_min_max(frame.plot(r.x, r.y), frame.plot(r.x + r.width, r.y + r.height)),
            0.0,
            color(palette::BAR_FILL).gamma_multiply(opacity),
        );
    }
    if animating {
        ui.ctx().request_repaint();
    }

    if scene.value_label_opacity > 0.0 {
        for l in &scene.value_labels {
            painter.text(
                frame.plot(l.x, l.y),
                Align2::CENTER_CENTER,
                &l.text,
                FontId::proportional(14.0),
                ink.gamma_multiply(scene.value_label_opacity as f32),
            );
        }
    }
    if let Some(line) = scene.reference_line {
        painter.line_segment(
            [frame.plot(line.x1, line.y), frame.plot(line.x2, line.y)],
            Stroke::new(1.0, color(palette::REFERENCE_LINE)),
        );
    }
    for l in &scene.divergence_labels {
        painter.text(
            frame.plot(l.x, l.y),
            Align2::CENTER_CENTER,
            &l.text,
            FontId::proportional(14.0),
            ink,
        );
    }

    paint_annotations(&painter, &frame, &view.text);
}

fn paint_line_chart(ui: &mut egui::Ui, view: &mut LineView) {
    let g = *view.chart.geometry();
    let (response, painter, frame) = allocate(ui, &g);
    let elapsed = view.sweep_elapsed(ui.ctx().input(|i| i.time));

    painter.rect_filled(response.rect, 0.0, color(palette::LINE_BACKGROUND));
    paint_axes(&painter, &frame, &view.chart.x_ticks(), &view.chart.y_ticks());

    let stroke = Stroke::new(1.5, color(palette::LINE_STROKE));
    for segment in view.chart.path().revealed(view.sweep.progress(elapsed)) {
        let points: Vec<Pos2> = segment.iter().map(|&(x, y)| frame.plot(x, y)).collect();
        painter.add(egui::Shape::line(points, stroke));
    }
    if !view.sweep.is_finished(elapsed) {
        ui.ctx().request_repaint();
    }

    paint_annotations(&painter, &frame, &view.text);
}

fn paint_axes(painter: &Painter, frame: &ChartFrame, x_ticks: &[Tick], y_ticks: &[Tick]) {
    let g = frame.g;
    let ink = color(palette::TEXT);
    let stroke = Stroke::new(1.0, ink);
    let font = FontId::proportional(10.0);

    painter.line_segment([frame.plot(0.0, g.height), frame.plot(g.width, g.height)], stroke);
    for t in x_ticks {
        let p = frame.plot(t.position, g.height);
        painter.line_segment([p, p + Vec2::new(0.0, 6.0)], stroke);
        painter.text(p + Vec2::new(0.0, 9.0), Align2::CENTER_TOP, &t.label, font.clone(), ink);
    }

    painter.line_segment([frame.plot(0.0, 0.0), frame.plot(0.0, g.height)], stroke);
    for t in y_ticks {
        let p = frame.plot(0.0, t.position);
        painter.line_segment([p - Vec2::new(6.0, 0.0), p], stroke);
        painter.text(p - Vec2::new(9.0, 0.0), Align2::RIGHT_CENTER, &t.label, font.clone(), ink);
    }
}

fn paint_annotations(painter: &Painter, frame: &ChartFrame, text: &ChartText) {
    let g = frame.g;
    let ink = color(palette::TEXT);
    let bottom = g.svg_height - g.margin.bottom / 4.0;

    painter.text(
        frame.canvas(g.svg_width / 2.0, g.margin.top * 0.6),
        Align2::CENTER_CENTER,
        &text.title,
        FontId::proportional(24.0),
        ink,
    );
    painter.text(
        frame.canvas(g.svg_width / 2.0, bottom),
        Align2::CENTER_CENTER,
        &text.x_label,
        FontId::proportional(16.0),
        ink,
    );
    painter.text(
        frame.canvas(g.svg_width - g.margin.right, bottom),
        Align2::RIGHT_CENTER,
        &text.source,
        FontId::proportional(12.0),
        ink,
    );

    // y description, rotated a quarter turn counter-clockwise about its centre
    let galley = painter.layout_no_wrap(text.y_label.clone(), FontId::proportional(16.0), ink);
    let size = galley.size();
    let centre = frame.canvas(g.margin.left / 2.0, g.svg_height / 2.0);
    let pos = centre + Vec2::new(-size.y / 2.0, size.x / 2.0);
    painter.add(
        egui::epaint::TextShape::new(pos, galley, ink).with_angle(-std::f32::consts::FRAC_PI_2),
    );
}
