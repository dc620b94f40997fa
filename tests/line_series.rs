use chrono::NaiveDate;
use std::time::Duration;

use demo_charts::TimeSeriesDatum;
use demo_charts::datasets;
use demo_charts::viz::{ChartGeometry, LineChart, SweepAnimation, Viewport};

fn month(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

fn geometry() -> ChartGeometry {
    ChartGeometry::from_viewport(Viewport::default())
}

#[test]
fn missing_rate_breaks_the_path() {
    let data = vec![
        TimeSeriesDatum {
            date: month(2000, 1),
            rate: Some(4.0),
        },
        TimeSeriesDatum {
            date: month(2000, 2),
            rate: Some(4.1),
        },
        TimeSeriesDatum {
            date: month(2000, 3),
            rate: None,
        },
        TimeSeriesDatum {
            date: month(2000, 4),
            rate: Some(4.3),
        },
        TimeSeriesDatum {
            date: month(2000, 5),
            rate: Some(f64::NAN),
        },
        TimeSeriesDatum {
            date: month(2000, 6),
            rate: Some(4.2),
        },
    ];
    let chart = LineChart::new(data, geometry());
    let segments = chart.path().segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].len(), 2);
    assert_eq!(segments[1].len(), 1);
    assert_eq!(segments[2].len(), 1);

    // nothing is drawn between February and April
    let feb_x = segments[0][1].0;
    let apr_x = segments[1][0].0;
    let flat: Vec<(f64, f64)> = segments.iter().flatten().copied().collect();
    assert!(!flat.iter().any(|(x, _)| *x > feb_x && *x < apr_x));
}

#[test]
fn scales_span_the_data() {
    let chart = LineChart::new(datasets::unemployment().unwrap(), geometry());
    let g = *chart.geometry();
    let points = &chart.path().segments()[0];
    assert_eq!(chart.path().segments().len(), 1);
    assert_eq!(points.len(), 51);
    assert_eq!(points[0].0, 0.0);
    assert_eq!(points[50].0, g.width);
    // 10.4 (Jan 1983) is the maximum and touches the top of the plot
    let top = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    assert!(top.abs() < 1e-9);

    let years: Vec<String> = chart.x_ticks().into_iter().map(|t| t.label).collect();
    assert_eq!(years.first().map(String::as_str), Some("1970"));
    assert_eq!(years.last().map(String::as_str), Some("2015"));
}

#[test]
fn sweep_is_linear_and_one_shot() {
    let sweep = SweepAnimation::new(1000.0);
    assert_eq!(sweep.duration, Duration::from_millis(4000));
    assert_eq!(sweep.progress(Duration::ZERO), 0.0);
    assert_eq!(sweep.progress(Duration::from_millis(1000)), 0.25);
    assert_eq!(sweep.progress(Duration::from_millis(2000)), 0.5);
    assert_eq!(sweep.progress(Duration::from_millis(4000)), 1.0);
    // stays finished, never loops
    assert_eq!(sweep.progress(Duration::from_secs(60)), 1.0);
    assert!(!sweep.is_finished(Duration::from_millis(3999)));
    assert!(sweep.is_finished(Duration::from_millis(4000)));
}

#[test]
fn sweep_length_matches_path() {
    let chart = LineChart::new(datasets::unemployment().unwrap(), geometry());
    let sweep = chart.sweep();
    assert!(sweep.total_length > geometry().width);
    assert_eq!(sweep.total_length, chart.path().total_length());

    let half: f64 = chart
        .path()
        .revealed(0.5)
        .iter()
        .flat_map(|s| s.windows(2))
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .sum();
    assert!((half - sweep.total_length / 2.0).abs() < 1e-6);
}

#[test]
fn empty_series_has_no_path() {
    let chart = LineChart::new(Vec::new(), geometry());
    assert!(chart.path().segments().is_empty());
    assert_eq!(chart.path().total_length(), 0.0);
    assert!(chart.x_ticks().is_empty());
}

#[test]
fn all_missing_rates_draw_nothing() {
    let data = vec![
        TimeSeriesDatum {
            date: month(2000, 1),
            rate: None,
        },
        TimeSeriesDatum {
            date: month(2000, 2),
            rate: None,
        },
    ];
    let chart = LineChart::new(data, geometry());
    assert!(chart.path().segments().is_empty());
}
