//! Line chart geometry and the one-shot sweep that reveals the path.

use log::warn;
use std::time::Duration;

use super::layout::ChartGeometry;
use super::scale::{LinearScale, Tick, TimeScale};
use super::types::{AXIS_TICKS, SWEEP_DURATION};
use crate::models::TimeSeriesDatum;

type Point = (f64, f64);

fn distance(a: Point, b: Point) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// A polyline broken into segments wherever an observation is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePath {
    segments: Vec<Vec<Point>>,
}

impl LinePath {
    /// Build from points in drawing order; `None` ends the current segment.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<Point>>,
    {
        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for p in points {
            match p {
                Some(p) => current.push(p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Vec<Point>] {
        &self.segments
    }

    /// Drawn length in pixels; gaps do not count.
    pub fn total_length(&self) -> f64 {
        self.segments
            .iter()
            .flat_map(|s| s.windows(2))
            .map(|w| distance(w[0], w[1]))
            .sum()
    }

    /// The leading `progress` fraction of the path, measured along its length.
    pub fn revealed(&self, progress: f64) -> Vec<Vec<Point>> {
        if progress >= 1.0 {
            return self.segments.clone();
        }
        let mut out = Vec::new();
        if progress.is_nan() || progress <= 0.0 {
            return out;
        }
        let mut remaining = self.total_length() * progress;
        for seg in &self.segments {
            if remaining <= 0.0 {
                break;
            }
            let mut part = vec![seg[0]];
            for w in seg.windows(2) {
                let len = distance(w[0], w[1]);
                if remaining <= 0.0 {
                    break;
                }
                if len <= remaining {
                    part.push(w[1]);
                    remaining -= len;
                } else {
                    let t = remaining / len;
                    part.push((w[0].0 + (w[1].0 - w[0].0) * t, w[0].1 + (w[1].1 - w[0].1) * t));
                    out.push(part);
                    return out;
                }
            }
            out.push(part);
        }
        out
    }
}

/// Line chart layout over a monthly time series.
#[derive(Debug, Clone)]
pub struct LineChart {
    data: Vec<TimeSeriesDatum>,
    geometry: ChartGeometry,
    x: Option<TimeScale>,
    y: LinearScale,
    path: LinePath,
}

impl LineChart {
    pub fn new(data: Vec<TimeSeriesDatum>, geometry: ChartGeometry) -> Self {
        if data.windows(2).any(|w| w[0].date > w[1].date) {
            warn!("time series is not in chronological order; the line will double back");
        }
        let x = TimeScale::extent(data.iter().map(|d| d.date))
            .map(|domain| TimeScale::new(domain, (0.0, geometry.width)));
        let max_rate = data
            .iter()
            .filter_map(TimeSeriesDatum::defined_rate)
            .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.max(r))))
            .unwrap_or(0.0);
        let y = LinearScale::new((0.0, max_rate), (geometry.height, 0.0));
        let path = match &x {
            Some(x) => LinePath::from_points(
                data.iter()
                    .map(|d| d.defined_rate().map(|r| (x.map(d.date), y.map(r)))),
            ),
            None => LinePath::default(),
        };
        Self {
            data,
            geometry,
            x,
            y,
            path,
        }
    }

    pub fn data(&self) -> &[TimeSeriesDatum] {
        &self.data
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn path(&self) -> &LinePath {
        &self.path
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn x_ticks(&self) -> Vec<Tick> {
        self.x
            .as_ref()
            .map(|x| x.year_ticks(AXIS_TICKS))
            .unwrap_or_default()
    }

    pub fn y_ticks(&self) -> Vec<Tick> {
        self.y.ticks(AXIS_TICKS)
    }

    pub fn sweep(&self) -> SweepAnimation {
        SweepAnimation::new(self.path.total_length())
    }
}

/// Linear reveal of a path of `total_length` pixels over [`SWEEP_DURATION`].
///
/// Renderers draw `LinePath::revealed(progress)`; the drawn length grows from 0 to
/// `total_length` at constant speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepAnimation {
    pub duration: Duration,
    pub total_length: f64,
}

impl SweepAnimation {
    pub fn new(total_length: f64) -> Self {
        Self {
            duration: SWEEP_DURATION,
            total_length,
        }
    }

    /// Fraction drawn after `elapsed`, in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_prefix_cuts_inside_a_line() {
        let p = LinePath::from_points([Some((0.0, 0.0)), Some((10.0, 0.0)), Some((10.0, 10.0))]);
        assert_eq!(p.total_length(), 20.0);
        assert_eq!(p.revealed(0.25), vec![vec![(0.0, 0.0), (5.0, 0.0)]]);
        assert_eq!(p.revealed(0.5), vec![vec![(0.0, 0.0), (10.0, 0.0)]]);
        assert!(p.revealed(0.0).is_empty());
        assert_eq!(p.revealed(1.0), p.segments().to_vec());
    }

    #[test]
    fn reveal_crosses_gaps_without_joining() {
        let p = LinePath::from_points([
            Some((0.0, 0.0)),
            Some((10.0, 0.0)),
            None,
            Some((20.0, 0.0)),
            Some((30.0, 0.0)),
        ]);
        assert_eq!(p.segments().len(), 2);
        assert_eq!(p.total_length(), 20.0);
        let r = p.revealed(0.75);
        assert_eq!(r.len(), 2);
        assert_eq!(r[1], vec![(20.0, 0.0), (25.0, 0.0)]);
    }

    #[test]
    fn leading_and_repeated_gaps_make_no_empty_segments() {
        let p = LinePath::from_points([None, None, Some((1.0, 1.0)), None, None]);
        assert_eq!(p.segments(), &[vec![(1.0, 1.0)]]);
    }
}
