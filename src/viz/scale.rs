//! Scales mapping data values to plot-area pixels, plus axis tick generation.

use chrono::{Datelike, NaiveDate};

/// A labelled axis tick at a pixel position along its axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Continuous linear mapping `domain -> range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range. A degenerate domain maps to the middle of the range.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if v.is_nan() {
            return f64::NAN;
        }
        let span = d1 - d0;
        let t = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (v - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` ticks at 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
            return if lo == hi && lo.is_finite() {
                vec![Tick {
                    position: self.map(lo),
                    label: format_tick(lo, 0),
                }]
            } else {
                Vec::new()
            };
        };
        let decimals = if inc < 0.0 {
            (-inc).log10().ceil().max(0.0) as usize
        } else {
            0
        };
        (i1..=i2)
            .map(|i| {
                let v = if inc < 0.0 {
                    i as f64 / -inc
                } else {
                    i as f64 * inc
                };
                Tick {
                    position: self.map(v),
                    label: format_tick(v, decimals),
                }
            })
            .collect()
    }
}

fn format_tick(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    // "-0" reads oddly on an axis
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

/// Nice tick increment for `[start, stop]`. A negative increment `-k` means ticks at `i / k`.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    if count.is_nan() || count <= 0.0 || !start.is_finite() || !stop.is_finite() || start >= stop {
        return None;
    }
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round() as i64;
        i2 = (stop * k).round() as i64;
        if (i1 as f64) / k < start {
            i1 += 1;
        }
        if (i2 as f64) / k > stop {
            i2 -= 1;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round() as i64;
        i2 = (stop / k).round() as i64;
        if (i1 as f64) * k < start {
            i1 += 1;
        }
        if (i2 as f64) * k > stop {
            i2 -= 1;
        }
        inc = k;
    }
    if i2 < i1 {
        if (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        return None;
    }
    Some((i1, i2, inc))
}

/// Discrete bands, one per category, with equal inner and outer padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Bands for `labels` (kept in order, duplicates included) across `range`.
    pub fn new(labels: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = labels.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            labels,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of band `i`.
    pub fn position(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// One tick per band, centred.
    pub fn ticks(&self) -> Vec<Tick> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| Tick {
                position: self.position(i) + self.bandwidth / 2.0,
                label: label.clone(),
            })
            .collect()
    }
}

/// Linear mapping of calendar dates onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (NaiveDate, NaiveDate),
    linear: LinearScale,
}

fn day_number(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self {
            domain,
            linear: LinearScale::new((day_number(domain.0), day_number(domain.1)), range),
        }
    }

    /// Domain spanning the earliest and latest of `dates`.
    pub fn extent<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<(NaiveDate, NaiveDate)> {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    pub fn map(&self, d: NaiveDate) -> f64 {
        self.linear.map(day_number(d))
    }

    /// January-1st ticks every 1, 2, 5, 10, 20, 50 or 100 years, at most `count` of them.
    pub fn year_ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = self.domain;
        let span = (hi.year() - lo.year()).max(0) as usize;
        let count = count.max(1);
        let step = [1, 2, 5, 10, 20, 50, 100]
            .into_iter()
            .find(|s| span / s <= count)
            .unwrap_or(100) as i32;
        let first = lo.year().div_euclid(step) * step;
        (0..)
            .map(|k| first + k * step)
            .take_while(|y| *y <= hi.year())
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .filter(|d| *d >= lo && *d <= hi)
            .map(|d| Tick {
                position: self.map(d),
                label: d.format("%Y").to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ticks: &[Tick]) -> Vec<&str> {
        ticks.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn percentage_axis_ticks_every_ten() {
        let y = LinearScale::new((0.0, 100.0), (440.0, 0.0));
        let ticks = y.ticks(10);
        assert_eq!(
            labels(&ticks),
            ["0", "10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]
        );
        assert_eq!(ticks[0].position, 440.0);
        assert_eq!(ticks[10].position, 0.0);
    }

    #[test]
    fn fractional_ticks_carry_decimals() {
        let y = LinearScale::new((0.0, 1.0), (100.0, 0.0));
        let ticks = y.ticks(5);
        assert_eq!(labels(&ticks), ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let y = LinearScale::new((0.0, 0.0), (100.0, 0.0));
        assert_eq!(y.map(3.0), 50.0);
        assert!(y.map(f64::NAN).is_nan());
    }

    #[test]
    fn band_scale_matches_padding_rule() {
        let x = BandScale::new(vec!["A".into(), "B".into()], (0.0, 220.0), 0.2);
        // step = 220 / (2 - 0.2 + 0.4) = 100
        assert!((x.bandwidth() - 80.0).abs() < 1e-9);
        assert!((x.position(0) - 20.0).abs() < 1e-9);
        assert!((x.position(1) - 120.0).abs() < 1e-9);
        assert_eq!(labels(&x.ticks()), ["A", "B"]);
    }

    #[test]
    fn duplicate_labels_keep_their_own_band() {
        let x = BandScale::new(vec!["A".into(), "A".into()], (0.0, 220.0), 0.2);
        assert_eq!(x.len(), 2);
        assert!(x.position(1) > x.position(0));
    }

    #[test]
    fn fifty_years_tick_every_five() {
        let d0 = NaiveDate::from_ymd_opt(1969, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let x = TimeScale::new((d0, d1), (0.0, 1000.0));
        let ticks = x.year_ticks(10);
        assert_eq!(ticks.first().unwrap().label, "1970");
        assert_eq!(ticks.last().unwrap().label, "2015");
        assert_eq!(ticks.len(), 10);
        assert_eq!(x.map(d0), 0.0);
        assert_eq!(x.map(d1), 1000.0);
    }
}
