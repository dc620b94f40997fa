//! Read and write datasets as CSV or JSON.
//!
//! CSV layouts:
//! - categories: `label,value`
//! - series: `date,rate` with dates like `Jan 1969` and an empty rate for missing months
//!
//! JSON files hold a pretty-printed array of the model structs.

use crate::datasets::parse_series;
use crate::error::DatasetError;
use crate::models::{CategoryDatum, TimeSeriesDatum, format_month, parse_value};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CategoryRow {
    label: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SeriesRow {
    date: String,
    #[serde(default)]
    rate: String,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Spreadsheet tools evaluate cells starting with these characters as formulas.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Load categories from `.json` or CSV (any other extension).
pub fn load_categories<P: AsRef<Path>>(path: P) -> Result<Vec<CategoryDatum>, DatasetError> {
    let path = path.as_ref();
    if is_json(path) {
        let f = BufReader::new(File::open(path)?);
        return Ok(serde_json::from_reader(f)?);
    }
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut out = Vec::new();
    for row in rdr.deserialize::<CategoryRow>() {
        let row = row?;
        out.push(CategoryDatum::new(row.label, parse_value(&row.value)));
    }
    Ok(out)
}

/// Load a time series from `.json` or CSV (any other extension).
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Vec<TimeSeriesDatum>, DatasetError> {
    let path = path.as_ref();
    if is_json(path) {
        let f = BufReader::new(File::open(path)?);
        return Ok(serde_json::from_reader(f)?);
    }
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let rows = rdr
        .deserialize::<SeriesRow>()
        .collect::<Result<Vec<_>, _>>()?;
    parse_series(rows.iter().map(|r| (r.date.as_str(), r.rate.as_str())))
}

/// Save categories as CSV with header.
pub fn save_categories_csv<P: AsRef<Path>>(
    data: &[CategoryDatum],
    path: P,
) -> Result<(), DatasetError> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("label", "value"))?;
    for d in data {
        wtr.serialize((sanitize_cell(&d.label), d.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a series as CSV with header; missing rates are empty cells.
pub fn save_series_csv<P: AsRef<Path>>(
    data: &[TimeSeriesDatum],
    path: P,
) -> Result<(), DatasetError> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("date", "rate"))?;
    for d in data {
        wtr.serialize((format_month(d.date), d.rate))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable dataset as a pretty JSON array.
pub fn save_json<T: serde::Serialize, P: AsRef<Path>>(
    data: &[T],
    path: P,
) -> Result<(), DatasetError> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(data)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn categories_round_trip_through_csv() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("langs.csv");
        let data = vec![CategoryDatum::new("A", 90.0), CategoryDatum::new("B", 60.5)];
        save_categories_csv(&data, &p).unwrap();
        assert_eq!(load_categories(&p).unwrap(), data);
    }

    #[test]
    fn formula_like_labels_are_prefixed() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(sanitize_cell("@foo"), "'@foo");
        assert_eq!(sanitize_cell("C#"), "C#");
    }

    #[test]
    fn non_numeric_value_loads_as_nan() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.csv");
        std::fs::write(&p, "label,value\nRust,78.9\nOops,lots\n").unwrap();
        let data = load_categories(&p).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data[1].value.is_nan());
    }
}
