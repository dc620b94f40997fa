use std::fs;
use std::path::PathBuf;

use demo_charts::datasets;
use demo_charts::models::{CategoryDatum, TimeSeriesDatum};
use demo_charts::storage;

#[test]
fn save_categories_csv_and_json() {
    let rows = datasets::languages();
    let dir = tempfile::tempdir().unwrap();

    let csv_path: PathBuf = dir.path().join("langs.csv");
    storage::save_categories_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("label,value"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert_eq!(storage::load_categories(&csv_path).unwrap(), rows);

    let json_path: PathBuf = dir.path().join("langs.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    assert_eq!(v[0]["label"], "Rust");
    assert_eq!(storage::load_categories(&json_path).unwrap(), rows);
}

#[test]
fn series_keeps_missing_months_through_csv() {
    let mut rows = datasets::unemployment().unwrap();
    rows[3].rate = None;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.csv");
    storage::save_series_csv(&rows, &path).unwrap();

    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.starts_with("date,rate"));
    assert!(txt.contains("Jan 1969,3.4"));
    assert!(txt.contains("Jan 1972,\n"));

    let back: Vec<TimeSeriesDatum> = storage::load_series(&path).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn series_json_round_trip() {
    let rows = datasets::unemployment().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");
    storage::save_json(&rows, &path).unwrap();
    assert_eq!(storage::load_series(&path).unwrap(), rows);
}

#[test]
fn bad_month_in_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "date,rate\nJan 1969,3.4\n1969-02,3.4\n").unwrap();
    let err = storage::load_series(&path).unwrap_err();
    assert!(err.to_string().contains("1969-02"));
}

// Cells starting with '=', '+', '-' or '@' would be evaluated by spreadsheet tools,
// so text columns are written with a leading single quote.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let rows = vec![
        CategoryDatum::new("=HYPERLINK(\"http://evil\")", 1.0),
        CategoryDatum::new("+SUM(A1:A9)", 2.0),
        CategoryDatum::new("@foo", 3.0),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inject.csv");
    storage::save_categories_csv(&rows, &path).unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    for line in txt.lines().skip(1) {
        let first = line.trim_start_matches('"').chars().next().unwrap();
        assert_eq!(first, '\'', "unprefixed cell in {line:?}");
    }
}

#[test]
fn nan_values_survive_a_json_round_trip() {
    let rows = vec![CategoryDatum::new("ok", 50.0), CategoryDatum::new("bad", f64::NAN)];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.json");
    storage::save_json(&rows, &path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("null"));

    let back = storage::load_categories(&path).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back[0], rows[0]);
    assert_eq!(back[1].label, "bad");
    assert!(back[1].value.is_nan());
}

#[test]
fn non_numeric_json_value_loads_as_nan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.json");
    let body = r#"[{"label":"Rust","value":"78.9"},{"label":"Oops","value":"lots"}]"#;
    fs::write(&path, body).unwrap();
    let back = storage::load_categories(&path).unwrap();
    assert_eq!(back[0].value, 78.9);
    assert!(back[1].value.is_nan());
}
