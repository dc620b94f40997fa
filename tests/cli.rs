use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("demo-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("demo-charts"))
        .stdout(predicate::str::contains("divergence"));
}

#[test]
fn divergence_table_for_builtin_languages() {
    let mut cmd = Command::cargo_bin("demo-charts").unwrap();
    cmd.args(["divergence", "--hover", "Rust"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Kotlin"))
        .stdout(predicate::str::contains("-3.8%"))
        .stdout(predicate::str::contains("Rust").not());
}

#[test]
fn divergence_json_lists_other_bars() {
    let out = Command::cargo_bin("demo-charts")
        .unwrap()
        .args(["divergence", "--hover", "Go", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|r| r["label"] != "Go"));
    assert_eq!(rows[0]["text"], "+13.3%");
}

#[test]
fn unknown_hover_label_fails() {
    let mut cmd = Command::cargo_bin("demo-charts").unwrap();
    cmd.args(["divergence", "--hover", "COBOL"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("COBOL"));
}

#[test]
fn renders_both_charts_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let bar = dir.path().join("bar.svg");
    let line = dir.path().join("line.svg");

    Command::cargo_bin("demo-charts")
        .unwrap()
        .args(["bar", "--hover", "Python", "--out"])
        .arg(&bar)
        .assert()
        .success();
    Command::cargo_bin("demo-charts")
        .unwrap()
        .args(["line", "--elapsed-ms", "2000", "--out"])
        .arg(&line)
        .assert()
        .success()
        .stderr(predicate::str::contains("50% drawn"));

    let svg = std::fs::read_to_string(&bar).unwrap();
    assert!(svg.contains("+10.9%"));
    assert!(line.exists());
}

#[test]
fn export_then_render_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("langs.csv");
    let svg = dir.path().join("bar.svg");

    Command::cargo_bin("demo-charts")
        .unwrap()
        .args(["export", "--dataset", "bar", "--out"])
        .arg(&csv)
        .assert()
        .success();
    Command::cargo_bin("demo-charts")
        .unwrap()
        .args(["bar", "--data"])
        .arg(&csv)
        .arg("--out")
        .arg(&svg)
        .assert()
        .success();
    assert!(std::fs::read_to_string(&svg).unwrap().contains("TypeScript"));
}
