mod common;

use assert_cmd::Command;
use calamine::{Data, DataType as _, Reader as _, open_workbook_auto};
use chrono::NaiveDate;
use common::TestWorkspace;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn bin() -> Command {
    Command::cargo_bin("sheet-scrub").expect("binary exists")
}

#[test]
fn clean_filters_rows_and_truncates_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("leave.csv", &common::sample_csv());
    let output = workspace.path().join("cleaned.csv");

    bin()
        .args([
            "clean",
            "-i",
            input.to_str().expect("input path utf-8"),
            "-o",
            output.to_str().expect("output path utf-8"),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).expect("read cleaned csv");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("\"Emp Name\",\"DOJ\",\"Op balance\",\"Annual Leaves Credited\"")
    );
    assert_eq!(lines.next(), Some("\"Alice M\",\"2024-03-15\",\"12.5\",\"2\""));
    assert_eq!(lines.next(), Some("\"Bob Stone\",\"2024-03-15\",\"0\",\"2\""));
    assert_eq!(lines.next(), None);
}

#[test]
fn clean_derives_the_updated_output_name() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("leave.csv", &common::sample_csv());

    bin()
        .args(["clean", "-i", input.to_str().expect("input path utf-8")])
        .assert()
        .success();

    assert!(workspace.path().join("updated_leave.csv").exists());
}

#[test]
fn clean_rejects_inputs_without_required_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("broken.csv", "Emp Name,Op balance\nAlice May,3\n");

    bin()
        .args(["clean", "-i", input.to_str().expect("input path utf-8")])
        .assert()
        .failure()
        .stderr(contains("required column 'DOJ' not found"));
}

#[test]
fn clean_accepts_empty_inputs() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("empty.csv", "Emp Name,DOJ,Op balance,Dept\n");
    let output = workspace.path().join("cleaned.csv");

    bin()
        .args([
            "clean",
            "-i",
            input.to_str().expect("input path utf-8"),
            "-o",
            output.to_str().expect("output path utf-8"),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).expect("read cleaned csv");
    assert_eq!(contents.trim_end(), "\"Emp Name\"");
}

#[test]
fn clean_writes_a_json_report() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("leave.csv", &common::sample_csv());
    let output = workspace.path().join("cleaned.csv");
    let report = workspace.path().join("report.json");

    bin()
        .args([
            "clean",
            "-i",
            input.to_str().expect("input path utf-8"),
            "-o",
            output.to_str().expect("output path utf-8"),
            "--report",
            report.to_str().expect("report path utf-8"),
        ])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("read report"))
            .expect("report is valid json");
    assert_eq!(parsed["input_rows"], 4);
    assert_eq!(parsed["output_rows"], 2);
    assert_eq!(parsed["rows_dropped_short_name"], 1);
    assert_eq!(parsed["rows_dropped_invalid_date"], 1);
    assert_eq!(parsed["output_columns"], 4);
    assert_eq!(parsed["leave_credit_columns"][0], "Annual Leaves Credited");
}

#[test]
fn clean_previews_before_writing() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("leave.csv", &common::sample_csv());
    let output = workspace.path().join("cleaned.csv");

    bin()
        .args([
            "clean",
            "-i",
            input.to_str().expect("input path utf-8"),
            "-o",
            output.to_str().expect("output path utf-8"),
            "--preview",
            "--rows",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("Alice M").and(contains("Bob Stone").not()));
}

#[test]
fn clean_processes_excel_workbooks() {
    let workspace = TestWorkspace::new();
    let input = workspace.path().join("leave.xlsx");
    common::write_sample_workbook(&input);
    let output = workspace.path().join("cleaned.xlsx");

    bin()
        .args([
            "clean",
            "-i",
            input.to_str().expect("input path utf-8"),
            "-o",
            output.to_str().expect("output path utf-8"),
        ])
        .assert()
        .success();

    let mut workbook = open_workbook_auto(&output).expect("open cleaned workbook");
    let range = workbook
        .worksheet_range_at(0)
        .expect("first sheet present")
        .expect("readable sheet");
    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();

    assert_eq!(rows.len(), 3);
    let headers: Vec<String> = rows[0]
        .iter()
        .map(|cell| cell.as_string().unwrap_or_default())
        .collect();
    assert_eq!(
        headers,
        ["Emp Name", "DOJ", "Op balance", "Annual Leaves Credited"]
    );

    assert_eq!(rows[1][0].as_string().as_deref(), Some("Alice M"));
    assert_eq!(
        rows[1][1].as_datetime().map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert_eq!(rows[1][2].as_f64(), Some(12.5));
    assert_eq!(rows[1][3].as_f64(), Some(2.0));

    assert_eq!(rows[2][0].as_string().as_deref(), Some("Bob Stone"));
    assert_eq!(
        rows[2][1].as_datetime().map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert_eq!(rows[2][2].as_f64(), Some(0.0));
    assert_eq!(rows[2][3].as_f64(), Some(2.0));
}
