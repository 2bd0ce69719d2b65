#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Sample sheet used across the command tests: one clean row, one row with a
/// too-short name, one row needing day-first parsing plus blank fills, and
/// one row with an impossible calendar date.
pub fn sample_csv() -> String {
    [
        "Emp Name,DOJ,Op balance,Annual Leaves Credited,Dept,Notes,Extra",
        "Alice M.,2024-03-15,12.5,5,R&D,ok,x",
        "Jo,2024-01-01,1,5,HR,y,z",
        "Bob Stone,15/03/2024,,,Sales,,q",
        "Cara Lane,2024-02-30,3,1,Ops,n,w",
    ]
    .join("\n")
}

/// The same sample sheet as a real workbook, with Alice's joining date as a
/// true date cell and Bob's blanks as genuinely empty cells.
pub fn write_sample_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let headers = [
        "Emp Name",
        "DOJ",
        "Op balance",
        "Annual Leaves Credited",
        "Dept",
        "Notes",
        "Extra",
    ];
    for (idx, header) in headers.iter().enumerate() {
        sheet
            .write_string(0, idx as u16, *header)
            .expect("write header");
    }

    sheet.write_string(1, 0, "Alice M.").expect("write cell");
    sheet
        .write_datetime_with_format(
            1,
            1,
            &NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            &date_format,
        )
        .expect("write date cell");
    sheet.write_number(1, 2, 12.5).expect("write cell");
    sheet.write_number(1, 3, 5.0).expect("write cell");
    sheet.write_string(1, 4, "R&D").expect("write cell");
    sheet.write_string(1, 5, "ok").expect("write cell");
    sheet.write_string(1, 6, "x").expect("write cell");

    sheet.write_string(2, 0, "Jo").expect("write cell");
    sheet
        .write_datetime_with_format(
            2,
            1,
            &NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            &date_format,
        )
        .expect("write date cell");
    sheet.write_number(2, 2, 1.0).expect("write cell");
    sheet.write_number(2, 3, 5.0).expect("write cell");
    sheet.write_string(2, 4, "HR").expect("write cell");
    sheet.write_string(2, 5, "y").expect("write cell");
    sheet.write_string(2, 6, "z").expect("write cell");

    sheet.write_string(3, 0, "Bob Stone").expect("write cell");
    sheet.write_string(3, 1, "15/03/2024").expect("write cell");
    sheet.write_string(3, 4, "Sales").expect("write cell");
    sheet.write_string(3, 6, "q").expect("write cell");

    workbook.save(path).expect("save workbook");
}
