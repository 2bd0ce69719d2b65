//! The fixed eight-stage cleaning pipeline.
//!
//! Stage order is load-bearing: later stages depend on the row and column
//! sets produced by earlier ones, so the sequence in [`run`] must not be
//! reordered. Each stage is a pure function from [`Table`] to [`Table`] and
//! is total over any table; [`run`] validates the required columns once up
//! front and then chains the stages.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::{
    data::{Cell, parse_flexible_date},
    frame::{FrameError, Table},
};

pub const NAME_COLUMN: &str = "Emp Name";
pub const JOIN_DATE_COLUMN: &str = "DOJ";
// Upstream paperwork labels this one "OP balance"; the data uses this casing.
pub const BALANCE_COLUMN: &str = "Op balance";
pub const LEAVE_CREDIT_MARKER: &str = "Leaves Credited";

pub const REQUIRED_COLUMNS: &[&str] = &[NAME_COLUMN, JOIN_DATE_COLUMN, BALANCE_COLUMN];

const MIN_NAME_LENGTH: usize = 3;
const LEAVE_CREDIT_VALUE: i64 = 2;
const TRAILING_COLUMNS_DROPPED: usize = 3;

/// Stage 1: drop rows whose name cell is not text with at least three
/// characters after trimming. Numeric, date, and missing names all drop.
pub fn filter_short_names(table: Table) -> Table {
    let Some(idx) = table.column_index(NAME_COLUMN) else {
        return table;
    };
    table.retain_rows(|row| match row.get(idx).and_then(|cell| cell.as_ref()) {
        Some(Cell::Text(name)) => name.trim().chars().count() >= MIN_NAME_LENGTH,
        _ => false,
    })
}

/// Stage 2: drop rows whose joining date neither is a date value already nor
/// parses under the ISO-then-day-first precedence. Missing is never valid.
pub fn filter_invalid_dates(table: Table) -> Table {
    let Some(idx) = table.column_index(JOIN_DATE_COLUMN) else {
        return table;
    };
    table.retain_rows(|row| match row.get(idx).and_then(|cell| cell.as_ref()) {
        Some(Cell::Date(_) | Cell::DateTime(_)) => true,
        Some(Cell::Text(raw)) => parse_flexible_date(raw).is_some(),
        _ => false,
    })
}

/// Stage 3: rewrite surviving joining dates to plain calendar dates with no
/// time-of-day component.
pub fn normalize_join_dates(table: Table) -> Table {
    let Some(idx) = table.column_index(JOIN_DATE_COLUMN) else {
        return table;
    };
    table.map_column(idx, |cell| match cell {
        Some(Cell::DateTime(dt)) => Some(Cell::Date(dt.date())),
        Some(Cell::Text(raw)) => match parse_flexible_date(&raw) {
            Some(date) => Some(Cell::Date(date)),
            None => Some(Cell::Text(raw)),
        },
        other => other,
    })
}

/// Stage 4: missing opening balances become zero.
pub fn default_opening_balance(table: Table) -> Table {
    let Some(idx) = table.column_index(BALANCE_COLUMN) else {
        return table;
    };
    table.map_column(idx, |cell| cell.or(Some(Cell::Int(0))))
}

/// Stage 5: overwrite every cell of every column whose name contains the
/// leave-credit marker with the credited constant. Matching columns are
/// collected before any mutation starts.
pub fn override_leave_credits(table: Table) -> Table {
    let targets = table.columns_containing(LEAVE_CREDIT_MARKER);
    targets.into_iter().fold(table, |table, idx| {
        table.map_column(idx, |_| Some(Cell::Int(LEAVE_CREDIT_VALUE)))
    })
}

fn special_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9\s]+").expect("valid literal pattern"))
}

/// Stage 6: delete characters that are neither alphanumeric nor whitespace
/// from text cells. Typed cells (numbers, dates, booleans) pass through.
pub fn strip_special_chars(table: Table) -> Table {
    table.map_cells(|cell| match cell {
        Some(Cell::Text(raw)) => {
            if special_chars().is_match(&raw) {
                Some(Cell::Text(special_chars().replace_all(&raw, "").into_owned()))
            } else {
                Some(Cell::Text(raw))
            }
        }
        other => other,
    })
}

/// Stage 7: drop the last three columns by position. Tables with three or
/// fewer columns collapse to zero width. Rerunning drops three more columns;
/// the pipeline is one-shot per raw sheet by design.
pub fn drop_trailing_columns(table: Table) -> Table {
    let keep = table.column_count().saturating_sub(TRAILING_COLUMNS_DROPPED);
    table.truncate_columns(keep)
}

/// Stage 8: any cell still missing becomes zero.
pub fn zero_fill_missing(table: Table) -> Table {
    table.map_cells(|cell| cell.or(Some(Cell::Int(0))))
}

/// Summary of one pipeline run, serializable for `clean --report`.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub rows_dropped_short_name: usize,
    pub rows_dropped_invalid_date: usize,
    pub leave_credit_columns: Vec<String>,
    pub output_rows: usize,
    pub output_columns: usize,
}

#[derive(Debug)]
pub struct CleanOutcome {
    pub table: Table,
    pub report: CleanReport,
}

/// Runs the full pipeline in its fixed order, failing fast when a required
/// column is absent.
pub fn run(table: Table) -> Result<CleanOutcome, FrameError> {
    for name in REQUIRED_COLUMNS {
        table.require_column(name)?;
    }
    let input_rows = table.row_count();
    let input_columns = table.column_count();
    let leave_credit_columns = table
        .columns_containing(LEAVE_CREDIT_MARKER)
        .into_iter()
        .map(|idx| table.headers()[idx].clone())
        .collect::<Vec<_>>();

    let table = filter_short_names(table);
    let after_names = table.row_count();
    debug!(
        "Name-length filter dropped {} row(s)",
        input_rows - after_names
    );

    let table = filter_invalid_dates(table);
    let after_dates = table.row_count();
    debug!(
        "Date-validity filter dropped {} row(s)",
        after_names - after_dates
    );

    let table = normalize_join_dates(table);
    let table = default_opening_balance(table);
    let table = override_leave_credits(table);
    let table = strip_special_chars(table);
    let table = drop_trailing_columns(table);
    let table = zero_fill_missing(table);

    let report = CleanReport {
        input_rows,
        input_columns,
        rows_dropped_short_name: input_rows - after_names,
        rows_dropped_invalid_date: after_names - after_dates,
        leave_credit_columns,
        output_rows: table.row_count(),
        output_columns: table.column_count(),
    };
    Ok(CleanOutcome { table, report })
}
