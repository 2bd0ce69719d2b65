//! Excel workbook loading (calamine) and writing (rust_xlsxwriter).

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, DataType as _, Range, Reader as _, open_workbook_auto};
use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Workbook};

use crate::{data::Cell, frame::Table};

/// Reads one worksheet into a [`Table`]. The first row supplies the headers;
/// unnamed header cells get positional `column_N` names. `sheet` selects a
/// worksheet by 0-based index or by name, defaulting to the first sheet.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    if workbook.sheet_names().is_empty() {
        return Err(anyhow!("Workbook {path:?} has no worksheets"));
    }
    let range = match sheet {
        Some(selector) => match selector.parse::<usize>() {
            Ok(index) => workbook
                .worksheet_range_at(index)
                .ok_or_else(|| anyhow!("Workbook {path:?} has no sheet at index {index}"))?
                .with_context(|| format!("Reading sheet {index} of {path:?}"))?,
            Err(_) => workbook
                .worksheet_range(selector)
                .with_context(|| format!("Reading sheet '{selector}' of {path:?}"))?,
        },
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("Workbook {path:?} has no first sheet"))?
            .with_context(|| format!("Reading first sheet of {path:?}"))?,
    };
    range_to_table(&range)
}

fn range_to_table(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::new(Vec::new(), Vec::new())?);
    };
    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.as_string().unwrap_or_default();
            if name.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect::<Vec<_>>();
    let width = headers.len();
    let data = rows
        .map(|row| {
            (0..width)
                .map(|idx| row.get(idx).and_then(convert_cell))
                .collect()
        })
        .collect();
    Ok(Table::new(headers, data)?)
}

fn convert_cell(cell: &Data) -> Option<Cell> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        Data::Int(i) => Some(Cell::Int(*i)),
        Data::Float(f) => Some(Cell::Float(*f)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| {
                if dt.time() == NaiveTime::MIN {
                    Cell::Date(dt.date())
                } else {
                    Cell::DateTime(dt)
                }
            })
            .or_else(|| cell.as_string().map(Cell::Text)),
        Data::DurationIso(s) => Some(Cell::Text(s.clone())),
    }
}

/// Writes a [`Table`] as a single-worksheet workbook. Date cells carry a
/// `yyyy-mm-dd` number format so they render as calendar dates.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (idx, header) in table.headers().iter().enumerate() {
        worksheet
            .write_string(0, idx as u16, header)
            .with_context(|| format!("Writing header '{header}'"))?;
    }
    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_number = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let column = col_idx as u16;
            match cell {
                None => {}
                Some(Cell::Text(s)) => {
                    worksheet.write_string(row_number, column, s)?;
                }
                Some(Cell::Int(i)) => {
                    worksheet.write_number(row_number, column, *i as f64)?;
                }
                Some(Cell::Float(f)) => {
                    worksheet.write_number(row_number, column, *f)?;
                }
                Some(Cell::Bool(b)) => {
                    worksheet.write_boolean(row_number, column, *b)?;
                }
                Some(Cell::Date(d)) => {
                    worksheet.write_datetime_with_format(row_number, column, d, &date_format)?;
                }
                Some(Cell::DateTime(dt)) => {
                    worksheet.write_datetime_with_format(
                        row_number,
                        column,
                        dt,
                        &datetime_format,
                    )?;
                }
            }
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("Saving workbook {path:?}"))?;
    Ok(())
}
