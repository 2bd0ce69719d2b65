//! The in-memory spreadsheet model the pipeline operates on.

use thiserror::Error;

use crate::data::Cell;

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("required column '{0}' not found")]
    MissingColumn(String),
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Ordered named columns and ordered rows. Every row holds exactly one slot
/// per column; `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<Cell>>>,
}

impl Table {
    /// Builds a table, rejecting duplicate headers and squaring up ragged
    /// rows: short rows are padded with missing cells, long rows truncated.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<Cell>>>) -> Result<Self, FrameError> {
        for (idx, header) in headers.iter().enumerate() {
            if headers[..idx].contains(header) {
                return Err(FrameError::DuplicateColumn(header.clone()));
            }
        }
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<Cell>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, FrameError> {
        self.column_index(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Indices of all columns whose name contains `needle`, case-sensitive.
    pub fn columns_containing(&self, needle: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, header)| header.contains(needle))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Cell at (row, column); `None` for missing cells and out-of-range
    /// positions alike.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    pub fn retain_rows<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[Option<Cell>]) -> bool,
    {
        self.rows.retain(|row| predicate(row));
        self
    }

    pub fn map_column<F>(mut self, index: usize, f: F) -> Self
    where
        F: Fn(Option<Cell>) -> Option<Cell>,
    {
        for row in &mut self.rows {
            if let Some(slot) = row.get_mut(index) {
                *slot = f(slot.take());
            }
        }
        self
    }

    pub fn map_cells<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<Cell>) -> Option<Cell>,
    {
        for row in &mut self.rows {
            for slot in row.iter_mut() {
                *slot = f(slot.take());
            }
        }
        self
    }

    /// Keeps only the first `keep` columns, trimming every row to match.
    pub fn truncate_columns(mut self, keep: usize) -> Self {
        self.headers.truncate(keep);
        for row in &mut self.rows {
            row.truncate(keep);
        }
        self
    }

    /// Renders up to `limit` rows as display strings; missing cells render
    /// as empty strings.
    pub fn display_rows(&self, limit: usize) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(Cell::as_display).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}
