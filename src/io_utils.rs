//! I/O plumbing: format, delimiter, and encoding resolution, delimited-text
//! reading and writing, and output path derivation.
//!
//! `.xls`-family extensions route to the `excel` module; everything else is
//! treated as delimited text (`.csv` → comma, `.tsv` → tab, with a manual
//! override). Delimited input decodes through `encoding_rs`, defaulting to
//! UTF-8. Delimited output always quotes for round-trip safety.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{
    data::{Cell, infer_cell},
    excel,
    frame::Table,
};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Excel,
    Delimited,
}

pub fn resolve_format(path: &Path) -> SheetFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if EXCEL_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) => {
            SheetFormat::Excel
        }
        _ => SheetFormat::Delimited,
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Default output path: `updated_<input filename>` beside the input, which
/// also keeps the output in the input's format.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    input.with_file_name(format!("updated_{name}"))
}

/// Loads a spreadsheet into a [`Table`], dispatching on the path extension.
pub fn load_table(
    path: &Path,
    sheet: Option<&str>,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
) -> Result<Table> {
    match resolve_format(path) {
        SheetFormat::Excel => excel::read_table(path, sheet),
        SheetFormat::Delimited => {
            if sheet.is_some() {
                debug!("--sheet has no effect on delimited input");
            }
            let delimiter = resolve_delimiter(path, delimiter);
            let encoding = resolve_encoding(encoding_label)?;
            read_delimited(path, delimiter, encoding)
        }
    }
}

/// Writes a [`Table`], dispatching on the output path extension.
pub fn write_table(path: &Path, table: &Table, delimiter: Option<u8>) -> Result<()> {
    match resolve_format(path) {
        SheetFormat::Excel => excel::write_table(path, table),
        SheetFormat::Delimited => write_delimited(path, table, resolve_delimiter(path, delimiter)),
    }
}

fn read_delimited(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let header_record = reader.byte_headers().context("Reading header row")?.clone();
    let headers = decode_record(&header_record, encoding)?;

    let mut rows = Vec::new();
    for (ordinal, result) in reader.into_byte_records().enumerate() {
        let record = result.with_context(|| format!("Reading row {}", ordinal + 2))?;
        let decoded = decode_record(&record, encoding)?;
        rows.push(decoded.iter().map(|field| infer_cell(field)).collect());
    }
    Ok(Table::new(headers, rows)?)
}

fn write_delimited(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(table.headers())
        .context("Writing output headers")?;
    for row in table.rows() {
        let record = row
            .iter()
            .map(|cell| cell.as_ref().map(Cell::as_display).unwrap_or_default())
            .collect::<Vec<_>>();
        writer.write_record(&record).context("Writing output row")?;
    }
    writer.flush().context("Flushing output")?;
    Ok(())
}

fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_resolution_follows_the_extension() {
        assert_eq!(resolve_format(Path::new("a.xlsx")), SheetFormat::Excel);
        assert_eq!(resolve_format(Path::new("a.XLSM")), SheetFormat::Excel);
        assert_eq!(resolve_format(Path::new("a.csv")), SheetFormat::Delimited);
        assert_eq!(resolve_format(Path::new("a")), SheetFormat::Delimited);
    }

    #[test]
    fn delimiter_resolution_prefers_the_override() {
        assert_eq!(resolve_delimiter(Path::new("a.tsv"), None), b'\t');
        assert_eq!(resolve_delimiter(Path::new("a.csv"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("a.tsv"), Some(b'|')), b'|');
    }

    #[test]
    fn default_output_name_gets_the_updated_prefix() {
        assert_eq!(
            default_output_path(Path::new("/data/leave.xlsx")),
            PathBuf::from("/data/updated_leave.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("leave.csv")),
            PathBuf::from("updated_leave.csv")
        );
    }
}
