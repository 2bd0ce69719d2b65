use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Clean employee leave spreadsheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the cleaning pipeline over a spreadsheet and write the result
    Clean(CleanArgs),
    /// Preview the first few rows of a spreadsheet in a formatted table
    Preview(PreviewArgs),
    /// Verify that a spreadsheet carries the columns the pipeline requires
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input spreadsheet (.xlsx family, or delimited text)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file; defaults to `updated_<input filename>` beside the input
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Worksheet to read, by 0-based index or name (first sheet if omitted)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Delimiter for delimited-text input/output (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Render the cleaned table to stdout before writing the output file
    #[arg(long)]
    pub preview: bool,
    /// Number of rows to display with --preview
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Write a JSON cleaning report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input spreadsheet to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Worksheet to read, by 0-based index or name (first sheet if omitted)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Delimiter for delimited-text input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Input spreadsheet to check
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Worksheet to read, by 0-based index or name (first sheet if omitted)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Delimiter for delimited-text input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
