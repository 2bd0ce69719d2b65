use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, io_utils, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let sheet = io_utils::load_table(
        &args.input,
        args.sheet.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )
    .with_context(|| format!("Loading {:?}", args.input))?;
    table::print_table(sheet.headers(), &sheet.display_rows(args.rows));
    info!(
        "Displayed {} row(s) from {:?}",
        args.rows.min(sheet.row_count()),
        args.input
    );
    Ok(())
}
