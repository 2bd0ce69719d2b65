use anyhow::{Context, Result, bail};
use itertools::Itertools as _;
use log::info;

use crate::{cli::VerifyArgs, io_utils, pipeline};

pub fn execute(args: &VerifyArgs) -> Result<()> {
    let sheet = io_utils::load_table(
        &args.input,
        args.sheet.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )
    .with_context(|| format!("Loading {:?}", args.input))?;

    let missing = pipeline::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|&name| sheet.column_index(name).is_none())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "'{}' is missing required column(s): {}",
            args.input.display(),
            missing.iter().join(", ")
        );
    }

    let leave_columns = sheet
        .columns_containing(pipeline::LEAVE_CREDIT_MARKER)
        .into_iter()
        .map(|idx| sheet.headers()[idx].as_str())
        .collect::<Vec<_>>();
    if leave_columns.is_empty() {
        info!(
            "'{}' carries all required columns; no leave-credit columns found",
            args.input.display()
        );
    } else {
        info!(
            "'{}' carries all required columns and {} leave-credit column(s): {}",
            args.input.display(),
            leave_columns.len(),
            leave_columns.iter().join(", ")
        );
    }
    Ok(())
}
