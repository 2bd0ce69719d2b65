use anyhow::{Context, Result};
use log::info;

use crate::{cli::CleanArgs, io_utils, pipeline, table};

pub fn execute(args: &CleanArgs) -> Result<()> {
    let input = io_utils::load_table(
        &args.input,
        args.sheet.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )
    .with_context(|| format!("Loading {:?}", args.input))?;
    info!(
        "Loaded {} row(s) across {} column(s) from '{}'",
        input.row_count(),
        input.column_count(),
        args.input.display()
    );

    let outcome = pipeline::run(input)?;
    let report = &outcome.report;
    info!(
        "Pipeline kept {} of {} row(s) ({} short name(s), {} invalid date(s) dropped)",
        report.output_rows,
        report.input_rows,
        report.rows_dropped_short_name,
        report.rows_dropped_invalid_date
    );

    // The preview must render before the output write.
    if args.preview {
        table::print_table(
            outcome.table.headers(),
            &outcome.table.display_rows(args.rows),
        );
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| io_utils::default_output_path(&args.input));
    io_utils::write_table(&output, &outcome.table, args.delimiter)
        .with_context(|| format!("Writing cleaned sheet to {output:?}"))?;
    info!(
        "Cleaned sheet with {} row(s) across {} column(s) written to {:?}",
        report.output_rows, report.output_columns, output
    );

    if let Some(report_path) = args.report.as_deref() {
        let json = serde_json::to_string_pretty(report).context("Serializing cleaning report")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("Writing cleaning report to {report_path:?}"))?;
        info!("Cleaning report written to {report_path:?}");
    }
    Ok(())
}
