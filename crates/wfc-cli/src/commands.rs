use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

use wfc_cli::pipeline::{ExtractOptions, discover_records, run_extraction, run_records_update};
use wfc_ingest::WfdbHeaderReader;
use wfc_model::RecordRow;
use wfc_output::{CatalogWriter, TableWriter};

use crate::cli::{ExtractArgs, UpdateRecordsArgs};
use crate::types::{RunKind, RunResult};

pub fn run_extract(args: &ExtractArgs) -> Result<RunResult> {
    let records = discover_records(&args.data_dir)?;
    let options = ExtractOptions {
        skip_numerics: args.skip_numerics,
    };
    if options.skip_numerics {
        info!("numerics processing disabled");
    }

    let mut writer = CatalogWriter::create(&args.output_dir, !options.skip_numerics)
        .with_context(|| format!("create output tables in {}", args.output_dir.display()))?;

    let progress = progress_bar(records.len());
    let stats = run_extraction(
        &WfdbHeaderReader,
        &args.data_dir,
        &records,
        &mut writer,
        options,
        &progress,
    )?;
    progress.finish_and_clear();

    let tables = writer.finish().context("finish output tables")?;
    info!(
        records = stats.records_written,
        failed = stats.records_failed,
        "extraction complete"
    );

    Ok(RunResult {
        kind: RunKind::Extract,
        data_dir: args.data_dir.clone(),
        output: args.output_dir.clone(),
        records_found: records.len(),
        skip_numerics: options.skip_numerics,
        tables,
        stats,
    })
}

pub fn run_update_records(args: &UpdateRecordsArgs) -> Result<RunResult> {
    let records = discover_records(&args.data_dir)?;

    let mut writer = TableWriter::<RecordRow>::create(&args.output_file)
        .with_context(|| format!("create {}", args.output_file.display()))?;

    let progress = progress_bar(records.len());
    let stats = run_records_update(
        &WfdbHeaderReader,
        &args.data_dir,
        &records,
        &mut writer,
        &progress,
    )?;
    progress.finish_and_clear();

    let table = writer.finish().context("finish records table")?;
    info!(
        records = stats.records_written,
        failed = stats.records_failed,
        "records update complete"
    );

    Ok(RunResult {
        kind: RunKind::UpdateRecords,
        data_dir: args.data_dir.clone(),
        output: args.output_file.clone(),
        records_found: records.len(),
        skip_numerics: true,
        tables: vec![table],
        stats,
    })
}

fn progress_bar(len: usize) -> ProgressBar {
    let progress = ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} records {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress
}
