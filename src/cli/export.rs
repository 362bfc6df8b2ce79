//! CLI command for data export
//!
//! Writes the ledger to a file, or to stdout when no output path is given.

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{csv, json, yaml, ExportFormat};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format (csv, history, json, yaml)
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command<S: LedgerStore>(
    ledger: &Ledger<S>,
    args: ExportArgs,
) -> LedgerResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(ledger, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            println!(
                "Exported {} account(s) as {} to: {}",
                ledger.len(),
                args.format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(ledger, args.format, &mut writer)?;
        }
    }

    Ok(())
}

/// Write `ledger` in `format` to `writer`
pub fn write_export<S: LedgerStore, W: Write>(
    ledger: &Ledger<S>,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::AccountsCsv => csv::export_accounts_csv(ledger, writer),
        ExportFormat::HistoryCsv => csv::export_history_csv(ledger, writer),
        ExportFormat::Json => json::export_full_json(ledger, writer),
        ExportFormat::Yaml => yaml::export_full_yaml(ledger, writer),
    }
}
