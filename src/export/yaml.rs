//! YAML export functionality

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::services::Ledger;
use crate::storage::LedgerStore;

use super::json::FullExport;

/// Export the full ledger as YAML with a short header comment
pub fn export_full_yaml<S: LedgerStore, W: Write>(
    ledger: &Ledger<S>,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger);
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# BankLite ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))
}
