//! JSON export functionality
//!
//! Exports the complete ledger with schema versioning and summary metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Money};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub accounts: Vec<Account>,
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    /// Total number of log entries across all accounts
    pub entry_count: usize,
    /// `null` when the sum exceeds the largest representable amount
    pub total_balance: Option<Money>,
}

impl FullExport {
    pub fn from_ledger<S: LedgerStore>(ledger: &Ledger<S>) -> Self {
        let accounts: Vec<Account> = ledger.accounts().cloned().collect();
        let metadata = ExportMetadata {
            account_count: accounts.len(),
            entry_count: accounts.iter().map(|a| a.history().len()).sum(),
            total_balance: ledger.total_balance(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            metadata,
        }
    }
}

/// Export the full ledger as pretty-printed JSON
pub fn export_full_json<S: LedgerStore, W: Write>(
    ledger: &Ledger<S>,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
}
