//! Audit log and consistency check commands

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Print the most recent `limit` audit entries, oldest first
pub fn handle_audit_command(paths: &LedgerPaths, limit: usize) -> LedgerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

/// Check every account's balance against its history
///
/// Fails when any account disagrees, so scripts can rely on the exit code.
pub fn handle_verify_command<S: LedgerStore>(ledger: &Ledger<S>) -> LedgerResult<()> {
    let problems = ledger.verify();

    if problems.is_empty() {
        println!(
            "All {} account(s) reconcile with their history.",
            ledger.len()
        );
        return Ok(());
    }

    for (id, problem) in &problems {
        println!("Account {}: {}", id, problem);
    }

    Err(LedgerError::Validation(format!(
        "{} account(s) do not reconcile with their history",
        problems.len()
    )))
}
