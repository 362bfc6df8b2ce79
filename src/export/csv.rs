//! CSV export functionality

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::services::Ledger;
use crate::storage::LedgerStore;

fn export_error(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// One row per account: `id,name,balance,entries`
///
/// Balances are written as plain decimals without a currency symbol.
pub fn export_accounts_csv<S: LedgerStore, W: Write>(
    ledger: &Ledger<S>,
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "name", "balance", "entries"])
        .map_err(export_error)?;

    for account in ledger.accounts() {
        csv_writer
            .write_record([
                account.id().to_string(),
                account.name().to_string(),
                account.balance().format_with_symbol(""),
                account.history().len().to_string(),
            ])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)
}

/// One row per log entry: `account_id,name,timestamp,description,amount`
///
/// `amount` is the signed effect of the entry on the balance.
pub fn export_history_csv<S: LedgerStore, W: Write>(
    ledger: &Ledger<S>,
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["account_id", "name", "timestamp", "description", "amount"])
        .map_err(export_error)?;

    for account in ledger.accounts() {
        for entry in account.history() {
            csv_writer
                .write_record([
                    account.id().to_string(),
                    account.name().to_string(),
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
                    entry.kind.to_string(),
                    entry.signed_effect().format_with_symbol(""),
                ])
                .map_err(export_error)?;
        }
    }

    csv_writer.flush().map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Money};
    use crate::storage::MemoryStore;

    fn sample_ledger() -> Ledger<MemoryStore> {
        let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
        ledger.create_account("Alice", Money::from_major(100)).unwrap();
        ledger.create_account("Bob, Jr.", Money::zero()).unwrap();
        ledger
            .transfer(AccountId::new(1), AccountId::new(2), Money::from_minor(2550))
            .unwrap();
        ledger
    }

    #[test]
    fn test_accounts_csv() {
        let mut out = Vec::new();
        export_accounts_csv(&sample_ledger(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "id,name,balance,entries");
        assert_eq!(lines[1], "1,Alice,74.50,2");
        assert_eq!(lines[2], "2,\"Bob, Jr.\",25.50,2");
    }

    #[test]
    fn test_history_csv() {
        let mut out = Vec::new();
        export_history_csv(&sample_ledger(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[1][3], "Transferred ₹25.50 to Account 2");
        assert_eq!(&rows[1][4], "-25.50");
        assert_eq!(&rows[3][3], "Received ₹25.50 from Account 1");
        assert_eq!(&rows[3][4], "25.50");
    }
}
