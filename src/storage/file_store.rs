//! Single-file JSON store
//!
//! The document is a JSON array of account records, rewritten in full after
//! every mutation through write-temp-then-rename.

use std::path::{Path, PathBuf};

use crate::error::LedgerResult;
use crate::models::Account;

use super::file_io::{read_json, write_json_atomic};
use super::LedgerStore;

/// Store backed by one JSON file (`bank.json`)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load_snapshot(&self) -> LedgerResult<Option<Vec<Account>>> {
        let accounts: Option<Vec<Account>> = read_json(&self.path)?;
        if let Some(accounts) = &accounts {
            tracing::debug!(path = %self.path.display(), count = accounts.len(), "loaded store");
        }
        Ok(accounts)
    }

    fn persist_snapshot(&self, accounts: &[Account]) -> LedgerResult<()> {
        write_json_atomic(&self.path, accounts)?;
        tracing::debug!(path = %self.path.display(), count = accounts.len(), "persisted store");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{AccountId, Money};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("bank.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_absent_file_is_empty_state() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.load_snapshot().unwrap().is_none());
    }

    #[test]
    fn test_persist_and_reload() {
        let (_temp_dir, store) = create_test_store();
        let accounts = vec![
            Account::open(AccountId::new(1), "Alice", Money::from_major(100)),
            Account::open(AccountId::new(2), "Bob", Money::zero()),
        ];

        store.persist_snapshot(&accounts).unwrap();
        let loaded = store.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded, accounts);
    }

    #[test]
    fn test_document_is_array_of_records() {
        let (_temp_dir, store) = create_test_store();
        let accounts = vec![Account::open(AccountId::new(1), "Alice", Money::from_major(100))];
        store.persist_snapshot(&accounts).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["name"], "Alice");

        // Stable field order
        let id_at = text.find("\"id\"").unwrap();
        let name_at = text.find("\"name\"").unwrap();
        let balance_at = text.find("\"balance\"").unwrap();
        let transactions_at = text.find("\"transactions\"").unwrap();
        assert!(id_at < name_at && name_at < balance_at && balance_at < transactions_at);
    }

    #[test]
    fn test_reads_float_era_store() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(
            store.path(),
            r#"[
    {
        "id": 1,
        "name": "Alice",
        "balance": 50.0,
        "transactions": [
            "2024-03-01 10:00:00.000001 - Account created with ₹150.0",
            "2024-03-01 10:01:00.000001 - Transferred ₹100.0 to Account 2"
        ]
    }
]"#,
        )
        .unwrap();

        let loaded = store.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded[0].balance(), Money::from_major(50));
        assert_eq!(loaded[0].history().len(), 2);
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(store.path(), r#"{"accounts": []}"#).unwrap();
        assert!(matches!(
            store.load_snapshot(),
            Err(LedgerError::CorruptStore(_))
        ));
    }
}
