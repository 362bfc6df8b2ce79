//! Backup restoration for BankLite

use std::fs;
use std::path::Path;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::services::Ledger;
use crate::storage::{JsonFileStore, LedgerStore, MemoryStore};

use super::manager::{BackupArchive, BACKUP_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: LedgerPaths,
}

/// Outcome of a restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreResult {
    pub accounts_restored: usize,
}

impl RestoreManager {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Read and validate a backup without touching the store
    pub fn load_archive(&self, backup_path: &Path) -> LedgerResult<BackupArchive> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| LedgerError::Backup(format!("Failed to read backup file: {}", e)))?;

        let archive: BackupArchive = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Backup(format!("Failed to parse backup file: {}", e)))?;

        if archive.schema_version > BACKUP_SCHEMA_VERSION {
            return Err(LedgerError::Backup(format!(
                "Unsupported backup schema version {}",
                archive.schema_version
            )));
        }

        // Same checks the ledger applies when opening a store
        Ledger::open(MemoryStore::with_snapshot(archive.accounts.clone()))
            .map_err(|e| LedgerError::Backup(format!("Backup is not a valid ledger: {}", e)))?;

        Ok(archive)
    }

    /// Replace the store with the contents of a backup file
    ///
    /// The store is replaced atomically; take a backup first if the current
    /// state may be needed.
    pub fn restore_from_file(&self, backup_path: &Path) -> LedgerResult<RestoreResult> {
        let archive = self.load_archive(backup_path)?;
        self.paths.ensure_directories()?;

        JsonFileStore::new(self.paths.store_file()).persist_snapshot(&archive.accounts)?;
        tracing::info!(path = %backup_path.display(), accounts = archive.accounts.len(), "backup restored");

        Ok(RestoreResult {
            accounts_restored: archive.accounts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::BackupManager;
    use crate::models::{Account, AccountId, Money};
    use tempfile::TempDir;

    fn setup() -> (LedgerPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        (paths, temp_dir)
    }

    #[test]
    fn test_backup_then_restore() {
        let (paths, _temp) = setup();
        let store = JsonFileStore::new(paths.store_file());

        let mut ledger = Ledger::open(store.clone()).unwrap();
        ledger.create_account("Alice", Money::from_major(100)).unwrap();
        let backup_path = BackupManager::new(paths.clone(), 5).create_backup().unwrap();

        ledger.withdraw_from_account(AccountId::new(1), Money::from_major(60)).unwrap();
        ledger.create_account("Bob", Money::zero()).unwrap();

        let result = RestoreManager::new(paths).restore_from_file(&backup_path).unwrap();
        assert_eq!(result.accounts_restored, 1);

        let restored = Ledger::open(store).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(
            restored.show_account_details(AccountId::new(1)).unwrap().balance(),
            Money::from_major(100)
        );
    }

    #[test]
    fn test_invalid_backup_leaves_store_alone() {
        let (paths, temp) = setup();
        let store = JsonFileStore::new(paths.store_file());
        let accounts = vec![Account::open(AccountId::new(1), "Alice", Money::zero())];
        store.persist_snapshot(&accounts).unwrap();

        let bad = temp.path().join("bad.json");
        let dup = Account::open(AccountId::new(3), "Dup", Money::zero());
        let archive = BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: chrono::Utc::now(),
            accounts: vec![dup.clone(), dup],
        };
        fs::write(&bad, serde_json::to_string(&archive).unwrap()).unwrap();

        let err = RestoreManager::new(paths).restore_from_file(&bad).unwrap_err();
        assert!(matches!(err, LedgerError::Backup(_)));
        assert_eq!(store.load_snapshot().unwrap().unwrap(), accounts);
    }

    #[test]
    fn test_unreadable_backup() {
        let (paths, temp) = setup();
        let garbage = temp.path().join("garbage.json");
        fs::write(&garbage, "nope").unwrap();

        let manager = RestoreManager::new(paths);
        assert!(matches!(
            manager.load_archive(&garbage),
            Err(LedgerError::Backup(_))
        ));
        assert!(matches!(
            manager.load_archive(&temp.path().join("missing.json")),
            Err(LedgerError::Backup(_))
        ));
    }
}
