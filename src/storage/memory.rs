//! In-memory store
//!
//! Clones share the same snapshot, so a test can hand one clone to a
//! ledger and inspect or sabotage persistence through another.

use std::sync::{Arc, RwLock};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Account;

use super::LedgerStore;

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: Option<Vec<Account>>,
    fail_writes: bool,
    writes: usize,
}

/// Store that keeps the snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted snapshot
    pub fn with_snapshot(accounts: Vec<Account>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.snapshot = Some(accounts);
        }
        store
    }

    /// Make every following persist fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_writes = fail;
        }
    }

    /// Snapshot as last persisted
    pub fn snapshot(&self) -> Option<Vec<Account>> {
        self.state.read().ok().and_then(|s| s.snapshot.clone())
    }

    /// Number of successful persists
    pub fn write_count(&self) -> usize {
        self.state.read().map(|s| s.writes).unwrap_or(0)
    }
}

impl LedgerStore for MemoryStore {
    fn load_snapshot(&self) -> LedgerResult<Option<Vec<Account>>> {
        let state = self.state.read().map_err(|e| {
            LedgerError::CorruptStore(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(state.snapshot.clone())
    }

    fn persist_snapshot(&self, accounts: &[Account]) -> LedgerResult<()> {
        let mut state = self.state.write().map_err(|e| {
            LedgerError::Persistence(format!("Failed to acquire write lock: {}", e))
        })?;

        if state.fail_writes {
            return Err(LedgerError::Persistence("simulated write failure".into()));
        }

        state.snapshot = Some(accounts.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Money};

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        assert!(store.load_snapshot().unwrap().is_none());

        let accounts = vec![Account::open(AccountId::new(1), "Alice", Money::zero())];
        store.persist_snapshot(&accounts).unwrap();

        assert_eq!(handle.snapshot(), Some(accounts));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn test_failing_writes_leave_snapshot() {
        let store = MemoryStore::with_snapshot(Vec::new());
        store.set_fail_writes(true);

        let accounts = vec![Account::open(AccountId::new(1), "Alice", Money::zero())];
        assert!(matches!(
            store.persist_snapshot(&accounts),
            Err(LedgerError::Persistence(_))
        ));
        assert_eq!(store.snapshot(), Some(Vec::new()));
        assert_eq!(store.write_count(), 0);
    }
}
