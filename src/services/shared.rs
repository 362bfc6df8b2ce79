//! Thread-safe handle around a [`Ledger`]
//!
//! The ledger itself is single-threaded. When it is shared, every call runs
//! under one mutex so exactly one operation (including its persist) is in
//! flight at a time and id assignment never races.

use std::sync::{Arc, Mutex};

use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerStore;

use super::ledger::Ledger;

/// Single-writer handle, cheap to clone
pub struct SharedLedger<S: LedgerStore> {
    inner: Arc<Mutex<Ledger<S>>>,
}

impl<S: LedgerStore> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LedgerStore> SharedLedger<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `op` with exclusive access to the ledger
    pub fn with<T>(&self, op: impl FnOnce(&mut Ledger<S>) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut ledger = self
            .inner
            .lock()
            .map_err(|e| LedgerError::Persistence(format!("Ledger lock poisoned: {}", e)))?;
        op(&mut ledger)
    }
}
