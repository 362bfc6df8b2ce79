//! Storage layer for BankLite
//!
//! The ledger never touches the filesystem directly. It is handed a
//! [`LedgerStore`], a capability to load and persist a full snapshot of the
//! account collection. [`JsonFileStore`] keeps the snapshot in a single
//! pretty-printed JSON file replaced atomically on every save;
//! [`MemoryStore`] keeps it in memory for tests.

pub mod file_io;
pub mod file_store;
pub mod memory;

pub use file_io::{read_json, write_json_atomic};
pub use file_store::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::LedgerResult;
use crate::models::Account;

/// Load/persist capability for the whole account collection
pub trait LedgerStore {
    /// Read the last persisted snapshot
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet. A snapshot that
    /// exists but cannot be read is an error.
    fn load_snapshot(&self) -> LedgerResult<Option<Vec<Account>>>;

    /// Replace the persisted snapshot with `accounts`, in the given order
    fn persist_snapshot(&self, accounts: &[Account]) -> LedgerResult<()>;

    /// Short human-readable location, used in log messages
    fn describe(&self) -> String;
}
