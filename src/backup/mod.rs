//! Backup system for BankLite
//!
//! Snapshots of the store are written to the backup directory as dated JSON
//! archives and can be restored over the live store.
//!
//! # Backup Format
//!
//! - `schema_version`: Version for migration support
//! - `created_at`: Timestamp when backup was created
//! - `accounts`: The account records exactly as the store holds them
//!
//! # Example
//!
//! ```rust,ignore
//! use banklite::backup::{BackupManager, RestoreManager};
//!
//! let manager = BackupManager::new(paths.clone(), settings.backup_retention);
//! let (backup_path, _deleted) = manager.create_backup_with_retention()?;
//!
//! let restored = RestoreManager::new(paths).restore_from_file(&backup_path)?;
//! println!("Restored {} accounts", restored.accounts_restored);
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult};
