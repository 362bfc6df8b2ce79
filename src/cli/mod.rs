//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger service.

pub mod account;
pub mod audit;
pub mod backup;
pub mod export;
pub mod menu;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use audit::{handle_audit_command, handle_verify_command};
pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportArgs};
pub use menu::{run_menu, Menu, MenuChoice};
pub use transfer::{handle_movement_command, MovementCommands};
