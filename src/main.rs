use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use banklite::audit::AuditLogger;
use banklite::backup::BackupManager;
use banklite::cli::{
    handle_account_command, handle_audit_command, handle_backup_command, handle_export_command,
    handle_movement_command, handle_verify_command, run_menu,
};
use banklite::config::paths::{LedgerPaths, DATA_DIR_ENV};
use banklite::config::settings::Settings;
use banklite::services::Ledger;
use banklite::storage::JsonFileStore;
use banklite::LedgerError;

#[derive(Parser)]
#[command(
    name = "banklite",
    version,
    about = "Single-user bank account ledger",
    long_about = "BankLite keeps a small ledger of bank accounts with deposits, \
                  withdrawals and transfers. Every change is saved to a JSON \
                  store immediately. Run without a command for the interactive menu."
)]
struct Cli {
    /// Base directory for the store, settings, audit log and backups
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Menu,

    /// Account management commands
    #[command(subcommand)]
    Account(banklite::cli::AccountCommands),

    #[command(flatten)]
    Movement(banklite::cli::MovementCommands),

    /// Check every balance against its transaction history
    Verify,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(banklite::cli::BackupCommands),

    /// Export the ledger
    Export(banklite::cli::ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    banklite::logging::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    paths
        .ensure_directories()
        .context("Failed to prepare the data directory")?;
    let settings = Settings::load_or_create(&paths)?;

    // Config, backup and audit commands never open the store
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Config => print_config(&paths, &settings),
        Commands::Backup(cmd) => handle_backup_command(&paths, &settings, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&paths, limit)?,
        Commands::Menu => {
            let mut ledger = open_ledger(&paths, &settings)?;
            let stdin = io::stdin();
            run_menu(
                &mut ledger,
                &settings.currency_symbol,
                stdin.lock(),
                io::stdout(),
            )?;
        }
        Commands::Account(cmd) => {
            let mut ledger = open_ledger(&paths, &settings)?;
            handle_account_command(&mut ledger, &settings, cmd)?;
        }
        Commands::Movement(cmd) => {
            let mut ledger = open_ledger(&paths, &settings)?;
            handle_movement_command(&mut ledger, &settings, cmd)?;
        }
        Commands::Verify => {
            let ledger = open_ledger(&paths, &settings)?;
            handle_verify_command(&ledger)?;
        }
        Commands::Export(args) => {
            let ledger = open_ledger(&paths, &settings)?;
            handle_export_command(&ledger, args)?;
        }
    }

    Ok(())
}

fn open_ledger(paths: &LedgerPaths, settings: &Settings) -> Result<Ledger<JsonFileStore>> {
    if settings.backup_on_start {
        let manager = BackupManager::new(paths.clone(), settings.backup_retention);
        if let Err(err) = manager.create_backup_with_retention() {
            tracing::warn!(error = %err, "backup on start failed");
        }
    }

    let store = JsonFileStore::new(paths.store_file());
    let ledger = Ledger::open(store).map_err(|err| match err {
        LedgerError::CorruptStore(_) => anyhow::Error::new(err).context(format!(
            "Cannot load {}; fix the file or run 'banklite backup restore latest --force'",
            paths.store_file().display()
        )),
        other => anyhow::Error::new(other),
    })?;

    if !settings.audit_enabled {
        return Ok(ledger);
    }
    Ok(ledger.with_audit(AuditLogger::new(paths.audit_log())))
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("BankLite Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Store file:       {}", paths.store_file().display());
    println!("Backup directory: {}", paths.backup_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Audit enabled:    {}", settings.audit_enabled);
    println!("  Backup on start:  {}", settings.backup_on_start);
    println!("  Backup retention: {}", settings.backup_retention);
}
