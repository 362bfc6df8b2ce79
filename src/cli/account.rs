//! Account CLI commands
//!
//! Implements CLI commands for opening and inspecting accounts.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::account::{format_account_details, format_account_list, format_history};
use crate::error::LedgerResult;
use crate::models::{AccountId, Money};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Account holder name
        name: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        balance: Money,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account ID
        id: AccountId,
    },
    /// Show the transaction history of an account
    History {
        /// Account ID
        id: AccountId,
    },
}

/// Handle an account command
pub fn handle_account_command<S: LedgerStore>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create { name, balance } => {
            let account = ledger.create_account(&name, balance)?;

            println!("Account created successfully! ID: {}", account.id());
            println!("  Name:    {}", account.name());
            println!("  Balance: {}", account.balance().format_with_symbol(symbol));
        }

        AccountCommands::List => {
            let total = ledger.total_balance();
            print!("{}", format_account_list(ledger.accounts(), total, symbol));
        }

        AccountCommands::Show { id } => {
            let account = ledger.show_account_details(id)?;
            print!("{}", format_account_details(account, symbol));
        }

        AccountCommands::History { id } => {
            let account = ledger.show_account_details(id)?;
            print!("{}", format_history(account));
        }
    }

    Ok(())
}
