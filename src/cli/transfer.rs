//! Deposit, withdrawal and transfer CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::{AccountId, Money};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Balance-moving subcommands
#[derive(Subcommand)]
pub enum MovementCommands {
    /// Deposit money into an account
    Deposit {
        /// Account ID
        id: AccountId,
        /// Amount to deposit
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },
    /// Withdraw money from an account
    Withdraw {
        /// Account ID
        id: AccountId,
        /// Amount to withdraw
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },
    /// Transfer money between two accounts
    Transfer {
        /// Sender account ID
        from: AccountId,
        /// Receiver account ID
        to: AccountId,
        /// Amount to transfer
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },
}

/// Handle a deposit, withdrawal or transfer
pub fn handle_movement_command<S: LedgerStore>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: MovementCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MovementCommands::Deposit { id, amount } => {
            let balance = ledger.deposit_to_account(id, amount)?;
            println!("Deposit successful.");
            println!("New balance: {}", balance.format_with_symbol(symbol));
        }

        MovementCommands::Withdraw { id, amount } => {
            let balance = ledger.withdraw_from_account(id, amount)?;
            println!("Withdrawal successful.");
            println!("New balance: {}", balance.format_with_symbol(symbol));
        }

        MovementCommands::Transfer { from, to, amount } => {
            ledger.transfer(from, to, amount)?;
            println!("Transfer successful.");

            for id in [from, to] {
                let account = ledger.show_account_details(id)?;
                println!(
                    "  {}: {}",
                    account,
                    account.balance().format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
