//! Interactive numbered menu
//!
//! Reads choices and field values line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so the same loop serves the terminal
//! and the tests. Operation errors are printed and the menu is shown again;
//! only I/O failures on the console itself end the loop with an error.

use std::io::{BufRead, Write};

use crate::error::{LedgerError, LedgerResult};
use crate::models::money::DEFAULT_SYMBOL;
use crate::models::{AccountId, Money};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// One numbered menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Deposit,
    Withdraw,
    ViewBalance,
    ViewHistory,
    Exit,
    Transfer,
}

impl MenuChoice {
    /// Menu entries in display order
    pub const ALL: [MenuChoice; 7] = [
        Self::CreateAccount,
        Self::Deposit,
        Self::Withdraw,
        Self::ViewBalance,
        Self::ViewHistory,
        Self::Exit,
        Self::Transfer,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateAccount),
            "2" => Some(Self::Deposit),
            "3" => Some(Self::Withdraw),
            "4" => Some(Self::ViewBalance),
            "5" => Some(Self::ViewHistory),
            "6" => Some(Self::Exit),
            "7" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::CreateAccount => 1,
            Self::Deposit => 2,
            Self::Withdraw => 3,
            Self::ViewBalance => 4,
            Self::ViewHistory => 5,
            Self::Exit => 6,
            Self::Transfer => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateAccount => "Create Account",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::ViewBalance => "View Balance",
            Self::ViewHistory => "View Transaction History",
            Self::Exit => "Exit",
            Self::Transfer => "Transfer Money",
        }
    }
}

enum Step {
    Continue,
    Quit,
}

/// A menu session bound to a ledger and a console
pub struct Menu<'a, S: LedgerStore, R, W> {
    ledger: &'a mut Ledger<S>,
    input: R,
    output: W,
    symbol: String,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    pub fn new(ledger: &'a mut Ledger<S>, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }

    /// Currency symbol used when printing balances
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> LedgerResult<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice.")?;
                continue;
            };

            match self.perform(choice) {
                Ok(Step::Continue) => {}
                Ok(Step::Quit) => break,
                Err(err) => {
                    tracing::debug!(choice = choice.number(), error = %err, "menu action failed");
                    writeln!(self.output, "Error: {}", err)?;
                }
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> LedgerResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "==== BankLite System ====")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    fn perform(&mut self, choice: MenuChoice) -> LedgerResult<Step> {
        match choice {
            MenuChoice::CreateAccount => {
                let Some(name) = self.prompt("Enter account holder name: ")? else {
                    return Ok(Step::Quit);
                };
                let Some(initial) = self.prompt_amount("Enter initial balance: ")? else {
                    return Ok(Step::Quit);
                };
                let account = self.ledger.create_account(&name, initial)?;
                writeln!(self.output, "Account created successfully! ID: {}", account.id())?;
            }

            MenuChoice::Deposit => {
                let Some(id) = self.prompt_id("Enter account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let Some(amount) = self.prompt_amount("Enter deposit amount: ")? else {
                    return Ok(Step::Quit);
                };
                self.ledger.deposit_to_account(id, amount)?;
                writeln!(self.output, "Deposit successful.")?;
            }

            MenuChoice::Withdraw => {
                let Some(id) = self.prompt_id("Enter account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let Some(amount) = self.prompt_amount("Enter withdrawal amount: ")? else {
                    return Ok(Step::Quit);
                };
                self.ledger.withdraw_from_account(id, amount)?;
                writeln!(self.output, "Withdrawal successful.")?;
            }

            MenuChoice::ViewBalance => {
                let Some(id) = self.prompt_id("Enter account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let balance = self.ledger.show_account_details(id)?.balance();
                writeln!(
                    self.output,
                    "Current Balance: {}",
                    balance.format_with_symbol(&self.symbol)
                )?;
            }

            MenuChoice::ViewHistory => {
                let Some(id) = self.prompt_id("Enter account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let account = self.ledger.show_account_details(id)?;
                writeln!(self.output, "Transaction History:")?;
                for entry in account.history() {
                    writeln!(self.output, "{}", entry)?;
                }
            }

            MenuChoice::Exit => {
                writeln!(self.output, "Exiting BankLite. Goodbye!")?;
                return Ok(Step::Quit);
            }

            MenuChoice::Transfer => {
                let Some(from) = self.prompt_id("Enter sender account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let Some(to) = self.prompt_id("Enter receiver account ID: ")? else {
                    return Ok(Step::Quit);
                };
                let Some(amount) = self.prompt_amount("Enter transfer amount: ")? else {
                    return Ok(Step::Quit);
                };
                self.ledger.transfer(from, to, amount)?;
                writeln!(self.output, "Transfer successful.")?;
            }
        }

        Ok(Step::Continue)
    }

    /// Print `label` and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> LedgerResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_id(&mut self, label: &str) -> LedgerResult<Option<AccountId>> {
        self.prompt(label)?
            .map(|raw| {
                raw.parse::<AccountId>().map_err(|_| {
                    LedgerError::Validation(format!("Invalid account ID: '{}'", raw.trim()))
                })
            })
            .transpose()
    }

    fn prompt_amount(&mut self, label: &str) -> LedgerResult<Option<Money>> {
        self.prompt(label)?
            .map(|raw| Money::parse(&raw).map_err(|e| LedgerError::Validation(e.to_string())))
            .transpose()
    }
}

/// Run the menu over `input` and `output`
pub fn run_menu<S, R, W>(
    ledger: &mut Ledger<S>,
    symbol: &str,
    input: R,
    output: W,
) -> LedgerResult<()>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    Menu::new(ledger, input, output).with_symbol(symbol).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::io::Cursor;

    fn run_script(ledger: &mut Ledger<MemoryStore>, script: &str) -> String {
        let mut output = Vec::new();
        run_menu(ledger, "₹", Cursor::new(script.to_string()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn empty_ledger() -> (MemoryStore, Ledger<MemoryStore>) {
        let store = MemoryStore::new();
        let ledger = Ledger::open(store.clone()).unwrap();
        (store, ledger)
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CreateAccount));
        assert_eq!(MenuChoice::parse(" 7 \n"), Some(MenuChoice::Transfer));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("deposit"), None);

        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.number().to_string()), Some(choice));
        }
    }

    #[test]
    fn test_menu_lists_actions_in_order() {
        let (_store, mut ledger) = empty_ledger();
        let out = run_script(&mut ledger, "6\n");

        let expected = "==== BankLite System ====\n\
                        1. Create Account\n\
                        2. Deposit\n\
                        3. Withdraw\n\
                        4. View Balance\n\
                        5. View Transaction History\n\
                        6. Exit\n\
                        7. Transfer Money\n\
                        Enter your choice: ";
        assert!(out.contains(expected));
        assert!(out.ends_with("Exiting BankLite. Goodbye!\n"));
    }

    #[test]
    fn test_full_session() {
        let (store, mut ledger) = empty_ledger();
        let script = "1\nAlice\n100\n\
                      1\nBob\n0\n\
                      2\n1\n50\n\
                      3\n1\n30\n\
                      7\n1\n2\n20\n\
                      4\n1\n\
                      4\n2\n\
                      5\n2\n\
                      6\n";
        let out = run_script(&mut ledger, script);

        assert!(out.contains("Account created successfully! ID: 1"));
        assert!(out.contains("Account created successfully! ID: 2"));
        assert!(out.contains("Deposit successful."));
        assert!(out.contains("Withdrawal successful."));
        assert!(out.contains("Transfer successful."));
        assert!(out.contains("Current Balance: ₹100.00"));
        assert!(out.contains("Current Balance: ₹20.00"));
        assert!(out.contains("Transaction History:\n"));
        assert!(out.contains(" - Received ₹20.00 from Account 1\n"));
        assert!(!out.contains("Error:"));

        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn test_errors_are_reported_and_menu_continues() {
        let (_store, mut ledger) = empty_ledger();
        let script = "1\nAlice\n150\n\
                      3\n1\n200\n\
                      2\n999\n10\n\
                      2\nabc\n\
                      2\n1\n-5\n\
                      9\n\
                      4\n1\n\
                      6\n";
        let out = run_script(&mut ledger, script);

        assert!(out.contains("Error: Insufficient balance in account 1"));
        assert!(out.contains("Error: Account not found: 999"));
        assert!(out.contains("Error: Validation error: Invalid account ID: 'abc'"));
        assert!(out.contains("Error: Amount must be positive"));
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Current Balance: ₹150.00"));
        assert!(out.ends_with("Exiting BankLite. Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (store, mut ledger) = empty_ledger();
        let out = run_script(&mut ledger, "1\nAlice\n");

        assert!(!out.contains("Account created"));
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_balance_uses_configured_symbol() {
        let (_store, mut ledger) = empty_ledger();
        ledger.create_account("Alice", Money::from_minor(1050)).unwrap();

        let mut output = Vec::new();
        run_menu(&mut ledger, "$", Cursor::new("4\n1\n6\n"), &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Current Balance: $10.50"));
    }
}
