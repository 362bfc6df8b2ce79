//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Marker shown in place of a total that exceeds the largest amount
pub const TOTAL_OVERFLOW: &str = "overflow";

/// Format accounts with balances as a table, followed by a total row
///
/// `total` is the ledger's checked total; `None` prints [`TOTAL_OVERFLOW`].
pub fn format_account_list<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    total: Option<Money>,
    symbol: &str,
) -> String {
    let accounts: Vec<&Account> = accounts.into_iter().collect();
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name().chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>14}  {:>7}\n",
        "ID",
        "Name",
        "Balance",
        "Entries",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width));

    for account in &accounts {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>14}  {:>7}\n",
            account.id(),
            account.name(),
            account.balance().format_with_symbol(symbol),
            account.history().len(),
            name_width = name_width,
        ));
    }

    let total = total
        .map(|t| t.format_with_symbol(symbol))
        .unwrap_or_else(|| TOTAL_OVERFLOW.to_string());
    output.push_str(&separator(name_width));
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>14}\n",
        "",
        "TOTAL",
        total,
        name_width = name_width,
    ));

    output
}

fn separator(name_width: usize) -> String {
    format!(
        "{:->4}  {:-<name_width$}  {:->14}  {:->7}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    )
}

/// Format a single account's details
pub fn format_account_details(account: &Account, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name()));
    output.push_str(&format!("  ID:       {}\n", account.id()));
    output.push_str(&format!(
        "  Balance:  {}\n",
        account.balance().format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Entries:  {}\n", account.history().len()));

    if let Some(last) = account.history().last() {
        output.push_str(&format!("  Last:     {}\n", last));
    }

    output
}

/// Format the transaction history, one entry per line in recorded order
pub fn format_history(account: &Account) -> String {
    let mut output = format!("Transaction History for {}:\n", account);
    for entry in account.history() {
        output.push_str(&format!("{}\n", entry));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    fn accounts() -> Vec<Account> {
        let mut alice = Account::open(AccountId::new(1), "Alice", Money::from_major(100));
        alice.deposit(Money::from_minor(50)).unwrap();
        vec![
            alice,
            Account::open(AccountId::new(2), "Bob", Money::zero()),
        ]
    }

    #[test]
    fn test_format_account_list() {
        let accounts = accounts();
        let output = format_account_list(&accounts, Some(Money::from_minor(10050)), "₹");

        assert!(output.contains("Alice"));
        assert!(output.contains("₹100.50"));
        assert!(output.contains("TOTAL"));
        let total_line = output.lines().last().unwrap();
        assert!(total_line.ends_with("₹100.50"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_account_list(std::iter::empty::<&Account>(), None, "₹");
        assert_eq!(output, "No accounts found.\n");
    }

    #[test]
    fn test_format_list_total_overflow() {
        let accounts = vec![
            Account::open(AccountId::new(1), "Alice", Money::MAX),
            Account::open(AccountId::new(2), "Bob", Money::MAX),
        ];
        let output = format_account_list(&accounts, None, "₹");
        let total_line = output.lines().last().unwrap();
        assert!(total_line.contains("TOTAL"));
        assert!(total_line.ends_with(TOTAL_OVERFLOW));
    }

    #[test]
    fn test_format_account_details_uses_symbol() {
        let accounts = accounts();
        let output = format_account_details(&accounts[0], "$");
        assert!(output.contains("Account: Alice"));
        assert!(output.contains("Balance:  $100.50"));
        assert!(output.contains("Entries:  2"));
    }

    #[test]
    fn test_format_history_keeps_order() {
        let accounts = accounts();
        let output = format_history(&accounts[0]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("Account created with ₹100.00"));
        assert!(lines[2].ends_with("Deposited ₹0.50"));
    }
}
