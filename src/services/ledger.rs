//! Ledger service
//!
//! Owns the account collection, assigns ids, validates and applies
//! deposits, withdrawals and transfers, and persists the full collection
//! through a [`LedgerStore`] after every mutation.
//!
//! Mutations are staged on copies of the affected accounts. The staged
//! snapshot is persisted once and only then committed in memory, so a failed
//! write leaves both the store and the in-memory ledger at the previous state.

use std::collections::BTreeMap;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::account::validate_name;
use crate::models::{Account, AccountId, AccountValidationError, Money};
use crate::storage::LedgerStore;

/// The account registry
pub struct Ledger<S: LedgerStore> {
    store: S,
    accounts: BTreeMap<AccountId, Account>,
    audit: Option<AuditLogger>,
}

impl<S: LedgerStore> Ledger<S> {
    /// Load the ledger from `store`
    ///
    /// An absent snapshot yields an empty ledger. A snapshot with invalid or
    /// duplicate accounts is rejected as [`LedgerError::CorruptStore`].
    pub fn open(store: S) -> LedgerResult<Self> {
        let accounts = load_accounts(&store)?;
        tracing::info!(store = %store.describe(), accounts = accounts.len(), "ledger opened");
        Ok(Self {
            store,
            accounts,
            audit: None,
        })
    }

    /// Record every committed mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an account holding `initial_balance`
    ///
    /// Negative opening balances are rejected with
    /// [`LedgerError::InvalidAmount`]; zero is allowed.
    pub fn create_account(&mut self, name: &str, initial_balance: Money) -> LedgerResult<Account> {
        let name = name.trim();
        validate_name(name).map_err(|e| LedgerError::Validation(e.to_string()))?;

        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidAmount(initial_balance));
        }

        let id = self.next_id()?;
        let account = Account::open(id, name, initial_balance);

        self.commit(vec![account.clone()])?;
        tracing::info!(account = %id, name, balance = %initial_balance, "account created");
        self.audit(&[AuditEntry::create(&account)]);

        Ok(account)
    }

    /// Look up an account; `None` when the id is unknown
    pub fn find_account_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Look up an account, failing when the id is unknown
    pub fn show_account_details(&self, id: AccountId) -> LedgerResult<&Account> {
        self.find_account_by_id(id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Deposit into account `id`, returning the new balance
    pub fn deposit_to_account(&mut self, id: AccountId, amount: Money) -> LedgerResult<Money> {
        let mut account = self.show_account_details(id)?.clone();
        account.deposit(amount)?;

        let balance = account.balance();
        let entry = AuditEntry::deposit(&account, amount);
        self.commit(vec![account])?;
        tracing::info!(account = %id, amount = %amount, balance = %balance, "deposit");
        self.audit(&[entry]);

        Ok(balance)
    }

    /// Withdraw from account `id`, returning the new balance
    pub fn withdraw_from_account(&mut self, id: AccountId, amount: Money) -> LedgerResult<Money> {
        let mut account = self.show_account_details(id)?.clone();
        account.withdraw(amount)?;

        let balance = account.balance();
        let entry = AuditEntry::withdraw(&account, amount);
        self.commit(vec![account])?;
        tracing::info!(account = %id, amount = %amount, balance = %balance, "withdrawal");
        self.audit(&[entry]);

        Ok(balance)
    }

    /// Move `amount` from `from_id` to `to_id`
    ///
    /// Both sides gain exactly one log entry and the store is written once.
    pub fn transfer(&mut self, from_id: AccountId, to_id: AccountId, amount: Money) -> LedgerResult<()> {
        let mut sender = self.show_account_details(from_id)?.clone();
        let mut receiver = self.show_account_details(to_id)?.clone();

        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if from_id == to_id {
            return Err(LedgerError::SameAccount(from_id));
        }

        sender.send(amount, to_id)?;
        receiver.receive(amount, from_id)?;

        let entry = AuditEntry::transfer(&sender, to_id, amount);
        self.commit(vec![sender, receiver])?;
        tracing::info!(from = %from_id, to = %to_id, amount = %amount, "transfer");
        self.audit(&[entry]);

        Ok(())
    }

    /// Persist the current collection unchanged
    pub fn save(&self) -> LedgerResult<()> {
        let snapshot: Vec<Account> = self.accounts.values().cloned().collect();
        self.store.persist_snapshot(&snapshot)
    }

    /// Replace the in-memory collection with the persisted one
    pub fn reload(&mut self) -> LedgerResult<()> {
        self.accounts = load_accounts(&self.store)?;
        Ok(())
    }

    /// Accounts in id order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, `None` when it exceeds [`Money::MAX`]
    pub fn total_balance(&self) -> Option<Money> {
        Money::checked_sum(self.accounts.values().map(Account::balance))
    }

    /// Accounts whose balance disagrees with their history
    pub fn verify(&self) -> Vec<(AccountId, AccountValidationError)> {
        self.accounts
            .values()
            .filter_map(|account| account.verify().err().map(|e| (account.id(), e)))
            .collect()
    }

    /// Ids are never reused: one past the highest id in use
    fn next_id(&self) -> LedgerResult<AccountId> {
        match self.accounts.keys().next_back() {
            None => Ok(AccountId::FIRST),
            Some(last) => last
                .next()
                .ok_or_else(|| LedgerError::Validation("No account ids left".into())),
        }
    }

    /// Persist the collection with `staged` applied, then adopt it
    fn commit(&mut self, staged: Vec<Account>) -> LedgerResult<()> {
        let mut next = self.accounts.clone();
        for account in staged {
            next.insert(account.id(), account);
        }

        let snapshot: Vec<Account> = next.values().cloned().collect();
        if let Err(err) = self.store.persist_snapshot(&snapshot) {
            tracing::error!(store = %self.store.describe(), error = %err, "persist failed, mutation discarded");
            return Err(err);
        }

        self.accounts = next;
        Ok(())
    }

    fn audit(&self, entries: &[AuditEntry]) {
        if let Some(logger) = &self.audit {
            // The mutation is already durable; a lost audit line is only reported
            if let Err(err) = logger.log_batch(entries) {
                tracing::warn!(error = %err, "failed to write audit log");
            }
        }
    }
}

fn load_accounts<S: LedgerStore>(store: &S) -> LedgerResult<BTreeMap<AccountId, Account>> {
    let mut accounts = BTreeMap::new();

    for account in store.load_snapshot()?.unwrap_or_default() {
        account.validate().map_err(|e| {
            LedgerError::CorruptStore(format!("account {}: {}", account.id(), e))
        })?;

        if let Err(e) = account.verify() {
            tracing::warn!(account = %account.id(), error = %e, "balance does not match history");
        }

        let id = account.id();
        if accounts.insert(id, account).is_some() {
            return Err(LedgerError::CorruptStore(format!("duplicate account id {}", id)));
        }
    }

    Ok(accounts)
}
