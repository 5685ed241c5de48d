//! Account management module
//!
//! This module provides the `AccountManager` struct which holds every account
//! in memory and applies balance changes to them.
//!
//! The AccountManager is responsible for:
//! - Looking up accounts by number
//! - Applying deposits and withdrawals with checked arithmetic
//! - Renaming and removing accounts
//! - Keeping each account's transaction list in chronological order
//! - Providing account listings sorted by account number for persistence
//! - Holding stored account lines that could not be read, so a rewrite of the
//!   accounts file puts them back unchanged
//!
//! It performs no I/O. Persisting a change is the engine's job.

use crate::types::{Account, AccountNumber, BankError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Number of entries shown by a transaction history request
pub const HISTORY_LIMIT: usize = 5;

/// Manages all accounts and their states
pub struct AccountManager {
    /// Map of account numbers to accounts
    accounts: HashMap<AccountNumber, Account>,
    /// Raw accounts file lines skipped at load, in file order
    unreadable: Vec<String>,
}

impl AccountManager {
    /// Create a new AccountManager with no accounts
    pub fn new() -> Self {
        AccountManager {
            accounts: HashMap::new(),
            unreadable: Vec::new(),
        }
    }

    /// Keep a stored line that did not parse as an account
    pub fn keep_unreadable(&mut self, line: impl Into<String>) {
        self.unreadable.push(line.into());
    }

    pub fn unreadable_lines(&self) -> &[String] {
        &self.unreadable
    }

    /// Whether a number is held by an account or appears to lead an
    /// unreadable line
    pub fn is_number_taken(&self, number: &AccountNumber) -> bool {
        let prefix = format!("{}|", number);
        self.contains(number)
            || self
                .unreadable
                .iter()
                .any(|line| line.trim_start().starts_with(&prefix))
    }

    /// Insert an account, replacing any account with the same number
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number.clone(), account);
    }

    pub fn get(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.accounts.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account, failing with AccountNotFound
    pub fn require(&self, number: &AccountNumber) -> Result<&Account, BankError> {
        self.accounts
            .get(number)
            .ok_or_else(|| BankError::account_not_found(number.as_str()))
    }

    fn require_mut(&mut self, number: &AccountNumber) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| BankError::account_not_found(number.as_str()))
    }

    /// Get all accounts sorted by account number
    ///
    /// Generated numbers sort by their numeric sequence, so `AN10000` comes
    /// after `AN1002`.
    pub fn get_all_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.number.cmp(&b.number));
        accounts
    }

    /// Deposit funds into an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - Adding the amount would overflow
    pub fn deposit(&mut self, number: &AccountNumber, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self.require_mut(number)?;

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", number.as_str()))?;

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Withdraw funds from an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The amount exceeds the current balance (balance is left unchanged)
    pub fn withdraw(&mut self, number: &AccountNumber, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self.require_mut(number)?;

        if amount > account.balance {
            return Err(BankError::insufficient_funds(
                number.as_str(),
                account.balance,
                amount,
            ));
        }

        account.balance -= amount;
        Ok(account.balance)
    }

    /// Replace the holder name, returning the previous one
    pub fn rename(&mut self, number: &AccountNumber, name: String) -> Result<String, BankError> {
        let account = self.require_mut(number)?;
        Ok(std::mem::replace(&mut account.name, name))
    }

    /// Remove an account and return it
    pub fn remove(&mut self, number: &AccountNumber) -> Result<Account, BankError> {
        self.accounts
            .remove(number)
            .ok_or_else(|| BankError::account_not_found(number.as_str()))
    }

    /// Append a transaction description to an account's history
    pub fn record_transaction(
        &mut self,
        number: &AccountNumber,
        description: String,
    ) -> Result<(), BankError> {
        self.require_mut(number)?.transactions.push(description);
        Ok(())
    }

    /// The most recent `limit` transactions, oldest first
    pub fn recent_transactions(
        &self,
        number: &AccountNumber,
        limit: usize,
    ) -> Result<&[String], BankError> {
        let transactions = &self.require(number)?.transactions;
        let start = transactions.len().saturating_sub(limit);
        Ok(&transactions[start..])
    }
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new()
    }
}
