//! Bank operation engine
//!
//! This module provides the BankEngine that carries out every menu operation
//! by coordinating between the AccountManager (memory) and the RecordStore
//! (files).
//!
//! Every mutating operation follows the same sequence:
//! 1. Validate all input (account exists, amount parses, funds suffice)
//! 2. Mutate the in-memory state
//! 3. Persist (append the transaction line, rewrite the accounts file)
//!
//! A failure in step 1 leaves memory and files untouched. Step 3 is not
//! atomic: a crash between writes can leave the files out of step.

use crate::core::account_manager::{AccountManager, HISTORY_LIMIT};
use crate::core::auth::CredentialBook;
use crate::core::record_store::{LoadReport, RecordStore};
use crate::core::traits::{Clock, PasswordGenerator, RandomPasswordGenerator, SystemClock};
use crate::io::record_format::parse_decimal;
use crate::types::{
    Account, AccountNumber, BankError, Credential, Role, TransactionKind, TransactionRecord,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Details of a freshly created account, shown once to the admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub number: AccountNumber,
    pub username: String,
    pub password: String,
}

/// Holder name change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub old_name: String,
    pub new_name: String,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The account and its credential and transaction lines are gone
    Deleted {
        credentials_removed: usize,
        transactions_removed: usize,
    },
    /// Confirmation was not given; nothing changed
    Cancelled,
}

/// Parse an amount typed at the console
///
/// Accepts the same forms as stored balances, including scientific notation.
///
/// # Errors
///
/// Returns InvalidAmount if the text is not a decimal number.
pub fn parse_amount(input: &str) -> Result<Decimal, BankError> {
    parse_decimal(input).ok_or_else(|| BankError::invalid_amount(input.trim()))
}

/// Parse a deposit or withdrawal amount, which must be strictly positive
pub fn parse_positive_amount(input: &str) -> Result<Decimal, BankError> {
    let amount = parse_amount(input)?;
    if amount <= Decimal::ZERO {
        return Err(BankError::NonPositiveAmount { amount });
    }
    Ok(amount)
}

/// Trim and upper-case a holder name, rejecting empty names
pub fn normalize_name(input: &str) -> Result<String, BankError> {
    let name = input.trim().to_uppercase();
    if name.is_empty() {
        return Err(BankError::EmptyName);
    }
    Ok(name)
}

/// Whether a delete confirmation answer means yes
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Bank operation engine
///
/// Owns the in-memory accounts, the file store and the injected services.
pub struct BankEngine {
    accounts: AccountManager,
    store: RecordStore,
    clock: Box<dyn Clock>,
    passwords: Box<dyn PasswordGenerator>,
}

impl BankEngine {
    /// Load the store using the system clock and random passwords
    pub fn open(store: RecordStore) -> Result<(Self, LoadReport), BankError> {
        Self::with_services(
            store,
            Box::new(SystemClock),
            Box::new(RandomPasswordGenerator::default()),
        )
    }

    /// Load the store with explicit services
    pub fn with_services(
        store: RecordStore,
        clock: Box<dyn Clock>,
        passwords: Box<dyn PasswordGenerator>,
    ) -> Result<(Self, LoadReport), BankError> {
        let (accounts, report) = store.load()?;
        let engine = BankEngine {
            accounts,
            store,
            clock,
            passwords,
        };
        Ok((engine, report))
    }

    pub fn accounts(&self) -> &AccountManager {
        &self.accounts
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Read the credentials file into a lookup book
    pub fn credentials(&self) -> Result<(CredentialBook, LoadReport), BankError> {
        let (credentials, report) = self.store.read_credentials()?;
        Ok((CredentialBook::from_credentials(credentials), report))
    }

    /// Store a credential typed during first-run setup
    pub fn register_credential(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Credential, BankError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(BankError::EmptyUsername);
        }
        let credential = Credential::new(username, password, role);
        self.store.append_credential(&credential)?;
        info!("Registered {} credential '{}'", role, username);
        Ok(credential)
    }

    /// Resolve an account number typed at the console
    ///
    /// # Errors
    ///
    /// Returns AccountNotFound if no such account exists.
    pub fn require_account(&self, input: &str) -> Result<AccountNumber, BankError> {
        let number = AccountNumber::new(input.trim());
        self.accounts.require(&number)?;
        Ok(number)
    }

    fn allocate_account_number(&self) -> Result<AccountNumber, BankError> {
        loop {
            let number = self.store.next_account_number()?;
            if !self.accounts.is_number_taken(&number) {
                return Ok(number);
            }
            warn!("Account number {} already in use, skipping", number);
        }
    }

    fn describe(&self, kind: TransactionKind, amount: Decimal) -> String {
        kind.describe(amount, self.clock.now())
    }

    /// Open a new account with a generated user credential
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty after trimming
    /// - The opening balance is not a number or is negative
    /// - A data file cannot be written
    pub fn create_account(
        &mut self,
        name: &str,
        opening_balance: &str,
    ) -> Result<NewAccount, BankError> {
        let name = normalize_name(name)?;
        let balance = parse_amount(opening_balance)?;
        if balance < Decimal::ZERO {
            return Err(BankError::NegativeBalance { amount: balance });
        }

        let number = self.allocate_account_number()?;
        let username = number.username();
        let password = self.passwords.generate();

        self.store
            .append_credential(&Credential::new(&username, &password, Role::User))?;

        let description = self.describe(TransactionKind::Opened, balance);
        let mut account = Account::new(number.clone(), name, balance);
        account.transactions.push(description.clone());
        self.accounts.insert(account);

        self.store.save_accounts(&self.accounts)?;
        self.store
            .append_transaction(&TransactionRecord::new(number.clone(), description))?;

        info!("Created account {} for user {}", number, username);
        Ok(NewAccount {
            number,
            username,
            password,
        })
    }

    /// Credit an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The amount is not a number or not strictly positive
    /// - The balance would overflow
    /// - A data file cannot be written
    pub fn deposit(&mut self, number: &AccountNumber, amount: &str) -> Result<Decimal, BankError> {
        self.accounts.require(number)?;
        let amount = parse_positive_amount(amount)?;

        let balance = self.accounts.deposit(number, amount)?;
        self.commit(number, TransactionKind::Deposit, amount)?;

        info!("Deposited {} into {}", amount, number);
        Ok(balance)
    }

    /// Debit an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The amount is not a number or not strictly positive
    /// - The amount exceeds the balance
    /// - A data file cannot be written
    pub fn withdraw(&mut self, number: &AccountNumber, amount: &str) -> Result<Decimal, BankError> {
        self.accounts.require(number)?;
        let amount = parse_positive_amount(amount)?;

        let balance = self.accounts.withdraw(number, amount)?;
        self.commit(number, TransactionKind::Withdrawal, amount)?;

        info!("Withdrew {} from {}", amount, number);
        Ok(balance)
    }

    /// Record a balance change in memory and on disk
    fn commit(
        &mut self,
        number: &AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let description = self.describe(kind, amount);
        self.accounts
            .record_transaction(number, description.clone())?;
        self.store
            .append_transaction(&TransactionRecord::new(number.clone(), description))?;
        self.store.save_accounts(&self.accounts)
    }

    pub fn balance(&self, number: &AccountNumber) -> Result<Decimal, BankError> {
        Ok(self.accounts.require(number)?.balance)
    }

    /// The last five transactions of an account, oldest first
    pub fn history(&self, number: &AccountNumber) -> Result<&[String], BankError> {
        self.accounts.recent_transactions(number, HISTORY_LIMIT)
    }

    /// Change the holder name of an account
    pub fn update_name(
        &mut self,
        number: &AccountNumber,
        new_name: &str,
    ) -> Result<Renamed, BankError> {
        self.accounts.require(number)?;
        let new_name = normalize_name(new_name)?;

        let old_name = self.accounts.rename(number, new_name.clone())?;
        self.store.save_accounts(&self.accounts)?;

        info!("Renamed account {} from {} to {}", number, old_name, new_name);
        Ok(Renamed { old_name, new_name })
    }

    /// Delete an account together with its credential and transaction lines
    ///
    /// Nothing happens unless `confirmation` is `yes` (any case).
    pub fn delete_account(
        &mut self,
        number: &AccountNumber,
        confirmation: &str,
    ) -> Result<Deletion, BankError> {
        self.accounts.require(number)?;
        if !is_confirmation(confirmation) {
            return Ok(Deletion::Cancelled);
        }

        self.accounts.remove(number)?;
        let credentials_removed = self.store.remove_credentials_for(number)?;
        let transactions_removed = self.store.remove_transactions_for(number)?;
        self.store.save_accounts(&self.accounts)?;

        info!(
            "Deleted account {} ({} credentials, {} transactions)",
            number, credentials_removed, transactions_removed
        );
        Ok(Deletion::Deleted {
            credentials_removed,
            transactions_removed,
        })
    }
}
