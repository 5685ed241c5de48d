//! Account-related types for the banking simulator
//!
//! This module defines the Account structure and the AccountNumber key.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

/// Prefix shared by every generated account number
pub const ACCOUNT_PREFIX: &str = "AN";

/// First sequence number handed out when no counter has been persisted yet
pub const FIRST_ACCOUNT_SEQUENCE: u64 = 1001;

/// Account identifier, e.g. `AN1001`
///
/// Account numbers typed at the console are free text, so the key is kept as
/// a string. Generated numbers carry a numeric sequence after the prefix,
/// which is what ordering uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn new(value: impl Into<String>) -> Self {
        AccountNumber(value.into())
    }

    /// Build the account number for a counter value
    pub fn from_sequence(sequence: u64) -> Self {
        AccountNumber(format!("{}{}", ACCOUNT_PREFIX, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of a generated account number
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(ACCOUNT_PREFIX)?.parse().ok()
    }

    /// Login name for the credential created alongside this account
    ///
    /// `AN1001` becomes `user1001`.
    pub fn username(&self) -> String {
        let suffix = self.0.strip_prefix(ACCOUNT_PREFIX).unwrap_or(&self.0);
        format!("user{}", suffix)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for AccountNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence()
            .cmp(&other.sequence())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for AccountNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A customer account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub number: AccountNumber,

    /// Holder name, stored upper-cased
    pub name: String,

    /// Current balance, never negative
    pub balance: Decimal,

    /// Transaction descriptions, oldest first
    pub transactions: Vec<String>,
}

impl Account {
    /// Create an account with an empty transaction list
    pub fn new(number: AccountNumber, name: impl Into<String>, balance: Decimal) -> Self {
        Account {
            number,
            name: name.into(),
            balance,
            transactions: Vec::new(),
        }
    }
}
