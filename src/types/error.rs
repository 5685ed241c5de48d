//! Error types for the banking simulator
//!
//! This module defines all error types that can occur while running a banking
//! session. Errors are designed to be descriptive and user-friendly, because
//! most of them are printed straight to the console.
//!
//! # Error Categories
//!
//! - **Validation Errors**: empty names, malformed or non-positive amounts,
//!   insufficient funds, invalid roles
//! - **Lookup Errors**: unknown account numbers
//! - **Persistence Errors**: file I/O failures and malformed stored records
//! - **Input Errors**: the console input stream was closed
//!
//! Validation and lookup errors are recoverable: the operation is aborted,
//! nothing is mutated, and the menu loop continues. Persistence and input
//! errors end the session (malformed records are the exception, they are
//! skipped and reported while loading).

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking simulator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// No account exists with the given number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account number as typed
        account: String,
    },

    /// An account holder name was empty after trimming
    #[error("Name cannot be empty")]
    EmptyName,

    /// A bootstrap username was empty after trimming
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// Amount text could not be parsed as a decimal number
    #[error("Invalid amount '{input}': not a number")]
    InvalidAmount {
        /// The rejected input
        input: String,
    },

    /// Deposit or withdrawal amount was zero or negative
    #[error("Amount must be greater than 0 (got {amount})")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Opening balance was negative
    #[error("Balance must be 0 or more (got {amount})")]
    NegativeBalance {
        /// The rejected opening balance
        amount: Decimal,
    },

    /// Withdrawal larger than the current balance
    ///
    /// The account state remains unchanged.
    #[error("Insufficient funds in account {account}: balance {available}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: String,
        /// Current balance
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Role text was neither `admin` nor `user`
    #[error("Invalid role '{role}': expected 'admin' or 'user'")]
    InvalidRole {
        /// The rejected role text
        role: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },

    /// I/O error while reading or writing a data file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A stored record could not be decoded
    #[error("Malformed record in {file} at line {line}: {message}")]
    Parse {
        /// File the record came from
        file: String,
        /// 1-based line number
        line: u64,
        /// Description of the problem
        message: String,
    },

    /// The console input stream reached end of file
    #[error("Input closed")]
    InputClosed,
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        BankError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create an InvalidRole error
    pub fn invalid_role(role: &str) -> Self {
        BankError::InvalidRole {
            role: role.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a Parse error
    pub fn parse(file: &str, line: u64, message: impl Into<String>) -> Self {
        BankError::Parse {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Whether the menu loop can report this error and carry on
    ///
    /// Validation and lookup failures leave all state untouched, so the
    /// session continues. I/O failures and closed input end it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BankError::Io { .. } | BankError::InputClosed)
    }
}
