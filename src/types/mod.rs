//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account and account-number types
//! - `credential`: Login credentials and roles
//! - `transaction`: Transaction descriptions and log records
//! - `error`: Error types for the simulator

pub mod account;
pub mod credential;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountNumber, ACCOUNT_PREFIX, FIRST_ACCOUNT_SEQUENCE};
pub use credential::{Credential, Role};
pub use error::BankError;
pub use transaction::{TransactionKind, TransactionRecord, TIMESTAMP_FORMAT};
