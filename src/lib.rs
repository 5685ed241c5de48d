//! Flat-file Banking Simulator Library
//! # Overview
//!
//! This library provides a single-user, menu-driven banking simulator that
//! keeps accounts, credentials and transaction logs in delimited text files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Credential, TransactionRecord, etc.)
//! - [`io`] - Line format of the data files
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - Reading and rewriting the data files
//!   - [`core::account_manager`] - In-memory accounts and balance operations
//!   - [`core::auth`] - Credential lookup and login attempt budget
//!   - [`core::engine`] - Operation orchestration (validate, mutate, persist)
//! - [`cli`] - Arguments, console I/O, login session and menus
//!
//! # Roles
//!
//! - **admin**: create accounts, delete accounts, rename account holders
//! - **user**: deposit, withdraw, check balance, view the last 5 transactions
//!
//! # Data Files
//!
//! - `AccountDetails.txt`: `number|NAME|balance`
//! - `transactions.txt`: `number|description`
//! - `credentials.txt`: `username:password:role`
//! - `account_numbers.txt`: next account sequence number
//!
//! Passwords are stored in plaintext.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountManager, BankEngine, DataPaths, RecordStore};
pub use types::{Account, AccountNumber, BankError, Credential, Role, TransactionRecord};
