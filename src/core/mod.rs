//! Core business logic module
//!
//! This module contains the banking components:
//! - `traits` - Clock and password generator abstractions
//! - `account_manager` - In-memory account state and balance operations
//! - `record_store` - Flat-file persistence
//! - `auth` - Credential lookup and login attempt budget
//! - `engine` - Operation orchestration (validate, mutate, persist)

pub mod account_manager;
pub mod auth;
pub mod engine;
pub mod record_store;
pub mod traits;

pub use account_manager::{AccountManager, HISTORY_LIMIT};
pub use auth::{CredentialBook, LoginAttempts, LoginOutcome, MAX_LOGIN_ATTEMPTS};
pub use engine::{BankEngine, Deletion, NewAccount, Renamed};
pub use record_store::{DataPaths, LoadReport, RecordStore};
pub use traits::{
    Clock, FixedClock, PasswordGenerator, RandomPasswordGenerator, SequencePasswordGenerator,
    SystemClock,
};
