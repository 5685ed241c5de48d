//! I/O module
//!
//! Handles the on-disk line format of the data files.
//!
//! # Components
//!
//! - `record_format` - Line encoding and decoding for accounts, transactions
//!   and credentials

pub mod record_format;

pub use record_format::{
    format_account_line, format_credential_line, format_transaction_line, parse_account_line,
    parse_counter, parse_credential_line, parse_decimal, parse_transaction_line,
};
