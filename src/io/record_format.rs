//! Record format handling for the flat data files
//!
//! This module centralizes all line-format concerns, providing:
//! - Field splitting and joining for the `|` and `:` delimited files
//! - Conversion from stored lines to domain types and back
//! - Counter file parsing
//!
//! All functions are pure (no I/O) for easy testing. The record store owns
//! reading and writing the files.
//!
//! # Encoding
//!
//! Every line is one record with no header row. Fields are written with
//! minimal quoting: a field containing the delimiter, a double quote or a line
//! break is wrapped in double quotes and embedded quotes are doubled. Plain
//! lines are therefore identical to the historical unquoted layout, and names
//! or descriptions that contain a delimiter still read back intact. A stored
//! line whose quotes do not match that encoding is read as unquoted text.

use crate::types::{Account, AccountNumber, Credential, TransactionRecord};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Field delimiter of the accounts file
pub const ACCOUNT_DELIMITER: u8 = b'|';

/// Field delimiter of the transactions file
pub const TRANSACTION_DELIMITER: u8 = b'|';

/// Field delimiter of the credentials file
pub const CREDENTIAL_DELIMITER: u8 = b':';

/// Positional layout of an accounts file line: number|name|balance
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
struct AccountFields {
    number: String,
    name: String,
    balance: String,
}

/// Split one stored line into fields
///
/// Quoting is honoured only when the line is exactly what the writer would
/// produce for the fields it holds. Anything else, such as a legacy name that
/// happens to start with `"`, is split on the bare delimiter with every
/// character kept.
fn split_line(line: &str, delimiter: u8) -> Result<StringRecord, String> {
    let record = read_fields(line, delimiter)?;
    if join_fields(&record, delimiter)? == line {
        return Ok(record);
    }
    Ok(line.split(char::from(delimiter)).collect())
}

fn read_fields(line: &str, delimiter: u8) -> Result<StringRecord, String> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record),
        Ok(false) => Err("empty line".to_string()),
        Err(e) => Err(format!("unreadable fields: {}", e)),
    }
}

/// Render a list of fields as one stored line (without terminator)
fn join_fields<I, T>(fields: I, delimiter: u8) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = line_writer(delimiter);
    writer
        .write_record(fields)
        .map_err(|e| format!("Failed to encode record: {}", e))?;
    finish_line(writer)
}

/// Render a serializable struct as one stored line (without terminator)
fn serialize_line<S: Serialize>(value: &S, delimiter: u8) -> Result<String, String> {
    let mut writer = line_writer(delimiter);
    writer
        .serialize(value)
        .map_err(|e| format!("Failed to encode record: {}", e))?;
    finish_line(writer)
}

fn line_writer(delimiter: u8) -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish_line(writer: csv::Writer<Vec<u8>>) -> Result<String, String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to flush record: {}", e))?;
    let mut line =
        String::from_utf8(bytes).map_err(|e| format!("Record is not valid UTF-8: {}", e))?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

fn expect_fields(record: &StringRecord, expected: usize) -> Result<(), String> {
    if record.len() != expected {
        return Err(format!(
            "expected {} fields, found {}",
            expected,
            record.len()
        ));
    }
    Ok(())
}

/// Parse a decimal number written either plainly or in scientific notation
///
/// Older files were written from floating point values, so `1e+16` can appear
/// where `10000000000000000` is meant.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parse a stored balance, which must not be negative
pub fn parse_balance(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    let balance = parse_decimal(text).ok_or_else(|| format!("Invalid balance '{}'", text))?;
    if balance.is_sign_negative() && !balance.is_zero() {
        return Err(format!("Negative balance '{}'", text));
    }
    Ok(balance)
}

/// Convert an accounts file line to an Account
///
/// The returned account has an empty transaction list; transactions are
/// attached from the transactions file afterwards.
pub fn parse_account_line(line: &str) -> Result<Account, String> {
    let record = split_line(line, ACCOUNT_DELIMITER)?;
    expect_fields(&record, 3)?;

    let fields: AccountFields = record
        .deserialize(None)
        .map_err(|e| format!("unreadable account: {}", e))?;

    if fields.number.trim().is_empty() {
        return Err("missing account number".to_string());
    }

    let balance = parse_balance(&fields.balance)?;
    Ok(Account::new(
        AccountNumber::new(fields.number),
        fields.name,
        balance,
    ))
}

/// Convert an Account to an accounts file line
pub fn format_account_line(account: &Account) -> Result<String, String> {
    serialize_line(
        &AccountFields {
            number: account.number.to_string(),
            name: account.name.clone(),
            balance: account.balance.to_string(),
        },
        ACCOUNT_DELIMITER,
    )
}

/// Convert a transactions file line to a TransactionRecord
///
/// Everything after the first field is the description. Older lines may hold
/// an unquoted `|` inside the description; those extra fields are joined back.
pub fn parse_transaction_line(line: &str) -> Result<TransactionRecord, String> {
    let record = split_line(line, TRANSACTION_DELIMITER)?;
    if record.len() < 2 {
        return Err(format!("expected 2 fields, found {}", record.len()));
    }

    let account = &record[0];
    if account.trim().is_empty() {
        return Err("missing account number".to_string());
    }

    let description = record.iter().skip(1).collect::<Vec<_>>().join("|");
    Ok(TransactionRecord::new(AccountNumber::new(account), description))
}

/// Convert a TransactionRecord to a transactions file line
pub fn format_transaction_line(record: &TransactionRecord) -> Result<String, String> {
    join_fields(
        [record.account.as_str(), record.description.as_str()],
        TRANSACTION_DELIMITER,
    )
}

/// Convert a credentials file line to a Credential
pub fn parse_credential_line(line: &str) -> Result<Credential, String> {
    let record = split_line(line, CREDENTIAL_DELIMITER)?;
    expect_fields(&record, 3)?;

    record
        .deserialize::<Credential>(None)
        .map_err(|_| format!("unknown role '{}'", &record[2]))
}

/// Convert a Credential to a credentials file line
pub fn format_credential_line(credential: &Credential) -> Result<String, String> {
    serialize_line(credential, CREDENTIAL_DELIMITER)
}

/// Parse the account number counter file
///
/// Returns `None` when the content is not a single non-negative integer.
pub fn parse_counter(content: &str) -> Option<u64> {
    content.trim().parse().ok()
}
