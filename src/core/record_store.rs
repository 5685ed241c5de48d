//! Flat-file persistence
//!
//! This module provides the `RecordStore`, which owns the locations of the
//! four data files and performs every read and write against them:
//!
//! - accounts file: `number|NAME|balance`, rewritten whole after each change
//! - transactions file: `number|description`, append-only except for the
//!   delete cascade
//! - credentials file: `username:password:role`, append-only except for the
//!   delete cascade
//! - account number counter: a single integer, overwritten on allocation
//!
//! # Error Handling
//!
//! Missing files are treated as empty. Malformed lines are skipped and
//! collected in a [`LoadReport`] instead of aborting the load; I/O failures
//! are returned as [`BankError::Io`].
//!
//! # Limitations
//!
//! Writes are neither locked nor atomic. The store assumes one process and
//! one user at a time.

use crate::core::account_manager::AccountManager;
use crate::io::record_format::{
    format_account_line, format_credential_line, format_transaction_line, parse_account_line,
    parse_counter, parse_credential_line, parse_transaction_line,
};
use crate::types::{
    AccountNumber, BankError, Credential, TransactionRecord, FIRST_ACCOUNT_SEQUENCE,
};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ACCOUNTS_FILE: &str = "AccountDetails.txt";
pub const TRANSACTIONS_FILE: &str = "transactions.txt";
pub const CREDENTIALS_FILE: &str = "credentials.txt";
pub const ACCOUNT_COUNTER_FILE: &str = "account_numbers.txt";

/// Locations of the data files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub accounts: PathBuf,
    pub transactions: PathBuf,
    pub credentials: PathBuf,
    pub account_counter: PathBuf,
}

impl DataPaths {
    /// Use the standard file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        DataPaths {
            accounts: dir.join(ACCOUNTS_FILE),
            transactions: dir.join(TRANSACTIONS_FILE),
            credentials: dir.join(CREDENTIALS_FILE),
            account_counter: dir.join(ACCOUNT_COUNTER_FILE),
        }
    }
}

/// Lines skipped while loading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// One Parse error per skipped line
    pub skipped: Vec<BankError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, error: BankError) {
        warn!("Skipping record: {}", error);
        self.skipped.push(error);
    }
}

/// Reads and writes the flat data files
#[derive(Debug, Clone)]
pub struct RecordStore {
    paths: DataPaths,
}

impl RecordStore {
    pub fn new(paths: DataPaths) -> Self {
        RecordStore { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Load accounts and attach their transactions
    ///
    /// Transactions for account numbers that are not in the accounts file are
    /// dropped.
    pub fn load(&self) -> Result<(AccountManager, LoadReport), BankError> {
        let mut manager = AccountManager::new();
        let mut report = LoadReport::default();

        let source = display_name(&self.paths.accounts);
        for (line_num, line) in numbered_lines(&read_optional(&self.paths.accounts)?) {
            match parse_account_line(line) {
                Ok(account) => manager.insert(account),
                Err(e) => {
                    report.skip(BankError::parse(&source, line_num, e));
                    manager.keep_unreadable(line);
                }
            }
        }

        let source = display_name(&self.paths.transactions);
        for (line_num, line) in numbered_lines(&read_optional(&self.paths.transactions)?) {
            match parse_transaction_line(line) {
                Ok(record) => {
                    if manager.contains(&record.account) {
                        manager.record_transaction(&record.account, record.description)?;
                    } else {
                        debug!(
                            "Dropping transaction for unknown account {} (line {})",
                            record.account, line_num
                        );
                    }
                }
                Err(e) => report.skip(BankError::parse(&source, line_num, e)),
            }
        }

        debug!(
            "Loaded {} accounts, skipped {} lines",
            manager.len(),
            report.skipped.len()
        );
        Ok((manager, report))
    }

    /// Rewrite the whole accounts file from memory
    ///
    /// Lines that could not be read at load are written back unchanged after
    /// the accounts.
    pub fn save_accounts(&self, manager: &AccountManager) -> Result<(), BankError> {
        let mut content = String::new();
        for account in manager.get_all_accounts() {
            let line = format_account_line(account).map_err(|message| BankError::Io { message })?;
            content.push_str(&line);
            content.push('\n');
        }
        for line in manager.unreadable_lines() {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&self.paths.accounts, content)?;
        debug!("Rewrote {} with {} accounts", self.paths.accounts.display(), manager.len());
        Ok(())
    }

    /// Append one line to the transaction log
    pub fn append_transaction(&self, record: &TransactionRecord) -> Result<(), BankError> {
        let line = format_transaction_line(record).map_err(|message| BankError::Io { message })?;
        append_line(&self.paths.transactions, &line)
    }

    /// Allocate the next account number
    ///
    /// Reads the counter, stores counter + 1 and returns the value read. A
    /// missing counter starts at 1001; a counter that is not an integer, or
    /// has no successor, restarts at 1001 with a warning.
    pub fn next_account_number(&self) -> Result<AccountNumber, BankError> {
        let current = match fs::read_to_string(&self.paths.account_counter) {
            Ok(content) => parse_counter(&content)
                .filter(|n| n.checked_add(1).is_some())
                .unwrap_or_else(|| {
                    warn!(
                        "Counter file {} is corrupt, restarting at {}",
                        self.paths.account_counter.display(),
                        FIRST_ACCOUNT_SEQUENCE
                    );
                    FIRST_ACCOUNT_SEQUENCE
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => FIRST_ACCOUNT_SEQUENCE,
            Err(e) => return Err(e.into()),
        };

        fs::write(&self.paths.account_counter, (current + 1).to_string())?;
        Ok(AccountNumber::from_sequence(current))
    }

    /// Read every credential
    ///
    /// Returns the credentials in file order along with any skipped lines.
    pub fn read_credentials(&self) -> Result<(Vec<Credential>, LoadReport), BankError> {
        let mut credentials = Vec::new();
        let mut report = LoadReport::default();

        let source = display_name(&self.paths.credentials);
        for (line_num, line) in numbered_lines(&read_optional(&self.paths.credentials)?) {
            match parse_credential_line(line) {
                Ok(credential) => credentials.push(credential),
                Err(e) => report.skip(BankError::parse(&source, line_num, e)),
            }
        }
        Ok((credentials, report))
    }

    /// Append one credential line
    pub fn append_credential(&self, credential: &Credential) -> Result<(), BankError> {
        let line =
            format_credential_line(credential).map_err(|message| BankError::Io { message })?;
        append_line(&self.paths.credentials, &line)
    }

    /// Drop the credentials belonging to an account
    ///
    /// A credential is dropped when its username contains `user{number}` or
    /// equals the username derived for the account. Unreadable lines are kept
    /// as they are.
    ///
    /// # Returns
    ///
    /// The number of lines removed.
    pub fn remove_credentials_for(&self, number: &AccountNumber) -> Result<usize, BankError> {
        let pattern = format!("user{}", number);
        let derived = number.username();
        rewrite_filtered(&self.paths.credentials, |line| {
            parse_credential_line(line)
                .map(|c| c.username.contains(&pattern) || c.username == derived)
                .unwrap_or(false)
        })
    }

    /// Drop every transaction line of an account
    ///
    /// # Returns
    ///
    /// The number of lines removed.
    pub fn remove_transactions_for(&self, number: &AccountNumber) -> Result<usize, BankError> {
        rewrite_filtered(&self.paths.transactions, |line| {
            parse_transaction_line(line)
                .map(|record| &record.account == number)
                .unwrap_or(false)
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a whole file, treating a missing file as empty
fn read_optional(path: &Path) -> Result<String, BankError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(BankError::Io {
            message: format!("Failed to read '{}': {}", path.display(), e),
        }),
    }
}

/// Non-blank lines with their 1-based line numbers
fn numbered_lines(content: &str) -> impl Iterator<Item = (u64, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i as u64 + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn append_line(path: &Path, line: &str) -> Result<(), BankError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Rewrite a file without the lines matching `remove`
///
/// A missing file is left missing.
fn rewrite_filtered<F>(path: &Path, remove: F) -> Result<usize, BankError>
where
    F: Fn(&str) -> bool,
{
    if !path.exists() {
        return Ok(0);
    }

    let content = read_optional(path)?;
    let mut kept = String::with_capacity(content.len());
    let mut removed = 0;
    for line in content.lines() {
        if remove(line) {
            removed += 1;
        } else {
            kept.push_str(line);
            kept.push('\n');
        }
    }

    fs::write(path, kept)?;
    debug!("Rewrote {} without {} lines", path.display(), removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, Role};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RecordStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = RecordStore::new(DataPaths::in_dir(dir.path()));
        (dir, store)
    }

    fn write(path: &Path, content: &str) {
        fs::write(path, content).expect("Failed to write fixture");
    }

    fn number(raw: &str) -> AccountNumber {
        AccountNumber::new(raw)
    }

    #[test]
    fn test_load_missing_files_is_empty() {
        let (_dir, store) = temp_store();
        let (manager, report) = store.load().unwrap();
        assert!(manager.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_load_attaches_transactions_in_order() {
        let (_dir, store) = temp_store();
        write(&store.paths().accounts, "AN1001|ALICE|500.0\nAN1002|BOB|20\n");
        write(
            &store.paths().transactions,
            "AN1001|first\nAN1002|other\nAN1001|second\n",
        );

        let (manager, report) = store.load().unwrap();

        assert!(report.is_clean());
        let alice = manager.get(&number("AN1001")).unwrap();
        assert_eq!(alice.name, "ALICE");
        assert_eq!(alice.balance, Decimal::new(5000, 1));
        assert_eq!(alice.transactions, vec!["first", "second"]);
        assert_eq!(manager.get(&number("AN1002")).unwrap().transactions, vec!["other"]);
    }

    #[test]
    fn test_load_drops_transactions_for_unknown_accounts() {
        let (_dir, store) = temp_store();
        write(&store.paths().accounts, "AN1001|ALICE|5\n");
        write(&store.paths().transactions, "AN7777|ghost\nAN1001|real\n");

        let (manager, report) = store.load().unwrap();

        assert!(report.is_clean());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(&number("AN1001")).unwrap().transactions, vec!["real"]);
    }

    #[test]
    fn test_load_skips_malformed_lines_with_line_numbers() {
        let (_dir, store) = temp_store();
        write(
            &store.paths().accounts,
            "AN1001|ALICE|5\nbroken line\n\nAN1002|BOB|nope\nAN1003|CAROL|1\n",
        );
        write(&store.paths().transactions, "AN1001|ok\nno delimiter here\n");

        let (manager, report) = store.load().unwrap();

        assert_eq!(manager.len(), 2);
        assert_eq!(report.skipped.len(), 3);
        assert!(matches!(
            &report.skipped[0],
            BankError::Parse { file, line: 2, .. } if file == ACCOUNTS_FILE
        ));
        assert!(matches!(&report.skipped[1], BankError::Parse { line: 4, .. }));
        assert!(matches!(
            &report.skipped[2],
            BankError::Parse { file, line: 2, .. } if file == TRANSACTIONS_FILE
        ));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = temp_store();
        let mut manager = AccountManager::new();
        manager.insert(Account::new(number("AN1002"), "PIPE|NAME", Decimal::new(1234, 2)));
        manager.insert(Account::new(number("AN1001"), "ALICE", Decimal::new(700, 0)));
        for description in ["opened", "deposit | with pipe", "withdrew"] {
            manager
                .record_transaction(&number("AN1001"), description.to_string())
                .unwrap();
            store
                .append_transaction(&TransactionRecord::new(number("AN1001"), description))
                .unwrap();
        }

        store.save_accounts(&manager).unwrap();
        let (reloaded, report) = store.load().unwrap();

        assert!(report.is_clean());
        assert_eq!(reloaded.get_all_accounts(), manager.get_all_accounts());
    }

    #[test]
    fn test_save_accounts_overwrites_in_sequence_order() {
        let (_dir, store) = temp_store();
        write(&store.paths().accounts, "stale content\n");
        let mut manager = AccountManager::new();
        manager.insert(Account::new(number("AN1002"), "BOB", Decimal::new(2, 0)));
        manager.insert(Account::new(number("AN1001"), "ALICE", Decimal::new(1, 0)));

        store.save_accounts(&manager).unwrap();

        let content = fs::read_to_string(&store.paths().accounts).unwrap();
        assert_eq!(content, "AN1001|ALICE|1\nAN1002|BOB|2\n");
    }

    #[test]
    fn test_next_account_number_starts_at_1001_and_increments() {
        let (_dir, store) = temp_store();

        assert_eq!(store.next_account_number().unwrap().as_str(), "AN1001");
        assert_eq!(store.next_account_number().unwrap().as_str(), "AN1002");
        assert_eq!(store.next_account_number().unwrap().as_str(), "AN1003");

        let counter = fs::read_to_string(&store.paths().account_counter).unwrap();
        assert_eq!(counter, "1004");
    }

    #[test]
    fn test_next_account_number_recovers_from_corrupt_counter() {
        let (_dir, store) = temp_store();
        write(&store.paths().account_counter, "not a number");

        assert_eq!(store.next_account_number().unwrap().as_str(), "AN1001");
        assert_eq!(
            fs::read_to_string(&store.paths().account_counter).unwrap(),
            "1002"
        );
    }

    #[rstest]
    #[case::max(u64::MAX.to_string())]
    #[case::max_padded(format!(" {}\n", u64::MAX))]
    fn test_next_account_number_restarts_when_counter_has_no_successor(#[case] content: String) {
        let (_dir, store) = temp_store();
        write(&store.paths().account_counter, &content);

        assert_eq!(store.next_account_number().unwrap().as_str(), "AN1001");
        assert_eq!(
            fs::read_to_string(&store.paths().account_counter).unwrap(),
            "1002"
        );
    }

    #[test]
    fn test_next_account_number_near_the_top_of_the_range() {
        let (_dir, store) = temp_store();
        write(&store.paths().account_counter, &(u64::MAX - 1).to_string());

        let number = store.next_account_number().unwrap();

        assert_eq!(number.sequence(), Some(u64::MAX - 1));
        assert_eq!(
            fs::read_to_string(&store.paths().account_counter).unwrap(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn test_save_accounts_keeps_unreadable_lines() {
        let (_dir, store) = temp_store();
        write(
            &store.paths().accounts,
            "AN1001|ALICE|100\nAN1002|BOB|1e+16x\nAN1003|CAROL|7\n",
        );
        let (mut manager, report) = store.load().unwrap();
        assert_eq!(report.skipped.len(), 1);

        manager.deposit(&number("AN1001"), Decimal::ONE).unwrap();
        store.save_accounts(&manager).unwrap();

        assert_eq!(
            fs::read_to_string(&store.paths().accounts).unwrap(),
            "AN1001|ALICE|101\nAN1003|CAROL|7\nAN1002|BOB|1e+16x\n"
        );
        let (reloaded, report) = store.load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_read_credentials_absent_file_is_empty() {
        let (_dir, store) = temp_store();
        let (credentials, report) = store.read_credentials().unwrap();
        assert!(credentials.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_append_and_read_credentials() {
        let (_dir, store) = temp_store();
        store
            .append_credential(&Credential::new("admin", "pw", Role::Admin))
            .unwrap();
        store
            .append_credential(&Credential::new("user1001", "Ab3dE6gH", Role::User))
            .unwrap();
        write_append(&store.paths().credentials, "bad:line:superuser\n");

        let (credentials, report) = store.read_credentials().unwrap();

        assert_eq!(
            credentials,
            vec![
                Credential::new("admin", "pw", Role::Admin),
                Credential::new("user1001", "Ab3dE6gH", Role::User),
            ]
        );
        assert_eq!(report.skipped.len(), 1);
    }

    fn write_append(path: &Path, content: &str) {
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_remove_credentials_for_account() {
        let (_dir, store) = temp_store();
        write(
            &store.paths().credentials,
            "admin:pw:admin\nuser1001:aaa:user\nuser1002:bbb:user\nuserAN1001:ccc:user\nuser10011:ddd:user\n",
        );

        let removed = store.remove_credentials_for(&number("AN1001")).unwrap();

        assert_eq!(removed, 2);
        let content = fs::read_to_string(&store.paths().credentials).unwrap();
        assert_eq!(
            content,
            "admin:pw:admin\nuser1002:bbb:user\nuser10011:ddd:user\n"
        );
    }

    #[test]
    fn test_remove_transactions_for_account() {
        let (_dir, store) = temp_store();
        write(
            &store.paths().transactions,
            "AN1001|a\nAN10011|b\nAN1002|c\nAN1001|d\ngarbage\n",
        );

        let removed = store.remove_transactions_for(&number("AN1001")).unwrap();

        assert_eq!(removed, 2);
        let content = fs::read_to_string(&store.paths().transactions).unwrap();
        assert_eq!(content, "AN10011|b\nAN1002|c\ngarbage\n");
    }

    #[test]
    fn test_remove_from_missing_file_is_noop() {
        let (_dir, store) = temp_store();
        assert_eq!(store.remove_transactions_for(&number("AN1001")).unwrap(), 0);
        assert!(!store.paths().transactions.exists());
    }
}
