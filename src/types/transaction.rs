//! Transaction-related types for the banking simulator
//!
//! Transactions are persisted as free-text descriptions. This module owns the
//! wording of those descriptions and the record tying one to an account.

use super::account::AccountNumber;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Timestamp layout embedded in every description
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Balance-changing events that produce a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Opening balance at account creation
    Opened,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Render the description for this event
    ///
    /// The amount is the amount acted upon, never the resulting balance.
    pub fn describe(&self, amount: Decimal, at: NaiveDateTime) -> String {
        let when = at.format(TIMESTAMP_FORMAT);
        match self {
            TransactionKind::Opened => format!("Account opened with Rs.{} on {}", amount, when),
            TransactionKind::Deposit => format!("Deposited Rs.{} on {}", amount, when),
            TransactionKind::Withdrawal => format!("Withdrew Rs.{} on {}", amount, when),
        }
    }
}

/// One line of the transaction log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Account the event belongs to
    pub account: AccountNumber,

    /// Free-text description with embedded amount and timestamp
    pub description: String,
}

impl TransactionRecord {
    pub fn new(account: AccountNumber, description: impl Into<String>) -> Self {
        TransactionRecord {
            account,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[rstest]
    #[case(TransactionKind::Opened, Decimal::new(500, 0), "Account opened with Rs.500 on 2024-03-09 14:05:07")]
    #[case(TransactionKind::Deposit, Decimal::new(20050, 2), "Deposited Rs.200.50 on 2024-03-09 14:05:07")]
    #[case(TransactionKind::Withdrawal, Decimal::new(75, 0), "Withdrew Rs.75 on 2024-03-09 14:05:07")]
    fn test_describe(
        #[case] kind: TransactionKind,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(kind.describe(amount, at()), expected);
    }
}
