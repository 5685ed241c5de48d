//! Service traits used by the bank engine
//!
//! The engine needs the current time for transaction descriptions and a
//! source of fresh passwords for new accounts. Both sit behind traits so a
//! session can be replayed deterministically in tests.

use crate::types::TIMESTAMP_FORMAT;
use chrono::{Local, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated account passwords
pub const PASSWORD_LENGTH: usize = 8;

/// Source of timestamps for transaction descriptions
pub trait Clock {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Source of passwords for newly created accounts
pub trait PasswordGenerator {
    /// Produce a fresh password
    fn generate(&mut self) -> String;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Parse an instant written as `%Y-%m-%d %H:%M:%S`
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Random ASCII letters and digits from the thread-local RNG
#[derive(Debug, Clone, Copy)]
pub struct RandomPasswordGenerator {
    length: usize,
}

impl RandomPasswordGenerator {
    pub fn new(length: usize) -> Self {
        RandomPasswordGenerator { length }
    }
}

impl Default for RandomPasswordGenerator {
    fn default() -> Self {
        Self::new(PASSWORD_LENGTH)
    }
}

impl PasswordGenerator for RandomPasswordGenerator {
    fn generate(&mut self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Hands out a fixed list of passwords in order, then repeats the last one
#[derive(Debug, Clone)]
pub struct SequencePasswordGenerator {
    passwords: Vec<String>,
    next: usize,
}

impl SequencePasswordGenerator {
    pub fn new<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SequencePasswordGenerator {
            passwords: passwords.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl PasswordGenerator for SequencePasswordGenerator {
    fn generate(&mut self) -> String {
        let index = self.next.min(self.passwords.len().saturating_sub(1));
        self.next += 1;
        self.passwords.get(index).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_password_is_eight_alphanumeric_chars() {
        let mut generator = RandomPasswordGenerator::default();
        for _ in 0..20 {
            let password = generator.generate();
            assert_eq!(password.len(), PASSWORD_LENGTH);
            assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_sequence_generator_repeats_last() {
        let mut generator = SequencePasswordGenerator::new(["first", "second"]);
        assert_eq!(generator.generate(), "first");
        assert_eq!(generator.generate(), "second");
        assert_eq!(generator.generate(), "second");
    }

    #[test]
    fn test_sequence_generator_empty_yields_empty() {
        let mut generator = SequencePasswordGenerator::new(Vec::<String>::new());
        assert_eq!(generator.generate(), "");
    }

    #[test]
    fn test_fixed_clock_parse() {
        let clock = FixedClock::parse("2024-03-09 14:05:07").unwrap();
        assert_eq!(
            clock.now().format(TIMESTAMP_FORMAT).to_string(),
            "2024-03-09 14:05:07"
        );
    }

    #[test]
    fn test_fixed_clock_parse_rejects_garbage() {
        assert!(FixedClock::parse("yesterday").is_err());
    }
}
