//! Credential lookup and the login attempt budget
//!
//! Passwords are compared as plain strings, exactly as stored.

use crate::types::{Credential, Role};
use std::collections::HashMap;

/// Consecutive failures allowed before a login attempt sequence is locked
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Credentials keyed by username
///
/// When a username appears more than once, the last entry wins.
#[derive(Debug, Clone, Default)]
pub struct CredentialBook {
    entries: HashMap<String, Credential>,
}

impl CredentialBook {
    pub fn from_credentials(credentials: impl IntoIterator<Item = Credential>) -> Self {
        let entries = credentials
            .into_iter()
            .map(|c| (c.username.clone(), c))
            .collect();
        CredentialBook { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, username: &str) -> Option<&Credential> {
        self.entries.get(username)
    }

    /// Role granted to a username/password pair, if they match
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        self.get(username)
            .filter(|c| c.password == password)
            .map(|c| c.role)
    }
}

/// Counts failed logins against [`MAX_LOGIN_ATTEMPTS`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginAttempts {
    failures: u32,
}

impl LoginAttempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; returns true once the budget is used up
    pub fn record_failure(&mut self) -> bool {
        self.failures += 1;
        self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.failures >= MAX_LOGIN_ATTEMPTS
    }

    pub fn remaining(&self) -> u32 {
        MAX_LOGIN_ATTEMPTS.saturating_sub(self.failures)
    }
}

/// Result of a login attempt sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched
    Granted { username: String, role: Role },
    /// The attempt budget ran out
    Locked,
}
