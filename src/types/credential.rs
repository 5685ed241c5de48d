//! Login credentials and roles
//!
//! Passwords are stored and compared as plaintext. That is the legacy file
//! format and it is kept deliberately; see DESIGN.md.

use super::error::BankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level granted at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Account lifecycle management
    Admin,
    /// Deposits, withdrawals and statements
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Role name with a leading capital, for announcements
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BankError;

    /// Parse a role typed at the console (case-insensitive, trimmed)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(BankError::invalid_role(s.trim())),
        }
    }
}

/// One line of the credentials file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Credential {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    #[case("  ADMIN ", Role::Admin)]
    #[case("User", Role::User)]
    fn test_role_from_str(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        let result = "root".parse::<Role>();
        assert_eq!(result, Err(BankError::invalid_role("root")));
    }

    #[test]
    fn test_role_display_matches_file_format() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Admin.title(), "Admin");
    }
}
