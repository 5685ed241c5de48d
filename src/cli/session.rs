//! Login session
//!
//! A session reads the credentials file, runs first-run setup when it is
//! empty, then allows up to three login attempts. A successful login enters
//! the menu for the credential's role; the session ends at logout. There is
//! no second login in the same process.

use crate::cli::console::Console;
use crate::cli::menu::{admin_menu, user_menu};
use crate::core::auth::{CredentialBook, LoginAttempts, LoginOutcome};
use crate::core::engine::BankEngine;
use crate::core::record_store::LoadReport;
use crate::types::{BankError, Role};
use tracing::{info, warn};

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user logged in and later chose logout
    LoggedOut(Role),
    /// Three consecutive login failures
    LockedOut,
}

/// Tell the user about records skipped while loading
pub fn announce_skipped<C: Console>(console: &mut C, report: &LoadReport) -> Result<(), BankError> {
    if report.is_clean() {
        return Ok(());
    }
    console.say(&format!(
        "Warning: skipped {} malformed record(s):",
        report.skipped.len()
    ))?;
    for error in &report.skipped {
        console.say(&format!("  {}", error))?;
    }
    Ok(())
}

/// Run one complete session: setup if needed, login, role menu
pub fn run_session<C: Console>(
    engine: &mut BankEngine,
    console: &mut C,
) -> Result<SessionEnd, BankError> {
    loop {
        let (book, report) = engine.credentials()?;
        announce_skipped(console, &report)?;

        if book.is_empty() {
            console.say("No credentials found. Please create an account.")?;
            bootstrap_credentials(engine, console)?;
            continue;
        }

        return match login(&book, console)? {
            LoginOutcome::Granted { username, role } => {
                info!("User '{}' logged in as {}", username, role);
                console.say(&format!("Login successful! You are a {}", role))?;
                match role {
                    Role::Admin => admin_menu(engine, console)?,
                    Role::User => user_menu(engine, console)?,
                }
                Ok(SessionEnd::LoggedOut(role))
            }
            LoginOutcome::Locked => {
                console.say("Too many failed attempts. Login locked.")?;
                Ok(SessionEnd::LockedOut)
            }
        };
    }
}

/// Prompt for credentials until they match or the attempt budget runs out
pub fn login<C: Console>(
    book: &CredentialBook,
    console: &mut C,
) -> Result<LoginOutcome, BankError> {
    let mut attempts = LoginAttempts::new();
    loop {
        let username = console.read_line("Enter username: ")?;
        let password = console.read_password("Enter your password: ")?;

        if let Some(role) = book.authenticate(&username, &password) {
            return Ok(LoginOutcome::Granted { username, role });
        }

        console.say("Login failed. Wrong credentials.")?;
        if attempts.record_failure() {
            warn!("Login locked after repeated failures, last user '{}'", username);
            return Ok(LoginOutcome::Locked);
        }
        warn!("Failed login for '{}'", username);
        console.say(&format!("{} attempt(s) left.", attempts.remaining()))?;
    }
}

/// First-run setup: create one credential from console input
///
/// Re-prompts until a valid role and a non-empty username are given.
pub fn bootstrap_credentials<C: Console>(
    engine: &mut BankEngine,
    console: &mut C,
) -> Result<(), BankError> {
    let role = loop {
        match console.read_line("Enter your role (admin/user): ")?.parse::<Role>() {
            Ok(role) => break role,
            Err(e) => console.say(&e.to_string())?,
        }
    };

    loop {
        let username = console.read_line("Enter your username: ")?;
        let password = console.read_password("Create a password: ")?;
        match engine.register_credential(&username, password.trim(), role) {
            Ok(_) => break,
            Err(e) if e.is_recoverable() => console.say(&e.to_string())?,
            Err(e) => return Err(e),
        }
    }

    console.say(&format!("{} credentials created successfully!", role.title()))
}
