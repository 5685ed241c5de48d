//! Numbered admin and user menus
//!
//! Each menu loops until its logout entry is chosen. Validation and lookup
//! failures are printed and the same menu is shown again; I/O failures and
//! closed input end the loop with an error.

use crate::cli::console::Console;
use crate::core::engine::{normalize_name, BankEngine, Deletion};
use crate::types::BankError;

const CHOICE_PROMPT: &str = "Enter your choice: ";

/// Admin menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminChoice {
    CreateAccount,
    DeleteAccount,
    UpdateAccountName,
    Logout,
}

impl AdminChoice {
    pub const MENU: [&'static str; 4] = [
        "1. Create New Account",
        "2. Delete Account",
        "3. Update Account Name",
        "4. Logout",
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(AdminChoice::CreateAccount),
            "2" => Some(AdminChoice::DeleteAccount),
            "3" => Some(AdminChoice::UpdateAccountName),
            "4" => Some(AdminChoice::Logout),
            _ => None,
        }
    }
}

/// User menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    Deposit,
    Withdraw,
    CheckBalance,
    ViewTransactions,
    Logout,
}

impl UserChoice {
    pub const MENU: [&'static str; 5] = [
        "1. Deposit",
        "2. Withdraw",
        "3. Check Balance",
        "4. View Transactions",
        "5. Logout",
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(UserChoice::Deposit),
            "2" => Some(UserChoice::Withdraw),
            "3" => Some(UserChoice::CheckBalance),
            "4" => Some(UserChoice::ViewTransactions),
            "5" => Some(UserChoice::Logout),
            _ => None,
        }
    }
}

fn show_menu<C: Console>(console: &mut C, title: &str, entries: &[&str]) -> Result<(), BankError> {
    console.say("")?;
    console.say(title)?;
    for entry in entries {
        console.say(entry)?;
    }
    Ok(())
}

/// Print a recoverable failure, pass anything else up
fn report<C: Console>(console: &mut C, result: Result<(), BankError>) -> Result<(), BankError> {
    match result {
        Err(e) if e.is_recoverable() => console.say(&e.to_string()),
        other => other,
    }
}

/// Run the admin menu until logout
pub fn admin_menu<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    loop {
        show_menu(console, "Admin Menu", &AdminChoice::MENU)?;
        let choice = console.read_line(CHOICE_PROMPT)?;

        let result = match AdminChoice::parse(&choice) {
            Some(AdminChoice::CreateAccount) => create_account(engine, console),
            Some(AdminChoice::DeleteAccount) => delete_account(engine, console),
            Some(AdminChoice::UpdateAccountName) => update_account(engine, console),
            Some(AdminChoice::Logout) => return Ok(()),
            None => console.say("Invalid option"),
        };
        report(console, result)?;
    }
}

/// Run the user menu until logout
pub fn user_menu<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    loop {
        show_menu(console, "User Menu", &UserChoice::MENU)?;
        let choice = console.read_line(CHOICE_PROMPT)?;

        let result = match UserChoice::parse(&choice) {
            Some(UserChoice::Deposit) => deposit(engine, console),
            Some(UserChoice::Withdraw) => withdraw(engine, console),
            Some(UserChoice::CheckBalance) => check_balance(engine, console),
            Some(UserChoice::ViewTransactions) => transaction_history(engine, console),
            Some(UserChoice::Logout) => return Ok(()),
            None => console.say("Invalid option"),
        };
        report(console, result)?;
    }
}

fn create_account<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let name = normalize_name(&console.read_line("Enter Your Full Name: ")?)?;
    let balance = console.read_line("Enter Initial Balance: ")?;

    let created = engine.create_account(&name, &balance)?;

    console.say("")?;
    console.say("Account Created Successfully.")?;
    console.say(&format!("Account Number: {}", created.number))?;
    console.say(&format!("Username: {}", created.username))?;
    console.say(&format!("Password: {}", created.password))
}

fn delete_account<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter account number to delete: ")?)?;
    let answer = console.read_line(&format!(
        "Are you sure you want to delete account {}? (yes/no): ",
        number
    ))?;

    match engine.delete_account(&number, &answer)? {
        Deletion::Deleted { .. } => console.say(&format!("Account {} deleted successfully.", number)),
        Deletion::Cancelled => console.say("Deletion cancelled."),
    }
}

fn update_account<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter account number: ")?)?;
    let new_name = console.read_line("Enter new name: ")?;

    let renamed = engine.update_name(&number, &new_name)?;
    console.say(&format!(
        "Name updated from {} to {}.",
        renamed.old_name, renamed.new_name
    ))
}

fn deposit<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter Account Number: ")?)?;
    let amount = console.read_line("Enter amount to deposit: ")?;

    engine.deposit(&number, &amount)?;
    console.say("Deposit successful.")
}

fn withdraw<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter Account Number: ")?)?;
    let amount = console.read_line("Enter amount to withdraw: ")?;

    engine.withdraw(&number, &amount)?;
    console.say("Withdrawal successful.")
}

fn check_balance<C: Console>(engine: &mut BankEngine, console: &mut C) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter Account Number: ")?)?;
    let balance = engine.balance(&number)?;
    console.say(&format!("Your Balance is Rs.{}", balance))
}

fn transaction_history<C: Console>(
    engine: &mut BankEngine,
    console: &mut C,
) -> Result<(), BankError> {
    let number = engine.require_account(&console.read_line("Enter Account Number: ")?)?;

    console.say("Last 5 Transactions:")?;
    for entry in engine.history(&number)? {
        console.say(&format!("- {}", entry))?;
    }
    Ok(())
}
