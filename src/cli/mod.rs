// CLI module
// Command-line arguments, console I/O, login session and menus

mod args;
pub mod console;
pub mod menu;
pub mod session;

pub use args::CliArgs;
pub use console::{Console, ScriptedConsole, TerminalConsole};
pub use session::{run_session, SessionEnd};

use crate::core::{BankEngine, DataPaths, RecordStore};
use crate::types::BankError;
use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., unknown flags or --help), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Load the data directory and run one interactive session
///
/// Closing the input stream ends the session normally.
pub fn run<C: Console>(args: &CliArgs, console: &mut C) -> Result<(), BankError> {
    let store = RecordStore::new(DataPaths::in_dir(&args.data_dir));
    let (mut engine, report) = BankEngine::open(store)?;
    session::announce_skipped(console, &report)?;

    match run_session(&mut engine, console) {
        Ok(_) | Err(BankError::InputClosed) => Ok(()),
        Err(e) => Err(e),
    }
}
