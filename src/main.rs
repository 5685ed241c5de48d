//! Flat-file banking simulator CLI
//!
//! Interactive, single-user banking on plain text files.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ./bank-data
//! RUST_LOG=flatfile_bank=debug cargo run -- --data-dir ./bank-data
//! ```
//!
//! On first run with no credentials the program asks for an initial admin or
//! user login. After that it asks for a username and password and opens the
//! admin or user menu.
//!
//! # Exit Codes
//!
//! - 0: Normal termination (logout, locked login, or end of input)
//! - 1: Fatal error (data files unreadable or unwritable)

use flatfile_bank::cli::{self, TerminalConsole};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    // Logs go to stderr so they never interleave with menu output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut console = TerminalConsole::new();
    if let Err(e) = cli::run(&args, &mut console) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
