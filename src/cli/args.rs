use clap::Parser;
use std::path::PathBuf;

/// Interactive flat-file banking simulator
#[derive(Parser, Debug)]
#[command(name = "flatfile-bank")]
#[command(about = "Interactive flat-file banking simulator", long_about = None)]
pub struct CliArgs {
    /// Directory holding the account, transaction, credential and counter files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding the data files"
    )]
    pub data_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter (e.g. 'info', 'flatfile_bank=debug'); RUST_LOG takes precedence"
    )]
    pub log_level: String,
}
