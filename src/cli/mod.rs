//! Line-oriented command shell over the ledger store.

pub mod commands;
pub mod core;
pub mod output;
mod shell;

pub use self::core::{CliError, CliMode, ShellContext};
pub use shell::run_cli;
