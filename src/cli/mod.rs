//! CLI layer: argument parsing, one-shot and interactive runs

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, ShellLine, TaskArgs};
pub use error::{CliError, CliResult};
