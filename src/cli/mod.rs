//! CLI module for the statsbomb-tables binary

pub mod commands;
pub mod error;
pub mod output;
pub mod settings;

pub use commands::{Cli, Commands, run};
pub use error::CliError;
pub use output::OutputFormat;
