//! CLI command implementations

pub mod plans;
pub mod read;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::error::CliError;
use super::output::OutputFormat;
use super::settings::Settings;
use crate::loader::DocumentRequest;

#[derive(Parser, Debug)]
#[command(
    name = "statsbomb-tables",
    about = "Flatten open-data event JSON into relational tables",
    version
)]
pub struct Cli {
    /// Open-data `data` directory (default: ./data)
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Plan file (TOML) overriding the built-in plans
    #[arg(long, global = true)]
    pub plans: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write one file per table into this directory instead of stdout
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Competitions and seasons
    Competitions,
    /// Matches of one competition season, with home and away managers
    Matches {
        /// Competition id
        competition: u64,
        /// Season id
        season: u64,
    },
    /// Players of one match, with cards and positions
    Lineups {
        /// Match id
        match_id: u64,
    },
    /// Events of one match, with tactics, related events and shot freeze frames
    Events {
        /// Match id
        match_id: u64,
    },
    /// 360 frames of one match, with visible areas and freeze frames
    ThreeSixty {
        /// Match id
        match_id: u64,
    },
    /// Print the active extraction plans
    Plans,
}

impl Commands {
    /// Document request for commands that read data
    pub fn request(&self) -> Option<DocumentRequest> {
        match *self {
            Commands::Competitions => Some(DocumentRequest::Competitions),
            Commands::Matches {
                competition,
                season,
            } => Some(DocumentRequest::Matches {
                competition_id: competition,
                season_id: season,
            }),
            Commands::Lineups { match_id } => Some(DocumentRequest::Lineups { match_id }),
            Commands::Events { match_id } => Some(DocumentRequest::Events { match_id }),
            Commands::ThreeSixty { match_id } => Some(DocumentRequest::ThreeSixty { match_id }),
            Commands::Plans => None,
        }
    }
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::resolve(&cli)?;
    match cli.command.request() {
        Some(request) => read::handle_read(&settings, &request),
        None => plans::handle_plans(&settings),
    }
}
