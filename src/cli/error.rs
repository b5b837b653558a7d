//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::LoadError;
use crate::plan::PlanError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Failed to read settings file {0}: {1}")]
    SettingsRead(PathBuf, String),

    #[error("Invalid settings file {0}: {1}")]
    SettingsParse(PathBuf, String),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Load(e) => e.user_message(),
            CliError::Plan(e) => {
                format!("{e}\n\nHint: Check the plan file passed with --plans.")
            }
            _ => self.to_string(),
        }
    }
}
