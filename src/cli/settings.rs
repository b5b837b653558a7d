//! CLI settings: optional TOML file, overridden by flags
//!
//! ```toml
//! data_root = "open-data/data"
//! format = "yaml"
//! plans = "plans.toml"
//!
//! [normalize]
//! separator = "."
//! max_depth = 16
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::commands::Cli;
use super::error::CliError;
use super::output::OutputFormat;
use crate::normalize::NormalizeConfig;

const DEFAULT_DATA_ROOT: &str = "data";

/// Effective settings for one CLI run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_root: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plans: Option<PathBuf>,
    pub normalize: NormalizeConfig,
}

impl Settings {
    /// Parse a settings file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::SettingsRead(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content)
            .map_err(|e| CliError::SettingsParse(path.to_path_buf(), e.to_string()))
    }

    /// Settings from `--config` (if given) with command-line flags applied on top
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(root) = &cli.data_root {
            settings.data_root = Some(root.clone());
        }
        if let Some(format) = cli.format {
            settings.format = Some(format);
        }
        if let Some(output) = &cli.output {
            settings.output = Some(output.clone());
        }
        if let Some(plans) = &cli.plans {
            settings.plans = Some(plans.clone());
        }
        Ok(settings)
    }

    pub fn data_root(&self) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_ROOT))
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}
