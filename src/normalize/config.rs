//! Configuration for normalization

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Configuration for flattening and exploding documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Separator placed between a parent field name and its child names
    pub separator: String,

    /// Maximum nesting depth of objects inside one record
    pub max_depth: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            max_depth: 16,
        }
    }
}

impl NormalizeConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder::default()
    }

    /// Flattened column name for a dotted plan path
    ///
    /// Plans always name nested fields with `.`; the produced columns use
    /// the configured separator.
    pub fn column_name<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if self.separator == "." {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(path.replace('.', &self.separator))
        }
    }
}

/// Builder for NormalizeConfig
#[derive(Debug, Default)]
pub struct NormalizeConfigBuilder {
    config: NormalizeConfig,
}

impl NormalizeConfigBuilder {
    /// Set the path separator (an empty separator falls back to ".")
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        self.config.separator = if separator.is_empty() {
            ".".to_string()
        } else {
            separator
        };
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Build the configuration
    pub fn build(self) -> NormalizeConfig {
        self.config
    }
}
