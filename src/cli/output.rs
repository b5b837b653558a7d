//! Output formatting for CLI

use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::error::CliError;
use crate::models::Table;

/// How tables are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON, rows as objects
    #[default]
    Json,
    /// YAML, rows as mappings
    Yaml,
    /// Row and column counts per table
    Summary,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Summary => "txt",
        }
    }
}

/// Named tables serialized as one map, keys in table order
struct NamedTables<'a>(&'a [(String, Table)]);

impl Serialize for NamedTables<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, table) in self.0 {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}

fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Serialization(e.to_string()))
        }
        _ => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Serialization(e.to_string())),
    }
}

/// Format table shapes in compact mode
pub fn format_summary(tables: &[(String, Table)]) -> String {
    let mut output = String::new();
    for (name, table) in tables {
        push_summary(&mut output, name, table);
    }
    output
}

fn push_summary(output: &mut String, name: &str, table: &Table) {
    output.push_str(&format!(
        "{}: {} rows, {} columns\n",
        name,
        table.len(),
        table.column_count()
    ));
    if !table.columns().is_empty() {
        output.push_str(&format!("  Columns: {}\n", table.columns().join(", ")));
    }
}

/// Render all tables as one document
pub fn render(tables: &[(String, Table)], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Summary => Ok(format_summary(tables)),
        _ => serialize(&NamedTables(tables), format),
    }
}

/// Write tables to stdout, or one file per table under `output`
pub fn write_tables(
    tables: &[(String, Table)],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let Some(dir) = output else {
        println!("{}", render(tables, format)?);
        return Ok(());
    };

    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::FileWriteError(dir.to_path_buf(), e.to_string()))?;

    for (name, table) in tables {
        let path = dir.join(format!("{}.{}", name, format.extension()));
        let content = match format {
            OutputFormat::Summary => {
                let mut summary = String::new();
                push_summary(&mut summary, name, table);
                summary
            }
            _ => serialize(table, format)?,
        };
        std::fs::write(&path, content)
            .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
        eprintln!("  {} ({} rows) -> {}", name, table.len(), path.display());
    }
    Ok(())
}
