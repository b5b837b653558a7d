//! Read commands: load one document and write its tables

use crate::cli::error::CliError;
use crate::cli::output::write_tables;
use crate::cli::settings::Settings;
use crate::loader::{DataSource, DocumentRequest};
use crate::plan::PlanTable;

/// Build the data source described by the settings
pub fn data_source(settings: &Settings) -> Result<DataSource, CliError> {
    let plans = match &settings.plans {
        Some(path) => PlanTable::from_toml_file(path)?,
        None => PlanTable::builtin(),
    };
    Ok(DataSource::new(settings.data_root())
        .with_plans(plans)
        .with_config(settings.normalize.clone()))
}

/// Handle the document-reading commands
pub fn handle_read(settings: &Settings, request: &DocumentRequest) -> Result<(), CliError> {
    let source = data_source(settings)?;
    let document = source.read(request)?;

    tracing::info!(
        document = %document.document,
        tables = document.table_count(),
        "Normalized document"
    );

    let tables = document.into_tables();
    write_tables(&tables, settings.format(), settings.output.as_deref())
}
