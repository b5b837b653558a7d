//! Error types for extraction plans

use std::path::PathBuf;

use thiserror::Error;

use crate::models::DocumentType;

/// Errors found while loading or validating plans
///
/// These are configuration errors: they surface when a plan table is built,
/// never while a document is being normalized.
#[derive(Error, Debug)]
pub enum PlanError {
    /// An explosion names no meta field, so its rows could not be linked
    #[error("Plan for {document}: explosion into '{table}' has no meta fields")]
    MissingMetaFields { document: DocumentType, table: String },

    /// An explosion names an empty source column
    #[error("Plan for {document}: explosion into '{table}' has an empty source path")]
    EmptySource { document: DocumentType, table: String },

    /// A pairwise element column shares its name with a meta field
    #[error("Plan for {document}: pairwise table '{table}' uses '{column}' as both meta field and element column")]
    ValueColumnClash {
        document: DocumentType,
        table: String,
        column: String,
    },

    /// Two tables of one plan share a name
    #[error("Plan for {document}: table '{table}' is produced more than once")]
    DuplicateTable { document: DocumentType, table: String },

    /// An expansion targets a table the plan does not produce
    #[error("Plan for {document}: expansion targets unknown table '{table}'")]
    UnknownExpansionTable { document: DocumentType, table: String },

    /// The same document type appears twice in one plan file
    #[error("Plan file defines {0} more than once")]
    DuplicatePlan(DocumentType),

    /// Plan file could not be read
    #[error("Failed to read plan file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Plan file is not valid TOML for a plan table
    #[error("Invalid plan file: {0}")]
    Toml(#[from] toml::de::Error),
}
