//! Error types for loading documents

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::DocumentType;
use crate::normalize::NormalizeError;

/// Which identifier of a request could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Competition,
    Season,
    Match,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentifierKind::Competition => "competition",
            IdentifierKind::Season => "season",
            IdentifierKind::Match => "match",
        })
    }
}

/// Errors that can occur while loading and normalizing a document
#[derive(Error, Debug)]
pub enum LoadError {
    /// The requested identifier has no document in the data root
    #[error("No {document} document for {kind} id {id}")]
    NotFound {
        kind: IdentifierKind,
        id: String,
        document: DocumentType,
    },

    /// Document or directory could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("JSON parsing error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Document could not be normalized
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// The active plan does not produce a table a reader returns
    #[error("Plan for {document} does not produce table '{table}'")]
    MissingTable {
        document: DocumentType,
        table: String,
    },
}

impl LoadError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            LoadError::NotFound { kind, id, document } => {
                let hint = match (kind, document) {
                    (IdentifierKind::Competition, _) => {
                        "Hint: Run 'competitions' to list available competition ids.".to_string()
                    }
                    (IdentifierKind::Season, _) => {
                        "Hint: Run 'competitions' to list the seasons of each competition."
                            .to_string()
                    }
                    (IdentifierKind::Match, DocumentType::ThreeSixty) => {
                        "Hint: 360 data exists only for some matches.".to_string()
                    }
                    (IdentifierKind::Match, _) => {
                        "Hint: Run 'matches <competition> <season>' to list match ids.".to_string()
                    }
                };
                format!("The specified {kind} id {id} does not exist ({document}).\n\n{hint}")
            }
            LoadError::Json { path, source } => {
                format!(
                    "Invalid JSON in {}:\n{source}\n\nHint: Check that the data root points at the open-data 'data' directory.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }

    /// True when the error is a missing identifier
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}
