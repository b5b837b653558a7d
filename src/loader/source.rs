//! Data root layout and document loading

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::{IdentifierKind, LoadError};
use crate::models::DocumentType;
use crate::normalize::{NormalizeConfig, Normalizer};
use crate::plan::PlanTable;

/// A document to load, with the identifiers that locate it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRequest {
    Competitions,
    Matches { competition_id: u64, season_id: u64 },
    Lineups { match_id: u64 },
    Events { match_id: u64 },
    ThreeSixty { match_id: u64 },
}

impl DocumentRequest {
    pub fn document_type(&self) -> DocumentType {
        match self {
            DocumentRequest::Competitions => DocumentType::Competitions,
            DocumentRequest::Matches { .. } => DocumentType::Matches,
            DocumentRequest::Lineups { .. } => DocumentType::Lineups,
            DocumentRequest::Events { .. } => DocumentType::Events,
            DocumentRequest::ThreeSixty { .. } => DocumentType::ThreeSixty,
        }
    }
}

/// An open-data `data` directory plus the plans used to read it
///
/// ```text
/// <root>/competitions.json
/// <root>/matches/<competition_id>/<season_id>.json
/// <root>/lineups/<match_id>.json
/// <root>/events/<match_id>.json
/// <root>/three-sixty/<match_id>.json
/// ```
#[derive(Debug, Clone)]
pub struct DataSource {
    root: PathBuf,
    plans: PlanTable,
    pub(super) normalizer: Normalizer,
}

impl DataSource {
    /// Create a data source over `root` with the built-in plans
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            plans: PlanTable::builtin(),
            normalizer: Normalizer::new(),
        }
    }

    /// Replace the plan table
    pub fn with_plans(mut self, plans: PlanTable) -> Self {
        self.plans = plans;
        self
    }

    /// Replace the normalization configuration
    pub fn with_config(mut self, config: NormalizeConfig) -> Self {
        self.normalizer = Normalizer::with_config(config);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn plans(&self) -> &PlanTable {
        &self.plans
    }

    /// Resolve the path of a document, checking its identifiers exist
    ///
    /// Existence is checked against directory listings, outermost
    /// identifier first, so a missing competition is reported before a
    /// missing season.
    pub fn resolve(&self, request: &DocumentRequest) -> Result<PathBuf, LoadError> {
        let document = request.document_type();
        match *request {
            DocumentRequest::Competitions => Ok(self.root.join("competitions.json")),
            DocumentRequest::Matches {
                competition_id,
                season_id,
            } => {
                let matches_dir = self.root.join("matches");
                let competition = competition_id.to_string();
                if !listing_contains(&matches_dir, &competition)? {
                    return Err(LoadError::NotFound {
                        kind: IdentifierKind::Competition,
                        id: competition,
                        document,
                    });
                }

                let competition_dir = matches_dir.join(&competition);
                let file_name = format!("{}.json", season_id);
                if !listing_contains(&competition_dir, &file_name)? {
                    return Err(LoadError::NotFound {
                        kind: IdentifierKind::Season,
                        id: season_id.to_string(),
                        document,
                    });
                }
                Ok(competition_dir.join(file_name))
            }
            DocumentRequest::Lineups { match_id }
            | DocumentRequest::Events { match_id }
            | DocumentRequest::ThreeSixty { match_id } => {
                let dir = self.root.join(document.as_str());
                let file_name = format!("{}.json", match_id);
                if !listing_contains(&dir, &file_name)? {
                    return Err(LoadError::NotFound {
                        kind: IdentifierKind::Match,
                        id: match_id.to_string(),
                        document,
                    });
                }
                Ok(dir.join(file_name))
            }
        }
    }

    /// Resolve, read and parse a document
    pub fn load(&self, request: &DocumentRequest) -> Result<Value, LoadError> {
        let path = self.resolve(request)?;
        tracing::info!(path = %path.display(), "Loading document");

        let content = fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Json { path, source })
    }
}

/// True when `dir` lists an entry called `name`; a missing `dir` lists nothing
fn listing_contains(dir: &Path, name: &str) -> Result<bool, LoadError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(LoadError::Read {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name().to_str() == Some(name) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn data_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("matches/11")).unwrap();
        fs::write(dir.path().join("matches/11/90.json"), "[]").unwrap();
        fs::create_dir_all(dir.path().join("events")).unwrap();
        fs::write(dir.path().join("events/7.json"), r#"[{"id": "a"}]"#).unwrap();
        dir
    }

    #[test]
    fn test_resolve_matches() {
        let root = data_root();
        let source = DataSource::new(root.path());

        let path = source
            .resolve(&DocumentRequest::Matches {
                competition_id: 11,
                season_id: 90,
            })
            .unwrap();
        assert!(path.ends_with("matches/11/90.json"));
    }

    #[test]
    fn test_missing_competition_reported_first() {
        let root = data_root();
        let source = DataSource::new(root.path());

        let err = source
            .resolve(&DocumentRequest::Matches {
                competition_id: 12,
                season_id: 1,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::NotFound {
                kind: IdentifierKind::Competition,
                ..
            }
        ));

        let err = source
            .resolve(&DocumentRequest::Matches {
                competition_id: 11,
                season_id: 1,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::NotFound {
                kind: IdentifierKind::Season,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_category_dir_is_not_found() {
        let root = data_root();
        let source = DataSource::new(root.path());

        let err = source
            .load(&DocumentRequest::ThreeSixty { match_id: 7 })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_parses_json() {
        let root = data_root();
        let source = DataSource::new(root.path());

        let value = source.load(&DocumentRequest::Events { match_id: 7 }).unwrap();
        assert_eq!(value[0]["id"], "a");
    }
}
