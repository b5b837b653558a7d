//! Plan table: one plan per document type, optionally loaded from TOML
//!
//! A plan file lists `[[plan]]` entries. Each entry replaces the built-in
//! plan of its document type; types the file does not mention keep their
//! built-in plan.
//!
//! ```toml
//! [[plan]]
//! document = "matches"
//! primary = "matches"
//!
//! [[plan.explode]]
//! source = "home_team.managers"
//! table = "home_managers"
//! meta = ["match_id"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builtin::builtin_plan;
use super::error::PlanError;
use super::types::ExtractionPlan;
use crate::models::DocumentType;

#[derive(Debug, Deserialize)]
struct PlanFile {
    #[serde(default, rename = "plan")]
    plans: Vec<ExtractionPlan>,
}

/// The plan for every document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanTable {
    competitions: ExtractionPlan,
    matches: ExtractionPlan,
    lineups: ExtractionPlan,
    events: ExtractionPlan,
    three_sixty: ExtractionPlan,
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlanTable {
    /// Plan table made of the built-in plans
    pub fn builtin() -> Self {
        Self {
            competitions: builtin_plan(DocumentType::Competitions).clone(),
            matches: builtin_plan(DocumentType::Matches).clone(),
            lineups: builtin_plan(DocumentType::Lineups).clone(),
            events: builtin_plan(DocumentType::Events).clone(),
            three_sixty: builtin_plan(DocumentType::ThreeSixty).clone(),
        }
    }

    /// Parse a TOML plan file and merge it over the built-in plans
    pub fn from_toml_str(content: &str) -> Result<Self, PlanError> {
        let file: PlanFile = toml::from_str(content)?;
        let mut table = Self::builtin();
        let mut seen: Vec<DocumentType> = Vec::new();

        for plan in file.plans {
            if seen.contains(&plan.document) {
                return Err(PlanError::DuplicatePlan(plan.document));
            }
            seen.push(plan.document);
            table.insert(plan)?;
        }

        tracing::debug!(overrides = seen.len(), "Loaded plan table");
        Ok(table)
    }

    /// Read and parse a TOML plan file
    pub fn from_toml_file(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate a plan and make it the plan for its document type
    pub fn insert(&mut self, plan: ExtractionPlan) -> Result<(), PlanError> {
        plan.validate()?;
        let document = plan.document;
        *self.slot_mut(document) = plan;
        Ok(())
    }

    /// Plan for a document type
    pub fn get(&self, document: DocumentType) -> &ExtractionPlan {
        match document {
            DocumentType::Competitions => &self.competitions,
            DocumentType::Matches => &self.matches,
            DocumentType::Lineups => &self.lineups,
            DocumentType::Events => &self.events,
            DocumentType::ThreeSixty => &self.three_sixty,
        }
    }

    fn slot_mut(&mut self, document: DocumentType) -> &mut ExtractionPlan {
        match document {
            DocumentType::Competitions => &mut self.competitions,
            DocumentType::Matches => &mut self.matches,
            DocumentType::Lineups => &mut self.lineups,
            DocumentType::Events => &mut self.events,
            DocumentType::ThreeSixty => &mut self.three_sixty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::CoordinateKind;
    use crate::plan::ExplodeKind;

    #[test]
    fn test_empty_file_is_builtin() {
        let table = PlanTable::from_toml_str("").unwrap();
        assert_eq!(table, PlanTable::builtin());
    }

    #[test]
    fn test_override_one_document() {
        let content = r#"
            [[plan]]
            document = "events"
            primary = "events"

            [[plan.explode]]
            source = "related_events"
            table = "event_links"
            meta = ["id"]
            kind = "pairwise"
            value_column = "referenced_id"

            [[plan.expand]]
            table = "events"
            column = "location"
            kind = "pair"
        "#;

        let table = PlanTable::from_toml_str(content).unwrap();
        let events = table.get(DocumentType::Events);

        assert_eq!(events.explode.len(), 1);
        assert_eq!(events.explode[0].kind, ExplodeKind::Pairwise);
        assert_eq!(events.explode[0].value_column(), "referenced_id");
        assert_eq!(events.expand[0].kind, CoordinateKind::Pair);
        assert_eq!(
            table.get(DocumentType::Matches),
            builtin_plan(DocumentType::Matches)
        );
    }

    #[test]
    fn test_root_explosion_from_toml() {
        let content = r#"
            [[plan]]
            document = "lineups"
            primary = "players"

            [plan.root]
            source = "lineup"
            table = "players"
            meta = ["team_id"]
        "#;

        let table = PlanTable::from_toml_str(content).unwrap();
        let root = table.get(DocumentType::Lineups).root.as_ref().unwrap();
        assert_eq!(root.source, "lineup");
    }

    #[test]
    fn test_missing_meta_is_rejected_at_load() {
        let content = r#"
            [[plan]]
            document = "matches"
            primary = "matches"

            [[plan.explode]]
            source = "home_team.managers"
            table = "home_managers"
            meta = []
        "#;

        let err = PlanTable::from_toml_str(content).unwrap_err();
        assert!(matches!(err, PlanError::MissingMetaFields { .. }));
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let content = r#"
            [[plan]]
            document = "competitions"
            primary = "competitions"

            [[plan]]
            document = "competitions"
            primary = "seasons"
        "#;

        let err = PlanTable::from_toml_str(content).unwrap_err();
        assert!(matches!(err, PlanError::DuplicatePlan(DocumentType::Competitions)));
    }

    #[test]
    fn test_insert_replaces_plan() {
        let mut table = PlanTable::builtin();
        table
            .insert(ExtractionPlan::new(DocumentType::ThreeSixty, "frames"))
            .unwrap();
        assert_eq!(table.get(DocumentType::ThreeSixty).primary, "frames");
        assert_eq!(
            table.get(DocumentType::Events),
            builtin_plan(DocumentType::Events)
        );
    }

    #[test]
    fn test_pairwise_meta_clash_rejected_at_load() {
        let content = r#"
            [[plan]]
            document = "events"
            primary = "events"

            [[plan.explode]]
            source = "related_events"
            table = "event_links"
            meta = ["id"]
            kind = "pairwise"
            value_column = "id"
        "#;

        let err = PlanTable::from_toml_str(content).unwrap_err();
        assert!(matches!(err, PlanError::ValueColumnClash { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            PlanTable::from_toml_str("[[plan]]\ndocument = 3"),
            Err(PlanError::Toml(_))
        ));
    }
}
