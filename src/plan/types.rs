//! Extraction plan types

use serde::{Deserialize, Serialize};

use super::error::PlanError;
use crate::expand::{CoordinateKind, CoordinateSpec};
use crate::models::DocumentType;

/// How the elements of an exploded array become rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplodeKind {
    /// Array of objects; each element is flattened into a row
    #[default]
    Records,
    /// Array of scalars; each element becomes a single value column
    Pairwise,
}

/// One array column to lift into its own table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodeOp {
    /// Flattened column holding the array (e.g. `home_team.managers`)
    pub source: String,
    /// Name of the produced table
    pub table: String,
    /// Parent columns copied into every produced row, in order
    pub meta: Vec<String>,
    #[serde(default)]
    pub kind: ExplodeKind,
    /// Column name for pairwise elements; defaults to `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
}

impl ExplodeOp {
    /// Explode an array of objects
    pub fn records(source: &str, table: &str, meta: &[&str]) -> Self {
        Self {
            source: source.to_string(),
            table: table.to_string(),
            meta: meta.iter().map(|m| m.to_string()).collect(),
            kind: ExplodeKind::Records,
            value_column: None,
        }
    }

    /// Explode an array of scalars, one `(meta..., element)` row per element
    pub fn pairwise(source: &str, table: &str, meta: &[&str]) -> Self {
        Self {
            kind: ExplodeKind::Pairwise,
            ..Self::records(source, table, meta)
        }
    }

    /// Rename the element column of a pairwise explosion
    pub fn with_value_column(mut self, column: &str) -> Self {
        self.value_column = Some(column.to_string());
        self
    }

    /// Column receiving pairwise elements
    pub fn value_column(&self) -> &str {
        self.value_column.as_deref().unwrap_or(&self.source)
    }
}

/// One coordinate column of one table to expand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandOp {
    pub table: String,
    pub column: String,
    pub kind: CoordinateKind,
}

impl ExpandOp {
    pub fn new(table: &str, column: &str, kind: CoordinateKind) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            kind,
        }
    }
}

/// Declarative description of how one document type becomes tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPlan {
    pub document: DocumentType,
    /// Name of the primary table
    pub primary: String,
    /// Explosion whose rows replace the primary table, run before `explode`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<ExplodeOp>,
    #[serde(default)]
    pub explode: Vec<ExplodeOp>,
    #[serde(default)]
    pub expand: Vec<ExpandOp>,
}

impl ExtractionPlan {
    /// Plan with a primary table and nothing else
    pub fn new(document: DocumentType, primary: &str) -> Self {
        Self {
            document,
            primary: primary.to_string(),
            root: None,
            explode: Vec::new(),
            expand: Vec::new(),
        }
    }

    pub fn root(mut self, op: ExplodeOp) -> Self {
        self.root = Some(op);
        self
    }

    pub fn explode(mut self, op: ExplodeOp) -> Self {
        self.explode.push(op);
        self
    }

    pub fn expand(mut self, table: &str, column: &str, kind: CoordinateKind) -> Self {
        self.expand.push(ExpandOp::new(table, column, kind));
        self
    }

    /// Table names this plan produces, primary first
    pub fn table_names(&self) -> Vec<&str> {
        std::iter::once(self.primary.as_str())
            .chain(self.explode.iter().map(|op| op.table.as_str()))
            .collect()
    }

    /// Coordinate specs for one table, in plan order
    pub fn expansions_for(&self, table: &str) -> Vec<CoordinateSpec> {
        self.expand
            .iter()
            .filter(|op| op.table == table)
            .map(|op| CoordinateSpec::new(op.column.clone(), op.kind))
            .collect()
    }

    /// Check the plan is well formed
    ///
    /// Every explosion needs at least one meta field to link back to its
    /// parent, and a pairwise element column must not reuse a meta name.
    /// Table names must be unique and expansions must target a table the
    /// plan produces.
    pub fn validate(&self) -> Result<(), PlanError> {
        for op in self.root.iter().chain(self.explode.iter()) {
            if op.meta.is_empty() {
                return Err(PlanError::MissingMetaFields {
                    document: self.document,
                    table: op.table.clone(),
                });
            }
            if op.source.is_empty() {
                return Err(PlanError::EmptySource {
                    document: self.document,
                    table: op.table.clone(),
                });
            }
            if op.kind == ExplodeKind::Pairwise && op.meta.iter().any(|m| m == op.value_column()) {
                return Err(PlanError::ValueColumnClash {
                    document: self.document,
                    table: op.table.clone(),
                    column: op.value_column().to_string(),
                });
            }
        }

        let names = self.table_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(PlanError::DuplicateTable {
                    document: self.document,
                    table: name.to_string(),
                });
            }
        }

        if let Some(op) = self.expand.iter().find(|op| !names.contains(&op.table.as_str())) {
            return Err(PlanError::UnknownExpansionTable {
                document: self.document,
                table: op.table.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_column_defaults_to_source() {
        let op = ExplodeOp::pairwise("related_events", "related_events", &["id"]);
        assert_eq!(op.value_column(), "related_events");
        let op = op.with_value_column("referenced_id");
        assert_eq!(op.value_column(), "referenced_id");
    }

    #[test]
    fn test_validate_requires_meta() {
        let plan = ExtractionPlan::new(DocumentType::Events, "events")
            .explode(ExplodeOp::records("shot.freeze_frame", "frames", &[]));
        assert!(matches!(
            plan.validate(),
            Err(PlanError::MissingMetaFields { .. })
        ));
    }

    #[test]
    fn test_validate_pairwise_value_column_clash() {
        let plan = ExtractionPlan::new(DocumentType::Events, "events")
            .explode(ExplodeOp::pairwise("related_events", "related", &["id"]).with_value_column("id"));
        assert!(matches!(
            plan.validate(),
            Err(PlanError::ValueColumnClash { ref column, .. }) if column == "id"
        ));

        let plan = ExtractionPlan::new(DocumentType::Events, "events")
            .explode(ExplodeOp::pairwise("id", "ids", &["id"]));
        assert!(matches!(
            plan.validate(),
            Err(PlanError::ValueColumnClash { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_tables() {
        let plan = ExtractionPlan::new(DocumentType::Matches, "matches")
            .explode(ExplodeOp::records("a", "matches", &["match_id"]));
        assert!(matches!(
            plan.validate(),
            Err(PlanError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn test_validate_expansion_target() {
        let plan = ExtractionPlan::new(DocumentType::Events, "events").expand(
            "nowhere",
            "location",
            CoordinateKind::Pair,
        );
        assert!(matches!(
            plan.validate(),
            Err(PlanError::UnknownExpansionTable { .. })
        ));
    }

    #[test]
    fn test_expansions_for_keeps_order() {
        let plan = ExtractionPlan::new(DocumentType::Events, "events")
            .expand("events", "b", CoordinateKind::Pair)
            .expand("other", "x", CoordinateKind::Pair)
            .expand("events", "a", CoordinateKind::TripleOptionalZ);
        let specs = plan.expansions_for("events");
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].column, "b");
        assert_eq!(specs[1].kind, CoordinateKind::TripleOptionalZ);
    }
}
