//! Plan-driven normalization of whole documents

use serde_json::Value;

use super::config::NormalizeConfig;
use super::error::NormalizeError;
use super::explode::explode;
use super::flatten::{flatten_record, records_of};
use crate::expand::{CoordinateSpec, expand_coordinates};
use crate::models::{DocumentType, Table};
use crate::plan::ExtractionPlan;

/// A child table produced by one explode operation
#[derive(Debug, Clone, PartialEq)]
pub struct ChildTable {
    /// Produced table name
    pub name: String,
    /// Flattened column the rows were exploded from
    pub source: String,
    pub table: Table,
}

/// Primary table plus the child tables of one document
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    pub document: DocumentType,
    /// Name of the primary table
    pub primary_name: String,
    pub primary: Table,
    /// Child tables in plan order
    pub children: Vec<ChildTable>,
    /// Configuration the tables were flattened with
    pub config: NormalizeConfig,
}

impl NormalizedDocument {
    /// Look up a table by name, primary included
    pub fn table(&self, name: &str) -> Option<&Table> {
        if name == self.primary_name {
            return Some(&self.primary);
        }
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.table)
    }

    /// Look up a child table by the column it was exploded from
    pub fn child_by_source(&self, source: &str) -> Option<&Table> {
        self.children
            .iter()
            .find(|c| c.source == source)
            .map(|c| &c.table)
    }

    /// Move a table out by name, leaving an empty table in its place
    pub fn take_table(&mut self, name: &str) -> Option<Table> {
        if name == self.primary_name {
            return Some(std::mem::take(&mut self.primary));
        }
        self.children
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| std::mem::take(&mut c.table))
    }

    /// Number of tables, primary included
    pub fn table_count(&self) -> usize {
        1 + self.children.len()
    }

    /// Table names, primary first
    pub fn table_names(&self) -> Vec<&str> {
        std::iter::once(self.primary_name.as_str())
            .chain(self.children.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// All tables as owned `(name, table)` pairs, primary first
    pub fn into_tables(self) -> Vec<(String, Table)> {
        std::iter::once((self.primary_name, self.primary))
            .chain(self.children.into_iter().map(|c| (c.name, c.table)))
            .collect()
    }

    /// Apply the plan's coordinate expansions to every table it names
    ///
    /// Dotted plan columns are matched using the separator the document
    /// was flattened with.
    pub fn expand_with(mut self, plan: &ExtractionPlan) -> Self {
        let specs = expansions_for(plan, &self.primary_name, &self.config);
        if !specs.is_empty() {
            self.primary = expand_coordinates(std::mem::take(&mut self.primary), &specs);
        }
        for child in &mut self.children {
            let specs = expansions_for(plan, &child.name, &self.config);
            if !specs.is_empty() {
                child.table = expand_coordinates(std::mem::take(&mut child.table), &specs);
            }
        }
        self
    }
}

fn expansions_for(
    plan: &ExtractionPlan,
    table: &str,
    config: &NormalizeConfig,
) -> Vec<CoordinateSpec> {
    plan.expansions_for(table)
        .into_iter()
        .map(|spec| CoordinateSpec {
            column: config.column_name(&spec.column).into_owned(),
            ..spec
        })
        .collect()
}

/// Normalizes documents according to an extraction plan
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom configuration
    pub fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Flatten a document into a single table, without any explosion
    pub fn flatten(&self, document: &Value) -> Result<Table, NormalizeError> {
        let records = records_of(document)?
            .into_iter()
            .map(|record| flatten_record(record, &self.config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_records(records))
    }

    /// Normalize a document into a primary table and its child tables
    ///
    /// The root explosion (if any) runs first and its rows become the
    /// primary table. Each explode operation then reads the primary table
    /// as it stands, so meta values are the parent's values before any
    /// column is dropped or expanded. Exploded source columns are dropped
    /// from the primary table last.
    pub fn normalize(
        &self,
        document: &Value,
        plan: &ExtractionPlan,
    ) -> Result<NormalizedDocument, NormalizeError> {
        let mut primary = self.flatten(document)?;

        if let Some(root) = &plan.root {
            primary = explode(&primary, root, &self.config)?;
        }

        let mut children = Vec::with_capacity(plan.explode.len());
        for op in &plan.explode {
            let table = explode(&primary, op, &self.config)?;
            children.push(ChildTable {
                name: op.table.clone(),
                source: op.source.clone(),
                table,
            });
        }

        let sources: Vec<String> = plan
            .explode
            .iter()
            .map(|op| self.config.column_name(&op.source).into_owned())
            .collect();
        primary.drop_columns(&sources);

        tracing::debug!(
            document = %plan.document,
            rows = primary.len(),
            columns = primary.column_count(),
            children = children.len(),
            "Normalized document"
        );

        Ok(NormalizedDocument {
            document: plan.document,
            primary_name: plan.primary.clone(),
            primary,
            children,
            config: self.config.clone(),
        })
    }
}

/// Normalize a document with the default configuration
pub fn normalize(
    document: &Value,
    plan: &ExtractionPlan,
) -> Result<NormalizedDocument, NormalizeError> {
    Normalizer::new().normalize(document, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::builtin_plan;
    use serde_json::json;

    #[test]
    fn test_matches_plan() {
        let document = json!([
            {
                "match_id": 100,
                "home_team": {"home_team_id": 1, "managers": [{"id": 5, "name": "H"}]},
                "away_team": {"away_team_id": 2, "managers": [{"id": 6}, {"id": 7}]},
            },
            {
                "match_id": 101,
                "home_team": {"home_team_id": 3},
                "away_team": {"away_team_id": 4, "managers": null},
            }
        ]);

        let doc = normalize(&document, builtin_plan(DocumentType::Matches)).unwrap();

        assert_eq!(doc.table_names(), vec!["matches", "home_managers", "away_managers"]);
        assert_eq!(
            doc.primary.columns(),
            &["match_id", "home_team.home_team_id", "away_team.away_team_id"]
        );
        let home = doc.table("home_managers").unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home.value(0, "match_id"), &json!(100));
        let away = doc.child_by_source("away_team.managers").unwrap();
        assert_eq!(away.len(), 2);
    }

    #[test]
    fn test_root_explosion_becomes_primary() {
        let document = json!([
            {"team_id": 1, "team_name": "A", "lineup": [
                {"player_id": 10, "player_name": "P", "cards": [], "positions": [{"position_id": 1}]},
                {"player_id": 11, "player_name": "Q", "cards": [{"card_type": "Yellow Card"}], "positions": []},
            ]},
            {"team_id": 2, "team_name": "B", "lineup": [
                {"player_id": 20, "player_name": "R", "cards": [], "positions": []},
            ]},
        ]);

        let doc = normalize(&document, builtin_plan(DocumentType::Lineups)).unwrap();

        assert_eq!(doc.primary.len(), 3);
        assert_eq!(
            doc.primary.columns(),
            &["player_id", "player_name", "team_id", "team_name"]
        );
        assert_eq!(doc.primary.value(2, "team_name"), &json!("B"));

        let cards = doc.table("cards").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards.value(0, "player_id"), &json!(11));
        assert_eq!(doc.table("positions").unwrap().len(), 1);
    }

    #[test]
    fn test_meta_taken_before_expansion() {
        let document = json!([
            {"id": "e1", "location": [1, 2], "shot": {"end_location": [3, 4], "freeze_frame": [
                {"location": [5, 6], "teammate": true}
            ]}}
        ]);
        let plan = builtin_plan(DocumentType::Events);

        let doc = normalize(&document, plan).unwrap().expand_with(plan);

        assert!(!doc.primary.has_column("location"));
        assert!(!doc.primary.has_column("shot.freeze_frame"));
        assert_eq!(doc.primary.value(0, "shot.end_location_z"), &Value::Null);
        let frame = doc.table("shot_freeze_frame").unwrap();
        assert_eq!(frame.columns(), &["location_x", "location_y", "teammate", "id"]);
        assert_eq!(frame.value(0, "id"), &json!("e1"));
    }

    #[test]
    fn test_builtin_plan_with_custom_separator() {
        let document = json!([
            {
                "id": "e1",
                "location": [1, 2],
                "pass": {"end_location": [3, 4]},
                "tactics": {"lineup": [{"player": {"id": 1}}, {"player": {"id": 2}}]}
            }
        ]);
        let plan = builtin_plan(DocumentType::Events);
        let config = NormalizeConfig::builder().separator("__").build();

        let doc = Normalizer::with_config(config)
            .normalize(&document, plan)
            .unwrap()
            .expand_with(plan);

        let lineup = doc.table("tactics_lineup").unwrap();
        assert_eq!(lineup.len(), 2);
        assert_eq!(lineup.value(1, "player__id"), &json!(2));
        assert_eq!(lineup.value(1, "id"), &json!("e1"));
        assert_eq!(
            doc.primary.columns(),
            &["id", "location_x", "location_y", "pass__end_location_x", "pass__end_location_y"]
        );
    }

    #[test]
    fn test_single_record_document() {
        let doc = normalize(
            &json!({"competition_id": 1}),
            builtin_plan(DocumentType::Competitions),
        )
        .unwrap();
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.primary.len(), 1);
    }

    #[test]
    fn test_take_table() {
        let mut doc = normalize(
            &json!([{"competition_id": 1}]),
            builtin_plan(DocumentType::Competitions),
        )
        .unwrap();
        let table = doc.take_table("competitions").unwrap();
        assert_eq!(table.len(), 1);
        assert!(doc.primary.is_empty());
        assert!(doc.take_table("unknown").is_none());
    }
}
