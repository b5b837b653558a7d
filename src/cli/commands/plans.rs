//! Plans command: print the plans a read would use

use crate::cli::error::CliError;
use crate::cli::output::OutputFormat;
use crate::cli::settings::Settings;
use crate::models::DocumentType;
use crate::plan::PlanTable;

/// Handle the `plans` command
pub fn handle_plans(settings: &Settings) -> Result<(), CliError> {
    let plans = match &settings.plans {
        Some(path) => PlanTable::from_toml_file(path)?,
        None => PlanTable::builtin(),
    };
    println!("{}", format_plans(&plans, settings.format())?);
    Ok(())
}

/// Render a plan table
pub fn format_plans(plans: &PlanTable, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(plans)
            .map_err(|e| CliError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(plans).map_err(|e| CliError::Serialization(e.to_string()))
        }
        OutputFormat::Summary => {
            let mut output = String::new();
            for document in DocumentType::ALL {
                let plan = plans.get(document);
                output.push_str(&format!("{}: {}\n", document, plan.table_names().join(", ")));
                if let Some(root) = &plan.root {
                    output.push_str(&format!("  root: {} -> {}\n", root.source, root.table));
                }
                for op in &plan.explode {
                    output.push_str(&format!(
                        "  explode: {} -> {} [{}]\n",
                        op.source,
                        op.table,
                        op.meta.join(", ")
                    ));
                }
                for op in &plan.expand {
                    output.push_str(&format!(
                        "  expand: {}.{} ({:?})\n",
                        op.table, op.column, op.kind
                    ));
                }
            }
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_every_document() {
        let out = format_plans(&PlanTable::builtin(), OutputFormat::Summary).unwrap();
        assert!(out.contains("events: events, tactics_lineup, related_events, shot_freeze_frame"));
        assert!(out.contains("root: lineup -> lineups"));
        assert!(out.contains("expand: visible_area.visible_area (InterleavedPairList)"));
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let out = format_plans(&PlanTable::builtin(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["events"]["explode"][1]["kind"], "pairwise");
    }
}
