//! Array explosion into child tables

use serde_json::Value;

use super::config::NormalizeConfig;
use super::error::{NormalizeError, value_type_name};
use super::flatten::flatten_record;
use crate::models::{FlatRecord, Table};
use crate::plan::{ExplodeKind, ExplodeOp};

/// Explode the array column `op.source` of `parent` into a child table
///
/// Every parent row contributes one child row per array element, in order;
/// a null or missing value contributes none. Each child row carries the
/// parent's `op.meta` values as they are in `parent`. The parent table is
/// not modified.
///
/// `op.source`, `op.meta` and the pairwise element column are dotted plan
/// paths; they are matched against `parent` using the configured separator.
pub fn explode(
    parent: &Table,
    op: &ExplodeOp,
    config: &NormalizeConfig,
) -> Result<Table, NormalizeError> {
    let mut records: Vec<FlatRecord> = Vec::new();
    let mut clashes = 0usize;
    let source = config.column_name(&op.source);
    let meta_columns: Vec<String> = op
        .meta
        .iter()
        .map(|field| config.column_name(field).into_owned())
        .collect();
    let value_column = config.column_name(op.value_column());

    for (row_index, row) in parent.rows().enumerate() {
        let items = match row.get(&source) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(NormalizeError::UnexpectedShape {
                    path: format!("$[{}].{}", row_index, op.source),
                    expected: "array",
                    found: value_type_name(other),
                });
            }
        };

        let meta: FlatRecord = meta_columns
            .iter()
            .map(|field| (field.clone(), row.get(field).cloned().unwrap_or(Value::Null)))
            .collect();

        for (item_index, item) in items.iter().enumerate() {
            let record = match op.kind {
                ExplodeKind::Records => {
                    let Value::Object(element) = item else {
                        return Err(NormalizeError::UnexpectedShape {
                            path: format!("$[{}].{}[{}]", row_index, op.source, item_index),
                            expected: "object",
                            found: value_type_name(item),
                        });
                    };
                    let mut record = flatten_record(element, config)?;
                    let before = record.len();
                    record.retain(|(key, _)| !meta.iter().any(|(m, _)| m == key));
                    clashes += before - record.len();
                    record.extend(meta.iter().cloned());
                    record
                }
                ExplodeKind::Pairwise => {
                    let mut record = meta.clone();
                    record.push((value_column.to_string(), item.clone()));
                    record
                }
            };
            records.push(record);
        }
    }

    if clashes > 0 {
        tracing::warn!(
            table = %op.table,
            clashes,
            "Meta fields replaced element fields of the same name"
        );
    }

    let table = Table::from_records(records);
    tracing::debug!(
        source = %op.source,
        table = %op.table,
        rows = table.len(),
        columns = table.column_count(),
        "Exploded array column"
    );
    Ok(table)
}
