//! Coordinate expansion
//!
//! Pitch coordinates arrive as small arrays embedded in a single field
//! (`"location": [60.2, 40.1]`). Expansion replaces such a column, in place,
//! with one column per axis:
//!
//! | kind                    | outputs                          |
//! |-------------------------|----------------------------------|
//! | `Pair`                  | `<col>_x`, `<col>_y`             |
//! | `TripleOptionalZ`       | `<col>_x`, `<col>_y`, `<col>_z`  |
//! | `InterleavedPairList`   | `<col>_x`, `<col>_y` (as arrays) |
//!
//! A value that is not an array goes unchanged into the first output column
//! and the other outputs are null. Values are never rounded or converted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Table;

/// How a coordinate column is decomposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateKind {
    /// `[x, y]`
    Pair,
    /// `[x, y]` or `[x, y, z]`; z is null when absent
    TripleOptionalZ,
    /// `[x0, y0, x1, y1, ...]` split into an x list and a y list
    InterleavedPairList,
}

impl CoordinateKind {
    /// Suffixes appended to the source column name, in output order
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            CoordinateKind::Pair | CoordinateKind::InterleavedPairList => &["x", "y"],
            CoordinateKind::TripleOptionalZ => &["x", "y", "z"],
        }
    }

    /// Output column names for a source column
    pub fn output_columns(&self, column: &str) -> Vec<String> {
        self.suffixes()
            .iter()
            .map(|suffix| format!("{}_{}", column, suffix))
            .collect()
    }

    /// Decompose one value into one value per output column
    pub fn split(&self, value: &Value) -> Vec<Value> {
        let width = self.suffixes().len();
        let Value::Array(points) = value else {
            let mut out = vec![Value::Null; width];
            out[0] = value.clone();
            return out;
        };

        match self {
            CoordinateKind::Pair | CoordinateKind::TripleOptionalZ => (0..width)
                .map(|i| points.get(i).cloned().unwrap_or(Value::Null))
                .collect(),
            CoordinateKind::InterleavedPairList => {
                let xs = points.iter().step_by(2).cloned().collect();
                let ys = points.iter().skip(1).step_by(2).cloned().collect();
                vec![Value::Array(xs), Value::Array(ys)]
            }
        }
    }
}

/// One column to expand and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateSpec {
    pub column: String,
    pub kind: CoordinateKind,
}

impl CoordinateSpec {
    pub fn new(column: impl Into<String>, kind: CoordinateKind) -> Self {
        Self {
            column: column.into(),
            kind,
        }
    }
}

/// Expand coordinate columns of a table
///
/// Specs are applied in order. A spec whose column is not in the table is
/// skipped, so running the same specs over an already expanded table leaves
/// it unchanged. Row count never changes.
pub fn expand_coordinates(mut table: Table, specs: &[CoordinateSpec]) -> Table {
    for spec in specs {
        let outputs = spec.kind.output_columns(&spec.column);
        if table.replace_column(&spec.column, &outputs, |value| spec.kind.split(value)) {
            tracing::debug!(
                column = %spec.column,
                kind = ?spec.kind,
                rows = table.len(),
                "Expanded coordinate column"
            );
        }
    }
    table
}
