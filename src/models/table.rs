//! Flat table model
//!
//! A [`Table`] is an ordered list of rows over a derived column set. Columns
//! are never declared up front: they are the union of the keys seen across
//! all rows, in first-seen order. Cells missing from a row read as null.

use std::collections::HashMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

static NULL: Value = Value::Null;

/// A flattened record: column name and value pairs in field order
pub type FlatRecord = Vec<(String, Value)>;

/// Ordered rows over a derived, ordered column set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from flattened records
    ///
    /// The column set is the union of keys across all records, ordered by
    /// first appearance. A key repeated within one record keeps its last value.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FlatRecord>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut sparse: Vec<Vec<(usize, Value)>> = Vec::new();

        for record in records {
            let mut cells = Vec::with_capacity(record.len());
            for (key, value) in record {
                let position = match index.get(&key) {
                    Some(&position) => position,
                    None => {
                        let position = columns.len();
                        index.insert(key.clone(), position);
                        columns.push(key);
                        position
                    }
                };
                cells.push((position, value));
            }
            sparse.push(cells);
        }

        let width = columns.len();
        let rows = sparse
            .into_iter()
            .map(|cells| {
                let mut row = vec![Value::Null; width];
                for (position, value) in cells {
                    row[position] = value;
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Build a table from explicit columns and rows
    ///
    /// Rows shorter than the column list are padded with null, longer rows
    /// are truncated.
    pub fn with_columns(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value at a row and column; null when the column is absent
    ///
    /// Panics if `row` is out of bounds, like slice indexing.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        match self.column_index(column) {
            Some(position) => &self.rows[row][position],
            None => &NULL,
        }
    }

    /// All values of one column, or `None` if the column is absent
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let position = self.column_index(column)?;
        Some(self.rows.iter().map(|row| &row[position]).collect())
    }

    /// Borrow a single row
    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    /// Remove the named columns; absent names are ignored
    ///
    /// Returns how many columns were removed.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.iter().any(|n| n.as_ref() == c))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        self.columns = retain_by(std::mem::take(&mut self.columns), &keep);
        for row in &mut self.rows {
            *row = retain_by(std::mem::take(row), &keep);
        }
        removed
    }

    /// Replace one column, in place, with several derived columns
    ///
    /// `split` is called once per row with the source value and must return
    /// one value per output column (missing values are filled with null).
    /// Existing columns that share an output name are removed first so
    /// column names stay unique. Returns false, leaving the table untouched,
    /// when `source` is not a column.
    pub fn replace_column<F>(&mut self, source: &str, outputs: &[String], mut split: F) -> bool
    where
        F: FnMut(&Value) -> Vec<Value>,
    {
        if !self.has_column(source) {
            return false;
        }

        let clashing: Vec<&String> = outputs.iter().filter(|o| o.as_str() != source).collect();
        self.drop_columns(&clashing);

        let Some(position) = self.column_index(source) else {
            return false;
        };

        let width = outputs.len();
        for row in &mut self.rows {
            let original = std::mem::take(&mut row[position]);
            let mut parts = split(&original);
            parts.resize(width, Value::Null);
            row.splice(position..=position, parts);
        }
        self.columns
            .splice(position..=position, outputs.iter().cloned());
        true
    }
}

fn retain_by<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    /// Value of a column in this row, or `None` if the column is absent
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|position| &self.values[position])
    }

    /// Cells in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Tables serialize as a list of row objects with keys in column order
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let table = Table::from_records(vec![
            record(&[("a", json!(1)), ("b", json!(2))]),
            record(&[("c", json!(3)), ("a", json!(4))]),
        ]);

        assert_eq!(table.columns(), &["a", "b", "c"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "b"), &Value::Null);
        assert_eq!(table.value(1, "c"), &json!(3));
        assert_eq!(table.value(0, "missing"), &Value::Null);
    }

    #[test]
    fn test_drop_columns_ignores_absent_names() {
        let mut table = Table::from_records(vec![record(&[
            ("a", json!(1)),
            ("b", json!(2)),
            ("c", json!(3)),
        ])]);

        let removed = table.drop_columns(&["b", "zzz"]);

        assert_eq!(removed, 1);
        assert_eq!(table.columns(), &["a", "c"]);
        assert_eq!(table.row(0).unwrap().values(), &[json!(1), json!(3)]);
    }

    #[test]
    fn test_replace_column_in_place() {
        let mut table = Table::from_records(vec![record(&[
            ("a", json!(1)),
            ("loc", json!([3, 4])),
            ("z", json!(9)),
        ])]);
        let outputs = vec!["loc_x".to_string(), "loc_y".to_string()];

        let replaced = table.replace_column("loc", &outputs, |v| {
            v.as_array().cloned().unwrap_or_default()
        });

        assert!(replaced);
        assert_eq!(table.columns(), &["a", "loc_x", "loc_y", "z"]);
        assert_eq!(table.value(0, "loc_y"), &json!(4));
    }

    #[test]
    fn test_replace_missing_column_is_noop() {
        let mut table = Table::from_records(vec![record(&[("a", json!(1))])]);
        let before = table.clone();

        assert!(!table.replace_column("loc", &["loc_x".to_string()], |_| Vec::new()));
        assert_eq!(table, before);
    }

    #[test]
    fn test_with_columns_pads_rows() {
        let table = Table::with_columns(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![json!(1)]],
        );
        assert_eq!(table.value(0, "b"), &Value::Null);
    }

    #[test]
    fn test_serialize_keeps_column_order() {
        let table = Table::from_records(vec![record(&[("z", json!(1)), ("a", json!(2))])]);
        let out = serde_json::to_string(&table).unwrap();
        assert_eq!(out, r#"[{"z":1,"a":2}]"#);
    }
}
