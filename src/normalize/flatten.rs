//! Record flattening
//!
//! Nested objects become dotted columns (`home_team.home_team_id`). Arrays
//! are left as opaque values so the explode step can lift them out.

use serde_json::{Map, Value};

use super::config::NormalizeConfig;
use super::error::{NormalizeError, value_type_name};
use crate::models::FlatRecord;

/// Split a document into its records
///
/// A document is either an array of objects or a single object.
pub fn records_of(document: &Value) -> Result<Vec<&Map<String, Value>>, NormalizeError> {
    match document {
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(NormalizeError::UnexpectedShape {
                    path: format!("$[{}]", i),
                    expected: "object",
                    found: value_type_name(other),
                }),
            })
            .collect(),
        other => Err(NormalizeError::UnexpectedShape {
            path: "$".to_string(),
            expected: "array of objects",
            found: value_type_name(other),
        }),
    }
}

/// Flatten one record into column/value pairs
///
/// Field order follows the source record. An empty nested object
/// contributes no columns; an explicit null stays a null column.
pub fn flatten_record(
    record: &Map<String, Value>,
    config: &NormalizeConfig,
) -> Result<FlatRecord, NormalizeError> {
    let mut out = Vec::with_capacity(record.len());
    flatten_into(record, None, 0, config, &mut out)?;
    Ok(out)
}

fn flatten_into(
    object: &Map<String, Value>,
    prefix: Option<&str>,
    depth: usize,
    config: &NormalizeConfig,
    out: &mut FlatRecord,
) -> Result<(), NormalizeError> {
    if depth > config.max_depth {
        return Err(NormalizeError::MaxDepthExceeded {
            path: prefix.unwrap_or("$").to_string(),
            depth,
            max: config.max_depth,
        });
    }

    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, config.separator, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(nested, Some(&name), depth + 1, config, out)?,
            other => out.push((name, other.clone())),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(value: Value) -> FlatRecord {
        let Value::Object(record) = value else {
            panic!("Expected object");
        };
        flatten_record(&record, &NormalizeConfig::default()).unwrap()
    }

    #[test]
    fn test_flatten_nested_objects() {
        let record = flat(json!({
            "match_id": 7,
            "home_team": {"home_team_id": 1, "country": {"id": 68, "name": "England"}},
        }));

        let keys: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "match_id",
                "home_team.home_team_id",
                "home_team.country.id",
                "home_team.country.name"
            ]
        );
    }

    #[test]
    fn test_arrays_stay_intact() {
        let record = flat(json!({"tags": [1, 2], "managers": [{"id": 3}]}));
        assert_eq!(record[0], ("tags".to_string(), json!([1, 2])));
        assert_eq!(record[1], ("managers".to_string(), json!([{"id": 3}])));
    }

    #[test]
    fn test_null_kept_empty_object_dropped() {
        let record = flat(json!({"a": null, "b": {}}));
        assert_eq!(record, vec![("a".to_string(), Value::Null)]);
    }

    #[test]
    fn test_custom_separator() {
        let Value::Object(record) = json!({"team": {"id": 1}}) else {
            unreachable!()
        };
        let config = NormalizeConfig::builder().separator("__").build();
        let out = flatten_record(&record, &config).unwrap();
        assert_eq!(out[0].0, "team__id");
    }

    #[test]
    fn test_max_depth() {
        let Value::Object(record) = json!({"a": {"b": {"c": 1}}}) else {
            unreachable!()
        };
        let config = NormalizeConfig::builder().max_depth(1).build();
        let err = flatten_record(&record, &config).unwrap_err();
        assert!(matches!(err, NormalizeError::MaxDepthExceeded { depth: 2, .. }));
    }

    #[test]
    fn test_records_of_rejects_scalars() {
        assert!(records_of(&json!([{"a": 1}, 2])).is_err());
        assert!(records_of(&json!("text")).is_err());
        assert_eq!(records_of(&json!({"a": 1})).unwrap().len(), 1);
    }
}
