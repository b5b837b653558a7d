//! Error types for normalization

use thiserror::Error;

/// Errors that can occur while normalizing a document
///
/// Missing or null fields are never errors; only shapes the normalizer
/// cannot interpret are reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A record or an explode target has a shape the plan cannot handle
    #[error("Unexpected shape at {path}: expected {expected}, found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Maximum depth exceeded while flattening
    #[error("Maximum nesting depth exceeded at {path}: {depth} > {max}")]
    MaxDepthExceeded {
        path: String,
        depth: usize,
        max: usize,
    },
}

/// JSON type name used in error messages
pub(crate) fn value_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
