//! Nested-to-relational normalization
//!
//! Turns a parsed JSON document into a primary flat table plus child tables,
//! driven by an [`ExtractionPlan`](crate::plan::ExtractionPlan).
//!
//! ## Steps
//!
//! 1. **Flatten** every record: nested objects become dotted columns, arrays
//!    stay as values.
//! 2. **Root explosion** (optional): lift a nested array out and use its rows
//!    as the primary table.
//! 3. **Explode** each configured array column into a child table, copying
//!    the parent's meta fields into every child row.
//! 4. **Drop** the exploded columns from the primary table.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use statsbomb_tables::normalize::normalize;
//! use statsbomb_tables::plan::ExtractionPlan;
//! use statsbomb_tables::plan::ExplodeOp;
//! use statsbomb_tables::models::DocumentType;
//!
//! let plan = ExtractionPlan::new(DocumentType::Events, "events")
//!     .explode(ExplodeOp::pairwise("tags", "tag_pairs", &["id"]));
//!
//! let doc = normalize(&json!([{"id": 1, "tags": [10, 20, 30]}]), &plan).unwrap();
//! assert_eq!(doc.table("tag_pairs").unwrap().len(), 3);
//! assert!(!doc.primary.has_column("tags"));
//! ```

mod config;
mod error;
mod explode;
mod flatten;
mod normalizer;

pub use config::{NormalizeConfig, NormalizeConfigBuilder};
pub use error::NormalizeError;
pub use explode::explode;
pub use flatten::{flatten_record, records_of};
pub use normalizer::{ChildTable, NormalizedDocument, Normalizer, normalize};
