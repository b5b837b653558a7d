//! Models module
//!
//! Defines the flat table produced by normalization and the document types
//! the loader understands.

pub mod document;
pub mod table;

pub use document::DocumentType;
pub use table::{FlatRecord, RowRef, Table};
