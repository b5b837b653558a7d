//! StatsBomb Tables - nested event-sports JSON to flat relational tables
//!
//! Provides:
//! - Flattening of nested records into dotted columns
//! - Plan-driven explosion of nested arrays into linked child tables
//! - Coordinate expansion of `[x, y(, z)]` fields into scalar columns
//! - Built-in plans for competitions, matches, lineups, events and 360 frames
//! - A loader for the open-data directory layout

#[cfg(feature = "cli")]
pub mod cli;
pub mod expand;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod plan;

// Re-export commonly used types
pub use expand::{CoordinateKind, CoordinateSpec, expand_coordinates};
pub use loader::{
    CompetitionTables, DataSource, DocumentRequest, EventTables, IdentifierKind, LineupTables,
    LoadError, MatchTables, ThreeSixtyTables,
};
pub use models::{DocumentType, Table};
pub use normalize::{NormalizeConfig, NormalizeError, NormalizedDocument, Normalizer, normalize};
pub use plan::{ExplodeKind, ExplodeOp, ExtractionPlan, PlanError, PlanTable, builtin_plan};
