//! Extraction plans
//!
//! A plan says, for one document type, which array columns are exploded into
//! child tables (and which parent fields link them back), and which
//! coordinate columns are expanded afterwards. Built-in plans cover the
//! open-data layout; a [`PlanTable`] can override them from a TOML file.

mod builtin;
mod config;
mod error;
mod types;

pub use builtin::{COMPETITIONS, EVENTS, LINEUPS, MATCHES, THREE_SIXTY, builtin_plan};
pub use config::PlanTable;
pub use error::PlanError;
pub use types::{ExpandOp, ExplodeKind, ExplodeOp, ExtractionPlan};
