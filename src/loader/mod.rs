//! Document loading
//!
//! Resolves a document's path under an open-data `data` directory, checks
//! the requested identifiers exist, parses the JSON, and runs it through the
//! normalizer and coordinate expander with the plan for its type.
//!
//! ## Example
//!
//! ```rust,ignore
//! use statsbomb_tables::loader::DataSource;
//!
//! let source = DataSource::new("open-data/data");
//! let events = source.read_events(3788741)?;
//! println!("{} events, {} freeze-frame rows", events.events.len(), events.shot_freeze_frame.len());
//! ```

mod error;
mod reader;
mod source;

pub use error::{IdentifierKind, LoadError};
pub use reader::{CompetitionTables, EventTables, LineupTables, MatchTables, ThreeSixtyTables};
pub use source::{DataSource, DocumentRequest};
