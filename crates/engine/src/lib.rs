//! `csvjoin-engine`: N-way relational join over CSV sources.
//!
//! Pure engine crate: receives CSV readers, writes the joined rows to a
//! caller-supplied CSV writer. No CLI or process concerns.

pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod expand;
pub mod loader;
pub mod model;
pub mod project;
pub mod universe;

pub use columns::{reconcile_headers, HeaderPlan, OrderedSet};
pub use config::JoinConfig;
pub use engine::{run, JoinSummary, SourceInput};
pub use error::JoinError;
pub use model::{KeyedCollection, Record};
