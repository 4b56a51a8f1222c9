//! Schema metadata
//!
//! Structural description of database tables as reported by schema
//! reflection: columns, primary/unique keys and outgoing foreign keys.
//! Reflection itself lives behind the [`SchemaSource`] trait; the
//! [`Catalog`] holds every table loaded during one generation run.

pub mod blueprint;
pub mod catalog;
pub mod column;
pub mod foreign_key;
pub mod snapshot;
pub mod source;

pub use blueprint::{Blueprint, TableName};
pub use catalog::{Catalog, Reference};
pub use column::Column;
pub use foreign_key::ForeignKey;
pub use snapshot::SnapshotSource;
pub use source::SchemaSource;
