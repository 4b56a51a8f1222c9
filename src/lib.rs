//! # schemacoder
//!
//! Generates model classes from database schema metadata: one class per
//! table, with typed accessors for its columns and the relations inferred
//! from its foreign keys.
//!
//! The pipeline runs leaf first: [`types`] maps native column types,
//! [`naming`] derives identifiers, [`relation`] classifies foreign keys,
//! [`model`] assembles one descriptor per table, [`emitter`] renders it and
//! [`generator`] drives the whole run and writes the files.
//!
//! ```no_run
//! use schemacoder::{GenerationConfig, Generator, SnapshotSource};
//!
//! # fn main() -> schemacoder::Result<()> {
//! let source = SnapshotSource::from_file("schema.toml".as_ref())?;
//! let config = GenerationConfig::load(Some("schemacoder.toml".as_ref()))?;
//! let report = Generator::new(&source, config).map("shop")?;
//! for path in report.written() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod relation;
pub mod schema;
pub mod types;

pub use config::{GenerationConfig, ModelOptions, ResolvedOptions};
pub use error::{CoderError, Result};
pub use generator::{Generator, RunReport, TableReport, UserFile};
pub use model::{Diagnostic, ModelDescriptor, Mutator};
pub use schema::{Catalog, SchemaSource, SnapshotSource, TableName};
