//! Error types for schemacoder
//!
//! Only conditions that abort a run are errors. Per-table and per-relation
//! anomalies (unresolved references, name collisions) are reported as
//! [`Diagnostic`](crate::model::Diagnostic) values instead.

use crate::schema::TableName;
use std::path::PathBuf;

/// Fatal errors raised while loading a schema or generating models
#[derive(Debug, thiserror::Error)]
pub enum CoderError {
    /// Filesystem failure on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Schema snapshot file is unreadable or malformed
    #[error("invalid schema snapshot {}: {message}", path.display())]
    Snapshot { path: PathBuf, message: String },

    /// The schema source does not know the requested schema
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// The requested table is not part of its schema
    #[error("unknown table '{0}'")]
    UnknownTable(TableName),

    /// Table metadata violates a structural invariant
    #[error("invalid table '{table}': {reason}")]
    InvalidBlueprint { table: TableName, reason: String },

    /// Template file could not be read
    #[error("template {} is unreadable: {source}", path.display())]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table or column pattern could not be compiled
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Output directory could not be created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fatal error raised while a specific table was being processed
    #[error("while generating '{table}': {source}")]
    Table {
        table: TableName,
        #[source]
        source: Box<CoderError>,
    },
}

impl CoderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the table being processed to this error
    pub fn in_table(self, table: &TableName) -> Self {
        match self {
            // Keep the innermost table context.
            CoderError::Table { .. } => self,
            other => CoderError::Table {
                table: table.clone(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CoderError>;
