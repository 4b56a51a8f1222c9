//! Table blueprints

use crate::error::{CoderError, Result};
use crate::schema::{Column, ForeignKey};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Schema-qualified table identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TableName {
    pub schema: String,
    pub table: String,
}

impl TableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Parse `table` or `schema.table`, using `default_schema` for the former
    pub fn parse(reference: &str, default_schema: &str) -> Self {
        match reference.rsplit_once('.') {
            Some((schema, table)) => Self::new(schema, table),
            None => Self::new(default_schema, reference),
        }
    }

    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Structural description of one table
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: TableName,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
    primary_key: Vec<String>,
    unique_keys: Vec<Vec<String>>,
}

impl Blueprint {
    /// Build a blueprint, validating its structural invariants
    ///
    /// Column names must be unique, key columns must be declared and every
    /// foreign key must pair its local and referenced columns one to one.
    pub fn new(
        name: TableName,
        columns: Vec<Column>,
        foreign_keys: Vec<ForeignKey>,
        primary_key: Vec<String>,
        unique_keys: Vec<Vec<String>>,
    ) -> Result<Self> {
        let invalid = |reason: String| CoderError::InvalidBlueprint {
            table: name.clone(),
            reason,
        };

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(invalid(format!("duplicate column '{}'", column.name)));
            }
        }

        for key in std::iter::once(&primary_key).chain(unique_keys.iter()) {
            if let Some(missing) = key.iter().find(|c| !seen.contains(c.as_str())) {
                return Err(invalid(format!("key column '{missing}' is not declared")));
            }
        }

        for fk in &foreign_keys {
            if fk.columns.is_empty() || fk.columns.len() != fk.references.len() {
                return Err(invalid(format!(
                    "foreign key to '{}' pairs {} local with {} referenced columns",
                    fk.on,
                    fk.columns.len(),
                    fk.references.len()
                )));
            }
            if let Some(missing) = fk.columns.iter().find(|c| !seen.contains(c.as_str())) {
                return Err(invalid(format!(
                    "foreign key column '{missing}' is not declared"
                )));
            }
        }

        Ok(Self {
            name,
            columns,
            foreign_keys,
            primary_key,
            unique_keys,
        })
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn schema(&self) -> &str {
        &self.name.schema
    }

    pub fn table(&self) -> &str {
        &self.name.table
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Outgoing foreign keys in declaration order
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn unique_keys(&self) -> &[Vec<String>] {
        &self.unique_keys
    }

    /// Whether `columns` is exactly the primary key, ignoring order
    pub fn is_primary_key<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        !self.primary_key.is_empty() && same_columns(&self.primary_key, columns)
    }

    /// Whether `columns` is exactly one of the unique keys, ignoring order
    pub fn is_unique_key<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.unique_keys
            .iter()
            .any(|key| !key.is_empty() && same_columns(key, columns))
    }

    /// Whether `columns` identifies at most one row of this table
    pub fn is_identifying<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.is_primary_key(columns) || self.is_unique_key(columns)
    }
}

fn same_columns<S: AsRef<str>>(key: &[String], columns: &[S]) -> bool {
    let key: BTreeSet<&str> = key.iter().map(String::as_str).collect();
    let columns: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();
    key == columns
}
