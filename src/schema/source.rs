//! Schema reflection interface

use crate::error::Result;
use crate::schema::{Column, ForeignKey, TableName};

/// Source of raw schema metadata
///
/// Implementations wrap whatever performs reflection (a live driver, a
/// snapshot file). Every call is a blocking read; a failure aborts the run.
pub trait SchemaSource {
    /// Name of the connection the metadata was read from
    fn connection_name(&self) -> &str;

    /// Names of all schemas this source can describe
    fn schemas(&self) -> Result<Vec<String>>;

    /// Tables of one schema
    fn tables(&self, schema: &str) -> Result<Vec<TableName>>;

    fn columns(&self, table: &TableName) -> Result<Vec<Column>>;

    /// Outgoing foreign keys of `table`
    fn foreign_keys(&self, table: &TableName) -> Result<Vec<ForeignKey>>;

    fn primary_key(&self, table: &TableName) -> Result<Vec<String>>;

    fn unique_keys(&self, table: &TableName) -> Result<Vec<Vec<String>>>;

    fn has_schema(&self, schema: &str) -> Result<bool> {
        Ok(self.schemas()?.iter().any(|s| s == schema))
    }
}
