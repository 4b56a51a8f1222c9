//! File-backed schema source
//!
//! A snapshot describes one or more schemas in TOML or JSON, so models can
//! be generated without a live database connection:
//!
//! ```toml
//! connection = "mysql"
//!
//! [[schemas]]
//! name = "shop"
//!
//! [[schemas.tables]]
//! name = "posts"
//! primary_key = ["id"]
//! columns = [
//!     { name = "id", type = "int(10) unsigned", auto_increment = true },
//!     { name = "user_id", type = "int(10) unsigned" },
//!     { name = "title", type = "varchar(255)" },
//! ]
//! foreign_keys = [{ columns = ["user_id"], table = "users", references = ["id"] }]
//! ```

use crate::error::{CoderError, Result};
use crate::schema::{Column, ForeignKey, SchemaSource, TableName};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default = "default_connection")]
    connection: String,
    #[serde(default)]
    schemas: Vec<SchemaEntry>,
}

#[derive(Debug, Deserialize)]
struct SchemaEntry {
    name: String,
    #[serde(default)]
    tables: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(default)]
    unique_keys: Vec<Vec<String>>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKeyEntry>,
}

#[derive(Debug, Deserialize)]
struct ForeignKeyEntry {
    columns: Vec<String>,
    /// `table` or `schema.table`
    table: String,
    references: Vec<String>,
}

fn default_connection() -> String {
    "default".to_string()
}

#[derive(Debug, Clone)]
struct TableSnapshot {
    name: TableName,
    columns: Vec<Column>,
    primary_key: Vec<String>,
    unique_keys: Vec<Vec<String>>,
    foreign_keys: Vec<ForeignKey>,
}

/// In-memory [`SchemaSource`] loaded from a snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    connection: String,
    /// Schemas and their tables in declaration order
    schemas: Vec<(String, Vec<TableSnapshot>)>,
}

impl SnapshotSource {
    /// Load a snapshot, picking the format from the file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CoderError::io(path, e))?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let parsed = match ext {
            "toml" => Self::parse_toml(&content),
            "json" => Self::parse_json(&content),
            _ => {
                // Try to detect format from content
                if content.trim_start().starts_with('{') {
                    Self::parse_json(&content)
                } else {
                    Self::parse_toml(&content)
                }
            }
        };

        parsed.map_err(|message| CoderError::Snapshot {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse_toml(content).map_err(|message| CoderError::Snapshot {
            path: "<inline>".into(),
            message,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse_json(content).map_err(|message| CoderError::Snapshot {
            path: "<inline>".into(),
            message,
        })
    }

    fn parse_toml(content: &str) -> std::result::Result<Self, String> {
        let file: SnapshotFile = toml::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self::from_snapshot(file))
    }

    fn parse_json(content: &str) -> std::result::Result<Self, String> {
        let file: SnapshotFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self::from_snapshot(file))
    }

    fn from_snapshot(file: SnapshotFile) -> Self {
        let schemas = file
            .schemas
            .into_iter()
            .map(|schema| {
                let tables = schema
                    .tables
                    .into_iter()
                    .map(|table| TableSnapshot {
                        name: TableName::new(&schema.name, &table.name),
                        columns: table.columns,
                        primary_key: table.primary_key,
                        unique_keys: table.unique_keys,
                        foreign_keys: table
                            .foreign_keys
                            .into_iter()
                            .map(|fk| ForeignKey {
                                columns: fk.columns,
                                references: fk.references,
                                on: TableName::parse(&fk.table, &schema.name),
                            })
                            .collect(),
                    })
                    .collect();
                (schema.name, tables)
            })
            .collect();

        Self {
            connection: file.connection,
            schemas,
        }
    }

    fn find(&self, table: &TableName) -> Result<&TableSnapshot> {
        let (_, tables) = self
            .schemas
            .iter()
            .find(|(name, _)| *name == table.schema)
            .ok_or_else(|| CoderError::UnknownSchema(table.schema.clone()))?;

        tables
            .iter()
            .find(|t| &t.name == table)
            .ok_or_else(|| CoderError::UnknownTable(table.clone()))
    }
}

impl SchemaSource for SnapshotSource {
    fn connection_name(&self) -> &str {
        &self.connection
    }

    fn schemas(&self) -> Result<Vec<String>> {
        Ok(self.schemas.iter().map(|(name, _)| name.clone()).collect())
    }

    fn tables(&self, schema: &str) -> Result<Vec<TableName>> {
        self.schemas
            .iter()
            .find(|(name, _)| name == schema)
            .map(|(_, tables)| tables.iter().map(|t| t.name.clone()).collect())
            .ok_or_else(|| CoderError::UnknownSchema(schema.to_string()))
    }

    fn columns(&self, table: &TableName) -> Result<Vec<Column>> {
        Ok(self.find(table)?.columns.clone())
    }

    fn foreign_keys(&self, table: &TableName) -> Result<Vec<ForeignKey>> {
        Ok(self.find(table)?.foreign_keys.clone())
    }

    fn primary_key(&self, table: &TableName) -> Result<Vec<String>> {
        Ok(self.find(table)?.primary_key.clone())
    }

    fn unique_keys(&self, table: &TableName) -> Result<Vec<Vec<String>>> {
        Ok(self.find(table)?.unique_keys.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"
connection = "mysql"

[[schemas]]
name = "shop"

[[schemas.tables]]
name = "users"
primary_key = ["id"]
unique_keys = [["email"]]
columns = [
    { name = "id", type = "int(10) unsigned", auto_increment = true },
    { name = "email", type = "varchar(255)" },
]

[[schemas.tables]]
name = "posts"
primary_key = ["id"]
columns = [
    { name = "id", type = "int(10) unsigned", auto_increment = true },
    { name = "user_id", type = "int(10) unsigned" },
    { name = "editor_id", type = "int(10) unsigned", nullable = true },
]
foreign_keys = [
    { columns = ["user_id"], table = "users", references = ["id"] },
    { columns = ["editor_id"], table = "staff.editors", references = ["id"] },
]
"#;

    #[test]
    fn test_parse_toml_snapshot() {
        let source = SnapshotSource::from_toml_str(SHOP).unwrap();
        assert_eq!(source.connection_name(), "mysql");
        assert_eq!(source.schemas().unwrap(), vec!["shop".to_string()]);

        let tables = source.tables("shop").unwrap();
        assert_eq!(
            tables,
            vec![TableName::new("shop", "users"), TableName::new("shop", "posts")]
        );

        let users = TableName::new("shop", "users");
        let columns = source.columns(&users).unwrap();
        assert!(columns[0].auto_increment);
        assert_eq!(columns[1].native_type, "varchar(255)");
        assert_eq!(source.unique_keys(&users).unwrap(), vec![vec!["email"]]);
    }

    #[test]
    fn test_foreign_key_tables_are_qualified() {
        let source = SnapshotSource::from_toml_str(SHOP).unwrap();
        let fks = source
            .foreign_keys(&TableName::new("shop", "posts"))
            .unwrap();
        assert_eq!(fks[0].on, TableName::new("shop", "users"));
        assert_eq!(fks[1].on, TableName::new("staff", "editors"));
    }

    #[test]
    fn test_parse_json_snapshot() {
        let json = r#"{
            "schemas": [{
                "name": "hr",
                "tables": [{
                    "name": "employees",
                    "primary_key": ["id"],
                    "columns": [
                        {"name": "id", "type": "int"},
                        {"name": "manager_id", "type": "int", "nullable": true}
                    ],
                    "foreign_keys": [
                        {"columns": ["manager_id"], "table": "employees", "references": ["id"]}
                    ]
                }]
            }]
        }"#;

        let source = SnapshotSource::from_json_str(json).unwrap();
        assert_eq!(source.connection_name(), "default");
        let employees = TableName::new("hr", "employees");
        let fks = source.foreign_keys(&employees).unwrap();
        assert!(fks[0].is_self_referencing(&employees));
    }

    #[test]
    fn test_unknown_schema_and_table() {
        let source = SnapshotSource::from_toml_str(SHOP).unwrap();
        assert!(matches!(
            source.tables("billing"),
            Err(CoderError::UnknownSchema(_))
        ));
        assert!(matches!(
            source.columns(&TableName::new("shop", "orders")),
            Err(CoderError::UnknownTable(_))
        ));
        assert!(!source.has_schema("billing").unwrap());
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let err = SnapshotSource::from_toml_str("[[schemas]]\ntables = 3").unwrap_err();
        assert!(matches!(err, CoderError::Snapshot { .. }));
    }
}
