//! Tables loaded during a generation run

use crate::error::Result;
use crate::schema::{Blueprint, ForeignKey, SchemaSource, TableName};
use std::collections::BTreeMap;

/// An incoming foreign key: `blueprint` declares `foreign_key`
#[derive(Debug, Clone, Copy)]
pub struct Reference<'a> {
    pub blueprint: &'a Blueprint,
    pub foreign_key: &'a ForeignKey,
}

/// Every blueprint known to the current run, grouped by schema
#[derive(Debug, Default)]
pub struct Catalog {
    schemas: BTreeMap<String, Vec<Blueprint>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflect every table of `schema`; loading an already known schema is a no-op
    ///
    /// Returns the number of tables in the schema.
    pub fn load_schema(&mut self, source: &dyn SchemaSource, schema: &str) -> Result<usize> {
        if let Some(tables) = self.schemas.get(schema) {
            return Ok(tables.len());
        }

        let mut blueprints = Vec::new();
        for name in source.tables(schema)? {
            let blueprint = Blueprint::new(
                name.clone(),
                source.columns(&name)?,
                source.foreign_keys(&name)?,
                source.primary_key(&name)?,
                source.unique_keys(&name)?,
            )?;
            blueprints.push(blueprint);
        }

        let count = blueprints.len();
        log::info!("Loaded schema '{}' ({} tables)", schema, count);
        self.schemas.insert(schema.to_string(), blueprints);
        Ok(count)
    }

    /// Load the other schemas that tables of `schema` point at
    ///
    /// Schemas the source does not know are skipped; the constraints pointing
    /// at them are dropped later as unresolved references.
    pub fn load_referenced(&mut self, source: &dyn SchemaSource, schema: &str) -> Result<()> {
        let mut foreign: Vec<String> = self
            .tables(schema)
            .iter()
            .flat_map(|t| t.foreign_keys())
            .map(|fk| fk.on.schema.clone())
            .filter(|s| !self.schemas.contains_key(s))
            .collect();
        foreign.sort();
        foreign.dedup();

        for other in foreign {
            if source.has_schema(&other)? {
                self.load_schema(source, &other)?;
            } else {
                log::debug!("Schema '{}' referenced from '{}' is not available", other, schema);
            }
        }
        Ok(())
    }

    /// Register a blueprint directly, replacing one with the same name
    pub fn insert(&mut self, blueprint: Blueprint) {
        let tables = self
            .schemas
            .entry(blueprint.schema().to_string())
            .or_default();
        match tables.iter_mut().find(|t| t.name() == blueprint.name()) {
            Some(existing) => *existing = blueprint,
            None => tables.push(blueprint),
        }
    }

    pub fn has_schema(&self, schema: &str) -> bool {
        self.schemas.contains_key(schema)
    }

    /// Tables of a loaded schema in reflection order
    pub fn tables(&self, schema: &str) -> &[Blueprint] {
        self.schemas.get(schema).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn table(&self, name: &TableName) -> Option<&Blueprint> {
        self.tables(&name.schema).iter().find(|t| t.name() == name)
    }

    /// Foreign keys of any loaded table that point at `table`
    ///
    /// Ordered by referencing table, then by declaration order within it.
    pub fn referencing(&self, table: &TableName) -> Vec<Reference<'_>> {
        let mut references: Vec<Reference<'_>> = self
            .schemas
            .values()
            .flatten()
            .flat_map(|blueprint| {
                blueprint
                    .foreign_keys()
                    .iter()
                    .filter(move |fk| &fk.on == table)
                    .map(move |foreign_key| Reference {
                        blueprint,
                        foreign_key,
                    })
            })
            .collect();
        references.sort_by(|a, b| a.blueprint.name().cmp(b.blueprint.name()));
        references
    }
}
