//! Model identity: the names a table is known by in generated code

use crate::config::ResolvedOptions;
use crate::naming;
use crate::schema::{Blueprint, TableName};
use serde::Serialize;
use std::fmt;

/// Key column the conventions assume
pub const DEFAULT_KEY: &str = "id";

/// A class within a namespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassRef {
    pub namespace: String,
    pub name: String,
}

impl ClassRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a fully qualified class name (`Illuminate\Database\Eloquent\Model`)
    pub fn parse(qualified: &str) -> Self {
        let qualified = qualified.trim_start_matches('\\');
        match qualified.rsplit_once('\\') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    /// `Namespace\Name`, without a leading backslash
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.name)
        }
    }

    /// `\Namespace\Name`, usable from any namespace without an import
    pub fn absolute(&self) -> String {
        format!("\\{}", self.qualified())
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Everything other models need to know to refer to a table's model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelIdentity {
    pub table: TableName,
    /// User-facing class (the one relations point at)
    pub class: ClassRef,
    /// Singular snake case name of one record (`order_item`)
    pub record_name: String,
    /// Column the model is keyed on: the first primary key column
    pub primary_key: Option<String>,
    pub snake_attributes: bool,
}

impl ModelIdentity {
    pub fn resolve(blueprint: &Blueprint, options: &ResolvedOptions) -> Self {
        let primary_key = blueprint.primary_key().first().cloned();

        Self {
            table: blueprint.name().clone(),
            class: ClassRef::new(
                options.namespace.clone(),
                naming::class_name(blueprint.table(), &options.prefix),
            ),
            record_name: naming::record_name(blueprint.table(), &options.prefix),
            primary_key,
            snake_attributes: options.snake_attributes,
        }
    }

    /// Key column the generated class uses, `id` when the table has no primary key
    pub fn key_name(&self) -> &str {
        self.primary_key.as_deref().unwrap_or(DEFAULT_KEY)
    }
}
