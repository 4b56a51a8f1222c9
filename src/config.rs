//! Generation configuration
//!
//! Options are scoped: a table scope (`[tables."shop.users"]`) overrides its
//! schema scope (`[schemas.shop]`), which overrides `[defaults]`, which
//! overrides the built-in conventions. [`GenerationConfig::load`] reads the
//! TOML file (optional) and `SCHEMACODER__*` environment variables.

use crate::error::Result;
use crate::schema::TableName;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATH: &str = "app/Models";
pub const DEFAULT_NAMESPACE: &str = "App\\Models";
pub const DEFAULT_PARENT: &str = "Illuminate\\Database\\Eloquent\\Model";
pub const DEFAULT_EXTENSION: &str = "php";
pub const DEFAULT_PER_PAGE: u32 = 15;
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const DELETED_AT: &str = "deleted_at";

/// One configuration scope; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelOptions {
    pub path: Option<PathBuf>,
    pub namespace: Option<String>,
    pub parent: Option<String>,
    pub base_files: Option<bool>,
    pub snake_attributes: Option<bool>,
    /// Emit the connection name on each model
    pub connection: Option<bool>,
    pub connection_name: Option<String>,
    pub per_page: Option<u32>,
    pub date_format: Option<String>,
    pub timestamps: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub soft_deletes: Option<bool>,
    pub deleted_at: Option<String>,
    pub hints: Option<bool>,
    /// Table patterns excluded from generation
    pub except: Option<Vec<String>>,
    /// When set, only matching tables are generated
    pub only: Option<Vec<String>>,
    /// Column patterns hidden from serialization
    pub hidden: Option<Vec<String>>,
    /// Column patterns left out of mass assignment
    pub guarded: Option<Vec<String>>,
    /// Table prefix stripped before deriving class names
    pub prefix: Option<String>,
    pub extension: Option<String>,
    pub template_model: Option<PathBuf>,
    pub template_user_model: Option<PathBuf>,
}

/// Process-wide configuration, read-only during a run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub defaults: ModelOptions,
    #[serde(default)]
    pub schemas: BTreeMap<String, ModelOptions>,
    /// Keyed by qualified `schema.table`
    #[serde(default)]
    pub tables: BTreeMap<String, ModelOptions>,
}

/// Options in effect for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub path: PathBuf,
    pub namespace: String,
    pub parent: String,
    pub base_files: bool,
    pub snake_attributes: bool,
    pub connection: bool,
    pub connection_name: Option<String>,
    pub per_page: u32,
    pub date_format: Option<String>,
    pub timestamps: bool,
    pub created_at: String,
    pub updated_at: String,
    pub soft_deletes: bool,
    pub deleted_at: String,
    pub hints: bool,
    pub except: Vec<String>,
    pub only: Vec<String>,
    pub hidden: Vec<String>,
    pub guarded: Vec<String>,
    pub prefix: String,
    pub extension: String,
    pub template_model: Option<PathBuf>,
    pub template_user_model: Option<PathBuf>,
}

impl ResolvedOptions {
    /// Namespace of generated base classes
    pub fn base_namespace(&self) -> String {
        format!("{}\\Base", self.namespace)
    }
}

impl GenerationConfig {
    /// Load from an optional TOML file plus `SCHEMACODER__*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let settings = builder
            .add_source(Environment::with_prefix("SCHEMACODER").separator("__"))
            .build()?;

        let config: GenerationConfig = settings.try_deserialize()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Resolve the options in effect for `table`
    pub fn resolve(&self, table: &TableName) -> ResolvedOptions {
        let scopes: Vec<&ModelOptions> = [
            self.tables.get(&table.qualified()),
            self.schemas.get(&table.schema),
            Some(&self.defaults),
        ]
        .into_iter()
        .flatten()
        .collect();

        macro_rules! pick {
            ($field:ident) => {
                scopes.iter().find_map(|scope| scope.$field.clone())
            };
        }

        ResolvedOptions {
            path: pick!(path).unwrap_or_else(|| PathBuf::from(DEFAULT_PATH)),
            namespace: pick!(namespace).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            parent: pick!(parent).unwrap_or_else(|| DEFAULT_PARENT.to_string()),
            base_files: pick!(base_files).unwrap_or(false),
            snake_attributes: pick!(snake_attributes).unwrap_or(true),
            connection: pick!(connection).unwrap_or(false),
            connection_name: pick!(connection_name),
            per_page: pick!(per_page).unwrap_or(DEFAULT_PER_PAGE),
            date_format: pick!(date_format),
            timestamps: pick!(timestamps).unwrap_or(true),
            created_at: pick!(created_at).unwrap_or_else(|| CREATED_AT.to_string()),
            updated_at: pick!(updated_at).unwrap_or_else(|| UPDATED_AT.to_string()),
            soft_deletes: pick!(soft_deletes).unwrap_or(false),
            deleted_at: pick!(deleted_at).unwrap_or_else(|| DELETED_AT.to_string()),
            hints: pick!(hints).unwrap_or(false),
            except: pick!(except).unwrap_or_default(),
            only: pick!(only).unwrap_or_default(),
            hidden: pick!(hidden).unwrap_or_default(),
            guarded: pick!(guarded).unwrap_or_default(),
            prefix: pick!(prefix).unwrap_or_default(),
            extension: pick!(extension).unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            template_model: pick!(template_model),
            template_user_model: pick!(template_user_model),
        }
    }
}
