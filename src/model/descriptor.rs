//! Intermediate representation of one generated model

use crate::model::ClassRef;
use crate::relation::{RelationKind, RelationSide};
use crate::schema::TableName;
use crate::types::SemanticType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One column exposed through explicit accessors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub native_type: String,
    #[serde(rename = "type")]
    pub ty: SemanticType,
    pub nullable: bool,
    /// `set` accessor, `None` when its name was already taken
    pub setter: Option<String>,
    /// `get`/`is` accessor, `None` when its name was already taken
    pub getter: Option<String>,
}

impl Field {
    /// Type hint written in accessor signatures
    pub fn hint(&self) -> &str {
        match &self.ty {
            SemanticType::Integer => "int",
            SemanticType::Boolean => "bool",
            SemanticType::String => "string",
            SemanticType::Temporal => TEMPORAL_CLASS,
            // `geometry(4326)` -> `geometry`
            SemanticType::Unknown(raw) => raw
                .split(|c: char| c == '(' || c.is_whitespace())
                .next()
                .unwrap_or(raw),
        }
    }

    /// Cast registered for the column, if its type needs one
    pub fn cast(&self) -> Option<&'static str> {
        match self.ty {
            SemanticType::Integer => Some("int"),
            SemanticType::Boolean => Some("bool"),
            _ => None,
        }
    }
}

/// Fully qualified class temporal values are hydrated into
pub const TEMPORAL_CLASS: &str = "Carbon\\Carbon";

/// Extra method contributed by a [`Mutator`](crate::model::Mutator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation {
    pub name: String,
    pub body: String,
}

/// A recoverable anomaly met while assembling a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A foreign key points at a table that is not known to the run
    UnresolvedReference {
        table: TableName,
        columns: Vec<String>,
        references: TableName,
    },
    /// A relation was dropped because its name was already registered
    NameCollision {
        relation: String,
        kind: RelationKind,
        target: TableName,
        taken: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedReference {
                table,
                columns,
                references,
            } => write!(
                f,
                "foreign key {}({}) references unknown table {}",
                table,
                columns.join(", "),
                references
            ),
            Diagnostic::NameCollision {
                relation,
                kind,
                target,
                taken,
            } => write!(
                f,
                "{} relation '{}' to {} dropped: '{}' is already defined",
                kind, relation, target, taken
            ),
        }
    }
}

/// Everything the emitter needs to render one table's model
///
/// Built once by the assembler and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub table: TableName,
    /// Class written to the generated file
    pub class: ClassRef,
    /// Class other code refers to; differs from `class` in base-file mode
    pub user_class: ClassRef,
    pub parent: ClassRef,
    pub base_files: bool,

    pub fields: Vec<Field>,
    /// Accessor method name to the column behind it
    pub accessors: BTreeMap<String, String>,
    pub relations: Vec<RelationSide>,
    pub traits: Vec<String>,

    /// Connection name, when it must be spelled out
    pub connection: Option<String>,
    /// Table name, when the conventions would not derive it
    pub table_name: Option<String>,
    /// Primary key column, when it is not `id`
    pub primary_key: Option<String>,
    pub incrementing: bool,
    /// Page size, when it differs from the default
    pub per_page: Option<u32>,
    pub timestamps: bool,
    /// Timestamp column names, when they differ from the defaults
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
    pub soft_deletes: bool,
    pub date_format: Option<String>,
    pub snake_attributes: bool,

    pub casts: Vec<(String, String)>,
    pub dates: Vec<String>,
    pub hidden: Vec<String>,
    pub fillable: Vec<String>,
    /// Column comments, when hints are enabled
    pub hints: Vec<(String, String)>,
    pub mutations: Vec<Mutation>,

    pub diagnostics: Vec<Diagnostic>,
}

impl ModelDescriptor {
    pub fn needs_table_name(&self) -> bool {
        self.table_name.is_some()
    }

    pub fn has_custom_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn does_not_autoincrement(&self) -> bool {
        !self.incrementing
    }

    pub fn has_custom_per_page(&self) -> bool {
        self.per_page.is_some()
    }

    pub fn has_custom_created_at(&self) -> bool {
        self.created_at.is_some()
    }

    pub fn has_custom_updated_at(&self) -> bool {
        self.updated_at.is_some()
    }

    pub fn has_custom_deleted_at(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn has_custom_date_format(&self) -> bool {
        self.date_format.is_some()
    }

    pub fn relation(&self, name: &str) -> Option<&RelationSide> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field an accessor method reads or writes
    pub fn accessor_field(&self, accessor: &str) -> Option<&Field> {
        self.accessors.get(accessor).and_then(|column| self.field(column))
    }
}
