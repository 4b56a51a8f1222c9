//! Relation descriptors

use crate::model::ClassRef;
use crate::schema::TableName;
use serde::Serialize;
use std::fmt;

/// Type of relationship between two models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    /// Singular relation from the owning side to the referenced record
    BelongsTo,
    /// Singular relation from the referenced side back to its owner
    HasOne,
    /// Plural relation to every record whose key columns match
    HasMany,
}

impl RelationKind {
    /// Relation builder method on the generated class
    pub fn method(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, RelationKind::HasMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Extra equality condition joining a composite key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinClause {
    /// Qualified column on the related table
    pub related: String,
    /// Qualified column on the holding table
    pub local: String,
}

/// One side of a relation, as it appears on the model holding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationSide {
    pub kind: RelationKind,
    /// Relation method name
    pub name: String,
    /// Table whose model holds this side
    pub holder: TableName,
    /// Table on the other end
    pub target_table: TableName,
    /// Class on the other end
    pub target: ClassRef,
    /// Explicit foreign key argument, `None` when the convention applies
    pub foreign_key: Option<String>,
    /// Explicit owner/local key argument, `None` when the convention applies
    pub other_key: Option<String>,
    /// One condition per composite key pair beyond the first
    pub conditions: Vec<JoinClause>,
    /// Local foreign key column backing a `BelongsTo`, if this side is one
    pub backing_column: Option<String>,
}

/// Both sides of one foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationDescriptor {
    /// Table declaring the constraint
    pub owner: TableName,
    /// Referenced table
    pub related: TableName,
    pub foreign_columns: Vec<String>,
    pub referenced_columns: Vec<String>,
    /// Side held by the owner's model
    pub owning: RelationSide,
    /// Side held by the related model
    pub inverse: RelationSide,
}

impl RelationDescriptor {
    pub fn name(&self) -> &str {
        &self.owning.name
    }

    pub fn inverse_name(&self) -> &str {
        &self.inverse.name
    }

    pub fn is_composite(&self) -> bool {
        self.referenced_columns.len() > 1
    }

    pub fn is_self_referencing(&self) -> bool {
        self.owner == self.related
    }
}
