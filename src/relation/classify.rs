//! Foreign key classification

use crate::model::ModelIdentity;
use crate::naming::{self, strip_fk_prefix};
use crate::relation::{JoinClause, RelationDescriptor, RelationKind, RelationSide};
use crate::schema::{Blueprint, ForeignKey};

/// A table together with the model identity it generates
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub blueprint: &'a Blueprint,
    pub identity: &'a ModelIdentity,
}

impl<'a> Endpoint<'a> {
    pub fn new(blueprint: &'a Blueprint, identity: &'a ModelIdentity) -> Self {
        Self {
            blueprint,
            identity,
        }
    }

    fn default_foreign_key(&self) -> String {
        format!("{}_id", self.identity.record_name)
    }

    fn is_primary_key(&self, column: &str) -> bool {
        self.identity.key_name() == column
    }

    fn qualified(&self, column: &str) -> String {
        format!("{}.{}", self.blueprint.table(), column)
    }
}

/// Classify `foreign_key`, declared by `owner` and referencing `related`
///
/// The owning side is a `BelongsTo` when the referenced columns are the
/// primary key or a unique key of `related`, and a `HasMany` otherwise.
/// The inverse side is a `HasOne` when the local columns are the primary
/// key or a unique key of `owner`, and a `HasMany` otherwise. Both
/// decisions are made independently.
pub fn classify(
    foreign_key: &ForeignKey,
    owner: Endpoint<'_>,
    related: Endpoint<'_>,
) -> RelationDescriptor {
    let owning = owning_side(foreign_key, owner, related);
    let inverse = inverse_side(foreign_key, owner, related);

    RelationDescriptor {
        owner: owner.blueprint.name().clone(),
        related: related.blueprint.name().clone(),
        foreign_columns: foreign_key.columns.clone(),
        referenced_columns: foreign_key.references.clone(),
        owning,
        inverse,
    }
}

fn owning_side(fk: &ForeignKey, owner: Endpoint<'_>, related: Endpoint<'_>) -> RelationSide {
    let name = relation_name(strip_fk_prefix(fk.column()), owner.identity.snake_attributes);

    if related.blueprint.is_identifying(&fk.references) {
        // belongsTo(Related, foreignKey, ownerKey)
        let (foreign_key, other_key) = key_arguments(
            fk.column(),
            &related.default_foreign_key(),
            fk.reference(),
            related.is_primary_key(fk.reference()),
        );

        RelationSide {
            kind: RelationKind::BelongsTo,
            name,
            holder: owner.blueprint.name().clone(),
            target_table: related.blueprint.name().clone(),
            target: related.identity.class.clone(),
            foreign_key,
            other_key,
            conditions: extra_pairs(fk, related, owner, true),
            backing_column: Some(fk.column().to_string()),
        }
    } else {
        // Several related rows share the referenced values:
        // hasMany(Related, foreignKey on related, localKey on owner)
        let (foreign_key, other_key) = key_arguments(
            fk.reference(),
            &owner.default_foreign_key(),
            fk.column(),
            owner.is_primary_key(fk.column()),
        );

        RelationSide {
            kind: RelationKind::HasMany,
            name,
            holder: owner.blueprint.name().clone(),
            target_table: related.blueprint.name().clone(),
            target: related.identity.class.clone(),
            foreign_key,
            other_key,
            conditions: extra_pairs(fk, related, owner, true),
            backing_column: None,
        }
    }
}

fn inverse_side(fk: &ForeignKey, owner: Endpoint<'_>, related: Endpoint<'_>) -> RelationSide {
    let kind = if owner.blueprint.is_identifying(&fk.columns) {
        RelationKind::HasOne
    } else {
        RelationKind::HasMany
    };

    let record = &owner.identity.record_name;
    let mut base = if kind.is_plural() {
        naming::plural(record)
    } else {
        record.clone()
    };
    let default_foreign_key = related.default_foreign_key();
    if fk.column() != default_foreign_key {
        base = format!("{}_where_{}", base, strip_fk_prefix(fk.column()));
    }

    // hasOne/hasMany(Owner, foreignKey on owner, localKey on related)
    let (foreign_key, other_key) = key_arguments(
        fk.column(),
        &default_foreign_key,
        fk.reference(),
        related.is_primary_key(fk.reference()),
    );

    RelationSide {
        kind,
        name: relation_name(&base, related.identity.snake_attributes),
        holder: related.blueprint.name().clone(),
        target_table: owner.blueprint.name().clone(),
        target: owner.identity.class.clone(),
        foreign_key,
        other_key,
        conditions: extra_pairs(fk, owner, related, false),
        backing_column: None,
    }
}

fn relation_name(base: &str, snake_attributes: bool) -> String {
    if snake_attributes {
        naming::to_field_case(base)
    } else {
        naming::to_camel_case(base)
    }
}

/// Explicit key arguments, omitted while they match the conventions
///
/// Arguments are positional, so an explicit second key forces the first.
fn key_arguments(
    foreign_key: &str,
    default_foreign_key: &str,
    other_key: &str,
    other_key_is_default: bool,
) -> (Option<String>, Option<String>) {
    let needs_other_key = !other_key_is_default;
    let needs_foreign_key = foreign_key != default_foreign_key || needs_other_key;

    (
        needs_foreign_key.then(|| foreign_key.to_string()),
        needs_other_key.then(|| other_key.to_string()),
    )
}

/// Equality conditions for every column pair beyond the first
///
/// `target` is the model the relation points at, `holder` the one holding it.
fn extra_pairs(
    fk: &ForeignKey,
    target: Endpoint<'_>,
    holder: Endpoint<'_>,
    holder_is_owner: bool,
) -> Vec<JoinClause> {
    fk.pairs()
        .skip(1)
        .map(|(local, referenced)| {
            let (target_column, holder_column) = if holder_is_owner {
                (referenced, local)
            } else {
                (local, referenced)
            };
            JoinClause {
                related: target.qualified(target_column),
                local: holder.qualified(holder_column),
            }
        })
        .collect()
}
