//! Model assembly
//!
//! Builds the [`ModelDescriptor`] of one table from its blueprint, the
//! foreign keys it declares and the foreign keys pointing at it.
//!
//! Generated method names share one namespace per model and are registered
//! first come, first served:
//!
//! 1. field accessors, in column order (columns backing a `belongsTo` are
//!    left to their relation),
//! 2. owning relations, in constraint order,
//! 3. inverse relations, ordered by referencing table then constraint order.
//!
//! A relation whose method or getter name is already taken is dropped with a
//! [`Diagnostic`]. When a dropped relation was a `belongsTo`, the accessors
//! of its foreign key column are registered afterwards if still free.

use crate::config::{GenerationConfig, ResolvedOptions, CREATED_AT, DEFAULT_PER_PAGE, DELETED_AT, UPDATED_AT};
use crate::error::Result;
use crate::generator::filter::Patterns;
use crate::model::{
    ClassRef, Diagnostic, Field, ModelDescriptor, ModelIdentity, Mutation, Mutator, DEFAULT_KEY,
};
use crate::naming::{self, AccessorCache, Direction};
use crate::relation::{classify, Endpoint, RelationSide};
use crate::schema::{Blueprint, Catalog};
use crate::types::map_native_type;
use std::collections::HashSet;

/// Trait mixed into models using soft deletes
pub const SOFT_DELETES: &str = "Illuminate\\Database\\Eloquent\\SoftDeletes";

/// Assembles models for the tables of a [`Catalog`]
pub struct Assembler<'a> {
    catalog: &'a Catalog,
    config: &'a GenerationConfig,
    connection: &'a str,
    mutators: &'a [Box<dyn Mutator>],
}

impl<'a> Assembler<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a GenerationConfig, connection: &'a str) -> Self {
        Self {
            catalog,
            config,
            connection,
            mutators: &[],
        }
    }

    pub fn with_mutators(mut self, mutators: &'a [Box<dyn Mutator>]) -> Self {
        self.mutators = mutators;
        self
    }

    pub fn options(&self, blueprint: &Blueprint) -> ResolvedOptions {
        self.config.resolve(blueprint.name())
    }

    pub fn identity(&self, blueprint: &Blueprint) -> ModelIdentity {
        ModelIdentity::resolve(blueprint, &self.options(blueprint))
    }

    /// Assemble the model of `blueprint`
    ///
    /// Accessor names are recorded in `cache` so they can be mapped back to
    /// their columns for the rest of the run.
    pub fn assemble(
        &self,
        blueprint: &Blueprint,
        cache: &mut AccessorCache,
    ) -> Result<ModelDescriptor> {
        let options = self.options(blueprint);
        let identity = ModelIdentity::resolve(blueprint, &options);
        let mut diagnostics = Vec::new();

        let conventions = Conventions::observe(blueprint, &options);
        let ignored = conventions.ignored(blueprint);

        let owning = self.owning_relations(blueprint, &identity, &mut diagnostics);
        let inverse = self.inverse_relations(blueprint, &identity);
        let backing: HashSet<&str> = owning
            .iter()
            .filter_map(|side| side.backing_column.as_deref())
            .collect();

        let class_key = identity.class.qualified();
        let mut names = MethodNames::default();
        let mut fields = Vec::new();
        for column in blueprint.columns() {
            if ignored.contains(column.name.as_str()) {
                continue;
            }
            let ty = map_native_type(&column.native_type);
            let mut field = Field {
                name: column.name.clone(),
                native_type: column.native_type.clone(),
                ty,
                nullable: column.nullable,
                setter: None,
                getter: None,
            };
            if !backing.contains(column.name.as_str()) {
                names.register_accessors(&class_key, &mut field, cache);
            }
            fields.push(field);
        }

        let mut relations = Vec::new();
        let mut orphaned = Vec::new();
        for side in owning.iter().chain(inverse.iter()) {
            let getter = getter_name(&side.name);
            let taken = [side.name.as_str(), getter.as_str()]
                .into_iter()
                .find(|name| names.is_taken(name));

            match taken {
                None => {
                    names.claim(&side.name);
                    names.claim(&getter);
                    relations.push(side.clone());
                }
                Some(taken) => {
                    log::debug!(
                        "{}: dropping {} relation '{}', '{}' is already defined",
                        blueprint.name(),
                        side.kind,
                        side.name,
                        taken
                    );
                    diagnostics.push(Diagnostic::NameCollision {
                        relation: side.name.clone(),
                        kind: side.kind,
                        target: side.target_table.clone(),
                        taken: taken.to_string(),
                    });
                    if let Some(column) = &side.backing_column {
                        orphaned.push(column.clone());
                    }
                }
            }
        }

        for column in orphaned {
            let still_backed = relations
                .iter()
                .any(|r| r.backing_column.as_deref() == Some(column.as_str()));
            if still_backed {
                continue;
            }
            if let Some(field) = fields.iter_mut().find(|f| f.name == column) {
                names.register_accessors(&class_key, field, cache);
            }
        }

        let hidden = Patterns::new(&options.hidden)?;
        let guarded = Patterns::new(&options.guarded)?;

        let casts = fields
            .iter()
            .filter_map(|f| f.cast().map(|cast| (f.name.clone(), cast.to_string())))
            .collect();
        let dates = blueprint
            .columns()
            .iter()
            .filter(|c| map_native_type(&c.native_type).is_temporal())
            .filter(|c| !conventions.is_managed_date(&c.name))
            .map(|c| c.name.clone())
            .collect();
        let hidden_columns = blueprint
            .columns()
            .iter()
            .filter(|c| hidden.matches(&c.name))
            .map(|c| c.name.clone())
            .collect();
        let fillable = blueprint
            .columns()
            .iter()
            .filter(|c| !blueprint.primary_key().contains(&c.name))
            .filter(|c| !conventions.is_timestamp_name(&c.name))
            .filter(|c| !guarded.matches(&c.name))
            .map(|c| c.name.clone())
            .collect();
        let hints = if options.hints {
            blueprint
                .columns()
                .iter()
                .filter_map(|c| match c.comment.as_deref() {
                    Some(comment) if !comment.trim().is_empty() => {
                        Some((c.name.clone(), comment.trim().to_string()))
                    }
                    _ => None,
                })
                .collect()
        } else {
            Vec::new()
        };

        let class = if options.base_files {
            ClassRef::new(options.base_namespace(), identity.class.name.clone())
        } else {
            identity.class.clone()
        };

        let conventional_table = naming::conventional_table(&identity.class.name, &options.prefix);
        let primary_key =
            (identity.key_name() != DEFAULT_KEY).then(|| identity.key_name().to_string());
        let incrementing = match blueprint.primary_key() {
            [pk] => blueprint.column(pk).is_some_and(|c| c.auto_increment),
            _ => false,
        };

        let mut model = ModelDescriptor {
            table: blueprint.name().clone(),
            class,
            user_class: identity.class.clone(),
            parent: ClassRef::parse(&options.parent),
            base_files: options.base_files,
            fields,
            accessors: cache.accessors(&class_key),
            relations,
            traits: if conventions.soft_deletes {
                vec![SOFT_DELETES.to_string()]
            } else {
                Vec::new()
            },
            connection: options.connection.then(|| {
                options
                    .connection_name
                    .clone()
                    .unwrap_or_else(|| self.connection.to_string())
            }),
            table_name: (blueprint.table() != conventional_table)
                .then(|| blueprint.table().to_string()),
            primary_key,
            incrementing,
            per_page: (options.per_page != DEFAULT_PER_PAGE).then_some(options.per_page),
            timestamps: conventions.timestamps,
            created_at: (conventions.timestamps && options.created_at != CREATED_AT)
                .then(|| options.created_at.clone()),
            updated_at: (conventions.timestamps && options.updated_at != UPDATED_AT)
                .then(|| options.updated_at.clone()),
            deleted_at: (conventions.soft_deletes && options.deleted_at != DELETED_AT)
                .then(|| options.deleted_at.clone()),
            soft_deletes: conventions.soft_deletes,
            date_format: options.date_format.clone(),
            snake_attributes: options.snake_attributes,
            casts,
            dates,
            hidden: hidden_columns,
            fillable,
            hints,
            mutations: Vec::new(),
            diagnostics,
        };

        let mutations: Vec<Mutation> = self
            .mutators
            .iter()
            .filter(|m| m.applies(&model))
            .map(|m| Mutation {
                name: m.name(&model),
                body: m.body(&model),
            })
            .collect();
        model.mutations = mutations;

        log::debug!(
            "Assembled {} ({} fields, {} relations)",
            model.class,
            model.fields.len(),
            model.relations.len()
        );
        Ok(model)
    }

    /// Owning sides of the foreign keys `blueprint` declares
    fn owning_relations(
        &self,
        blueprint: &Blueprint,
        identity: &ModelIdentity,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RelationSide> {
        let mut sides = Vec::new();
        for fk in blueprint.foreign_keys() {
            let Some(related) = self.catalog.table(&fk.on) else {
                log::warn!(
                    "{}: foreign key ({}) references unknown table {}",
                    blueprint.name(),
                    fk.columns.join(", "),
                    fk.on
                );
                diagnostics.push(Diagnostic::UnresolvedReference {
                    table: blueprint.name().clone(),
                    columns: fk.columns.clone(),
                    references: fk.on.clone(),
                });
                continue;
            };

            let related_identity = self.identity(related);
            let descriptor = classify(
                fk,
                Endpoint::new(blueprint, identity),
                Endpoint::new(related, &related_identity),
            );
            sides.push(descriptor.owning);
        }
        sides
    }

    /// Inverse sides of the foreign keys pointing at `blueprint`
    fn inverse_relations(&self, blueprint: &Blueprint, identity: &ModelIdentity) -> Vec<RelationSide> {
        self.catalog
            .referencing(blueprint.name())
            .into_iter()
            .map(|reference| {
                let owner_identity = self.identity(reference.blueprint);
                classify(
                    reference.foreign_key,
                    Endpoint::new(reference.blueprint, &owner_identity),
                    Endpoint::new(blueprint, identity),
                )
                .inverse
            })
            .collect()
    }
}

/// Name of the typed getter generated next to a relation method
pub fn getter_name(relation: &str) -> String {
    format!("{}{}", naming::PREFIX_GET, naming::to_method_case(relation))
}

/// Timestamp conventions in effect for one table
struct Conventions<'o> {
    timestamps: bool,
    soft_deletes: bool,
    options: &'o ResolvedOptions,
}

impl<'o> Conventions<'o> {
    fn observe(blueprint: &Blueprint, options: &'o ResolvedOptions) -> Self {
        Self {
            timestamps: options.timestamps
                && blueprint.has_column(&options.created_at)
                && blueprint.has_column(&options.updated_at),
            soft_deletes: options.soft_deletes && blueprint.has_column(&options.deleted_at),
            options,
        }
    }

    /// Columns the parent class already provides accessors for
    fn ignored<'b>(&self, blueprint: &'b Blueprint) -> HashSet<&'b str> {
        let mut ignored: HashSet<&str> = blueprint.primary_key().iter().map(String::as_str).collect();
        if self.timestamps {
            for column in blueprint.columns() {
                if column.name == self.options.created_at || column.name == self.options.updated_at {
                    ignored.insert(column.name.as_str());
                }
            }
        }
        ignored
    }

    /// Date columns the framework manages on its own
    fn is_managed_date(&self, column: &str) -> bool {
        (self.timestamps && (column == self.options.created_at || column == self.options.updated_at))
            || (self.soft_deletes && column == self.options.deleted_at)
    }

    fn is_timestamp_name(&self, column: &str) -> bool {
        column == self.options.created_at
            || column == self.options.updated_at
            || column == self.options.deleted_at
    }
}

/// Method names defined on one model; lookups ignore case like PHP does
#[derive(Default)]
struct MethodNames {
    taken: HashSet<String>,
}

impl MethodNames {
    fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&name.to_lowercase())
    }

    fn claim(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_lowercase())
    }

    /// Claim the accessors of `field`, recording the ones it gets in `cache`
    fn register_accessors(&mut self, class: &str, field: &mut Field, cache: &mut AccessorCache) {
        let setter = naming::accessor_name(&field.name, Direction::Set, &field.ty);
        if self.claim(&setter) {
            cache.record(class, &setter, &field.name);
            field.setter = Some(setter);
        }
        let getter = naming::accessor_name(&field.name, Direction::Get, &field.ty);
        if self.claim(&getter) {
            cache.record(class, &getter, &field.name);
            field.getter = Some(getter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FnMutator;
    use crate::relation::RelationKind;
    use crate::schema::{Column, ForeignKey, TableName};

    fn table(
        name: &str,
        columns: Vec<Column>,
        pk: &[&str],
        unique: &[&[&str]],
        fks: Vec<ForeignKey>,
    ) -> Blueprint {
        Blueprint::new(
            TableName::new("shop", name),
            columns,
            fks,
            pk.iter().map(|c| c.to_string()).collect(),
            unique
                .iter()
                .map(|key| key.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn id() -> Column {
        Column::new("id", "int(10) unsigned").auto_increment()
    }

    fn fk(column: &str, table: &str) -> ForeignKey {
        ForeignKey::new([column], TableName::new("shop", table), ["id"])
    }

    fn shop() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(table(
            "users",
            vec![
                id(),
                Column::new("email", "varchar(255)"),
                Column::new("active", "tinyint(1)"),
                Column::new("password", "varchar(60)"),
                Column::new("created_at", "timestamp").nullable(),
                Column::new("updated_at", "timestamp").nullable(),
            ],
            &["id"],
            &[&["email"]],
            vec![],
        ));
        catalog.insert(table(
            "posts",
            vec![
                id(),
                Column::new("user_id", "int(10) unsigned"),
                Column::new("title", "varchar(255)"),
                Column::new("published_at", "datetime").nullable(),
            ],
            &["id"],
            &[],
            vec![fk("user_id", "users")],
        ));
        catalog.insert(table(
            "profiles",
            vec![
                Column::new("user_id", "int(10) unsigned"),
                Column::new("bio", "text").with_comment("Short biography"),
            ],
            &["user_id"],
            &[],
            vec![fk("user_id", "users")],
        ));
        catalog
    }

    fn assemble(catalog: &Catalog, config: &GenerationConfig, table: &str) -> ModelDescriptor {
        let blueprint = catalog.table(&TableName::new("shop", table)).unwrap();
        Assembler::new(catalog, config, "mysql")
            .assemble(blueprint, &mut AccessorCache::new())
            .unwrap()
    }

    #[test]
    fn test_users_model() {
        let catalog = shop();
        let config = GenerationConfig::from_toml_str("[defaults]\nhidden = [\"password\"]\n").unwrap();
        let users = assemble(&catalog, &config, "users");

        assert_eq!(users.class.qualified(), "App\\Models\\User");
        assert!(!users.needs_table_name());
        assert!(!users.has_custom_primary_key());
        assert!(users.incrementing);
        assert!(users.timestamps);

        let names: Vec<&str> = users.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "active", "password"]);
        let active = users.field("active").unwrap();
        assert_eq!(active.getter.as_deref(), Some("isActive"));
        assert_eq!(active.setter.as_deref(), Some("setActive"));
        assert_eq!(active.hint(), "bool");

        let posts = users.relation("posts").unwrap();
        assert_eq!(posts.kind, RelationKind::HasMany);
        let profile = users.relation("profile").unwrap();
        assert_eq!(profile.kind, RelationKind::HasOne);

        assert_eq!(users.casts, vec![("active".to_string(), "bool".to_string())]);
        assert!(users.dates.is_empty());
        assert_eq!(users.hidden, vec!["password"]);
        assert_eq!(users.fillable, vec!["email", "active", "password"]);
        assert!(users.diagnostics.is_empty());
    }

    #[test]
    fn test_belongs_to_replaces_column_accessors() {
        let catalog = shop();
        let posts = assemble(&catalog, &GenerationConfig::default(), "posts");

        let relation = posts.relation("user_id").unwrap();
        assert_eq!(relation.kind, RelationKind::BelongsTo);
        let user_id = posts.field("user_id").unwrap();
        assert_eq!(user_id.getter, None);
        assert_eq!(user_id.setter, None);
        assert_eq!(posts.dates, vec!["published_at"]);
        assert!(!posts.timestamps);
        assert_eq!(posts.casts, vec![("user_id".to_string(), "int".to_string())]);
    }

    #[test]
    fn test_profile_flags() {
        let catalog = shop();
        let config = GenerationConfig::from_toml_str("[defaults]\nhints = true\n").unwrap();
        let profiles = assemble(&catalog, &config, "profiles");

        assert_eq!(profiles.primary_key.as_deref(), Some("user_id"));
        assert!(profiles.does_not_autoincrement());
        assert_eq!(
            profiles.hints,
            vec![("bio".to_string(), "Short biography".to_string())]
        );
        assert!(profiles.fillable.iter().all(|c| c != "user_id"));
    }

    #[test]
    fn test_unresolved_reference_is_dropped() {
        let mut catalog = shop();
        catalog.insert(table(
            "comments",
            vec![id(), Column::new("post_id", "int"), Column::new("ghost_id", "int")],
            &["id"],
            &[],
            vec![fk("post_id", "posts"), fk("ghost_id", "ghosts")],
        ));

        let comments = assemble(&catalog, &GenerationConfig::default(), "comments");
        assert_eq!(comments.relations.len(), 1);
        assert!(matches!(
            &comments.diagnostics[..],
            [Diagnostic::UnresolvedReference { references, .. }] if references.table == "ghosts"
        ));
        // The column of the dropped constraint keeps its accessors
        assert_eq!(
            comments.field("ghost_id").unwrap().getter.as_deref(),
            Some("getGhostId")
        );
    }

    #[test]
    fn test_relation_colliding_with_accessor_is_dropped() {
        let mut catalog = Catalog::new();
        catalog.insert(table("users", vec![id()], &["id"], &[], vec![]));
        // relation `authorId` on posts would generate `getAuthorId`, already
        // claimed by the accessor of the plain `author_id` column
        catalog.insert(table(
            "posts",
            vec![
                id(),
                Column::new("author_id", "int"),
                Column::new("fk_author_id", "int"),
            ],
            &["id"],
            &[],
            vec![fk("fk_author_id", "users")],
        ));
        let config = GenerationConfig::from_toml_str("[defaults]\nsnake_attributes = false\n").unwrap();

        let posts = assemble(&catalog, &config, "posts");
        assert!(posts.relation("authorId").is_none());
        assert!(matches!(
            &posts.diagnostics[..],
            [Diagnostic::NameCollision { relation, taken, .. }]
                if relation == "authorId" && taken == "getAuthorId"
        ));
        // the foreign key column gets its own accessors back
        let fk_column = posts.field("fk_author_id").unwrap();
        assert_eq!(fk_column.getter.as_deref(), Some("getFkAuthorId"));
        assert_eq!(fk_column.setter.as_deref(), Some("setFkAuthorId"));

        let json = serde_json::to_value(&posts).unwrap();
        let diagnostic = &json["diagnostics"][0];
        assert_eq!(diagnostic["diagnostic"], "name_collision");
        assert_eq!(diagnostic["relation"], "authorId");
        assert_eq!(diagnostic["kind"], "BelongsTo");
        assert_eq!(diagnostic["taken"], "getAuthorId");
    }

    #[test]
    fn test_accessors_map_back_per_class() {
        let mut catalog = Catalog::new();
        catalog.insert(table(
            "accounts",
            vec![id(), Column::new("userID", "varchar(20)")],
            &["id"],
            &[],
            vec![],
        ));
        catalog.insert(table(
            "posts",
            vec![id(), Column::new("user_id", "int")],
            &["id"],
            &[],
            vec![],
        ));
        let config = GenerationConfig::default();
        let assembler = Assembler::new(&catalog, &config, "mysql");

        let mut cache = AccessorCache::new();
        let accounts = assembler
            .assemble(catalog.table(&TableName::new("shop", "accounts")).unwrap(), &mut cache)
            .unwrap();
        let posts = assembler
            .assemble(catalog.table(&TableName::new("shop", "posts")).unwrap(), &mut cache)
            .unwrap();

        assert_eq!(
            cache.field("App\\Models\\Account", "getUserId").as_deref(),
            Some("userID")
        );
        assert_eq!(
            cache.field("App\\Models\\Post", "getUserId").as_deref(),
            Some("user_id")
        );
        assert_eq!(accounts.accessor_field("setUserId").unwrap().name, "userID");
        assert_eq!(posts.accessor_field("getUserId").unwrap().name, "user_id");
        assert_eq!(
            posts.accessors.keys().collect::<Vec<_>>(),
            vec!["getUserId", "setUserId"]
        );
    }

    #[test]
    fn test_composite_primary_key_is_keyed_on_first_column() {
        let mut catalog = Catalog::new();
        catalog.insert(table(
            "orders",
            vec![Column::new("id", "int"), Column::new("tenant_id", "int")],
            &["id", "tenant_id"],
            &[],
            vec![],
        ));
        catalog.insert(table(
            "shipments",
            vec![id(), Column::new("order_id", "int"), Column::new("tenant_id", "int")],
            &["id"],
            &[],
            vec![ForeignKey::new(
                ["order_id", "tenant_id"],
                TableName::new("shop", "orders"),
                ["id", "tenant_id"],
            )],
        ));
        let config = GenerationConfig::default();

        let orders = assemble(&catalog, &config, "orders");
        assert_eq!(orders.primary_key, None);
        assert!(orders.does_not_autoincrement());
        let inverse = orders.relation("shipments").unwrap();
        assert_eq!(inverse.foreign_key, None);
        assert_eq!(inverse.other_key, None);

        let shipments = assemble(&catalog, &config, "shipments");
        let owning = shipments.relation("order_id").unwrap();
        assert_eq!(owning.kind, RelationKind::BelongsTo);
        assert_eq!(owning.foreign_key, None);
        assert_eq!(owning.other_key, None);
        assert_eq!(owning.conditions.len(), 1);
    }

    #[test]
    fn test_self_reference_keeps_both_sides() {
        let mut catalog = Catalog::new();
        catalog.insert(table(
            "employees",
            vec![id(), Column::new("manager_id", "int").nullable()],
            &["id"],
            &[],
            vec![fk("manager_id", "employees")],
        ));
        let config = GenerationConfig::from_toml_str("[defaults]\nsnake_attributes = false\n").unwrap();

        let employees = assemble(&catalog, &config, "employees");
        let names: Vec<&str> = employees.relations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["managerId", "employeesWhereManagerId"]);
        assert!(employees.diagnostics.is_empty());
    }

    #[test]
    fn test_custom_conventions() {
        let mut catalog = Catalog::new();
        catalog.insert(table(
            "person",
            vec![
                Column::new("code", "char(8)"),
                Column::new("created", "datetime"),
                Column::new("modified", "datetime"),
                Column::new("removed", "datetime").nullable(),
            ],
            &["code"],
            &[],
            vec![],
        ));
        let config = GenerationConfig::from_toml_str(
            r#"
[tables."shop.person"]
created_at = "created"
updated_at = "modified"
soft_deletes = true
deleted_at = "removed"
per_page = 25
connection = true
base_files = true
"#,
        )
        .unwrap();

        let person = assemble(&catalog, &config, "person");
        assert_eq!(person.class.qualified(), "App\\Models\\Base\\Person");
        assert_eq!(person.user_class.qualified(), "App\\Models\\Person");
        assert_eq!(person.table_name.as_deref(), Some("person"));
        assert_eq!(person.primary_key.as_deref(), Some("code"));
        assert!(person.does_not_autoincrement());
        assert!(person.timestamps);
        assert_eq!(person.created_at.as_deref(), Some("created"));
        assert_eq!(person.updated_at.as_deref(), Some("modified"));
        assert_eq!(person.deleted_at.as_deref(), Some("removed"));
        assert_eq!(person.traits, vec![SOFT_DELETES]);
        assert_eq!(person.per_page, Some(25));
        assert_eq!(person.connection.as_deref(), Some("mysql"));
        assert!(person.dates.is_empty());
        assert!(person.fillable.is_empty());
        // only the soft delete column is left for explicit accessors
        let names: Vec<&str> = person.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["removed"]);
    }

    #[test]
    fn test_mutators() {
        let catalog = shop();
        let mutators: Vec<Box<dyn Mutator>> = vec![Box::new(
            FnMutator::new("presenter", |m| {
                format!("return new {}Presenter($this);", m.class.name)
            })
            .when(|m| m.table.table == "users"),
        )];
        let config = GenerationConfig::default();
        let assembler = Assembler::new(&catalog, &config, "mysql").with_mutators(&mutators);

        let users = catalog.table(&TableName::new("shop", "users")).unwrap();
        let model = assembler.assemble(users, &mut AccessorCache::new()).unwrap();
        assert_eq!(
            model.mutations,
            vec![Mutation {
                name: "presenter".to_string(),
                body: "return new UserPresenter($this);".to_string(),
            }]
        );

        let posts = catalog.table(&TableName::new("shop", "posts")).unwrap();
        let model = assembler.assemble(posts, &mut AccessorCache::new()).unwrap();
        assert!(model.mutations.is_empty());
    }
}
