//! Source text emission
//!
//! Renders a [`ModelDescriptor`] through a template. Class members are
//! always written in the same order so regenerating an unchanged schema
//! yields byte-identical files.

pub mod class_writer;
pub mod dumper;
pub mod imports;
pub mod template;

pub use dumper::Value;
pub use imports::{ImportRegistry, Scope};
pub use template::{fill, TemplateKind, Templates};

use crate::model::{getter_name, ClassRef, ModelDescriptor, TEMPORAL_CLASS};
use crate::relation::{RelationKind, RelationSide};
use class_writer::FieldOptions;
use std::collections::BTreeMap;

const RELATIONS_NAMESPACE: &str = "Illuminate\\Database\\Eloquent\\Relations";
const COLLECTION: &str = "\\Illuminate\\Database\\Eloquent\\Collection";

/// Width annotation return types are padded to
const HINT_WIDTH: usize = 10;

/// Renders models; holds the per-run import registry
#[derive(Debug)]
pub struct Emitter {
    imports: ImportRegistry,
    date: String,
}

impl Emitter {
    /// `date` is substituted for `{{date}}` in every file of the run
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            imports: ImportRegistry::new(),
            date: date.into(),
        }
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    /// Render the generated class of `model`
    pub fn render(&mut self, model: &ModelDescriptor, template: &str) -> String {
        // The body registers the imports, so it goes first.
        let body = self.body(model);
        let properties = self.properties(model);

        let values = BTreeMap::from([
            ("date", self.date.clone()),
            ("namespace", model.class.namespace.clone()),
            ("parent_full", model.parent.qualified()),
            ("parent", model.parent.name.clone()),
            ("class", model.class.name.clone()),
            ("body", body),
            ("properties", properties),
            ("imports", self.imports.render(&model.class)),
        ]);
        fill(template, &values)
    }

    /// Render the user class layered on top of a generated base class
    pub fn render_user(&self, model: &ModelDescriptor, template: &str) -> String {
        let values = BTreeMap::from([
            ("date", self.date.clone()),
            ("namespace", model.user_class.namespace.clone()),
            ("parent_full", model.class.qualified()),
            ("parent", model.class.absolute()),
            ("class", model.user_class.name.clone()),
            ("body", user_body(model)),
            ("properties", String::new()),
            ("imports", String::new()),
        ]);
        fill(template, &values)
    }

    fn scope<'m>(model: &'m ModelDescriptor) -> Scope<'m> {
        Scope {
            class: &model.class,
            parent: &model.parent,
        }
    }

    fn body(&mut self, model: &ModelDescriptor) -> String {
        let mut body = String::new();

        for class in &model.traits {
            body.push_str(&class_writer::mixin(class));
        }
        if let Some(column) = &model.created_at {
            body.push_str(&class_writer::constant("CREATED_AT", &column.as_str().into()));
        }
        if let Some(column) = &model.updated_at {
            body.push_str(&class_writer::constant("UPDATED_AT", &column.as_str().into()));
        }
        if let Some(column) = &model.deleted_at {
            body.push_str(&class_writer::constant("DELETED_AT", &column.as_str().into()));
        }
        let mut body = body.trim_matches('\n').to_string();
        if !body.is_empty() {
            body.push('\n');
        }

        let public = FieldOptions::visibility("public");
        if let Some(connection) = &model.connection {
            body.push_str(&class_writer::field("connection", &connection.as_str().into(), FieldOptions::default()));
        }
        if let Some(table) = &model.table_name {
            body.push_str(&class_writer::field("table", &table.as_str().into(), FieldOptions::default()));
        }
        if let Some(primary_key) = &model.primary_key {
            body.push_str(&class_writer::field("primaryKey", &primary_key.as_str().into(), FieldOptions::default()));
        }
        if model.does_not_autoincrement() {
            body.push_str(&class_writer::field("incrementing", &false.into(), public));
        }
        if let Some(per_page) = model.per_page {
            body.push_str(&class_writer::field("perPage", &per_page.into(), FieldOptions::default()));
        }
        if !model.timestamps {
            body.push_str(&class_writer::field("timestamps", &false.into(), public));
        }
        if let Some(format) = &model.date_format {
            body.push_str(&class_writer::field("dateFormat", &format.as_str().into(), FieldOptions::default()));
        }
        if !model.snake_attributes {
            body.push_str(&class_writer::field(
                "snakeAttributes",
                &false.into(),
                FieldOptions::visibility("public static"),
            ));
        }

        let spaced = FieldOptions::spaced();
        if !model.casts.is_empty() {
            body.push_str(&class_writer::field("casts", &model.casts.as_slice().into(), spaced));
        }
        if !model.dates.is_empty() {
            body.push_str(&class_writer::field("dates", &model.dates.as_slice().into(), spaced));
        }
        if !model.base_files {
            if !model.hidden.is_empty() {
                body.push_str(&class_writer::field("hidden", &model.hidden.as_slice().into(), spaced));
            }
            if !model.fillable.is_empty() {
                body.push_str(&class_writer::field("fillable", &model.fillable.as_slice().into(), spaced));
            }
        }
        if !model.hints.is_empty() {
            body.push_str(&class_writer::field("hints", &model.hints.as_slice().into(), spaced));
        }

        for mutation in &model.mutations {
            body.push_str(&class_writer::method(&mutation.name, &mutation.body));
        }

        for relation in &model.relations {
            let target = self.imports.reference(Self::scope(model), &relation.target);

            body.push_str(&class_writer::doc_return(&format!(
                "\\{}\\{}",
                RELATIONS_NAMESPACE,
                relation_class(relation.kind)
            )));
            body.push_str(&class_writer::method(&relation.name, &relation.body(&target)));

            body.push_str(&class_writer::doc_return(&returned_type(relation, &target)));
            body.push_str(&class_writer::method(
                &getter_name(&relation.name),
                &relation.getter_body(),
            ));
        }

        body.trim_matches('\n').to_string()
    }

    /// Doc block lines for accessors and relations
    fn properties(&mut self, model: &ModelDescriptor) -> String {
        let mut annotations = String::new();

        for field in &model.fields {
            let hint = if field.hint() == TEMPORAL_CLASS {
                self.imports
                    .reference(Self::scope(model), &ClassRef::parse(TEMPORAL_CLASS))
            } else {
                field.hint().to_string()
            };

            if let Some(setter) = &field.setter {
                annotations.push_str(&class_writer::annotation(
                    "method",
                    &format!(
                        "{:<width$} {}({} ${})",
                        "$this",
                        setter,
                        hint,
                        field.name,
                        width = HINT_WIDTH
                    ),
                ));
            }
            if let Some(getter) = &field.getter {
                annotations.push_str(&class_writer::annotation(
                    "method",
                    &format!("{:<width$} {}()", hint, getter, width = HINT_WIDTH),
                ));
            }
        }

        let relations: Vec<&RelationSide> = model
            .relations
            .iter()
            // An attribute of the same name shadows the relation property
            .filter(|r| !model.fields.iter().any(|f| f.name == r.name))
            .collect();
        if !relations.is_empty() {
            annotations.push_str("\n *");
        }
        for relation in relations {
            let target = self.imports.reference(Self::scope(model), &relation.target);
            annotations.push_str(&class_writer::annotation(
                "property-read",
                &format!("{} ${}", returned_type(relation, &target), relation.name),
            ));
        }

        annotations
    }
}

/// Body of the user class: the mass assignment settings
fn user_body(model: &ModelDescriptor) -> String {
    let mut body = String::new();
    if !model.hidden.is_empty() {
        body.push_str(&class_writer::field(
            "hidden",
            &model.hidden.as_slice().into(),
            FieldOptions::default(),
        ));
    }
    if !model.fillable.is_empty() {
        body.push_str(&class_writer::field(
            "fillable",
            &model.fillable.as_slice().into(),
            FieldOptions::spaced(),
        ));
    }
    body.trim_matches('\n').to_string()
}

fn relation_class(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::BelongsTo => "BelongsTo",
        RelationKind::HasOne => "HasOne",
        RelationKind::HasMany => "HasMany",
    }
}

/// Type of the loaded relation value
fn returned_type(relation: &RelationSide, target: &str) -> String {
    if relation.kind.is_plural() {
        format!("{COLLECTION}|{target}[]")
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::model::Assembler;
    use crate::naming::AccessorCache;
    use crate::schema::{Blueprint, Catalog, Column, ForeignKey, TableName};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            Blueprint::new(
                TableName::new("shop", "users"),
                vec![
                    Column::new("id", "int").auto_increment(),
                    Column::new("name", "varchar(100)"),
                    Column::new("active", "tinyint(1)"),
                ],
                vec![],
                vec!["id".to_string()],
                vec![],
            )
            .unwrap(),
        );
        catalog.insert(
            Blueprint::new(
                TableName::new("shop", "posts"),
                vec![
                    Column::new("id", "int").auto_increment(),
                    Column::new("user_id", "int"),
                    Column::new("published_at", "datetime"),
                ],
                vec![ForeignKey::new(["user_id"], TableName::new("shop", "users"), ["id"])],
                vec!["id".to_string()],
                vec![],
            )
            .unwrap(),
        );
        catalog
    }

    fn model(config: &GenerationConfig, table: &str) -> ModelDescriptor {
        let catalog = catalog();
        let blueprint = catalog.table(&TableName::new("shop", table)).unwrap();
        Assembler::new(&catalog, config, "mysql")
            .assemble(blueprint, &mut AccessorCache::new())
            .unwrap()
    }

    #[test]
    fn test_render_users() {
        let config = GenerationConfig::from_toml_str("[defaults]\nsnake_attributes = false\n").unwrap();
        let users = model(&config, "users");
        let source = Emitter::new("today").render(&users, template::MODEL);

        assert!(source.contains("namespace App\\Models;"));
        assert!(source.contains("use Illuminate\\Database\\Eloquent\\Model;\n\n/**"));
        assert!(source.contains("class User extends Model\n{\n"));
        assert!(source.contains(" * @method $this      setName(string $name)"));
        assert!(source.contains(" * @method bool       isActive()"));
        assert!(source.contains("\tpublic $timestamps = false;\n"));
        assert!(source.contains("\tpublic static $snakeAttributes = false;\n"));
        assert!(source.contains("\tprotected $casts = [\n\t\t'active' => 'bool'\n\t];"));
        assert!(source.contains(
            "\tpublic function posts()\n\t{\n\t\treturn $this->hasMany(Post::class);\n\t}"
        ));
        assert!(source.contains(" * @property-read \\Illuminate\\Database\\Eloquent\\Collection|Post[] $posts"));
        assert!(source.contains("\tpublic function getPosts()\n\t{\n\t\treturn $this->getRelationValue('posts');\n\t}"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = GenerationConfig::default();
        let posts = model(&config, "posts");

        let first = Emitter::new("today").render(&posts, template::MODEL);
        let second = Emitter::new("today").render(&posts, template::MODEL);
        assert_eq!(first, second);
    }

    #[test]
    fn test_base_files_import_related_classes() {
        let config = GenerationConfig::from_toml_str(
            "[defaults]\nbase_files = true\nhidden = [\"name\"]\n",
        )
        .unwrap();
        let posts = model(&config, "posts");
        let mut emitter = Emitter::new("today");
        let source = emitter.render(&posts, template::MODEL);

        assert!(source.contains("namespace App\\Models\\Base;"));
        assert!(source.contains(
            "use Illuminate\\Database\\Eloquent\\Model;\nuse App\\Models\\User;\nuse Carbon\\Carbon;\n\n"
        ));
        assert!(source.contains("return $this->belongsTo(User::class);"));
        assert!(source.contains(" * @method $this      setPublishedAt(Carbon $published_at)"));

        let users = model(&config, "users");
        let user_file = emitter.render_user(&users, template::USER_MODEL);
        assert!(user_file.contains("namespace App\\Models;"));
        assert!(user_file.contains("class User extends \\App\\Models\\Base\\User\n{"));
        assert!(user_file.contains("\tprotected $hidden = [\n\t\t'name'\n\t];\n\n\tprotected $fillable"));

        let generated = emitter.render(&users, template::MODEL);
        assert!(!generated.contains("$hidden"));
        assert!(!generated.contains("$fillable"));
    }

    #[test]
    fn test_relation_doc_blocks() {
        let posts = model(&GenerationConfig::default(), "posts");
        let source = Emitter::new("today").render(&posts, template::MODEL);

        assert!(source.contains(
            "\t/**\n\t * @return \\Illuminate\\Database\\Eloquent\\Relations\\BelongsTo\n\t */\n\tpublic function user_id()"
        ));
        assert!(source.contains("\t/**\n\t * @return User\n\t */\n\tpublic function getUserId()"));
        // snake relation name shadows the attribute, so no property line
        assert!(!source.contains("@property-read User $user_id"));
    }

    #[test]
    fn test_date_placeholder() {
        let users = model(&GenerationConfig::default(), "users");
        let source = Emitter::new("Sun, 18 Oct 2026").render(&users, "// {{date}}\n{{class}}");
        assert_eq!(source, "// Sun, 18 Oct 2026\nUser");
    }
}
