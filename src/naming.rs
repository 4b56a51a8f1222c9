//! Identifier naming
//!
//! Derives class names, record names, relation names and get/set accessor
//! names from raw table and column identifiers.
//!
//! Accessor names are `set` + Studly(column) and `get`/`is` + Studly(column).
//! For canonical snake case columns (lowercase words starting with a letter)
//! converting the accessor back with [`to_field_case`] recovers the column.
//! Other spellings lose information in the Studly conversion, so a run keeps
//! an [`AccessorCache`] that remembers every accessor it generated.

use crate::types::SemanticType;
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use std::collections::{BTreeMap, HashMap};

pub const PREFIX_GET: &str = "get";
pub const PREFIX_SET: &str = "set";
pub const PREFIX_IS: &str = "is";

/// Conventional prefix of foreign key columns, dropped from relation names
pub const FK_PREFIX: &str = "fk_";

/// Accessor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Get,
    Set,
}

/// Accessor method name for `column`
///
/// Boolean getters use the `is` prefix.
pub fn accessor_name(column: &str, direction: Direction, ty: &SemanticType) -> String {
    let prefix = match direction {
        Direction::Set => PREFIX_SET,
        Direction::Get if ty.is_boolean() => PREFIX_IS,
        Direction::Get => PREFIX_GET,
    };
    format!("{}{}", prefix, to_method_case(column))
}

/// `snake_case` -> `StudlyCase`
pub fn to_method_case(identifier: &str) -> String {
    identifier.to_upper_camel_case()
}

/// `StudlyCase` / `camelCase` -> `snake_case`
pub fn to_field_case(identifier: &str) -> String {
    identifier.to_snake_case()
}

/// `snake_case` -> `camelCase`
pub fn to_camel_case(identifier: &str) -> String {
    identifier.to_lower_camel_case()
}

/// Split an accessor name into its direction and field name
///
/// Returns `None` when the name does not carry an accessor prefix.
pub fn split_accessor(accessor: &str) -> Option<(Direction, String)> {
    [
        (PREFIX_GET, Direction::Get),
        (PREFIX_SET, Direction::Set),
        (PREFIX_IS, Direction::Get),
    ]
    .into_iter()
    .find_map(|(prefix, direction)| {
        accessor
            .strip_prefix(prefix)
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
            .map(|rest| (direction, to_field_case(rest)))
    })
}

/// Drop the conventional `fk_` prefix from a foreign key column
pub fn strip_fk_prefix(column: &str) -> &str {
    column.strip_prefix(FK_PREFIX).unwrap_or(column)
}

/// Singular form of a snake case identifier (only the last word is inflected)
pub fn singular(identifier: &str) -> String {
    inflect_last_word(identifier, 1)
}

/// Plural form of a snake case identifier (only the last word is inflected)
pub fn plural(identifier: &str) -> String {
    inflect_last_word(identifier, 2)
}

fn inflect_last_word(identifier: &str, count: isize) -> String {
    match identifier.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => {
            format!("{}_{}", head, pluralizer::pluralize(last, count, false))
        }
        _ => pluralizer::pluralize(identifier, count, false),
    }
}

/// Table name with the configured prefix removed
pub fn strip_table_prefix<'a>(table: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return table;
    }
    table.strip_prefix(prefix).unwrap_or(table)
}

/// Class name for a table: `order_items` -> `OrderItem`
pub fn class_name(table: &str, prefix: &str) -> String {
    to_method_case(&singular(&to_field_case(strip_table_prefix(table, prefix))))
}

/// Record name for a table: `order_items` -> `order_item`
pub fn record_name(table: &str, prefix: &str) -> String {
    singular(&to_field_case(strip_table_prefix(table, prefix)))
}

/// Table name the conventions expect for a class: `OrderItem` -> `order_items`
pub fn conventional_table(class_name: &str, prefix: &str) -> String {
    format!("{}{}", prefix, plural(&to_field_case(class_name)))
}

/// Accessor names generated during one run, keyed back to their fields
///
/// Replaces method-name sniffing at runtime: every accessor the generator
/// emits is registered here under its class, so the field behind it can
/// always be recovered. Classes never see each other's accessors.
#[derive(Debug, Default)]
pub struct AccessorCache {
    classes: HashMap<String, BTreeMap<String, String>>,
}

impl AccessorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `accessor` on `class` reads or writes `column`
    ///
    /// The first column registered for an accessor keeps it.
    pub fn record(&mut self, class: &str, accessor: &str, column: &str) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .entry(accessor.to_string())
            .or_insert_with(|| column.to_string());
    }

    /// Field behind an accessor name of `class`
    ///
    /// Accessors recorded for the class map back exactly; any other name
    /// falls back to case conversion.
    pub fn field(&self, class: &str, accessor: &str) -> Option<String> {
        match self.classes.get(class).and_then(|a| a.get(accessor)) {
            Some(field) => Some(field.clone()),
            None => split_accessor(accessor).map(|(_, field)| field),
        }
    }

    /// Every accessor recorded for `class`, by name
    pub fn accessors(&self, class: &str) -> BTreeMap<String, String> {
        self.classes.get(class).cloned().unwrap_or_default()
    }

    /// Number of accessors recorded over all classes
    pub fn len(&self) -> usize {
        self.classes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_prefixes() {
        assert_eq!(
            accessor_name("first_name", Direction::Get, &SemanticType::String),
            "getFirstName"
        );
        assert_eq!(
            accessor_name("first_name", Direction::Set, &SemanticType::String),
            "setFirstName"
        );
        assert_eq!(
            accessor_name("active", Direction::Get, &SemanticType::Boolean),
            "isActive"
        );
        assert_eq!(
            accessor_name("active", Direction::Set, &SemanticType::Boolean),
            "setActive"
        );
    }

    #[test]
    fn test_canonical_snake_case_round_trips() {
        for column in ["id", "user_id", "first_name", "created_at", "address_line"] {
            for ty in [SemanticType::Integer, SemanticType::Boolean] {
                let setter = accessor_name(column, Direction::Set, &ty);
                let (direction, field) = split_accessor(&setter).unwrap();
                assert_eq!(direction, Direction::Set);
                assert_eq!(field, column);

                let getter = accessor_name(column, Direction::Get, &ty);
                assert_eq!(split_accessor(&getter).unwrap().1, column);
            }
        }
    }

    #[test]
    fn test_cache_round_trips_any_identifier() {
        let mut cache = AccessorCache::new();
        for column in ["line_2", "userID", "a__b", "_private", "HTTPStatus", "x9"] {
            let setter = accessor_name(column, Direction::Set, &SemanticType::String);
            cache.record("App\\Models\\Row", &setter, column);
            assert_eq!(
                cache.field("App\\Models\\Row", &setter).as_deref(),
                Some(column),
                "{column}"
            );
        }
        assert_eq!(cache.len(), 6);
        assert_eq!(
            cache.field("App\\Models\\Row", "getUnknownThing").as_deref(),
            Some("unknown_thing")
        );
        assert_eq!(cache.field("App\\Models\\Row", "render"), None);
    }

    #[test]
    fn test_cache_is_scoped_by_class() {
        let mut cache = AccessorCache::new();
        cache.record("App\\Models\\Account", "getUserId", "userID");
        cache.record("App\\Models\\Post", "getUserId", "user_id");

        assert_eq!(
            cache.field("App\\Models\\Account", "getUserId").as_deref(),
            Some("userID")
        );
        assert_eq!(
            cache.field("App\\Models\\Post", "getUserId").as_deref(),
            Some("user_id")
        );
        assert_eq!(cache.accessors("App\\Models\\Post").len(), 1);
        assert!(cache.accessors("App\\Models\\Comment").is_empty());
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_method_case("order_item"), "OrderItem");
        assert_eq!(to_field_case("OrderItem"), "order_item");
        assert_eq!(to_field_case("orderItem"), "order_item");
        assert_eq!(to_camel_case("user_id"), "userId");
    }

    #[test]
    fn test_fk_prefix() {
        assert_eq!(strip_fk_prefix("fk_author"), "author");
        assert_eq!(strip_fk_prefix("user_id"), "user_id");
    }

    #[test]
    fn test_inflection() {
        assert_eq!(singular("users"), "user");
        assert_eq!(plural("user"), "users");
        assert_eq!(singular("order_items"), "order_item");
        assert_eq!(plural("order_item"), "order_items");
        assert_eq!(plural("category"), "categories");
    }

    #[test]
    fn test_class_and_record_names() {
        assert_eq!(class_name("users", ""), "User");
        assert_eq!(class_name("order_items", ""), "OrderItem");
        assert_eq!(class_name("wp_posts", "wp_"), "Post");
        assert_eq!(record_name("order_items", ""), "order_item");
        assert_eq!(conventional_table("OrderItem", ""), "order_items");
        assert_eq!(conventional_table("Post", "wp_"), "wp_posts");
    }
}
