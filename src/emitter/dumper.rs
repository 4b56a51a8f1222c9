//! Literal values as source text
//!
//! Strings are single quoted, arrays use the short `[...]` syntax with one
//! element per line, nested one tab deeper than their owner.

/// A value written as a literal into generated code
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<&[String]> for Value {
    fn from(values: &[String]) -> Self {
        Value::List(values.iter().cloned().map(Value::Str).collect())
    }
}

impl From<&[(String, String)]> for Value {
    fn from(pairs: &[(String, String)]) -> Self {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.clone(), Value::Str(v.clone())))
                .collect(),
        )
    }
}

/// Quote a string literal
pub fn export_str(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Export a value for use inside a class body (two tabs deep)
pub fn export(value: &Value) -> String {
    export_at(value, 2)
}

fn export_at(value: &Value, tabs: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Str(s) => export_str(s),
        Value::List(items) => array(
            items.iter().map(|item| export_at(item, tabs + 1)),
            tabs,
        ),
        Value::Map(entries) => array(
            entries
                .iter()
                .map(|(key, item)| format!("{} => {}", export_str(key), export_at(item, tabs + 1))),
            tabs,
        ),
    }
}

fn array(items: impl Iterator<Item = String>, tabs: usize) -> String {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        return "[]".to_string();
    }
    let indent = "\t".repeat(tabs);
    let closing = "\t".repeat(tabs.saturating_sub(1));
    format!(
        "[\n{indent}{}\n{closing}]",
        items.join(&format!(",\n{indent}"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(export(&Value::Null), "null");
        assert_eq!(export(&false.into()), "false");
        assert_eq!(export(&25u32.into()), "25");
        assert_eq!(export(&"users".into()), "'users'");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(export_str("it's"), "'it\\'s'");
        assert_eq!(export_str("App\\Models"), "'App\\\\Models'");
    }

    #[test]
    fn test_arrays() {
        let list = Value::from(&["email".to_string(), "name".to_string()][..]);
        assert_eq!(export(&list), "[\n\t\t'email',\n\t\t'name'\n\t]");

        let map = Value::from(&[("active".to_string(), "bool".to_string())][..]);
        assert_eq!(export(&map), "[\n\t\t'active' => 'bool'\n\t]");

        assert_eq!(export(&Value::List(vec![])), "[]");
    }
}
