//! Class member snippets

use crate::emitter::dumper::{self, Value};

/// Options for a field declaration
#[derive(Debug, Clone, Copy)]
pub struct FieldOptions<'a> {
    pub visibility: &'a str,
    /// Text written before the declaration, usually a blank line
    pub before: &'a str,
}

impl Default for FieldOptions<'_> {
    fn default() -> Self {
        Self {
            visibility: "protected",
            before: "",
        }
    }
}

impl<'a> FieldOptions<'a> {
    pub fn visibility(visibility: &'a str) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn spaced() -> Self {
        Self {
            before: "\n",
            ..Self::default()
        }
    }
}

/// ` * @name value` doc block line, preceded by a newline
pub fn annotation(name: &str, value: &str) -> String {
    format!("\n * @{name} {value}")
}

pub fn constant(name: &str, value: &Value) -> String {
    format!("\tconst {} = {};\n", name, dumper::export(value))
}

pub fn field(name: &str, value: &Value, options: FieldOptions<'_>) -> String {
    format!(
        "{}\t{} ${} = {};\n",
        options.before,
        options.visibility,
        name,
        dumper::export(value)
    )
}

/// Public method without parameters
pub fn method(name: &str, body: &str) -> String {
    format!("\n\tpublic function {name}()\n\t{{\n\t\t{body}\n\t}}\n")
}

/// Trait use statement; `class` is fully qualified
pub fn mixin(class: &str) -> String {
    format!("\tuse \\{};\n", class.trim_start_matches('\\'))
}

/// Doc block declaring the return type of the method that follows
pub fn doc_return(class: &str) -> String {
    format!("\n\t/**\n\t * @return {class}\n\t */")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members() {
        assert_eq!(annotation("property", "int $id"), "\n * @property int $id");
        assert_eq!(
            constant("CREATED_AT", &"created".into()),
            "\tconst CREATED_AT = 'created';\n"
        );
        assert_eq!(
            field("table", &"person".into(), FieldOptions::default()),
            "\tprotected $table = 'person';\n"
        );
        assert_eq!(
            field("incrementing", &false.into(), FieldOptions::visibility("public")),
            "\tpublic $incrementing = false;\n"
        );
        assert_eq!(
            mixin("Illuminate\\Database\\Eloquent\\SoftDeletes"),
            "\tuse \\Illuminate\\Database\\Eloquent\\SoftDeletes;\n"
        );
    }

    #[test]
    fn test_method() {
        assert_eq!(
            method("user", "return $this->belongsTo(User::class);"),
            "\n\tpublic function user()\n\t{\n\t\treturn $this->belongsTo(User::class);\n\t}\n"
        );
    }

    #[test]
    fn test_spaced_field() {
        let list = Value::List(vec!["email".into()]);
        assert_eq!(
            field("fillable", &list, FieldOptions::spaced()),
            "\n\tprotected $fillable = [\n\t\t'email'\n\t];\n"
        );
    }
}
