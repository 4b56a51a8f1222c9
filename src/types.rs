//! Native column type mapping
//!
//! Translates a database storage type into the scalar category generated
//! accessors are typed with.

use serde::Serialize;
use std::fmt;

/// Scalar category of a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SemanticType {
    Integer,
    Boolean,
    String,
    Temporal,
    /// Unrecognized native type, kept verbatim
    Unknown(std::string::String),
}

impl SemanticType {
    pub fn is_boolean(&self) -> bool {
        matches!(self, SemanticType::Boolean)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::Temporal)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Integer => f.write_str("integer"),
            SemanticType::Boolean => f.write_str("boolean"),
            SemanticType::String => f.write_str("string"),
            SemanticType::Temporal => f.write_str("temporal"),
            SemanticType::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Map a native type such as `int(10) unsigned` to its [`SemanticType`]
///
/// Length/precision suffixes and trailing modifiers are ignored and the
/// match is case-insensitive. Every input maps to some category.
pub fn map_native_type(raw: &str) -> SemanticType {
    let base = base_type(raw);

    match base.as_str() {
        "smallint" | "mediumint" | "int" | "integer" | "bigint" | "float" | "double"
        | "decimal" | "year" => SemanticType::Integer,
        "bit" | "tinyint" => SemanticType::Boolean,
        "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "binary"
        | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "enum" => {
            SemanticType::String
        }
        "date" | "datetime" | "time" | "timestamp" => SemanticType::Temporal,
        _ => SemanticType::Unknown(raw.to_string()),
    }
}

/// Lowercased type name without `(..)` arguments or modifiers
fn base_type(raw: &str) -> String {
    let head = match raw.find('(') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    head.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
