//! Glob-style name patterns
//!
//! `*` matches any run of characters, everything else matches literally.
//! Table patterns are tried against both the qualified `schema.table`
//! identifier and the bare table name.

use crate::error::{CoderError, Result};
use crate::schema::TableName;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct Patterns {
    compiled: Vec<Regex>,
}

impl Patterns {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|pattern| compile(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(name))
    }

    pub fn matches_table(&self, table: &TableName) -> bool {
        self.matches(&table.qualified()) || self.matches(&table.table)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{body}$")).map_err(|source| CoderError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Inclusion decision for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Include,
    /// Matched an `except` pattern
    Excluded,
    /// `only` patterns are configured and none matched
    NotSelected,
}

impl Verdict {
    pub fn is_included(&self) -> bool {
        matches!(self, Verdict::Include)
    }
}

/// Decide whether `table` is generated under the given `except` and `only` lists
pub fn verdict<S: AsRef<str>>(table: &TableName, except: &[S], only: &[S]) -> Result<Verdict> {
    if Patterns::new(except)?.matches_table(table) {
        return Ok(Verdict::Excluded);
    }

    let only = Patterns::new(only)?;
    if !only.is_empty() && !only.matches_table(table) {
        return Ok(Verdict::NotSelected);
    }

    Ok(Verdict::Include)
}
