//! Foreign key constraint metadata

use crate::schema::TableName;

/// An outgoing foreign key declared by a table
///
/// `columns` are the local (referencing) columns and `references` the
/// referenced columns on `on`, pairwise in declaration order. More than one
/// pair makes the constraint composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub references: Vec<String>,
    pub on: TableName,
}

impl ForeignKey {
    pub fn new<C, R>(columns: C, on: TableName, references: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            references: references.into_iter().map(Into::into).collect(),
            on,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.references.len() > 1
    }

    /// First local column, which drives relation naming
    pub fn column(&self) -> &str {
        self.columns.first().map(String::as_str).unwrap_or_default()
    }

    /// First referenced column
    pub fn reference(&self) -> &str {
        self.references.first().map(String::as_str).unwrap_or_default()
    }

    /// `(local, referenced)` column pairs in declaration order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.references.iter().map(String::as_str))
    }

    pub fn is_self_referencing(&self, owner: &TableName) -> bool {
        &self.on == owner
    }
}
