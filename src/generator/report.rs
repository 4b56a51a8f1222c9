//! Run reports

use crate::generator::filter::Verdict;
use crate::model::{ClassRef, Diagnostic};
use crate::schema::TableName;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to the user file of a base-file model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum UserFile {
    Created(PathBuf),
    /// Already present, left untouched
    Skipped(PathBuf),
}

impl UserFile {
    pub fn path(&self) -> &PathBuf {
        match self {
            UserFile::Created(path) | UserFile::Skipped(path) => path,
        }
    }
}

/// Outcome for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TableReport {
    Generated {
        table: TableName,
        class: ClassRef,
        path: PathBuf,
        user_file: Option<UserFile>,
        diagnostics: Vec<Diagnostic>,
    },
    Filtered {
        table: TableName,
        verdict: Verdict,
    },
}

impl TableReport {
    pub fn table(&self) -> &TableName {
        match self {
            TableReport::Generated { table, .. } | TableReport::Filtered { table, .. } => table,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, TableReport::Generated { .. })
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
}

impl RunReport {
    pub fn push(&mut self, report: TableReport) {
        self.tables.push(report);
    }

    /// Generated model files
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.tables.iter().filter_map(|t| match t {
            TableReport::Generated { path, .. } => Some(path),
            TableReport::Filtered { .. } => None,
        })
    }

    pub fn user_files(&self) -> impl Iterator<Item = &UserFile> {
        self.tables.iter().filter_map(|t| match t {
            TableReport::Generated { user_file, .. } => user_file.as_ref(),
            TableReport::Filtered { .. } => None,
        })
    }

    pub fn filtered(&self) -> impl Iterator<Item = &TableName> {
        self.tables.iter().filter_map(|t| match t {
            TableReport::Filtered { table, .. } => Some(table),
            TableReport::Generated { .. } => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (&TableName, &Diagnostic)> {
        self.tables.iter().flat_map(|t| match t {
            TableReport::Generated {
                table, diagnostics, ..
            } => diagnostics.iter().map(move |d| (table, d)).collect::<Vec<_>>(),
            TableReport::Filtered { .. } => Vec::new(),
        })
    }

    pub fn generated_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_generated()).count()
    }
}
