//! Per-table generation progress

use crate::schema::TableName;
use serde::Serialize;
use std::fmt;

/// Stage a table has reached within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerationState {
    Idle,
    SchemaLoaded,
    TableFiltered,
    ModelAssembled,
    Emitted,
    UserFileChecked,
    Done,
}

impl GenerationState {
    /// Whether `next` directly follows `self`
    ///
    /// Filtered-out tables go from `TableFiltered` straight to `Done`, and
    /// only base-file models pass through `UserFileChecked`.
    pub fn can_advance_to(self, next: GenerationState) -> bool {
        use GenerationState::*;
        matches!(
            (self, next),
            (Idle, SchemaLoaded)
                | (SchemaLoaded, TableFiltered)
                | (TableFiltered, ModelAssembled)
                | (TableFiltered, Done)
                | (ModelAssembled, Emitted)
                | (Emitted, UserFileChecked)
                | (Emitted, Done)
                | (UserFileChecked, Done)
        )
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks one table through the pipeline
#[derive(Debug)]
pub struct TableProgress {
    table: TableName,
    state: GenerationState,
}

impl TableProgress {
    /// Start tracking a table of an already loaded schema
    pub fn start(table: &TableName) -> Self {
        Self {
            table: table.clone(),
            state: GenerationState::SchemaLoaded,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn advance(&mut self, next: GenerationState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "{}: {} -> {}",
            self.table,
            self.state,
            next
        );
        log::trace!("{}: {} -> {}", self.table, self.state, next);
        self.state = next;
    }

    pub fn is_done(&self) -> bool {
        self.state == GenerationState::Done
    }
}
