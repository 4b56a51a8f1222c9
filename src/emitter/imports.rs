//! Cross-namespace class references
//!
//! Each generated class keeps its own set of `use` statements. A referenced
//! class in another namespace is imported and written by its short name,
//! unless that short name is already taken in the file (the class itself,
//! its parent or another import), in which case it is written fully
//! qualified instead.

use crate::model::ClassRef;
use std::collections::{BTreeMap, BTreeSet};

/// Imports collected during one run, keyed by the importing class
#[derive(Debug, Default)]
pub struct ImportRegistry {
    imports: BTreeMap<String, BTreeSet<String>>,
}

/// The class a reference is written from
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub class: &'a ClassRef,
    pub parent: &'a ClassRef,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// How `target` is spelled inside `scope`, importing it when needed
    pub fn reference(&mut self, scope: Scope<'_>, target: &ClassRef) -> String {
        if target.namespace == scope.class.namespace {
            return target.name.clone();
        }

        let imports = self.imports.entry(scope.class.qualified()).or_default();
        let qualified = target.qualified();
        if imports.contains(&qualified) {
            return target.name.clone();
        }

        let clashes = target.name == scope.class.name
            || (target.name == scope.parent.name && *target != *scope.parent)
            || imports
                .iter()
                .any(|import| short_name(import) == target.name);
        if clashes {
            return target.absolute();
        }

        imports.insert(qualified);
        target.name.clone()
    }

    /// Import `class` into `scope` without writing a reference
    pub fn import(&mut self, scope: Scope<'_>, class: &ClassRef) {
        self.reference(scope, class);
    }

    pub fn imports(&self, class: &ClassRef) -> impl Iterator<Item = &str> {
        self.imports
            .get(&class.qualified())
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// `use` statements of `class`, one per line, sorted
    pub fn render(&self, class: &ClassRef) -> String {
        self.imports(class)
            .map(|import| format!("use {import};\n"))
            .collect()
    }
}

fn short_name(qualified: &str) -> &str {
    qualified.rsplit('\\').next().unwrap_or(qualified)
}
