//! Template texts and placeholder substitution

use crate::config::ResolvedOptions;
use crate::error::{CoderError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Default template of generated model classes
pub const MODEL: &str = include_str!("../../templates/model");

/// Default template of user model classes
pub const USER_MODEL: &str = include_str!("../../templates/user_model");

/// Which of the two templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Model,
    UserModel,
}

/// Template texts used during one run
///
/// Overrides are read from disk the first time a table asks for them.
#[derive(Debug, Default)]
pub struct Templates {
    loaded: HashMap<PathBuf, String>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template text in effect for a table
    pub fn get(&mut self, kind: TemplateKind, options: &ResolvedOptions) -> Result<String> {
        let (custom, default) = match kind {
            TemplateKind::Model => (&options.template_model, MODEL),
            TemplateKind::UserModel => (&options.template_user_model, USER_MODEL),
        };

        match custom {
            Some(path) => self.load(path),
            None => Ok(default.to_string()),
        }
    }

    fn load(&mut self, path: &Path) -> Result<String> {
        if let Some(text) = self.loaded.get(path) {
            return Ok(text.clone());
        }

        let text = fs::read_to_string(path).map_err(|source| CoderError::TemplateUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded template {}", path.display());
        self.loaded.insert(path.to_path_buf(), text.clone());
        Ok(text)
    }
}

/// Replace every `{{name}}` placeholder with its value in one pass
///
/// Substituted text is never scanned again and unknown placeholders are
/// left untouched, so the result only depends on the template and values.
pub fn fill(template: &str, values: &BTreeMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => match values.get(&after[..end]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            },
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
