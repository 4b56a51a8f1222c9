//! Generation orchestrator
//!
//! Loads a schema through a [`SchemaSource`], then assembles and emits one
//! model per table, strictly in sequence. In base-file mode each model also
//! gets a user file, written once and never overwritten.

pub mod filter;
pub mod report;
pub mod state;

pub use filter::{verdict, Patterns, Verdict};
pub use report::{RunReport, TableReport, UserFile};
pub use state::{GenerationState, TableProgress};

use crate::config::{GenerationConfig, ResolvedOptions};
use crate::emitter::{Emitter, TemplateKind, Templates};
use crate::error::{CoderError, Result};
use crate::model::{Assembler, ModelDescriptor, Mutator};
use crate::naming::AccessorCache;
use crate::schema::{Blueprint, Catalog, SchemaSource, TableName};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory base classes are written to, below the configured path
pub const BASE_DIRECTORY: &str = "Base";

/// State scoped to one `map`/`create` call
struct Run {
    emitter: Emitter,
    cache: AccessorCache,
    templates: Templates,
}

pub struct Generator<'s> {
    source: &'s dyn SchemaSource,
    config: GenerationConfig,
    catalog: Catalog,
    mutators: Vec<Box<dyn Mutator>>,
    date: String,
}

impl<'s> Generator<'s> {
    pub fn new(source: &'s dyn SchemaSource, config: GenerationConfig) -> Self {
        Self {
            source,
            config,
            catalog: Catalog::new(),
            mutators: Vec::new(),
            date: chrono::Local::now().to_rfc2822(),
        }
    }

    /// Fix the text substituted for `{{date}}`
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Register a mutator applied to every model generated afterwards
    pub fn mutate(&mut self, mutator: impl Mutator + 'static) -> &mut Self {
        self.mutators.push(Box::new(mutator));
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generate every table of `schema` that passes the `except`/`only` filters
    pub fn map(&mut self, schema: &str) -> Result<RunReport> {
        self.load(schema)?;

        let mut run = self.run();
        let mut report = RunReport::default();
        for blueprint in self.catalog.tables(schema) {
            let mut progress = TableProgress::start(blueprint.name());
            let options = self.config.resolve(blueprint.name());
            let verdict = verdict(blueprint.name(), &options.except, &options.only)
                .map_err(|e| e.in_table(blueprint.name()))?;
            progress.advance(GenerationState::TableFiltered);

            if !verdict.is_included() {
                log::info!("Skipping {} ({:?})", blueprint.name(), verdict);
                progress.advance(GenerationState::Done);
                report.push(TableReport::Filtered {
                    table: blueprint.name().clone(),
                    verdict,
                });
                continue;
            }

            let table = self
                .generate(&mut run, blueprint, &options, &mut progress)
                .map_err(|e| e.in_table(blueprint.name()))?;
            report.push(table);
        }

        log::info!(
            "Generated {} of {} tables in schema '{}'",
            report.generated_count(),
            report.tables.len(),
            schema
        );
        Ok(report)
    }

    /// Generate a single table, regardless of the `except`/`only` filters
    pub fn create(&mut self, schema: &str, table: &str) -> Result<TableReport> {
        self.load(schema)?;

        let name = TableName::new(schema, table);
        let blueprint = self
            .catalog
            .table(&name)
            .ok_or_else(|| CoderError::UnknownTable(name.clone()))?;

        let mut run = self.run();
        let mut progress = TableProgress::start(&name);
        progress.advance(GenerationState::TableFiltered);
        let options = self.config.resolve(&name);
        self.generate(&mut run, blueprint, &options, &mut progress)
            .map_err(|e| e.in_table(&name))
    }

    /// Assemble the models of `schema` without writing anything
    pub fn inspect(&mut self, schema: &str) -> Result<Vec<ModelDescriptor>> {
        self.load(schema)?;

        let mut cache = AccessorCache::new();
        let assembler = self.assembler();
        let mut models = Vec::new();
        for blueprint in self.catalog.tables(schema) {
            let options = self.config.resolve(blueprint.name());
            let verdict = verdict(blueprint.name(), &options.except, &options.only)?;
            if verdict.is_included() {
                let model = assembler
                    .assemble(blueprint, &mut cache)
                    .map_err(|e| e.in_table(blueprint.name()))?;
                models.push(model);
            }
        }
        Ok(models)
    }

    fn load(&mut self, schema: &str) -> Result<()> {
        if !self.catalog.has_schema(schema) {
            if !self.source.has_schema(schema)? {
                return Err(CoderError::UnknownSchema(schema.to_string()));
            }
            self.catalog.load_schema(self.source, schema)?;
        }
        self.catalog.load_referenced(self.source, schema)
    }

    fn run(&self) -> Run {
        Run {
            emitter: Emitter::new(self.date.clone()),
            cache: AccessorCache::new(),
            templates: Templates::new(),
        }
    }

    fn assembler(&self) -> Assembler<'_> {
        Assembler::new(&self.catalog, &self.config, self.source.connection_name())
            .with_mutators(&self.mutators)
    }

    fn generate(
        &self,
        run: &mut Run,
        blueprint: &Blueprint,
        options: &ResolvedOptions,
        progress: &mut TableProgress,
    ) -> Result<TableReport> {
        let model = self.assembler().assemble(blueprint, &mut run.cache)?;
        for diagnostic in &model.diagnostics {
            log::warn!("{}: {}", blueprint.name(), diagnostic);
        }
        progress.advance(GenerationState::ModelAssembled);

        let template = run.templates.get(TemplateKind::Model, options)?;
        let text = run.emitter.render(&model, &template);
        let directory = if model.base_files {
            options.path.join(BASE_DIRECTORY)
        } else {
            options.path.clone()
        };
        let path = file_path(&directory, &model.class.name, &options.extension);
        ensure_directory(&directory)?;
        fs::write(&path, text).map_err(|e| CoderError::io(&path, e))?;
        log::info!("Wrote {}", path.display());
        progress.advance(GenerationState::Emitted);

        let user_file = if model.base_files {
            let template = run.templates.get(TemplateKind::UserModel, options)?;
            let path = file_path(&options.path, &model.user_class.name, &options.extension);
            let status = write_user_file(&path, &run.emitter.render_user(&model, &template))?;
            progress.advance(GenerationState::UserFileChecked);
            Some(status)
        } else {
            None
        };
        progress.advance(GenerationState::Done);

        Ok(TableReport::Generated {
            table: blueprint.name().clone(),
            class: model.user_class,
            path,
            user_file,
            diagnostics: model.diagnostics,
        })
    }
}

fn file_path(directory: &Path, class: &str, extension: &str) -> PathBuf {
    directory.join(format!("{class}.{extension}"))
}

fn ensure_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory).map_err(|source| CoderError::OutputDirectory {
        path: directory.to_path_buf(),
        source,
    })
}

/// Write a user file unless one already exists
///
/// Creation and the existence check are a single exclusive open, so an
/// existing file is never truncated.
fn write_user_file(path: &Path, text: &str) -> Result<UserFile> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(text.as_bytes())
                .map_err(|e| CoderError::io(path, e))?;
            log::info!("Created user file {}", path.display());
            Ok(UserFile::Created(path.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::debug!("Keeping existing user file {}", path.display());
            Ok(UserFile::Skipped(path.to_path_buf()))
        }
        Err(e) => Err(CoderError::io(path, e)),
    }
}
