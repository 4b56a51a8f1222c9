//! schemacoder CLI
//!
//! Generates model classes from a schema snapshot, or prints the assembled
//! model descriptors as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use schemacoder::{
    GenerationConfig, Generator, RunReport, SnapshotSource, TableReport, UserFile,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "schemacoder")]
#[command(about = "Generate model classes from database schema metadata")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); SCHEMACODER__* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write model files for a schema (or one table of it)
    Generate {
        /// Schema snapshot (TOML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Schema to generate
        #[arg(short, long)]
        schema: String,

        /// Generate only this table, ignoring the except/only filters
        #[arg(short, long)]
        table: Option<String>,

        /// Text substituted for {{date}} (defaults to the current time)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the assembled models of a schema as JSON, writing nothing
    Inspect {
        /// Schema snapshot (TOML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Schema to inspect
        #[arg(short, long)]
        schema: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = GenerationConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            input,
            schema,
            table,
            date,
        } => generate(&input, &schema, table.as_deref(), date, config, cli.quiet),
        Commands::Inspect { input, schema } => inspect(&input, &schema, config),
    }
}

fn load_source(input: &Path) -> anyhow::Result<SnapshotSource> {
    SnapshotSource::from_file(input)
        .with_context(|| format!("failed to read schema snapshot {}", input.display()))
}

fn generate(
    input: &Path,
    schema: &str,
    table: Option<&str>,
    date: Option<String>,
    config: GenerationConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let source = load_source(input)?;
    let mut generator = Generator::new(&source, config);
    if let Some(date) = date {
        generator = generator.with_date(date);
    }

    let report = match table {
        Some(table) => {
            let mut report = RunReport::default();
            report.push(generator.create(schema, table)?);
            report
        }
        None => generator.map(schema)?,
    };

    if !quiet {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    for table in &report.tables {
        match table {
            TableReport::Generated {
                path,
                user_file,
                diagnostics,
                ..
            } => {
                println!("{} {}", "✅ Generated:".green(), path.display());
                match user_file {
                    Some(UserFile::Created(path)) => {
                        println!("   {} {}", "created".green(), path.display())
                    }
                    Some(UserFile::Skipped(path)) => {
                        println!("   {} {}", "kept (exists)".yellow(), path.display())
                    }
                    None => {}
                }
                for diagnostic in diagnostics {
                    println!("   {} {}", "⚠️ ".yellow(), diagnostic);
                }
            }
            TableReport::Filtered { table, verdict } => {
                println!("{} {} ({:?})", "⏭️  Skipped:".dimmed(), table, verdict);
            }
        }
    }

    let generated = report.generated_count();
    println!(
        "{}",
        format!(
            "✨ Generated {} model{}",
            generated,
            if generated == 1 { "" } else { "s" }
        )
        .bold()
    );
}

#[derive(Serialize)]
struct Inspection<'a> {
    schema: &'a str,
    models: Vec<schemacoder::ModelDescriptor>,
}

fn inspect(input: &Path, schema: &str, config: GenerationConfig) -> anyhow::Result<()> {
    let source = load_source(input)?;
    let models = Generator::new(&source, config).inspect(schema)?;

    let json = serde_json::to_string_pretty(&Inspection { schema, models })?;
    println!("{json}");
    Ok(())
}
