//! column-comment CLI
//!
//! Command-line tool for generating column comment statements.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use column_comment_core::{CollectingSink, DiagnosticSink, Severity, TracingSink};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use column_comment_gen::prelude::*;

/// Generates ALTER TABLE ... COMMENT statements from documented models.
#[derive(Parser)]
#[command(name = "column-comment")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model manifest (JSON).
    #[arg(short, long, env = "COLUMN_COMMENT_MANIFEST", global = true)]
    manifest: Option<PathBuf>,

    /// Lengths in the manifest come from a source whose default is 255.
    #[arg(long, global = true)]
    legacy_lengths: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate statements and write them out.
    Generate {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
        format: OutputFormat,

        /// Output file (stdout if not specified).
        #[arg(short, long, env = "COLUMN_COMMENT_OUT")]
        out: Option<PathBuf>,

        /// Target servers running with NO_BACKSLASH_ESCAPES.
        #[arg(long)]
        no_backslash_escapes: bool,

        /// Exit with an error if any field was dropped.
        #[arg(long)]
        strict: bool,
    },

    /// Report unsupported types and ambiguous lengths without writing output.
    Check,
}

/// Forwards to `tracing` and keeps a copy for the exit status.
struct Diagnostics {
    collected: CollectingSink,
}

impl DiagnosticSink for Diagnostics {
    fn report(&self, diagnostic: column_comment_core::Diagnostic) {
        TracingSink.report(diagnostic.clone());
        self.collected.report(diagnostic);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(manifest_path) = cli.manifest else {
        anyhow::bail!("no manifest given; pass --manifest or set COLUMN_COMMENT_MANIFEST");
    };
    let manifest = Manifest::load(&manifest_path)?;
    let sink = Diagnostics {
        collected: CollectingSink::new(),
    };

    match cli.command {
        Commands::Generate {
            format,
            out,
            no_backslash_escapes,
            strict,
        } => {
            let options = GenerateOptions {
                legacy_lengths: cli.legacy_lengths,
                no_backslash_escapes,
            };
            let tables = generate(&manifest, options, &sink)?;
            write_output(out.as_deref(), &render(&tables, format))?;

            let dropped = sink.collected.count(Severity::Error);
            if strict && dropped > 0 {
                return Err(GenError::FieldsDropped(dropped).into());
            }
        }

        Commands::Check => {
            let options = GenerateOptions {
                legacy_lengths: cli.legacy_lengths,
                ..GenerateOptions::default()
            };
            let tables = generate(&manifest, options, &sink)?;
            let errors = sink.collected.count(Severity::Error);
            let warnings = sink.collected.count(Severity::Warning);
            info!(
                "{} table(s) checked: {} error(s), {} warning(s)",
                tables.len(),
                errors,
                warnings
            );
            if errors > 0 {
                return Err(GenError::FieldsDropped(errors).into());
            }
        }
    }

    Ok(())
}
