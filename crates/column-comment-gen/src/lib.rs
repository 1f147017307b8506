//! Column comment generation from model manifests.
//!
//! `column-comment-gen` loads a JSON [`Manifest`](manifest::Manifest)
//! describing documented model fields, runs it through the core
//! [`Generator`] and writes the resulting `ALTER TABLE ... COMMENT`
//! statements as a SQL script or a Rust module.
//!
//! # CLI Usage
//!
//! ```bash
//! # Write a SQL script
//! column-comment generate --manifest models.json --out comments.sql
//!
//! # Write a Rust module of constants
//! column-comment generate --manifest models.json --format rust --out src/comments.rs
//!
//! # Only report unsupported types and ambiguous lengths
//! column-comment check --manifest models.json
//! ```

pub mod emit;
pub mod error;
pub mod manifest;

use column_comment_core::{DiagnosticSink, Generator, MySqlDialect};
use tracing::info;

use crate::emit::GeneratedTable;
use crate::error::Result;
use crate::manifest::Manifest;

/// Options for a generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Treat manifest lengths as coming from a source with a 255 default.
    pub legacy_lengths: bool,
    /// Target servers running with `NO_BACKSLASH_ESCAPES`.
    pub no_backslash_escapes: bool,
}

/// Runs a whole manifest through the generator.
///
/// Tables with no generated statement are left out. Problems with single
/// fields go to `sink` and never fail the pass.
///
/// # Errors
///
/// Returns an error if the manifest is invalid.
pub fn generate(
    manifest: &Manifest,
    options: GenerateOptions,
    sink: &impl DiagnosticSink,
) -> Result<Vec<GeneratedTable>> {
    manifest.validate()?;

    let mut manifest = manifest.clone();
    manifest.legacy_lengths |= options.legacy_lengths;

    let dialect = if options.no_backslash_escapes {
        MySqlDialect::no_backslash_escapes()
    } else {
        MySqlDialect::new()
    };
    let generator = Generator::new(dialect);

    let generated: Vec<GeneratedTable> = manifest
        .source_tables()
        .into_iter()
        .filter_map(|source| {
            generator
                .process_table(&source.table, &source.fields, sink)
                .map(|comments| GeneratedTable {
                    type_name: source.type_name,
                    comments,
                })
        })
        .collect();

    info!(
        "Generated {} statement(s) for {} table(s)",
        generated.iter().map(|t| t.comments.len()).sum::<usize>(),
        generated.len()
    );
    Ok(generated)
}

/// Commonly used items.
pub mod prelude {
    pub use crate::emit::{GeneratedTable, OutputFormat, render, write_output};
    pub use crate::error::{GenError, Result};
    pub use crate::manifest::{Manifest, ManifestField, ManifestTable};
    pub use crate::{GenerateOptions, generate};
}
