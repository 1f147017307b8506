//! Generation pass.
//!
//! Runs every documented field of every table through type resolution,
//! length resolution and rendering. Fields fail in isolation: an
//! unsupported type produces an error diagnostic and the pass moves on.

use std::collections::HashMap;

use tracing::debug;

use crate::case::comment_ident;
use crate::column_type::ColumnType;
use crate::dialect::{Dialect, MySqlDialect};
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::Result;
use crate::field::{FieldDescriptor, TableDescriptor};
use crate::length::{LEGACY_DEFAULT_LENGTH, ResolvedLength, resolve_length};
use crate::mapper::resolve;
use crate::schema::CommentSource;
use crate::statement::CommentStatement;

/// A rendered statement for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    /// Field name as declared.
    pub field: String,
    /// Constant-style identifier derived from the comment text.
    pub label: String,
    /// The statement.
    pub statement: CommentStatement,
    /// The statement rendered for the generator's dialect.
    pub sql: String,
}

impl CommentEntry {
    /// Returns the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.statement.column
    }

    /// Returns the comment text.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.statement.comment
    }
}

/// All statements generated for one table, in field order.
///
/// Entries are unique per column. Comment text is only a label and may
/// repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableComments {
    /// The table.
    pub table: TableDescriptor,
    entries: Vec<CommentEntry>,
}

impl TableComments {
    /// Returns the entries in field order.
    #[must_use]
    pub fn entries(&self) -> &[CommentEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CommentEntry> {
        self.entries.iter().find(|e| e.column() == column)
    }

    /// Finds the first entry carrying `comment`.
    #[must_use]
    pub fn by_comment(&self, comment: &str) -> Option<&CommentEntry> {
        self.entries.iter().find(|e| e.comment() == comment)
    }

    /// Returns the rendered statements keyed by column name.
    #[must_use]
    pub fn statements(&self) -> HashMap<&str, &str> {
        self.entries
            .iter()
            .map(|e| (e.column(), e.sql.as_str()))
            .collect()
    }
}

/// Drives a generation pass.
#[derive(Debug, Clone, Default)]
pub struct Generator<D: Dialect = MySqlDialect> {
    dialect: D,
}

impl Generator<MySqlDialect> {
    /// Creates a generator for the default MySQL dialect.
    #[must_use]
    pub const fn mysql() -> Self {
        Self {
            dialect: MySqlDialect::new(),
        }
    }
}

impl<D: Dialect> Generator<D> {
    /// Creates a generator for `dialect`.
    #[must_use]
    pub const fn new(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Resolves a field to its statement without rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the field type cannot be mapped.
    pub fn resolve_field(
        &self,
        table: &TableDescriptor,
        field: &FieldDescriptor,
    ) -> Result<(CommentStatement, ResolvedLength)> {
        let column_type = resolve(&field.declared_type, field.hints)?;
        let length = resolve_length(column_type, field.length);
        let statement = CommentStatement {
            table: table.name.clone(),
            column: field.column(),
            column_type,
            nullable: field.nullable,
            length: length.length,
            comment: field.comment.clone(),
        };
        Ok((statement, length))
    }

    /// Processes one field, reporting problems to `sink`.
    ///
    /// Returns `None` if the field was skipped.
    pub fn process_field(
        &self,
        table: &TableDescriptor,
        field: &FieldDescriptor,
        sink: &impl DiagnosticSink,
    ) -> Option<CommentEntry> {
        if !field.has_comment() {
            return None;
        }

        let (statement, length) = match self.resolve_field(table, field) {
            Ok(resolved) => resolved,
            Err(e) => {
                sink.report(Diagnostic::error(
                    DiagnosticKind::UnsupportedType,
                    &table.name,
                    &field.name,
                    e.to_string(),
                ));
                return None;
            }
        };

        if length.sentinel_substituted {
            sink.report(Diagnostic::warning(
                DiagnosticKind::AmbiguousLength,
                &table.name,
                &field.name,
                ambiguous_length_message(statement.column_type, length.length),
            ));
        }

        let sql = statement.to_sql(&self.dialect);
        debug!(table = %table.name, column = %statement.column, "{sql}");

        Some(CommentEntry {
            field: field.name.clone(),
            label: comment_ident(&statement.comment),
            statement,
            sql,
        })
    }

    /// Processes every field of a table.
    ///
    /// Returns `None` when no field produced a statement.
    pub fn process_table(
        &self,
        table: &TableDescriptor,
        fields: &[FieldDescriptor],
        sink: &impl DiagnosticSink,
    ) -> Option<TableComments> {
        let mut entries: Vec<CommentEntry> = Vec::new();
        for field in fields {
            let Some(entry) = self.process_field(table, field, sink) else {
                continue;
            };

            if let Some(first) = entries.iter().find(|e| e.column() == entry.column()) {
                sink.report(Diagnostic::error(
                    DiagnosticKind::DuplicateColumn,
                    &table.name,
                    &field.name,
                    format!(
                        "column '{}' is already used by field '{}'",
                        entry.column(),
                        first.field
                    ),
                ));
                continue;
            }

            if let Some(first) = entries.iter().find(|e| e.comment() == entry.comment()) {
                sink.report(Diagnostic::warning(
                    DiagnosticKind::DuplicateComment,
                    &table.name,
                    &field.name,
                    format!(
                        "comment '{}' is also used by field '{}'",
                        entry.comment(),
                        first.field
                    ),
                ));
            }

            entries.push(entry);
        }

        if entries.is_empty() {
            None
        } else {
            Some(TableComments {
                table: table.clone(),
                entries,
            })
        }
    }

    /// Processes a sequence of tables.
    pub fn run<I>(&self, tables: I, sink: &impl DiagnosticSink) -> Vec<TableComments>
    where
        I: IntoIterator<Item = (TableDescriptor, Vec<FieldDescriptor>)>,
    {
        tables
            .into_iter()
            .filter_map(|(table, fields)| self.process_table(&table, &fields, sink))
            .collect()
    }

    /// Processes a type implementing [`CommentSource`].
    pub fn run_source<T: CommentSource>(&self, sink: &impl DiagnosticSink) -> Option<TableComments> {
        self.process_table(&T::table(), &T::fields(), sink)
    }
}

fn ambiguous_length_message(column_type: ColumnType, length: u32) -> String {
    format!(
        "length {LEGACY_DEFAULT_LENGTH} on a {column_type} column is indistinguishable from \
         the unset default; using {length}"
    )
}
