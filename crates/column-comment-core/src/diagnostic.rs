//! Diagnostics raised during a generation pass.
//!
//! Diagnostics never abort a pass. They are appended to a
//! [`DiagnosticSink`], which may be shared between passes running on
//! different threads.

use core::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational.
    Note,
    /// Suspicious input that was handled.
    Warning,
    /// A field was dropped from output.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The field type could not be mapped; the field was skipped.
    UnsupportedType,
    /// A legacy length of 255 on a non-string column was read as unset.
    AmbiguousLength,
    /// Two fields of one table share the same comment text.
    DuplicateComment,
    /// Two fields of one table map to the same column; the later field was
    /// skipped.
    DuplicateColumn,
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Kind.
    pub kind: DiagnosticKind,
    /// Table the field belongs to.
    pub table: String,
    /// Field name as declared.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(
        kind: DiagnosticKind,
        table: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            table: table.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(
        kind: DiagnosticKind,
        table: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, table, field, message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}.{}: {}",
            self.severity, self.table, self.field, self.message
        )
    }
}

/// Append-only destination for diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of diagnostics at `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns whether any error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Takes all diagnostics out of the sink.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Sink that forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            table,
            field,
            message,
            ..
        } = diagnostic;
        match severity {
            Severity::Error => error!(%table, %field, "{message}"),
            Severity::Warning => warn!(%table, %field, "{message}"),
            Severity::Note => info!(%table, %field, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.report(Diagnostic::error(
            DiagnosticKind::UnsupportedType,
            "User",
            "address",
            "unsupported",
        ));
        sink.report(Diagnostic::warning(
            DiagnosticKind::AmbiguousLength,
            "User",
            "age",
            "ambiguous",
        ));
        assert!(sink.has_errors());
        assert_eq!(sink.count(Severity::Warning), 1);
        assert_eq!(sink.into_diagnostics().len(), 2);
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::warning(
            DiagnosticKind::DuplicateComment,
            "User",
            "nick",
            "comment repeated",
        );
        assert_eq!(d.to_string(), "warning: User.nick: comment repeated");
    }

    #[test]
    fn test_sink_shared_across_threads() {
        let sink = CollectingSink::new();
        std::thread::scope(|s| {
            for i in 0..4 {
                let sink = &sink;
                s.spawn(move || {
                    sink.report(Diagnostic::error(
                        DiagnosticKind::UnsupportedType,
                        format!("t{i}"),
                        "f",
                        "x",
                    ));
                });
            }
        });
        assert_eq!(sink.count(Severity::Error), 4);
    }
}
