//! Traits implemented by `#[derive(ColumnComment)]`.

use crate::field::{FieldDescriptor, TableDescriptor};

/// A type that describes its table and documented fields.
///
/// Implemented by the derive macro; hand-written implementations are
/// equally valid.
pub trait CommentSource {
    /// Returns the table descriptor.
    fn table() -> TableDescriptor;

    /// Returns every field that carries comment text, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

/// Generated comment statements for a table.
///
/// Implemented by the `{Struct}Comment` type emitted by the derive macro.
pub trait CommentTable {
    /// The SQL table name.
    const TABLE: &'static str;

    /// `(comment, statement)` pairs, in declaration order.
    const ALL: &'static [(&'static str, &'static str)];

    /// Returns the first statement whose comment equals `comment`.
    #[must_use]
    fn by_comment(comment: &str) -> Option<&'static str> {
        Self::ALL
            .iter()
            .find(|(c, _)| *c == comment)
            .map(|(_, sql)| *sql)
    }
}
