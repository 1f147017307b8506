//! # column-comment-core
//!
//! Derives MySQL column comment statements from documented model fields.
//!
//! Each documented field goes through three pure steps:
//! - [`resolve`] maps the declared type and hints to a [`ColumnType`]
//! - [`resolve_length`] picks the effective display length
//! - [`StatementBuilder`] renders the `ALTER TABLE ... COMMENT` statement
//!
//! [`Generator`] runs those steps over whole tables, reporting unsupported
//! types and ambiguous lengths to a [`DiagnosticSink`] instead of failing.
//!
//! ```rust
//! use column_comment_core::{
//!     CollectingSink, FieldDescriptor, Generator, TableDescriptor, TypeName,
//! };
//!
//! let sink = CollectingSink::new();
//! let fields = vec![FieldDescriptor::new("userName", TypeName::Text, "user login name")];
//! let comments = Generator::mysql()
//!     .process_table(&TableDescriptor::new("User"), &fields, &sink)
//!     .unwrap();
//!
//! assert_eq!(
//!     comments.entries()[0].sql,
//!     "ALTER TABLE `User` CHANGE `user_name` `user_name` VARCHAR (255) COMMENT 'user login name'"
//! );
//! ```

pub mod case;
pub mod column_type;
pub mod diagnostic;
pub mod dialect;
pub mod error;
pub mod field;
pub mod generate;
pub mod length;
pub mod mapper;
pub mod schema;
pub mod statement;

pub use column_type::ColumnType;
pub use diagnostic::{
    CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, Severity, TracingSink,
};
pub use dialect::{Dialect, MySqlDialect};
pub use error::{CommentError, Result};
pub use field::{FieldDescriptor, LengthOverride, TableDescriptor, TypeHints, TypeName};
pub use generate::{CommentEntry, Generator, TableComments};
pub use length::{ResolvedLength, effective_length, resolve_length};
pub use mapper::resolve;
pub use schema::{CommentSource, CommentTable};
pub use statement::{CommentStatement, StatementBuilder, render};
