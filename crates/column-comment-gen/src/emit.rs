//! Output emitters.
//!
//! Both emitters are deterministic: the same tables always produce
//! byte-identical output.

use std::collections::HashSet;
use std::path::Path;

use clap::ValueEnum;
use column_comment_core::case::{comment_ident, to_pascal_case, to_snake_case};
use column_comment_core::{CommentEntry, TableComments};
use tracing::{info, warn};

use crate::error::Result;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A SQL script with one statement per line.
    #[default]
    Sql,
    /// A Rust module with one constant per statement.
    Rust,
}

/// Generated statements for one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    /// Simple name of the model type.
    pub type_name: String,
    /// Generated statements.
    pub comments: TableComments,
}

/// Renders the output in `format`.
#[must_use]
pub fn render(tables: &[GeneratedTable], format: OutputFormat) -> String {
    match format {
        OutputFormat::Sql => render_sql(tables),
        OutputFormat::Rust => render_rust(tables),
    }
}

/// Renders a SQL script.
#[must_use]
pub fn render_sql(tables: &[GeneratedTable]) -> String {
    let mut out = String::new();
    for (i, generated) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("-- {}\n", generated.comments.table.name));
        for entry in generated.comments.entries() {
            if !entry.comment().contains(['\n', '\r']) {
                out.push_str(&format!("-- {}\n", entry.comment()));
            }
            out.push_str(&entry.sql);
            out.push_str(";\n");
        }
    }
    out
}

/// Renders a Rust module with a `{Type}Comment` struct per table.
#[must_use]
pub fn render_rust(tables: &[GeneratedTable]) -> String {
    let mut out = String::from("// @generated by column-comment. Do not edit.\n");
    for generated in tables {
        let struct_name = format!("{}Comment", to_pascal_case(&generated.type_name));
        let entries = generated.comments.entries();
        let names = constant_names(&generated.type_name, entries);

        out.push('\n');
        out.push_str(&format!(
            "/// Column comment statements for `{}`.\n",
            generated.type_name
        ));
        out.push_str(&format!("pub struct {struct_name};\n\n"));
        out.push_str(&format!("impl {struct_name} {{\n"));
        out.push_str(&format!(
            "    pub const TABLE: &'static str = {:?};\n",
            generated.comments.table.name
        ));
        for (entry, name) in entries.iter().zip(&names) {
            out.push('\n');
            for line in entry.comment().lines() {
                out.push_str(&format!("    /// {}\n", line.trim_end()));
            }
            out.push_str(&format!(
                "    pub const {name}: &'static str = {:?};\n",
                entry.sql
            ));
        }
        out.push_str("\n    /// `(comment, statement)` pairs, in field order.\n");
        out.push_str("    pub const ALL: &'static [(&'static str, &'static str)] = &[\n");
        for (entry, name) in entries.iter().zip(&names) {
            out.push_str(&format!(
                "        ({:?}, Self::{name}),\n",
                entry.comment()
            ));
        }
        out.push_str("    ];\n}\n");
    }
    out
}

/// Picks a unique constant name per entry.
///
/// Names come from the column. A name already taken, including the
/// `TABLE` and `ALL` items of the generated struct, gets the first free
/// numeric suffix.
fn constant_names(type_name: &str, entries: &[CommentEntry]) -> Vec<String> {
    let mut taken: HashSet<String> = ["TABLE", "ALL"].iter().map(ToString::to_string).collect();
    entries
        .iter()
        .map(|entry| {
            let base = comment_ident(&to_snake_case(entry.column()));
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{base}_{n}");
                n += 1;
            }
            if name != base {
                warn!(
                    "{type_name}: constant {base} for column '{}' renamed to {name}",
                    entry.column()
                );
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Writes `content` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be written.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use column_comment_core::{CollectingSink, FieldDescriptor, Generator, TableDescriptor, TypeName};

    fn user() -> GeneratedTable {
        let fields = vec![
            FieldDescriptor::new("userName", TypeName::Text, "user login name"),
            FieldDescriptor::new("createdAt", TypeName::DateTime, "row creation time").not_null(),
        ];
        let comments = Generator::mysql()
            .process_table(&TableDescriptor::new("User"), &fields, &CollectingSink::new())
            .unwrap();
        GeneratedTable {
            type_name: "User".to_string(),
            comments,
        }
    }

    #[test]
    fn test_render_sql() {
        let sql = render_sql(&[user()]);
        assert_eq!(
            sql,
            "-- User\n\
             -- user login name\n\
             ALTER TABLE `User` CHANGE `user_name` `user_name` VARCHAR (255) COMMENT 'user login name';\n\
             -- row creation time\n\
             ALTER TABLE `User` CHANGE `created_at` `created_at` NOT NULL DATETIME (6) COMMENT 'row creation time';\n"
        );
    }

    #[test]
    fn test_render_rust() {
        let code = render_rust(&[user()]);
        assert!(code.starts_with("// @generated"));
        assert!(code.contains("pub struct UserComment;"));
        assert!(code.contains("pub const TABLE: &'static str = \"User\";"));
        assert!(code.contains("    /// user login name\n    pub const USER_NAME: &'static str = \"ALTER TABLE `User` CHANGE `user_name` `user_name` VARCHAR (255) COMMENT 'user login name'\";"));
        assert!(code.contains("(\"row creation time\", Self::CREATED_AT),"));
    }

    fn generated(type_name: &str, fields: &[FieldDescriptor]) -> GeneratedTable {
        let comments = Generator::mysql()
            .process_table(&TableDescriptor::new(type_name), fields, &CollectingSink::new())
            .unwrap();
        GeneratedTable {
            type_name: type_name.to_string(),
            comments,
        }
    }

    #[test]
    fn test_colliding_constant_names_get_suffix() {
        let table = generated(
            "User",
            &[
                FieldDescriptor::new("login", TypeName::Text, "login").column_name("user-name"),
                FieldDescriptor::new("userName", TypeName::Text, "display name"),
                FieldDescriptor::new("table", TypeName::Text, "table label"),
            ],
        );
        let code = render_rust(&[table]);
        assert_eq!(code.matches("pub const USER_NAME:").count(), 1);
        assert!(code.contains("pub const USER_NAME_2: &'static str = \"ALTER TABLE `User` CHANGE `user_name`"));
        assert!(code.contains("(\"display name\", Self::USER_NAME_2),"));
        assert!(code.contains("pub const TABLE_2: &'static str ="));
        assert_eq!(code.matches("pub const TABLE:").count(), 1);
    }

    #[test]
    fn test_multiline_comment_has_no_sql_comment_line() {
        let table = generated(
            "Note",
            &[
                FieldDescriptor::new("body", TypeName::Text, "first\r\nsecond"),
                FieldDescriptor::new("tag", TypeName::Text, "bare\rreturn"),
            ],
        );
        let sql = render_sql(&[table]);
        assert!(!sql.contains("-- first"));
        assert!(!sql.contains("-- bare"));
        assert!(sql.starts_with("-- Note\nALTER TABLE `Note` CHANGE `body`"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let tables = [user()];
        assert_eq!(render(&tables, OutputFormat::Rust), render(&tables, OutputFormat::Rust));
        assert_eq!(render(&tables, OutputFormat::Sql), render_sql(&tables));
    }
}
