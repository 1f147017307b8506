//! Rendering of column comment statements.

use core::fmt;

use crate::column_type::ColumnType;
use crate::dialect::{Dialect, MySqlDialect};

/// A single-column `ALTER TABLE ... COMMENT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentStatement {
    /// Table name.
    pub table: String,
    /// Column name.
    pub column: String,
    /// Resolved column type.
    pub column_type: ColumnType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Effective length; `0` means no length clause.
    pub length: u32,
    /// Comment text, unescaped.
    pub comment: String,
}

impl CommentStatement {
    /// Renders the statement for the given dialect.
    #[must_use]
    pub fn to_sql(&self, dialect: &impl Dialect) -> String {
        StatementBuilder::new(dialect).render(
            &self.table,
            &self.column,
            self.column_type,
            self.nullable,
            self.length,
            &self.comment,
        )
    }
}

impl fmt::Display for CommentStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(&MySqlDialect::new()))
    }
}

/// Renders comment statements through a dialect.
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'d, D: Dialect> {
    dialect: &'d D,
}

impl<'d, D: Dialect> StatementBuilder<'d, D> {
    /// Creates a builder over `dialect`.
    #[must_use]
    pub const fn new(dialect: &'d D) -> Self {
        Self { dialect }
    }

    /// Renders an `ALTER TABLE ... CHANGE ... COMMENT` statement.
    ///
    /// `NOT NULL` is emitted only for non-nullable columns. The length clause
    /// is emitted only when `length` is positive and the type carries a
    /// length at all.
    #[must_use]
    pub fn render(
        &self,
        table: &str,
        column: &str,
        column_type: ColumnType,
        nullable: bool,
        length: u32,
        comment: &str,
    ) -> String {
        let column = self.dialect.quote_identifier(column);
        let mut sql = format!(
            "ALTER TABLE {} CHANGE {column} {column} ",
            self.dialect.quote_identifier(table)
        );

        if !nullable {
            sql.push_str("NOT NULL ");
        }

        sql.push_str(column_type.as_sql());
        sql.push(' ');

        if length > 0 && column_type.has_length() {
            sql.push_str(&format!("({length}) "));
        }

        sql.push_str("COMMENT ");
        sql.push_str(&self.dialect.quote_string(comment));
        sql
    }
}

/// Renders a statement with the default MySQL dialect.
#[must_use]
pub fn render(
    table: &str,
    column: &str,
    column_type: ColumnType,
    nullable: bool,
    length: u32,
    comment: &str,
) -> String {
    StatementBuilder::new(&MySqlDialect::new()).render(
        table,
        column,
        column_type,
        nullable,
        length,
        comment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_varchar() {
        let sql = render(
            "User",
            "user_name",
            ColumnType::Varchar,
            true,
            255,
            "user login name",
        );
        assert_eq!(
            sql,
            "ALTER TABLE `User` CHANGE `user_name` `user_name` VARCHAR (255) COMMENT 'user login name'"
        );
    }

    #[test]
    fn test_render_not_null() {
        let sql = render(
            "Order",
            "created_at",
            ColumnType::Datetime,
            false,
            6,
            "row creation time",
        );
        assert_eq!(
            sql,
            "ALTER TABLE `Order` CHANGE `created_at` `created_at` NOT NULL DATETIME (6) COMMENT 'row creation time'"
        );
    }

    #[test]
    fn test_nullable_omits_not_null() {
        let sql = render("t", "c", ColumnType::Int, true, 11, "x");
        assert!(!sql.contains("NOT NULL"));
    }

    #[test]
    fn test_no_length_clause_for_lengthless_types() {
        for ty in [
            ColumnType::Float,
            ColumnType::Double,
            ColumnType::Decimal,
            ColumnType::Date,
            ColumnType::Time,
            ColumnType::Longtext,
        ] {
            let sql = render("t", "c", ty, true, 30, "x");
            assert!(!sql.contains('('), "{sql}");
            assert_eq!(sql, format!("ALTER TABLE `t` CHANGE `c` `c` {ty} COMMENT 'x'"));
        }
    }

    #[test]
    fn test_zero_length_omits_clause() {
        let sql = render("t", "c", ColumnType::Varchar, true, 0, "x");
        assert_eq!(sql, "ALTER TABLE `t` CHANGE `c` `c` VARCHAR COMMENT 'x'");
    }

    #[test]
    fn test_comment_quotes_are_escaped() {
        let sql = render("t", "c", ColumnType::Bit, true, 1, "it's on");
        assert!(sql.ends_with("COMMENT 'it''s on'"));
    }

    #[test]
    fn test_identifier_backticks_are_escaped() {
        let sql = render("t`x", "c", ColumnType::Bit, true, 1, "flag");
        assert!(sql.starts_with("ALTER TABLE `t``x` CHANGE"));
    }

    #[test]
    fn test_display_matches_render() {
        let stmt = CommentStatement {
            table: "User".to_string(),
            column: "age".to_string(),
            column_type: ColumnType::Int,
            nullable: false,
            length: 11,
            comment: "age in years".to_string(),
        };
        assert_eq!(
            stmt.to_string(),
            render("User", "age", ColumnType::Int, false, 11, "age in years")
        );
        assert_eq!(stmt.to_string(), stmt.to_sql(&MySqlDialect::new()));
    }
}
