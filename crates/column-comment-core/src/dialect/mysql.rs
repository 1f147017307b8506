//! MySQL / MariaDB dialect.

use super::Dialect;

/// MySQL dialect.
///
/// Backslash is an escape character inside string literals unless the
/// server runs with `NO_BACKSLASH_ESCAPES`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MySqlDialect {
    no_backslash_escapes: bool,
}

impl MySqlDialect {
    /// Creates a dialect for the default server mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            no_backslash_escapes: false,
        }
    }

    /// Creates a dialect for servers running with `NO_BACKSLASH_ESCAPES`.
    #[must_use]
    pub const fn no_backslash_escapes() -> Self {
        Self {
            no_backslash_escapes: true,
        }
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn escape_string(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '\'' => escaped.push_str("''"),
                '\\' if !self.no_backslash_escapes => escaped.push_str("\\\\"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}
