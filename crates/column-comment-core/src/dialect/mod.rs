//! SQL dialect support.
//!
//! Quoting rules differ between servers and server modes. The statement
//! builder goes through this trait for every identifier and literal it
//! interpolates.

mod mysql;

pub use mysql::MySqlDialect;

/// Trait for dialect-specific quoting.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '`'
    }

    /// Quotes an identifier, doubling any embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut doubled = String::with_capacity(quote.len_utf8() * 2);
        doubled.push(quote);
        doubled.push(quote);
        let escaped = name.replace(quote, &doubled);
        format!("{quote}{escaped}{quote}")
    }

    /// Escapes text for use inside a single-quoted string literal.
    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Quotes text as a single-quoted string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", self.escape_string(value))
    }
}
