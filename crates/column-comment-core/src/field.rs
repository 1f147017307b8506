//! Field and table descriptors handed to the engine by discovery providers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::case::to_snake_case;

/// Semantic type of a source field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Arbitrary precision decimal.
    Decimal,
    /// 8-bit integer.
    Int8,
    /// 16-bit integer.
    Int16,
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Text.
    Text,
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Time of day.
    Time,
    /// Anything else, carrying the declared name as written.
    Other(String),
}

impl TypeName {
    /// Parses a declared type name.
    ///
    /// Accepts Rust spellings (`i64`, `String`, `chrono::NaiveDateTime`,
    /// `Option<f64>`) as well as JVM-qualified names exported by other
    /// model definitions (`java.lang.Long`, `java.time.LocalDate`, `int`).
    /// Unrecognised names become [`TypeName::Other`].
    ///
    /// Unsigned integers share the signed kind of the same width. The
    /// rendered column is signed, so values above the signed maximum do not
    /// fit; declare the column explicitly when the full unsigned range is
    /// stored.
    #[must_use]
    pub fn parse(declared: &str) -> Self {
        let trimmed = declared.trim();
        let stripped = strip_reference(trimmed);

        if let Some(inner) = stripped
            .strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return match Self::parse(inner) {
                Self::Other(_) => Self::Other(trimmed.to_string()),
                known => known,
            };
        }

        let base = stripped.split('<').next().unwrap_or(stripped).trim();
        let simple = base
            .rsplit("::")
            .next()
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or(base);

        match simple {
            "f32" | "Float" | "float" => Self::Float,
            "f64" | "Double" | "double" => Self::Double,
            "Decimal" | "BigDecimal" => Self::Decimal,
            "i8" | "u8" | "Byte" | "byte" => Self::Int8,
            "i16" | "u16" | "Short" | "short" => Self::Int16,
            "i32" | "u32" | "Integer" | "int" => Self::Int32,
            "i64" | "u64" | "Long" | "long" => Self::Int64,
            "String" | "str" => Self::Text,
            "bool" | "Boolean" | "boolean" => Self::Boolean,
            "NaiveDate" | "LocalDate" | "Date" => Self::Date,
            "NaiveDateTime" | "DateTime" | "LocalDateTime" | "PrimitiveDateTime"
            | "OffsetDateTime" => Self::DateTime,
            "NaiveTime" | "LocalTime" | "Time" => Self::Time,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Returns whether this is the textual type.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Returns the name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn strip_reference(ty: &str) -> &str {
    let Some(rest) = ty.strip_prefix('&') else {
        return ty;
    };
    let rest = rest.trim_start();
    // Drop a lifetime such as `'static ` or `'a `.
    let rest = match rest.strip_prefix('\'') {
        Some(after) => after
            .split_once(char::is_whitespace)
            .map_or(after, |(_, ty)| ty),
        None => rest,
    };
    rest.trim_start()
        .strip_prefix("mut ")
        .unwrap_or(rest)
        .trim_start()
}

/// Annotation hints that refine type resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeHints {
    /// The field holds large text (maps strings to `LONGTEXT`).
    pub large_text: bool,
    /// The field is an enumeration persisted by name.
    pub enumerated: bool,
}

/// Length requested by an explicit column override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthOverride {
    /// No length was given.
    #[default]
    Absent,
    /// A length the source is known to have specified.
    Explicit(u32),
    /// A raw length from a source that cannot tell "unset" from its own
    /// default: `0` means unset and `255` is the override default for every
    /// column kind.
    Legacy(u32),
}

impl LengthOverride {
    /// Builds an override from an optional length.
    #[must_use]
    pub const fn from_option(length: Option<u32>) -> Self {
        match length {
            Some(n) => Self::Explicit(n),
            None => Self::Absent,
        }
    }
}

/// A documented field, as produced by a discovery provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared in source.
    pub name: String,
    /// Column name override; defaults to the snake_case field name.
    pub column: Option<String>,
    /// Declared semantic type.
    pub declared_type: TypeName,
    /// Resolution hints.
    pub hints: TypeHints,
    /// Explicit length override.
    pub length: LengthOverride,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Comment text.
    pub comment: String,
}

impl FieldDescriptor {
    /// Creates a nullable field with no overrides.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: TypeName, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            declared_type,
            hints: TypeHints::default(),
            length: LengthOverride::Absent,
            nullable: true,
            comment: comment.into(),
        }
    }

    /// Sets an explicit column name.
    #[must_use]
    pub fn column_name(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Marks the field as large text.
    #[must_use]
    pub fn large_text(mut self) -> Self {
        self.hints.large_text = true;
        self
    }

    /// Marks the field as an enumeration.
    #[must_use]
    pub fn enumerated(mut self) -> Self {
        self.hints.enumerated = true;
        self
    }

    /// Sets the length override.
    #[must_use]
    pub fn length(mut self, length: LengthOverride) -> Self {
        self.length = length;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets nullability.
    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns the SQL column name.
    #[must_use]
    pub fn column(&self) -> String {
        match &self.column {
            Some(column) => column.clone(),
            None => to_snake_case(&self.name),
        }
    }

    /// Returns whether the field carries usable comment text.
    #[must_use]
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

/// The table a set of fields belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// SQL table name.
    pub name: String,
}

impl TableDescriptor {
    /// Creates a table descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Resolves the table name from naming metadata.
    ///
    /// A non-blank table-level name wins over a non-blank entity-level name,
    /// which wins over the type's simple name.
    #[must_use]
    pub fn resolve(simple_name: &str, entity_name: Option<&str>, table_name: Option<&str>) -> Self {
        fn pick(name: Option<&str>) -> Option<&str> {
            name.filter(|n| !n.trim().is_empty())
        }

        let name = pick(table_name)
            .or_else(|| pick(entity_name))
            .unwrap_or(simple_name);
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_types() {
        assert_eq!(TypeName::parse("i64"), TypeName::Int64);
        assert_eq!(TypeName::parse("u8"), TypeName::Int8);
        assert_eq!(TypeName::parse("String"), TypeName::Text);
        assert_eq!(TypeName::parse("&'static str"), TypeName::Text);
        assert_eq!(TypeName::parse("f32"), TypeName::Float);
        assert_eq!(TypeName::parse("bool"), TypeName::Boolean);
        assert_eq!(
            TypeName::parse("chrono::NaiveDateTime"),
            TypeName::DateTime
        );
        assert_eq!(TypeName::parse("DateTime<Utc>"), TypeName::DateTime);
        assert_eq!(
            TypeName::parse("rust_decimal::Decimal"),
            TypeName::Decimal
        );
    }

    #[test]
    fn test_parse_option_unwraps() {
        assert_eq!(TypeName::parse("Option<String>"), TypeName::Text);
        assert_eq!(TypeName::parse("Option<NaiveDate>"), TypeName::Date);
        assert_eq!(
            TypeName::parse("Option<Status>"),
            TypeName::Other("Option<Status>".to_string())
        );
    }

    #[test]
    fn test_parse_jvm_types() {
        assert_eq!(TypeName::parse("java.lang.String"), TypeName::Text);
        assert_eq!(TypeName::parse("java.lang.Long"), TypeName::Int64);
        assert_eq!(TypeName::parse("java.lang.Integer"), TypeName::Int32);
        assert_eq!(TypeName::parse("int"), TypeName::Int32);
        assert_eq!(TypeName::parse("java.math.BigDecimal"), TypeName::Decimal);
        assert_eq!(TypeName::parse("java.time.LocalTime"), TypeName::Time);
        assert_eq!(
            TypeName::parse("java.time.LocalDateTime"),
            TypeName::DateTime
        );
    }

    #[test]
    fn test_parse_unknown_keeps_name() {
        let parsed = TypeName::parse("com.example.Address");
        assert_eq!(parsed, TypeName::Other("com.example.Address".to_string()));
        assert_eq!(parsed.name(), "com.example.Address");
    }

    #[test]
    fn test_field_defaults() {
        let field = FieldDescriptor::new("userName", TypeName::Text, "user login name");
        assert!(field.nullable);
        assert_eq!(field.length, LengthOverride::Absent);
        assert_eq!(field.column(), "user_name");
        assert!(field.has_comment());
    }

    #[test]
    fn test_field_builder() {
        let field = FieldDescriptor::new("bio", TypeName::Text, "   ")
            .large_text()
            .not_null()
            .length(LengthOverride::Explicit(100))
            .column_name("biography");
        assert!(field.hints.large_text);
        assert!(!field.nullable);
        assert_eq!(field.column(), "biography");
        assert!(!field.has_comment());
    }

    #[test]
    fn test_table_name_precedence() {
        assert_eq!(TableDescriptor::resolve("User", None, None).name, "User");
        assert_eq!(
            TableDescriptor::resolve("User", Some("member"), None).name,
            "member"
        );
        assert_eq!(
            TableDescriptor::resolve("User", Some("member"), Some("tb_member")).name,
            "tb_member"
        );
        assert_eq!(
            TableDescriptor::resolve("User", Some("  "), Some("")).name,
            "User"
        );
    }

    #[test]
    fn test_table_name_borrows_from_inputs() {
        let entity = String::from("member");
        let table = TableDescriptor::resolve("User", Some(entity.as_str()), Some(" \t"));
        assert_eq!(table, TableDescriptor::new("member"));
    }

    #[test]
    fn test_unsigned_share_signed_kind() {
        assert_eq!(TypeName::parse("u8"), TypeName::Int8);
        assert_eq!(TypeName::parse("u16"), TypeName::Int16);
        assert_eq!(TypeName::parse("u32"), TypeName::Int32);
        assert_eq!(TypeName::parse("u64"), TypeName::Int64);
    }
}
