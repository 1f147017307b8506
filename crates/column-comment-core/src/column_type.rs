//! Canonical SQL column types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Canonical SQL column types a field can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    // Floating point
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Arbitrary precision decimal.
    Decimal,

    // Date/time types
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Datetime,

    // Integer types
    /// 8-bit integer.
    Tinyint,
    /// 16-bit integer.
    Smallint,
    /// 64-bit integer.
    Bigint,
    /// 32-bit integer.
    Int,
    /// Single bit (booleans).
    Bit,

    // String types
    /// Variable-length character string.
    Varchar,
    /// Unbounded text.
    Longtext,

    /// Placeholder for a type that could not be resolved.
    ///
    /// The type mapper never hands this out; it only exists so error paths
    /// have something to carry.
    Unknown,
}

impl ColumnType {
    /// Every resolvable column type, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Date,
        Self::Time,
        Self::Datetime,
        Self::Tinyint,
        Self::Smallint,
        Self::Varchar,
        Self::Bigint,
        Self::Int,
        Self::Bit,
        Self::Longtext,
    ];

    /// Returns the SQL keyword for this type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Datetime => "DATETIME",
            Self::Tinyint => "TINYINT",
            Self::Smallint => "SMALLINT",
            Self::Varchar => "VARCHAR",
            Self::Bigint => "BIGINT",
            Self::Int => "INT",
            Self::Bit => "BIT",
            Self::Longtext => "LONGTEXT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the display length used when no explicit length is given.
    ///
    /// Types without length semantics return `None` and never render a
    /// length clause.
    #[must_use]
    pub const fn default_length(self) -> Option<u32> {
        match self {
            Self::Datetime => Some(6),
            Self::Tinyint => Some(4),
            Self::Smallint => Some(6),
            Self::Varchar => Some(255),
            Self::Bigint => Some(20),
            Self::Int => Some(11),
            Self::Bit => Some(1),
            Self::Float
            | Self::Double
            | Self::Decimal
            | Self::Date
            | Self::Time
            | Self::Longtext
            | Self::Unknown => None,
        }
    }

    /// Returns whether statements for this type carry a length clause.
    #[must_use]
    pub const fn has_length(self) -> bool {
        self.default_length().is_some()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
