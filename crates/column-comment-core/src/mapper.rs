//! Resolution of declared field types to column types.

use crate::column_type::ColumnType;
use crate::error::{CommentError, Result};
use crate::field::{TypeHints, TypeName};

/// Resolves a declared type to its canonical column type.
///
/// Large-text strings become `LONGTEXT`; enumerations of any otherwise
/// unknown type are stored by name as `VARCHAR`.
///
/// # Errors
///
/// Returns [`CommentError::UnsupportedType`] when the type is outside the
/// known table and no hint applies.
pub fn resolve(declared: &TypeName, hints: TypeHints) -> Result<ColumnType> {
    if declared.is_text() && hints.large_text {
        return Ok(ColumnType::Longtext);
    }

    let mapped = match declared {
        TypeName::Float => ColumnType::Float,
        TypeName::Double => ColumnType::Double,
        TypeName::Decimal => ColumnType::Decimal,
        TypeName::Int8 => ColumnType::Tinyint,
        TypeName::Int16 => ColumnType::Smallint,
        TypeName::Text => ColumnType::Varchar,
        TypeName::Int64 => ColumnType::Bigint,
        TypeName::Int32 => ColumnType::Int,
        TypeName::Boolean => ColumnType::Bit,
        TypeName::Date => ColumnType::Date,
        TypeName::DateTime => ColumnType::Datetime,
        TypeName::Time => ColumnType::Time,
        TypeName::Other(_) if hints.enumerated => ColumnType::Varchar,
        TypeName::Other(name) => {
            return Err(CommentError::UnsupportedType {
                type_name: name.clone(),
            });
        }
    };
    Ok(mapped)
}
