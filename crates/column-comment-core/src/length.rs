//! Effective length resolution.

use crate::column_type::ColumnType;
use crate::field::LengthOverride;

/// Length the override mechanism reports when none was specified.
pub const LEGACY_DEFAULT_LENGTH: u32 = 255;

/// Outcome of resolving a column length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLength {
    /// Effective length; `0` means no length clause.
    pub length: u32,
    /// Whether a legacy `255` was read as "unset" and replaced by the type
    /// default.
    pub sentinel_substituted: bool,
}

impl ResolvedLength {
    const fn plain(length: u32) -> Self {
        Self {
            length,
            sentinel_substituted: false,
        }
    }

    /// Returns the length if a clause should be rendered.
    #[must_use]
    pub const fn clause(self) -> Option<u32> {
        if self.length > 0 {
            Some(self.length)
        } else {
            None
        }
    }
}

/// Resolves the effective length for `ty` given an override.
#[must_use]
pub fn resolve_length(ty: ColumnType, length: LengthOverride) -> ResolvedLength {
    let Some(default) = ty.default_length() else {
        return ResolvedLength::plain(0);
    };

    match length {
        LengthOverride::Absent | LengthOverride::Explicit(0) | LengthOverride::Legacy(0) => {
            ResolvedLength::plain(default)
        }
        LengthOverride::Legacy(LEGACY_DEFAULT_LENGTH) if ty != ColumnType::Varchar => {
            ResolvedLength {
                length: default,
                sentinel_substituted: true,
            }
        }
        LengthOverride::Explicit(n) | LengthOverride::Legacy(n) => ResolvedLength::plain(n),
    }
}

/// Resolves the effective length from a raw length, `0` meaning unset.
///
/// A raw `255` on a non-`VARCHAR` type is treated as unset, since it is
/// indistinguishable from the override default.
#[must_use]
pub fn effective_length(ty: ColumnType, explicit_length: u32) -> u32 {
    resolve_length(ty, LengthOverride::Legacy(explicit_length)).length
}
