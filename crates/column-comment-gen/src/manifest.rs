//! Model manifests.
//!
//! A manifest is a JSON document describing tables and their documented
//! fields, for models that are not Rust structs (or not compiled with the
//! derive macro).
//!
//! ```json
//! {
//!   "legacy_lengths": true,
//!   "tables": [
//!     {
//!       "name": "User",
//!       "table": "tb_user",
//!       "fields": [
//!         { "name": "userName", "type": "java.lang.String", "comment": "user login name" },
//!         { "name": "bio", "type": "String", "comment": "profile", "large_text": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use column_comment_core::{FieldDescriptor, LengthOverride, TableDescriptor, TypeHints, TypeName};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, Result};

/// A whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Lengths come from a source that always reports a value, so `0` and
    /// `255` mean "unset".
    #[serde(default)]
    pub legacy_lengths: bool,
    /// Tables, in output order.
    #[serde(default)]
    pub tables: Vec<ManifestTable>,
}

/// One table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTable {
    /// Simple name of the model type.
    pub name: String,
    /// Entity-level name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Table-level name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<ManifestField>,
}

/// One field entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestField {
    /// Field name as declared.
    pub name: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Comment text; fields without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Column name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Nullability; defaults to nullable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Explicit length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Resolution hints.
    #[serde(flatten)]
    pub hints: TypeHints,
}

/// A table ready for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    /// Simple name of the model type, used to name generated items.
    pub type_name: String,
    /// Resolved table.
    pub table: TableDescriptor,
    /// Documented fields.
    pub fields: Vec<FieldDescriptor>,
}

impl Manifest {
    /// Reads a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&contents).map_err(|source| GenError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded manifest {} with {} table(s)",
            path.display(),
            manifest.tables.len()
        );
        Ok(manifest)
    }

    /// Checks that every table and field is named.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidManifest`] naming the first problem.
    pub fn validate(&self) -> Result<()> {
        for (i, table) in self.tables.iter().enumerate() {
            if table.name.trim().is_empty() {
                return Err(GenError::InvalidManifest(format!(
                    "table #{} has no name",
                    i + 1
                )));
            }
            for field in &table.fields {
                if field.name.trim().is_empty() {
                    return Err(GenError::InvalidManifest(format!(
                        "table '{}' has a field with no name",
                        table.name
                    )));
                }
                if field.declared_type.trim().is_empty() {
                    return Err(GenError::InvalidManifest(format!(
                        "field '{}.{}' has no type",
                        table.name, field.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Converts the manifest into descriptors, dropping uncommented fields.
    #[must_use]
    pub fn source_tables(&self) -> Vec<SourceTable> {
        self.tables
            .iter()
            .map(|t| SourceTable {
                type_name: t.name.clone(),
                table: TableDescriptor::resolve(&t.name, t.entity.as_deref(), t.table.as_deref()),
                fields: t
                    .fields
                    .iter()
                    .filter_map(|f| f.descriptor(self.legacy_lengths))
                    .collect(),
            })
            .collect()
    }
}

impl ManifestField {
    /// Builds a descriptor, or `None` if the field has no comment text.
    #[must_use]
    pub fn descriptor(&self, legacy_lengths: bool) -> Option<FieldDescriptor> {
        let comment = self.comment.as_deref().filter(|c| !c.trim().is_empty())?;
        let length = match self.length {
            Some(n) if legacy_lengths => LengthOverride::Legacy(n),
            other => LengthOverride::from_option(other),
        };

        let mut descriptor =
            FieldDescriptor::new(&self.name, TypeName::parse(&self.declared_type), comment)
                .nullable(self.nullable.unwrap_or(true))
                .length(length);
        descriptor.hints = self.hints;
        if let Some(column) = &self.column {
            descriptor = descriptor.column_name(column);
        }
        Some(descriptor)
    }
}
