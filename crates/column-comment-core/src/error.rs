//! Error types for the comment engine.

/// Errors raised while resolving a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentError {
    /// The declared type matches no mapping rule and no applicable hint.
    #[error("ColumnComment does not support type: {type_name}")]
    UnsupportedType {
        /// The declared type as written.
        type_name: String,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, CommentError>;
