//! Error types for compatibility attributes and prebuild naming.
//!
//! Each variant identifies the offending field so the CLI can point the user
//! at the flag that needs fixing.

use thiserror::Error;

/// Errors arising from invalid compatibility attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// A field with no safe default was missing or empty.
    #[error("missing required attribute \"{field}\"")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field value cannot be embedded in a prebuild name.
    #[error("invalid {field} \"{value}\": {reason}")]
    InvalidComponent {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Description of the violated rule.
        reason: String,
    },
}

/// Result type alias using [`AttributeError`].
pub type Result<T> = std::result::Result<T, AttributeError>;
