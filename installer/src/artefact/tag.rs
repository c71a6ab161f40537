//! Validated name components.
//!
//! A [`Tag`] is a single component of a prebuild name. Components are joined
//! with [`SEPARATOR`], so a tag may never contain it. Tags are also used as
//! path segments, which rules out path separators and leading dots.

use super::error::{AttributeError, Result};
use std::fmt;

/// Separator placed between name components.
pub const SEPARATOR: char = '-';

/// A validated, separator-free name component such as `linux` or `x64`.
///
/// # Examples
///
/// ```
/// use pkg_prebuilds::artefact::tag::Tag;
///
/// let tag = Tag::parse("platform", "linux").expect("valid tag");
/// assert_eq!(tag.as_str(), "linux");
///
/// assert!(Tag::parse("platform", "linux-gnu").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// ASCII alphanumerics, underscores and dots only.
fn is_valid_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

impl Tag {
    /// Validate `value` as the component named `field`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::MissingField`] for an empty value and
    /// [`AttributeError::InvalidComponent`] when the value contains the
    /// separator, a character outside the permitted set, or starts with a
    /// dot.
    pub fn parse(field: &'static str, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(AttributeError::MissingField { field });
        }
        if value.contains(SEPARATOR) {
            return Err(invalid(
                field,
                value,
                format!("must not contain the separator '{SEPARATOR}'"),
            ));
        }
        if let Some(bad) = value.chars().find(|c| !is_valid_tag_char(*c)) {
            return Err(invalid(field, value, format!("invalid character '{bad}'")));
        }
        if value.starts_with('.') {
            return Err(invalid(field, value, "must not start with '.'".to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Return the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(field: &'static str, value: &str, reason: String) -> AttributeError {
    AttributeError::InvalidComponent {
        field,
        value: value.to_owned(),
        reason,
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
