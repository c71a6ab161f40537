//! Compatibility attributes of a published prebuild.
//!
//! [`AttributeSpec`] is the loosely-typed input assembled by the CLI layer;
//! [`CompatibilityAttributes`] is the validated, normalized form consumed by
//! the naming policy. Normalization folds default values into "absent" so that
//! an explicit default and an omitted value produce the same identity.

use super::error::{AttributeError, Result};
use super::tag::Tag;

/// The runtime assumed when none is given.
pub const PRIMARY_RUNTIME: &str = "node";

/// The C library that needs no tag in a prebuild name.
pub const DEFAULT_LIBC: &str = "glibc";

/// Unvalidated attribute values as supplied by the caller.
///
/// `platform` and `arch` are expected to be resolved already; the core never
/// consults the host to fill them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Module identifier.
    pub name: Option<String>,
    /// Target operating system tag.
    pub platform: String,
    /// Target CPU architecture tag.
    pub arch: String,
    /// C library flavour, if not the default.
    pub libc: Option<String>,
    /// Native ABI version.
    pub abi_version: Option<String>,
    /// Host runtime, if not the primary one.
    pub runtime: Option<String>,
}

/// The validated identity of a prebuild.
///
/// # Examples
///
/// ```
/// use pkg_prebuilds::artefact::attributes::{AttributeSpec, CompatibilityAttributes};
///
/// let spec = AttributeSpec {
///     name: Some("foo".to_owned()),
///     platform: "linux".to_owned(),
///     arch: "x64".to_owned(),
///     libc: Some("glibc".to_owned()),
///     abi_version: Some("8".to_owned()),
///     runtime: Some("node".to_owned()),
/// };
/// let attrs = CompatibilityAttributes::try_from(&spec).expect("valid attributes");
/// assert_eq!(attrs.libc(), None);
/// assert_eq!(attrs.runtime(), "node");
/// assert!(attrs.is_primary_runtime());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompatibilityAttributes {
    name: Tag,
    platform: Tag,
    arch: Tag,
    libc: Option<Tag>,
    abi_version: Tag,
    runtime: Option<Tag>,
}

impl CompatibilityAttributes {
    /// Return the module identifier.
    #[must_use]
    pub const fn name(&self) -> &Tag {
        &self.name
    }

    /// Return the target platform tag.
    #[must_use]
    pub const fn platform(&self) -> &Tag {
        &self.platform
    }

    /// Return the target architecture tag.
    #[must_use]
    pub const fn arch(&self) -> &Tag {
        &self.arch
    }

    /// Return the explicit libc tag, or `None` for the default flavour.
    #[must_use]
    pub const fn libc(&self) -> Option<&Tag> {
        self.libc.as_ref()
    }

    /// Return the native ABI version.
    #[must_use]
    pub const fn abi_version(&self) -> &Tag {
        &self.abi_version
    }

    /// Return the runtime tag, substituting [`PRIMARY_RUNTIME`] when unset.
    #[must_use]
    pub fn runtime(&self) -> &str {
        self.runtime.as_ref().map_or(PRIMARY_RUNTIME, Tag::as_str)
    }

    /// Return the runtime tag only when it differs from the primary runtime.
    #[must_use]
    pub const fn explicit_runtime(&self) -> Option<&Tag> {
        self.runtime.as_ref()
    }

    /// Whether the runtime is the primary one.
    #[must_use]
    pub const fn is_primary_runtime(&self) -> bool {
        self.runtime.is_none()
    }
}

impl TryFrom<&AttributeSpec> for CompatibilityAttributes {
    type Error = AttributeError;

    fn try_from(spec: &AttributeSpec) -> Result<Self> {
        let name = required("name", spec.name.as_deref())?;
        let abi_version = required("abi_version", spec.abi_version.as_deref())?;
        Ok(Self {
            name,
            platform: Tag::parse("platform", &spec.platform)?,
            arch: Tag::parse("arch", &spec.arch)?,
            libc: optional("libc", spec.libc.as_deref(), DEFAULT_LIBC)?,
            abi_version,
            runtime: optional("runtime", spec.runtime.as_deref(), PRIMARY_RUNTIME)?,
        })
    }
}

impl TryFrom<AttributeSpec> for CompatibilityAttributes {
    type Error = AttributeError;

    fn try_from(spec: AttributeSpec) -> Result<Self> {
        Self::try_from(&spec)
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<Tag> {
    let present = value.ok_or(AttributeError::MissingField { field })?;
    Tag::parse(field, present)
}

/// Parse an optional component, folding empty and default values to `None`.
fn optional(field: &'static str, value: Option<&str>, default: &str) -> Result<Option<Tag>> {
    match value {
        None | Some("") => Ok(None),
        Some(v) if v == default => Ok(None),
        Some(v) => Tag::parse(field, v).map(Some),
    }
}
