//! Naming policy for published prebuilds.
//!
//! A prebuild lives at `<name>-<platform>-<arch>[-<libc>]/[<runtime>-]napi-v<abi>.node`
//! relative to the [`PREBUILDS_DIR`] directory. Components in their default
//! state (glibc, the primary runtime) are omitted, so the common case yields
//! the shortest name. Every component is a [`Tag`](super::tag::Tag) and
//! cannot contain the separator, which keeps the encoding unambiguous.

use super::attributes::CompatibilityAttributes;
use super::tag::SEPARATOR;
use camino::Utf8PathBuf;
use std::fmt;

/// Fixed top-level directory that holds every prebuild.
pub const PREBUILDS_DIR: &str = "prebuilds";

/// Fixed file extension for prebuild binaries.
const PREBUILD_EXTENSION: &str = ".node";

/// Prefix for the ABI version component of the filename.
const ABI_PREFIX: &str = "napi-v";

/// The canonical identifier of a prebuild.
///
/// # Examples
///
/// ```
/// use pkg_prebuilds::artefact::attributes::{AttributeSpec, CompatibilityAttributes};
/// use pkg_prebuilds::artefact::naming::PrebuildName;
///
/// let spec = AttributeSpec {
///     name: Some("foo".to_owned()),
///     platform: "linux".to_owned(),
///     arch: "x64".to_owned(),
///     abi_version: Some("8".to_owned()),
///     ..AttributeSpec::default()
/// };
/// let attrs = CompatibilityAttributes::try_from(&spec).expect("valid attributes");
/// let name = PrebuildName::new(&attrs);
///
/// assert_eq!(name.to_string(), "foo-linux-x64/napi-v8.node");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrebuildName {
    directory: String,
    filename: String,
}

impl PrebuildName {
    /// Encode validated attributes.
    #[must_use]
    pub fn new(attrs: &CompatibilityAttributes) -> Self {
        let mut directory = format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            attrs.name(),
            attrs.platform(),
            attrs.arch()
        );
        if let Some(libc) = attrs.libc() {
            directory.push(SEPARATOR);
            directory.push_str(libc.as_str());
        }

        let filename = match attrs.explicit_runtime() {
            Some(runtime) => format!(
                "{runtime}{SEPARATOR}{ABI_PREFIX}{}{PREBUILD_EXTENSION}",
                attrs.abi_version()
            ),
            None => format!("{ABI_PREFIX}{}{PREBUILD_EXTENSION}", attrs.abi_version()),
        };

        Self {
            directory,
            filename,
        }
    }

    /// Return the directory component.
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Return the filename component.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Return the name as a relative path below [`PREBUILDS_DIR`].
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.directory).join(&self.filename)
    }
}

impl fmt::Display for PrebuildName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.directory, self.filename)
    }
}
