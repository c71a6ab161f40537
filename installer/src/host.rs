//! Snapshot of the host the publisher runs on.
//!
//! The host supplies the default platform and architecture tags and decides
//! which strip flags apply. It is read once at the CLI boundary and passed
//! down by value; nothing below [`crate::config`] inspects the environment.

/// Operating system family, as far as symbol stripping is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// GNU/Linux and other ELF hosts using binutils `strip`.
    Linux,
    /// macOS, using the Apple `strip`.
    Darwin,
    /// Anything without a stripping rule.
    Other,
}

/// Platform and architecture tags for the running host.
///
/// Tags follow the runtime's naming (`darwin`, `win32`, `x64`, `ia32`)
/// rather than Rust's (`macos`, `windows`, `x86_64`, `x86`).
///
/// # Examples
///
/// ```
/// use pkg_prebuilds::host::{HostEnvironment, OsFamily};
///
/// let host = HostEnvironment::from_rust_consts("macos", "aarch64");
/// assert_eq!(host.platform(), "darwin");
/// assert_eq!(host.arch(), "arm64");
/// assert_eq!(host.os_family(), OsFamily::Darwin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    platform: String,
    arch: String,
    os_family: OsFamily,
}

impl HostEnvironment {
    /// Create a host description from explicit values.
    #[must_use]
    pub fn new(platform: impl Into<String>, arch: impl Into<String>, os_family: OsFamily) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
            os_family,
        }
    }

    /// Detect the running host.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_rust_consts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Translate Rust's `std::env::consts` values into runtime tags.
    #[must_use]
    pub fn from_rust_consts(os: &str, arch: &str) -> Self {
        let os_family = match os {
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::Darwin,
            _ => OsFamily::Other,
        };
        Self {
            platform: platform_tag(os).to_owned(),
            arch: arch_tag(arch).to_owned(),
            os_family,
        }
    }

    /// Return the platform tag.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Return the architecture tag.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Return the OS family.
    #[must_use]
    pub const fn os_family(&self) -> OsFamily {
        self.os_family
    }
}

fn platform_tag(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

fn arch_tag(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "mips" if cfg!(target_endian = "little") => "mipsel",
        "mips64" if cfg!(target_endian = "little") => "mips64el",
        other => other,
    }
}
