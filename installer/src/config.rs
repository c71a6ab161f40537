//! Install configuration assembled at the CLI boundary.
//!
//! [`InstallConfig`] is the only input of [`crate::install::install`]. Host
//! defaults (platform, architecture, OS family) are folded in here, once,
//! so the pipeline itself never reads the environment.

use crate::artefact::attributes::AttributeSpec;
use crate::cli::Cli;
use crate::host::{HostEnvironment, OsFamily};
use crate::strip::DEFAULT_STRIP_TIMEOUT;
use camino::Utf8PathBuf;
use std::time::Duration;

/// Options that shape the pipeline but not the prebuild's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Whether to strip debug symbols from the published copy.
    pub strip: bool,
    /// Bound on the strip subprocess.
    pub strip_timeout: Duration,
    /// Files, relative to the base directory, copied next to the binary.
    pub extra_files: Vec<Utf8PathBuf>,
    /// Compute destinations without writing anything.
    pub dry_run: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            strip: false,
            strip_timeout: DEFAULT_STRIP_TIMEOUT,
            extra_files: Vec::new(),
            dry_run: false,
        }
    }
}

/// Everything one publish needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Root holding the built binary and the `prebuilds` directory.
    pub base_dir: Utf8PathBuf,
    /// Built binary, relative to `base_dir`.
    pub source: Utf8PathBuf,
    /// Attributes with platform and architecture already resolved.
    pub attributes: AttributeSpec,
    /// Pipeline options.
    pub options: InstallOptions,
    /// OS family of the host, which selects the strip flags.
    pub os_family: OsFamily,
}

impl InstallConfig {
    /// Build a configuration from parsed arguments and a host snapshot.
    ///
    /// Explicit `--platform`/`--arch` values win over the host's, which lets
    /// an artefact be republished for another target without rebuilding.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use pkg_prebuilds::cli::Cli;
    /// use pkg_prebuilds::config::InstallConfig;
    /// use pkg_prebuilds::host::{HostEnvironment, OsFamily};
    ///
    /// let cli = Cli::parse_from([
    ///     "pkg-prebuilds", "--baseDir", ".", "--source", "addon.node",
    ///     "--name", "addon", "--napi_version", "8", "--arch", "arm64",
    /// ]);
    /// let host = HostEnvironment::new("linux", "x64", OsFamily::Linux);
    /// let config = InstallConfig::from_cli(&cli, &host);
    ///
    /// assert_eq!(config.attributes.platform, "linux");
    /// assert_eq!(config.attributes.arch, "arm64");
    /// ```
    #[must_use]
    pub fn from_cli(cli: &Cli, host: &HostEnvironment) -> Self {
        let attributes = AttributeSpec {
            name: Some(cli.name.clone()),
            platform: cli
                .platform
                .clone()
                .unwrap_or_else(|| host.platform().to_owned()),
            arch: cli.arch.clone().unwrap_or_else(|| host.arch().to_owned()),
            libc: cli.libc.clone(),
            abi_version: Some(cli.napi_version.clone()),
            runtime: cli.runtime.clone(),
        };

        Self {
            base_dir: cli.base_dir.clone(),
            source: cli.source.clone(),
            attributes,
            options: InstallOptions {
                strip: cli.strip,
                strip_timeout: Duration::from_secs(cli.strip_timeout),
                extra_files: cli.extra_files.clone(),
                dry_run: cli.dry_run,
            },
            os_family: host.os_family(),
        }
    }
}
