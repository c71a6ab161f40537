//! CLI argument definitions for the prebuild publisher.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration. Flag names keep the spellings existing build scripts
//! already pass (`--baseDir`, `--napi_version`, `--extraFiles`).

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Copy a built native add-on into `prebuilds/` under its canonical name.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pkg-prebuilds")]
#[command(version, about)]
#[command(long_about = concat!(
    "Copy a built native add-on into the prebuilds directory.\n\n",
    "The destination name encodes the module name, platform, architecture, ",
    "C library flavour, Node-API version and runtime, so a loader can pick ",
    "the binary matching its environment. Platform and architecture default ",
    "to the current host; override them to republish an artefact for another ",
    "target without rebuilding.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish a Linux build:\n",
    "    $ pkg-prebuilds --baseDir . --source build/Release/addon.node \\\n",
    "        --name addon --napi_version 8\n\n",
    "  Publish a musl build with a bundled library, stripping symbols:\n",
    "    $ pkg-prebuilds --baseDir . --source build/Release/addon.node \\\n",
    "        --name addon --napi_version 8 --libc musl --strip \\\n",
    "        --extraFiles build/Release/libdep.so\n\n",
    "  Preview the destination without copying:\n",
    "    $ pkg-prebuilds --baseDir . --source build/Release/addon.node \\\n",
    "        --name addon --napi_version 8 --dry-run\n",
))]
pub struct Cli {
    /// Base path containing the built binary and the prebuilds directory.
    #[arg(long = "baseDir", value_name = "DIR")]
    pub base_dir: Utf8PathBuf,

    /// Path of the built binary, relative to the base directory.
    #[arg(long, value_name = "PATH")]
    pub source: Utf8PathBuf,

    /// Name of the module.
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Node-API version the binary targets.
    #[arg(long = "napi_version", value_name = "VERSION")]
    pub napi_version: String,

    /// Strip debug symbols from the published binary (best effort).
    #[arg(long)]
    pub strip: bool,

    /// Seconds to wait for the strip command before killing it.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub strip_timeout: u64,

    /// C library flavour; `glibc` is the default and adds no tag.
    #[arg(long, value_name = "LIBC")]
    pub libc: Option<String>,

    /// Runtime the binary targets [default: node].
    #[arg(long, value_name = "RUNTIME")]
    pub runtime: Option<String>,

    /// Override the target architecture [default: host].
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Override the target platform [default: host].
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Extra files to copy next to the binary (repeatable).
    #[arg(long = "extraFiles", value_name = "PATH", num_args = 1..)]
    pub extra_files: Vec<Utf8PathBuf>,

    /// Show the destination and exit without copying.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the install report as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Return the default log level implied by `--quiet` and `-v`.
    ///
    /// `RUST_LOG` still takes precedence when set.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use log::LevelFilter;
    /// use pkg_prebuilds::cli::Cli;
    ///
    /// let cli = Cli::parse_from([
    ///     "pkg-prebuilds", "--baseDir", ".", "--source", "addon.node",
    ///     "--name", "addon", "--napi_version", "8", "-v",
    /// ]);
    /// assert_eq!(cli.log_filter(), LevelFilter::Info);
    /// ```
    #[must_use]
    pub const fn log_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const REQUIRED: [&str; 9] = [
        "pkg-prebuilds",
        "--baseDir",
        "/work",
        "--source",
        "build/Release/addon.node",
        "--name",
        "addon",
        "--napi_version",
        "8",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra.iter()).copied())
    }

    #[test]
    fn required_flags_parse() {
        let cli = parse(&[]).expect("valid arguments");
        assert_eq!(cli.base_dir, Utf8PathBuf::from("/work"));
        assert_eq!(cli.source, Utf8PathBuf::from("build/Release/addon.node"));
        assert_eq!(cli.name, "addon");
        assert_eq!(cli.napi_version, "8");
        assert!(!cli.strip);
        assert_eq!(cli.strip_timeout, 60);
        assert!(cli.extra_files.is_empty());
        assert_eq!(cli.libc, None);
        assert_eq!(cli.runtime, None);
    }

    #[rstest]
    #[case::base_dir("--baseDir")]
    #[case::source("--source")]
    #[case::name("--name")]
    #[case::napi_version("--napi_version")]
    fn required_flags_are_enforced(#[case] flag: &str) {
        let flags: Vec<&str> = REQUIRED.iter().skip(1).copied().collect();
        let args: Vec<&str> = flags
            .chunks(2)
            .filter(|pair| pair.first() != Some(&flag))
            .flatten()
            .copied()
            .collect();
        let result = Cli::try_parse_from(std::iter::once("pkg-prebuilds").chain(args));
        assert!(result.is_err(), "expected {flag} to be required");
    }

    #[test]
    fn single_extra_file_is_a_sequence_of_one() {
        let cli = parse(&["--extraFiles", "lib/a.so"]).expect("valid");
        assert_eq!(cli.extra_files, vec![Utf8PathBuf::from("lib/a.so")]);
    }

    #[rstest]
    #[case::repeated(&["--extraFiles", "lib/a.so", "--extraFiles", "lib/b.so"])]
    #[case::multi_valued(&["--extraFiles", "lib/a.so", "lib/b.so"])]
    fn multiple_extra_files_keep_order(#[case] extra: &[&str]) {
        let cli = parse(extra).expect("valid");
        assert_eq!(
            cli.extra_files,
            vec![Utf8PathBuf::from("lib/a.so"), Utf8PathBuf::from("lib/b.so")]
        );
    }

    #[test]
    fn overrides_and_options_parse() {
        let cli = parse(&[
            "--strip",
            "--libc",
            "musl",
            "--runtime",
            "electron",
            "--arch",
            "arm64",
            "--platform",
            "darwin",
            "--strip-timeout",
            "5",
            "--dry-run",
            "--json",
        ])
        .expect("valid");
        assert!(cli.strip);
        assert_eq!(cli.libc.as_deref(), Some("musl"));
        assert_eq!(cli.runtime.as_deref(), Some("electron"));
        assert_eq!(cli.arch.as_deref(), Some("arm64"));
        assert_eq!(cli.platform.as_deref(), Some("darwin"));
        assert_eq!(cli.strip_timeout, 5);
        assert!(cli.dry_run);
        assert!(cli.json);
    }

    #[test]
    fn zero_strip_timeout_is_rejected() {
        assert!(parse(&["--strip-timeout", "0"]).is_err());
        assert!(parse(&["--strip-timeout", "1"]).is_ok());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(parse(&["-q", "-v"]).is_err());
    }

    #[rstest]
    #[case::quiet(&["-q"], LevelFilter::Error)]
    #[case::default(&[], LevelFilter::Warn)]
    #[case::verbose(&["-v"], LevelFilter::Info)]
    #[case::very_verbose(&["-vv"], LevelFilter::Debug)]
    #[case::trace(&["-vvv"], LevelFilter::Trace)]
    fn log_filter_follows_flags(#[case] extra: &[&str], #[case] expected: LevelFilter) {
        let cli = parse(extra).expect("valid");
        assert_eq!(cli.log_filter(), expected);
    }

    #[test]
    fn verbosity_counts() {
        let cli = parse(&["-vv"]).expect("valid");
        assert_eq!(cli.verbosity, 2);
    }
}
