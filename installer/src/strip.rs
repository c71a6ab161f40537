//! Best-effort removal of debug symbols from a published prebuild.
//!
//! Stripping is never the goal of a publish, so nothing in this module can
//! fail the pipeline. The outcome is reported as a [`StripOutcome`] and
//! failures are logged as warnings. The `strip` subprocess is bounded by a
//! timeout and killed when it expires.

use crate::error::{InstallerError, Result};
use crate::host::OsFamily;
use camino::Utf8Path;
use log::{debug, warn};
use serde::Serialize;
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Program used to strip symbols.
const STRIP_PROGRAM: &str = "strip";

/// Default bound on the strip subprocess (1 minute).
pub const DEFAULT_STRIP_TIMEOUT: Duration = Duration::from_secs(60);

/// Abstraction for running external commands with a time limit.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `program` with `args`, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the program cannot be spawned, or
    /// [`InstallerError::CommandTimedOut`] when it outlives `timeout`.
    fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use pkg_prebuilds::strip::{CommandExecutor, SystemCommandExecutor};
/// use std::time::Duration;
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("strip", &["--version".to_owned()], Duration::from_secs(5))?;
/// assert!(output.status.success());
/// # Ok::<(), pkg_prebuilds::error::InstallerError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<Output> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain both pipes while waiting: a child blocked on a full pipe
        // never exits.
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        if let Some(status) = child.wait_timeout(timeout)? {
            return Ok(Output {
                status,
                stdout: collect(stdout_reader)?,
                stderr: collect(stderr_reader)?,
            });
        }

        if let Err(err) = child.kill() {
            debug!("failed to kill {program}: {err}");
        }
        if let Err(err) = child.wait() {
            debug!("failed to reap {program}: {err}");
        }
        Err(InstallerError::CommandTimedOut {
            command: program.to_owned(),
            seconds: timeout.as_secs(),
        })
    }
}

type Reader = JoinHandle<std::io::Result<Vec<u8>>>;

/// Read `pipe` to the end on a background thread.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Reader {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).map(|_| buf)
    })
}

fn collect(reader: Option<Reader>) -> Result<Vec<u8>> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| std::io::Error::other("output reader panicked"))??;
    Ok(bytes)
}

/// Result of the strip step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StripOutcome {
    /// Stripping was not requested, or the host has no stripping rule.
    NotAttempted,
    /// `strip` ran and exited successfully.
    Succeeded,
    /// `strip` could not be run or reported failure.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl StripOutcome {
    /// Whether the strip step failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Return the `strip` arguments for `path` on the given OS family.
///
/// Returns `None` when the family has no stripping rule.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use pkg_prebuilds::host::OsFamily;
/// use pkg_prebuilds::strip::strip_args;
///
/// let args = strip_args(OsFamily::Linux, Utf8Path::new("addon.node"));
/// assert_eq!(args, Some(vec!["addon.node".to_owned(), "--strip-all".to_owned()]));
/// assert_eq!(strip_args(OsFamily::Other, Utf8Path::new("addon.node")), None);
/// ```
#[must_use]
pub fn strip_args(family: OsFamily, path: &Utf8Path) -> Option<Vec<String>> {
    let flag = match family {
        OsFamily::Linux => "--strip-all",
        OsFamily::Darwin => "-Sx",
        OsFamily::Other => return None,
    };
    Some(vec![path.as_str().to_owned(), flag.to_owned()])
}

/// Strip debug symbols from `path` in place.
///
/// Never fails: problems are logged and returned as
/// [`StripOutcome::Failed`].
#[must_use]
pub fn strip_symbols(
    executor: &dyn CommandExecutor,
    family: OsFamily,
    path: &Utf8Path,
    timeout: Duration,
) -> StripOutcome {
    let Some(args) = strip_args(family, path) else {
        debug!("no strip rule for {family:?}; leaving {path} untouched");
        return StripOutcome::NotAttempted;
    };

    debug!("running {STRIP_PROGRAM} {}", args.join(" "));
    let outcome = match executor.run(STRIP_PROGRAM, &args, timeout) {
        Ok(output) if output.status.success() => StripOutcome::Succeeded,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            StripOutcome::Failed {
                reason: format!("{STRIP_PROGRAM} exited with {}: {}", output.status, stderr.trim()),
            }
        }
        Err(err) => StripOutcome::Failed {
            reason: err.to_string(),
        },
    };

    if let StripOutcome::Failed { reason } = &outcome {
        warn!("could not strip {path}: {reason}");
    }
    outcome
}
