//! Shared test utilities for the publisher crate.

use crate::error::{InstallerError, Result};
use crate::strip::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};
use std::time::Duration;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The program to execute (e.g., "strip").
    pub program: &'static str,
    /// The arguments to pass to the program.
    pub args: Vec<String>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to exercise the strip step without spawning processes.
/// A mismatched or unexpected invocation returns
/// [`InstallerError::StubMismatch`], which the strip step reports as a
/// failed outcome.
#[derive(Debug, Default)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    seen: RefCell<Vec<(String, Vec<String>)>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Returns every invocation received so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.seen.borrow().clone()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, program: &str, args: &[String], _timeout: Duration) -> Result<Output> {
        self.seen
            .borrow_mut()
            .push((program.to_owned(), args.to_vec()));

        let Some(call) = self.expected.borrow_mut().pop_front() else {
            return Err(InstallerError::StubMismatch {
                message: format!("unexpected invocation of {program}"),
            });
        };

        if call.program != program || call.args.as_slice() != args {
            return Err(InstallerError::StubMismatch {
                message: format!(
                    "expected {} {:?}, got {program} {args:?}",
                    call.program, call.args
                ),
            });
        }

        call.result
    }
}
