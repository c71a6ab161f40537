//! Error types for the prebuild publisher.
//!
//! This module defines semantic error variants that tell the user which input
//! or filesystem step failed. Stripping failures are deliberately absent: they
//! are reported through [`crate::strip::StripOutcome`] instead.

use crate::artefact::error::AttributeError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing a prebuild.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The compatibility attributes cannot be encoded.
    #[error("invalid attributes: {0}")]
    InvalidAttributes(#[from] AttributeError),

    /// The built binary is missing or is not a regular file.
    #[error("built binary does not exist: {path}")]
    SourceNotFound {
        /// Path that was checked.
        path: Utf8PathBuf,
    },

    /// The destination directory could not be created.
    #[error("failed to create directory {path}")]
    CreateDirFailed {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying a file into the destination directory failed.
    #[error("failed to copy {from} to {to}")]
    CopyFailed {
        /// Source path.
        from: Utf8PathBuf,
        /// Destination path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An extra file entry cannot be copied next to the binary.
    #[error("invalid extra file {path}: {reason}")]
    InvalidExtraFile {
        /// The offending entry.
        path: Utf8PathBuf,
        /// Why the entry was rejected.
        reason: &'static str,
    },

    /// An external command did not finish in time and was killed.
    #[error("{command} timed out after {seconds} seconds")]
    CommandTimedOut {
        /// The program that was run.
        command: String,
        /// The timeout that elapsed.
        seconds: u64,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
