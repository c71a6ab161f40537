//! Prebuild publisher library.
//!
//! This crate copies an already-built native add-on into a `prebuilds`
//! directory under a canonical name derived from its compatibility
//! attributes, so that a loader can later find the binary matching its
//! environment. It is used by the `pkg-prebuilds` CLI binary and can be
//! consumed programmatically for testing or custom publish workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Compatibility attributes and the naming policy
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Install configuration assembled at the CLI boundary
//! - [`error`] - Semantic error types
//! - [`host`] - Host platform and architecture detection
//! - [`install`] - The publish pipeline
//! - [`output`] - Human and JSON rendering of install reports
//! - [`strip`] - Best-effort symbol stripping

pub mod artefact;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod install;
pub mod output;
pub mod strip;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
