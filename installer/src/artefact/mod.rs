//! Prebuild identity and naming policy.
//!
//! This module is the pure half of the publisher: it turns a set of
//! compatibility attributes into the canonical relative path a loader will
//! later search for. Nothing here touches the filesystem or the host.
//!
//! # Sub-modules
//!
//! - [`attributes`] - Input and validated attribute sets.
//! - [`error`] - Semantic error types for validation failures.
//! - [`naming`] - The encoding of attributes into a `PrebuildName`.
//! - [`tag`] - Separator-free name components (`Tag`).

pub mod attributes;
pub mod error;
pub mod naming;
pub mod tag;
