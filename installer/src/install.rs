//! The publish pipeline.
//!
//! [`install`] copies a built binary into `<base_dir>/prebuilds` under its
//! canonical name, optionally strips it, and copies auxiliary files next to
//! it. Steps run strictly in sequence and the first error aborts the rest;
//! files already written by earlier steps are left in place.

use crate::artefact::attributes::CompatibilityAttributes;
use crate::artefact::naming::{PREBUILDS_DIR, PrebuildName};
use crate::config::InstallConfig;
use crate::error::{InstallerError, Result};
use crate::strip::{CommandExecutor, StripOutcome, strip_symbols};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;

/// What a publish did, or would do in a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Canonical identifier of the prebuild, relative to `prebuilds/`.
    pub prebuild_name: String,
    /// Full path of the published binary.
    pub destination: Utf8PathBuf,
    /// Directory holding the binary and its extra files.
    pub destination_dir: Utf8PathBuf,
    /// Result of the strip step.
    pub strip: StripOutcome,
    /// Destinations of the copied extra files, in copy order.
    pub extra_files: Vec<Utf8PathBuf>,
    /// Whether this report describes a dry run.
    pub dry_run: bool,
}

/// An extra file and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedCopy {
    from: Utf8PathBuf,
    to: Utf8PathBuf,
}

/// Publish the binary described by `config`.
///
/// # Errors
///
/// Returns [`InstallerError::SourceNotFound`] before touching the filesystem
/// when the built binary is missing, [`InstallerError::InvalidAttributes`]
/// when the attributes cannot be encoded, [`InstallerError::InvalidExtraFile`]
/// for an extra file entry without a file name, and
/// [`InstallerError::CreateDirFailed`] or [`InstallerError::CopyFailed`] when
/// a filesystem step fails. Stripping problems are never errors.
pub fn install(config: &InstallConfig, executor: &dyn CommandExecutor) -> Result<InstallReport> {
    let source = under_base(&config.base_dir, &config.source);
    ensure_regular_file(&source)?;

    let attributes = CompatibilityAttributes::try_from(&config.attributes)?;
    let prebuild_name = PrebuildName::new(&attributes);
    let destination_dir = config
        .base_dir
        .join(PREBUILDS_DIR)
        .join(prebuild_name.directory());
    let destination = destination_dir.join(prebuild_name.filename());
    let extra_copies = plan_extra_files(config, &destination_dir, prebuild_name.filename())?;

    debug!("publishing {source} as {prebuild_name}");

    if config.options.dry_run {
        info!("dry run: would publish {source} to {destination}");
        return Ok(InstallReport {
            prebuild_name: prebuild_name.to_string(),
            destination,
            destination_dir,
            strip: StripOutcome::NotAttempted,
            extra_files: extra_copies.into_iter().map(|copy| copy.to).collect(),
            dry_run: true,
        });
    }

    fs::create_dir_all(&destination_dir).map_err(|source_err| InstallerError::CreateDirFailed {
        path: destination_dir.clone(),
        source: source_err,
    })?;

    copy_file(&source, &destination)?;
    info!("published {destination}");

    let strip = if config.options.strip {
        strip_symbols(
            executor,
            config.os_family,
            &destination,
            config.options.strip_timeout,
        )
    } else {
        StripOutcome::NotAttempted
    };

    let mut extra_files = Vec::with_capacity(extra_copies.len());
    for copy in extra_copies {
        copy_file(&copy.from, &copy.to)?;
        debug!("copied extra file {} to {}", copy.from, copy.to);
        extra_files.push(copy.to);
    }

    Ok(InstallReport {
        prebuild_name: prebuild_name.to_string(),
        destination,
        destination_dir,
        strip,
        extra_files,
        dry_run: false,
    })
}

/// Fail with `SourceNotFound` unless `path` is a regular file.
fn ensure_regular_file(path: &Utf8Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) | Err(_) => Err(InstallerError::SourceNotFound {
            path: path.to_owned(),
        }),
    }
}

/// Map every extra file onto its flattened destination.
///
/// Entries sharing a file name overwrite each other; the last one wins. An
/// entry named like the binary itself is rejected.
fn plan_extra_files(
    config: &InstallConfig,
    destination_dir: &Utf8Path,
    binary_name: &str,
) -> Result<Vec<PlannedCopy>> {
    let mut seen = HashSet::new();
    config
        .options
        .extra_files
        .iter()
        .map(|entry| -> Result<PlannedCopy> {
            let file_name = entry
                .file_name()
                .ok_or_else(|| InstallerError::InvalidExtraFile {
                    path: entry.clone(),
                    reason: "it has no file name",
                })?;
            if file_name == binary_name {
                return Err(InstallerError::InvalidExtraFile {
                    path: entry.clone(),
                    reason: "it would overwrite the published binary",
                });
            }
            if !seen.insert(file_name.to_owned()) {
                warn!("extra file {entry} overwrites an earlier extra file named {file_name}");
            }
            Ok(PlannedCopy {
                from: under_base(&config.base_dir, entry),
                to: destination_dir.join(file_name),
            })
        })
        .collect()
}

/// Join `path` below `base`, treating an absolute `path` as relative.
fn under_base(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    let relative: Utf8PathBuf = path
        .components()
        .filter(|component| !matches!(component, Utf8Component::RootDir | Utf8Component::Prefix(_)))
        .collect();
    base.join(relative)
}

/// Copy `from` over `to`, leaving the file alone when both name the same file.
fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    if is_same_file(from, to) {
        debug!("{from} is already in place");
        return Ok(());
    }
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| InstallerError::CopyFailed {
            from: from.to_owned(),
            to: to.to_owned(),
            source,
        })
}

fn is_same_file(a: &Utf8Path, b: &Utf8Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
