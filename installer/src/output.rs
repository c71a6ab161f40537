//! Rendering of install reports.
//!
//! Human output goes to stderr line by line; JSON output is a single
//! document intended for scripts.

use crate::install::InstallReport;
use crate::strip::StripOutcome;

/// Line printed once a publish has completed.
pub const DONE_MESSAGE: &str = "Done";

/// Format a report for humans.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use pkg_prebuilds::install::InstallReport;
/// use pkg_prebuilds::output::format_human;
/// use pkg_prebuilds::strip::StripOutcome;
///
/// let report = InstallReport {
///     prebuild_name: "foo-linux-x64/napi-v8.node".to_owned(),
///     destination: Utf8PathBuf::from("prebuilds/foo-linux-x64/napi-v8.node"),
///     destination_dir: Utf8PathBuf::from("prebuilds/foo-linux-x64"),
///     strip: StripOutcome::NotAttempted,
///     extra_files: Vec::new(),
///     dry_run: false,
/// };
/// assert!(format_human(&report).contains("Published prebuilds/foo-linux-x64/napi-v8.node"));
/// ```
#[must_use]
pub fn format_human(report: &InstallReport) -> String {
    let verb = if report.dry_run {
        "Would publish"
    } else {
        "Published"
    };
    let mut output = format!("{verb} {}\n", report.destination);

    match &report.strip {
        StripOutcome::NotAttempted => {}
        StripOutcome::Succeeded => output.push_str("  Stripped debug symbols\n"),
        StripOutcome::Failed { reason } => {
            output.push_str(&format!("  Warning: symbols not stripped: {reason}\n"));
        }
    }

    if !report.extra_files.is_empty() {
        let plural = if report.extra_files.len() == 1 {
            "file"
        } else {
            "files"
        };
        output.push_str(&format!("  Extra {plural}:\n"));
        for path in &report.extra_files {
            output.push_str(&format!("    {path}\n"));
        }
    }

    if report.dry_run {
        output.push_str("Dry run - no files were modified\n");
    } else {
        output.push_str(DONE_MESSAGE);
        output.push('\n');
    }

    output
}

/// Format a report as pretty-printed JSON.
#[must_use]
pub fn format_json(report: &InstallReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_owned())
}
