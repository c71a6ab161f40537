//! Prebuild publisher CLI entrypoint.
//!
//! This binary copies a built native add-on into `prebuilds/` under its
//! canonical name, optionally strips it, and copies extra files next to it.

use clap::Parser;
use pkg_prebuilds::cli::Cli;
use pkg_prebuilds::config::InstallConfig;
use pkg_prebuilds::error::Result;
use pkg_prebuilds::host::HostEnvironment;
use pkg_prebuilds::install::{InstallReport, install};
use pkg_prebuilds::output::{format_human, format_json};
use pkg_prebuilds::strip::{CommandExecutor, SystemCommandExecutor};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_filter().as_str()),
    )
    .init();

    let config = InstallConfig::from_cli(&cli, &HostEnvironment::detect());
    let mut stderr = std::io::stderr();
    let mut stdout = std::io::stdout();
    let run_result = run(&cli, &config, &SystemCommandExecutor, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    config: &InstallConfig,
    executor: &dyn CommandExecutor,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let report = install(config, executor)?;
    report_result(cli, &report, stdout, stderr);
    Ok(())
}

/// Prints the report as JSON on stdout or as text on stderr.
fn report_result(
    cli: &Cli,
    report: &InstallReport,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) {
    if cli.json {
        write_line(stdout, format_json(report));
    } else if !cli.quiet {
        if write!(stderr, "{}", format_human(report)).is_err() {
            // Best-effort output; ignore write failures.
        }
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, err);
            1
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
