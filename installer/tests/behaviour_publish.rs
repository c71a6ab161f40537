//! Behaviour-driven tests for the publish pipeline.
//!
//! These scenarios run the real pipeline against a temporary base directory,
//! with a stub executor standing in for `strip`.

use camino::Utf8PathBuf;
use pkg_prebuilds::artefact::attributes::AttributeSpec;
use pkg_prebuilds::config::{InstallConfig, InstallOptions};
use pkg_prebuilds::error::InstallerError;
use pkg_prebuilds::host::OsFamily;
use pkg_prebuilds::install::{InstallReport, install};
use pkg_prebuilds::strip::StripOutcome;
use pkg_prebuilds::test_utils::{ExpectedCall, StubExecutor, failure_output};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;

const DEFAULT_SOURCE: &str = "build/Release/addon.node";
const BINARY: &[u8] = b"\x7fELF built addon";

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StripScript {
    Off,
    FailsOnLinux,
    NoRule,
}

struct PublishWorld {
    temp: Option<TempDir>,
    source: String,
    extra_files: Vec<Utf8PathBuf>,
    strip: StripScript,
    dry_run: bool,
    result: Option<Result<InstallReport, InstallerError>>,
    stub_calls: usize,
}

impl Default for PublishWorld {
    fn default() -> Self {
        Self {
            temp: None,
            source: DEFAULT_SOURCE.to_owned(),
            extra_files: Vec::new(),
            strip: StripScript::Off,
            dry_run: false,
            result: None,
            stub_calls: 0,
        }
    }
}

impl PublishWorld {
    fn base(&self) -> Utf8PathBuf {
        let temp = self.temp.as_ref().expect("base directory created");
        Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("temp dir path not UTF-8")
    }

    fn write(&self, relative: &str, contents: &[u8]) {
        let path = self.base().join(relative);
        fs::create_dir_all(path.parent().expect("has parent")).expect("create parent");
        fs::write(path, contents).expect("write file");
    }

    fn report(&self) -> &InstallReport {
        match self.result.as_ref().expect("publish ran") {
            Ok(report) => report,
            Err(err) => panic!("expected publish to succeed, got {err}"),
        }
    }
}

#[fixture]
fn world() -> PublishWorld {
    PublishWorld::default()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("an empty base directory")]
fn given_empty_base(world: &mut PublishWorld) {
    world.temp = Some(TempDir::new().expect("temp dir"));
}

#[given("a base directory containing \"{source}\"")]
fn given_base_with_source(world: &mut PublishWorld, source: String) {
    world.temp = Some(TempDir::new().expect("temp dir"));
    world.write(&source, BINARY);
    world.source = source;
}

#[given("extra files \"{a}\" and \"{b}\"")]
fn given_extra_files(world: &mut PublishWorld, a: String, b: String) {
    world.write(&a, a.as_bytes());
    world.write(&b, b.as_bytes());
    world.extra_files = vec![Utf8PathBuf::from(a), Utf8PathBuf::from(b)];
}

#[given("stripping is requested on a Linux host where strip fails")]
fn given_failing_strip(world: &mut PublishWorld) {
    world.strip = StripScript::FailsOnLinux;
}

#[given("stripping is requested on a host without a strip rule")]
fn given_no_strip_rule(world: &mut PublishWorld) {
    world.strip = StripScript::NoRule;
}

#[given("a dry run")]
fn given_dry_run(world: &mut PublishWorld) {
    world.dry_run = true;
}

#[when("the binary is published as \"{name}\" for \"{platform}\" \"{arch}\" with ABI \"{abi}\"")]
fn when_published(
    world: &mut PublishWorld,
    name: String,
    platform: String,
    arch: String,
    abi: String,
) {
    let base = world.base();
    let os_family = match world.strip {
        StripScript::Off | StripScript::FailsOnLinux => OsFamily::Linux,
        StripScript::NoRule => OsFamily::Other,
    };
    let destination = base
        .join("prebuilds")
        .join(format!("{name}-{platform}-{arch}"))
        .join(format!("napi-v{abi}.node"));

    let config = InstallConfig {
        base_dir: base,
        source: Utf8PathBuf::from(&world.source),
        attributes: AttributeSpec {
            name: Some(name),
            platform,
            arch,
            libc: None,
            abi_version: Some(abi),
            runtime: None,
        },
        options: InstallOptions {
            strip: world.strip != StripScript::Off,
            extra_files: world.extra_files.clone(),
            dry_run: world.dry_run,
            ..InstallOptions::default()
        },
        os_family,
    };

    let expected = match world.strip {
        StripScript::FailsOnLinux => vec![ExpectedCall {
            program: "strip",
            args: vec![destination.into_string(), "--strip-all".to_owned()],
            result: Ok(failure_output("strip: addon.node: file format not recognized")),
        }],
        StripScript::Off | StripScript::NoRule => Vec::new(),
    };
    let executor = StubExecutor::new(expected);

    world.result = Some(install(&config, &executor));
    world.stub_calls += executor.invocations().len();
    executor.assert_finished();
}

#[then("\"{path}\" matches the built binary")]
fn then_matches_binary(world: &mut PublishWorld, path: String) {
    let report = world.report();
    assert_eq!(report.destination, world.base().join(&path));
    let published = fs::read(world.base().join(&path)).expect("published file");
    assert_eq!(published, BINARY);
}

#[then("\"{path}\" exists")]
fn then_exists(world: &mut PublishWorld, path: String) {
    let destination = world.base().join(&path);
    assert!(world.report().extra_files.contains(&destination));
    assert!(destination.is_file(), "{path} should exist");
}

#[then("\"{path}\" does not exist")]
fn then_does_not_exist(world: &mut PublishWorld, path: String) {
    assert!(!world.base().join(&path).exists(), "{path} should not exist");
}

#[then("publishing fails because the source is missing")]
fn then_source_missing(world: &mut PublishWorld) {
    let result = world.result.as_ref().expect("publish ran");
    assert!(
        matches!(result, Err(InstallerError::SourceNotFound { .. })),
        "expected SourceNotFound, got {result:?}"
    );
}

#[then("no prebuilds directory exists")]
fn then_no_prebuilds(world: &mut PublishWorld) {
    assert!(!world.base().join("prebuilds").exists());
}

#[then("publishing succeeds with a failed strip outcome")]
fn then_failed_strip(world: &mut PublishWorld) {
    let report = world.report();
    assert!(
        matches!(
            &report.strip,
            StripOutcome::Failed { reason } if reason.contains("file format not recognized")
        ),
        "unexpected strip outcome: {:?}",
        report.strip
    );
    assert!(report.destination.is_file());
}

#[then("publishing succeeds without attempting to strip")]
fn then_strip_not_attempted(world: &mut PublishWorld) {
    assert_eq!(world.report().strip, StripOutcome::NotAttempted);
    assert_eq!(world.stub_calls, 0);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/publish.feature", name = "Publish a built binary")]
fn scenario_publish(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Publishing twice leaves identical bytes"
)]
fn scenario_publish_twice(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "A missing binary fails without writing"
)]
fn scenario_missing_binary(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Extra files are flattened next to the binary"
)]
fn scenario_extra_files(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "A failing strip is only a warning"
)]
fn scenario_failing_strip(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Stripping is skipped on hosts without a rule"
)]
fn scenario_no_strip_rule(world: PublishWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/publish.feature", name = "A dry run writes nothing")]
fn scenario_dry_run(world: PublishWorld) {
    let _ = world;
}
