//! Unit tests for the bootstrap service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use portfleet_cli::application::services::bootstrap::{BootstrapRequest, bootstrap};
use portfleet_cli::domain::error::ValidationError;
use portfleet_cli::domain::report::Outcome;

use crate::helpers::WORKDIR;
use crate::mocks::{FakeHost, RecordingInstaller, RecordingReporter};

fn request(manifest: &Path) -> BootstrapRequest<'_> {
    BootstrapRequest {
        working_directory: Path::new(WORKDIR),
        runtime_dir: "venv",
        interpreter: "python3",
        manifest,
    }
}

#[tokio::test]
async fn bootstrap_creates_missing_environment_then_installs() {
    let host = FakeHost::default().without("/opt/ocr/venv/bin/python");
    let installer = RecordingInstaller::default();
    let manifest = PathBuf::from("requirements.txt");

    let report = bootstrap(
        &request(&manifest),
        &host,
        &installer,
        &RecordingReporter::default(),
    )
    .await
    .expect("bootstrap succeeds");

    assert!(report.env_created);
    assert_eq!(report.env_dir, PathBuf::from("/opt/ocr/venv"));
    assert_eq!(report.manifest, PathBuf::from("/opt/ocr/requirements.txt"));
    assert_eq!(
        *installer.calls.borrow(),
        vec![
            "venv python3 /opt/ocr/venv".to_string(),
            "install /opt/ocr/venv /opt/ocr/requirements.txt".to_string(),
        ]
    );
}

#[tokio::test]
async fn bootstrap_reuses_existing_environment() {
    let installer = RecordingInstaller::default();
    let reporter = RecordingReporter::default();
    let manifest = PathBuf::from("/srv/reqs.txt");

    let report = bootstrap(
        &request(&manifest),
        &FakeHost::default(),
        &installer,
        &reporter,
    )
    .await
    .expect("bootstrap succeeds");

    assert!(!report.env_created);
    assert_eq!(
        *installer.calls.borrow(),
        vec!["install /opt/ocr/venv /srv/reqs.txt".to_string()]
    );
    assert!(
        reporter
            .messages
            .borrow()
            .contains(&"step: Reusing environment /opt/ocr/venv".to_string())
    );
}

#[tokio::test]
async fn missing_manifest_is_a_validation_error() {
    let host = FakeHost::default().without("/opt/ocr/requirements.txt");
    let installer = RecordingInstaller::default();
    let manifest = PathBuf::from("requirements.txt");

    let err = bootstrap(
        &request(&manifest),
        &host,
        &installer,
        &RecordingReporter::default(),
    )
    .await
    .expect_err("missing manifest");

    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::PathNotReadable {
            what: "Dependency manifest",
            ..
        })
    ));
    assert_eq!(Outcome::from_error(&err), Outcome::ValidationFailed);
    assert!(installer.calls.borrow().is_empty());
}

#[tokio::test]
async fn runtime_dir_escaping_workdir_is_rejected() {
    let manifest = PathBuf::from("requirements.txt");
    let mut req = request(&manifest);
    req.runtime_dir = "../elsewhere";

    let err = bootstrap(
        &req,
        &FakeHost::default(),
        &RecordingInstaller::default(),
        &RecordingReporter::default(),
    )
    .await
    .expect_err("runtime dir rejected");
    assert_eq!(Outcome::from_error(&err), Outcome::ValidationFailed);
}

#[tokio::test]
async fn workdir_must_be_a_directory() {
    let manifest = PathBuf::from("requirements.txt");
    let mut req = request(&manifest);
    req.working_directory = Path::new("/srv/missing");

    let err = bootstrap(
        &req,
        &FakeHost::default(),
        &RecordingInstaller::default(),
        &RecordingReporter::default(),
    )
    .await
    .expect_err("workdir rejected");
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::NotADirectory(_))
    ));
}

#[tokio::test]
async fn installer_failure_propagates_as_fatal() {
    let installer = RecordingInstaller {
        fail_install: true,
        ..RecordingInstaller::default()
    };
    let manifest = PathBuf::from("requirements.txt");

    let err = bootstrap(
        &request(&manifest),
        &FakeHost::default(),
        &installer,
        &RecordingReporter::default(),
    )
    .await
    .expect_err("installer failure");

    let message = format!("{err:#}");
    assert!(message.contains("installing /opt/ocr/requirements.txt"), "got: {message}");
    assert!(message.contains("No matching distribution"), "got: {message}");
    assert_eq!(Outcome::from_error(&err), Outcome::Fatal);
}
