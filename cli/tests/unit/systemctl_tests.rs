//! Unit tests for the `systemctl` and `pip` adapters.
//!
//! These verify the argument lists each request produces and how process
//! results map onto `ServiceManagerError` and `UnitState`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use portfleet_cli::application::ports::{RuntimeInstaller, ServiceManager};
use portfleet_cli::domain::error::ServiceManagerError;
use portfleet_cli::domain::unit::UnitState;
use portfleet_cli::infra::installer::PipInstaller;
use portfleet_cli::infra::systemctl::SystemctlManager;

use crate::helpers::{err_output, ok_output};
use crate::mocks::MockCommandRunner;

fn manager(runner: MockCommandRunner) -> SystemctlManager<MockCommandRunner> {
    SystemctlManager::new(runner, "/usr/bin/systemctl")
}

// ── Requests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lifecycle_requests_pass_action_and_unit() {
    let runner = MockCommandRunner::with_outputs(vec![
        Ok(ok_output(b"")),
        Ok(ok_output(b"")),
        Ok(ok_output(b"")),
        Ok(ok_output(b"")),
        Ok(ok_output(b"")),
    ]);
    let mgr = manager(runner);

    mgr.reload().await.expect("reload");
    mgr.start("ocr-6691.service").await.expect("start");
    mgr.enable("ocr-6691.service").await.expect("enable");
    mgr.stop("ocr-6691.service").await.expect("stop");
    mgr.disable("ocr-6691.service").await.expect("disable");

    let calls = mgr.runner().calls.borrow().clone();
    assert!(calls.iter().all(|(program, _)| program == "/usr/bin/systemctl"));
    let args: Vec<Vec<String>> = calls.into_iter().map(|(_, a)| a).collect();
    assert_eq!(
        args,
        vec![
            vec!["daemon-reload".to_string()],
            vec!["start".to_string(), "ocr-6691.service".to_string()],
            vec!["enable".to_string(), "ocr-6691.service".to_string()],
            vec!["stop".to_string(), "ocr-6691.service".to_string()],
            vec!["disable".to_string(), "ocr-6691.service".to_string()],
        ]
    );
}

#[tokio::test]
async fn non_zero_exit_is_command_failed_with_trimmed_stderr() {
    let mgr = manager(MockCommandRunner::with_outputs(vec![Ok(err_output(
        5,
        b"Failed to start ocr-6691.service: Unit not found.\n",
    ))]));

    let err = mgr.start("ocr-6691.service").await.unwrap_err();

    assert_eq!(
        err,
        ServiceManagerError::CommandFailed {
            action: "start",
            unit: "ocr-6691.service".to_string(),
            code: Some(5),
            stderr: "Failed to start ocr-6691.service: Unit not found.".to_string(),
        }
    );
}

#[tokio::test]
async fn spawn_failure_is_unreachable() {
    let mgr = manager(MockCommandRunner::with_outputs(vec![Err(anyhow::anyhow!(
        "failed to spawn systemctl"
    ))]));

    let err = mgr.reload().await.unwrap_err();

    assert!(
        matches!(&err, ServiceManagerError::Unreachable(msg) if msg.contains("failed to spawn")),
        "got: {err:?}"
    );
}

// ── Status ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_queries_load_and_active_state() {
    let mgr = manager(MockCommandRunner::with_outputs(vec![Ok(ok_output(
        b"LoadState=loaded\nActiveState=active\n",
    ))]));

    let state = mgr.status("ocr-6691.service").await.expect("status");

    assert_eq!(state, UnitState::Running);
    assert_eq!(
        mgr.runner().args(0),
        vec!["show", "-p", "LoadState,ActiveState", "ocr-6691.service"]
    );
}

#[tokio::test]
async fn status_maps_not_found_to_absent() {
    let mgr = manager(MockCommandRunner::with_outputs(vec![Ok(ok_output(
        b"LoadState=not-found\nActiveState=inactive\n",
    ))]));
    assert_eq!(
        mgr.status("ocr-6699.service").await.expect("status"),
        UnitState::Absent
    );
}

#[tokio::test]
async fn status_failure_is_reported_as_show() {
    let mgr = manager(MockCommandRunner::with_outputs(vec![Ok(err_output(
        1,
        b"Failed to connect to bus",
    ))]));
    let err = mgr.status("ocr-6691.service").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceManagerError::CommandFailed { action: "show", .. }
    ));
}

// ── Installer ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn installer_creates_venv_and_installs_with_env_pip() {
    let installer = PipInstaller::new(MockCommandRunner::with_outputs(vec![
        Ok(ok_output(b"")),
        Ok(ok_output(b"Successfully installed")),
    ]));

    installer
        .create_env("python3", Path::new("/opt/ocr/venv"))
        .await
        .expect("venv");
    installer
        .install_manifest(
            Path::new("/opt/ocr/venv"),
            Path::new("/opt/ocr/requirements.txt"),
        )
        .await
        .expect("install");

    let calls = installer.runner().calls.borrow().clone();
    assert_eq!(
        calls,
        vec![
            (
                "python3".to_string(),
                vec!["-m".to_string(), "venv".to_string(), "/opt/ocr/venv".to_string()]
            ),
            (
                "/opt/ocr/venv/bin/pip".to_string(),
                vec![
                    "install".to_string(),
                    "-r".to_string(),
                    "/opt/ocr/requirements.txt".to_string()
                ]
            ),
        ]
    );
}

#[tokio::test]
async fn installer_failure_carries_stderr() {
    let installer = PipInstaller::new(MockCommandRunner::with_outputs(vec![Ok(err_output(
        1,
        b"ERROR: No matching distribution found for paddleocr\n",
    ))]));

    let err = installer
        .install_manifest(Path::new("/opt/ocr/venv"), Path::new("reqs.txt"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("/opt/ocr/venv/bin/pip exited with"), "got: {message}");
    assert!(message.contains("No matching distribution"), "got: {message}");
}
