//! Shared test helpers: process output constructors and sample specs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use portfleet_cli::domain::spec::{RestartPolicy, ServiceSpec};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Specs ────────────────────────────────────────────────────────────────────

pub const UNIT_DIR: &str = "/etc/systemd/system";
pub const WORKDIR: &str = "/opt/ocr";

/// The OCR fleet used throughout the service tests.
pub fn ocr_spec(ports: &[u16]) -> ServiceSpec {
    ServiceSpec {
        name_prefix: "ocr-".to_string(),
        ports: ports.to_vec(),
        working_directory: PathBuf::from(WORKDIR),
        runtime_executable: PathBuf::from("/opt/ocr/venv/bin/python"),
        entry_script: PathBuf::from("StupidOCR.py"),
        owning_user: "ocr".to_string(),
        owning_group: "ocr".to_string(),
        restart_policy: RestartPolicy::Always,
        description: None,
        runtime_dir: "venv".to_string(),
    }
}

/// `ocr-6691.service` etc.
pub fn unit_files(ports: &[u16]) -> Vec<String> {
    ports.iter().map(|p| format!("ocr-{p}.service")).collect()
}
