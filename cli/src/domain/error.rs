//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Bad input. Raised before any file or service-manager interaction, so the
/// caller can fix the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required setting: {0}. Pass --{0} or set it in the fleet file.")]
    MissingField(&'static str),

    #[error("Invalid port list '{expr}': {reason}")]
    InvalidPortList { expr: String, reason: String },

    #[error("No ports given. At least one port is required.")]
    EmptyPorts,

    #[error("Port 0 is not a valid instance port.")]
    ZeroPort,

    #[error("Port {0} is listed more than once.")]
    DuplicatePort(u16),

    #[error(
        "Invalid name prefix '{0}': must start with a letter, contain only letters, digits and \
         hyphens, not end with a digit, and be at most 64 characters"
    )]
    InvalidPrefix(String),

    #[error("Invalid {field} '{value}': control characters are not allowed")]
    ControlCharacters { field: &'static str, value: String },

    #[error("Invalid {field}: path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { field: &'static str, path: PathBuf },

    #[error("Invalid {field} '{}': must be an absolute path", .path.display())]
    RelativePath { field: &'static str, path: PathBuf },

    #[error("Invalid runtime directory '{0}': must be a relative path without '..'")]
    InvalidRuntimeDir(String),

    #[error("Invalid restart policy '{0}'. Valid values: never, on-failure, always")]
    InvalidRestartPolicy(String),

    #[error("{what} not found or not readable: {}", .path.display())]
    PathNotReadable { what: &'static str, path: PathBuf },

    #[error("Working directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("User '{0}' does not exist on this host.")]
    UnknownUser(String),

    #[error("Group '{0}' does not exist on this host.")]
    UnknownGroup(String),

    #[error("Invalid fleet file {}: {reason}", .path.display())]
    InvalidFleetFile { path: PathBuf, reason: String },

    #[error("Cannot look up {what} '{name}': {reason}")]
    IdentityLookup {
        what: &'static str,
        name: String,
        reason: String,
    },
}

// ── Render errors ─────────────────────────────────────────────────────────────

/// Template composition failure. Valid input never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Port {0} is not declared in the service spec.")]
    PortNotDeclared(u16),

    #[error("{field} is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { field: &'static str, path: PathBuf },
}

// ── Write errors ──────────────────────────────────────────────────────────────

/// Filesystem failure on a unit definition.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot read unit definition {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write unit definition {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot remove unit definition {}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Service manager errors ────────────────────────────────────────────────────

/// A single service-manager request that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceManagerError {
    #[error("{action} {unit} failed (exit {}): {stderr}", exit_label(.code))]
    CommandFailed {
        action: &'static str,
        unit: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("service manager unreachable: {0}")]
    Unreachable(String),
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

// ── Operation errors ──────────────────────────────────────────────────────────

/// Fatal outcome of `apply`. Per-unit start/enable failures are not errors;
/// they are recorded in the report.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("internal error while rendering unit definitions: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("unit definitions were written but the service manager reload failed: {0}")]
    Reload(#[source] ServiceManagerError),

    #[error("cannot start units: {0}")]
    Unreachable(#[source] ServiceManagerError),
}

/// Fatal outcome of `decommission`. Already-absent units are not errors.
#[derive(Debug, Error)]
pub enum DecommissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("unit definitions were removed but the service manager reload failed: {0}")]
    Reload(#[source] ServiceManagerError),

    #[error("cannot stop units: {0}")]
    Unreachable(#[source] ServiceManagerError),
}
