//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::error::{ServiceManagerError, WriteError};
use crate::domain::unit::UnitState;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// Operations consumed from the OS service manager. Unit names are passed
/// with their `.service` suffix. Every call blocks until the manager answers.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Re-read all unit definitions.
    async fn reload(&self) -> Result<(), ServiceManagerError>;
    async fn start(&self, unit: &str) -> Result<(), ServiceManagerError>;
    async fn enable(&self, unit: &str) -> Result<(), ServiceManagerError>;
    async fn stop(&self, unit: &str) -> Result<(), ServiceManagerError>;
    async fn disable(&self, unit: &str) -> Result<(), ServiceManagerError>;
    /// Observe the live state of a unit.
    async fn status(&self, unit: &str) -> Result<UnitState, ServiceManagerError>;
}

// ── Unit Store Port ───────────────────────────────────────────────────────────

/// Persistence for unit definition files.
pub trait UnitStore {
    /// Directory that holds the definitions.
    fn root(&self) -> &Path;
    /// Current bytes of a definition, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, WriteError>;
    /// Replace a definition atomically: readers see either the old or the new
    /// content, never a partial file.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<(), WriteError>;
    /// Delete a definition. Returns `false` if it was already absent.
    fn remove(&self, path: &Path) -> Result<bool, WriteError>;
}

// ── Host Probe Port ───────────────────────────────────────────────────────────

/// Host facts needed to validate a spec.
pub trait HostProbe {
    /// Path exists and can be opened for reading.
    fn is_readable(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// Whether the user name resolves on this host.
    fn user_exists(&self, name: &str) -> Result<bool>;
    /// Whether the group name resolves on this host.
    fn group_exists(&self, name: &str) -> Result<bool>;
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Abstracts instance port checks so status can be tested without real
/// network access.
#[allow(async_fn_in_trait)]
pub trait PortProbe {
    /// Whether something accepts TCP connections on `host:port`.
    async fn is_listening(&self, host: &str, port: u16) -> bool;
}

// ── Runtime Installer Port ────────────────────────────────────────────────────

/// The package installer collaborator used by `bootstrap`.
#[allow(async_fn_in_trait)]
pub trait RuntimeInstaller {
    /// Create a runtime environment at `env_dir` using `interpreter`.
    async fn create_env(&self, interpreter: &str, env_dir: &Path) -> Result<()>;
    /// Install the dependencies declared in `manifest` into `env_dir`.
    async fn install_manifest(&self, env_dir: &Path, manifest: &Path) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
