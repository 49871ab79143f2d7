//! Application service: prepare the runtime environment the instances run in.
//!
//! Creates `<workdir>/<runtime_dir>` when it has no interpreter yet and
//! installs the dependency manifest into it. Re-running reuses the existing
//! environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::application::ports::{HostProbe, ProgressReporter, RuntimeInstaller};
use crate::domain::error::ValidationError;
use crate::domain::spec::validate_runtime_dir;

/// Inputs to `bootstrap`.
pub struct BootstrapRequest<'a> {
    pub working_directory: &'a Path,
    pub runtime_dir: &'a str,
    /// Interpreter used to create the environment, e.g. `python3`.
    pub interpreter: &'a str,
    /// Relative manifests resolve against `working_directory`.
    pub manifest: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub env_dir: PathBuf,
    /// `false` when an existing environment was reused.
    pub env_created: bool,
    pub manifest: PathBuf,
}

/// Interpreter inside an environment directory.
#[must_use]
pub fn env_interpreter(env_dir: &Path) -> PathBuf {
    env_dir.join("bin").join("python")
}

/// Create (if needed) the runtime environment and install the manifest.
///
/// # Errors
///
/// Returns a `ValidationError` for bad input, or the installer's error.
pub async fn bootstrap(
    request: &BootstrapRequest<'_>,
    host: &impl HostProbe,
    installer: &impl RuntimeInstaller,
    reporter: &impl ProgressReporter,
) -> Result<BootstrapReport> {
    validate_runtime_dir(request.runtime_dir)?;
    let workdir = request.working_directory;
    if !host.is_dir(workdir) {
        return Err(ValidationError::NotADirectory(workdir.to_path_buf()).into());
    }
    let manifest = if request.manifest.is_absolute() {
        request.manifest.to_path_buf()
    } else {
        workdir.join(request.manifest)
    };
    if !host.is_readable(&manifest) {
        return Err(ValidationError::PathNotReadable {
            what: "Dependency manifest",
            path: manifest,
        }
        .into());
    }

    let env_dir = workdir.join(request.runtime_dir);
    let env_created = if host.is_readable(&env_interpreter(&env_dir)) {
        reporter.step(&format!("Reusing environment {}", env_dir.display()));
        false
    } else {
        reporter.step(&format!("Creating environment {}...", env_dir.display()));
        installer
            .create_env(request.interpreter, &env_dir)
            .await
            .with_context(|| format!("creating environment {}", env_dir.display()))?;
        info!(env = %env_dir.display(), "runtime environment created");
        true
    };

    reporter.step(&format!("Installing {}...", manifest.display()));
    installer
        .install_manifest(&env_dir, &manifest)
        .await
        .with_context(|| format!("installing {}", manifest.display()))?;
    reporter.success("Dependencies installed");

    Ok(BootstrapReport {
        env_dir,
        env_created,
        manifest,
    })
}
