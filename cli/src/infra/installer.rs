//! Package installer collaborator: implements `RuntimeInstaller` with
//! `python -m venv` and the environment's own `pip`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{CommandRunner, RuntimeInstaller};

/// Dependency installs can download large wheels.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

pub struct PipInstaller<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> PipInstaller<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!(program, ?args, "installer step");
        let output = self
            .runner
            .run_with_timeout(program, args, INSTALL_TIMEOUT)
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}

impl<R: CommandRunner> RuntimeInstaller for PipInstaller<R> {
    async fn create_env(&self, interpreter: &str, env_dir: &Path) -> Result<()> {
        let env = env_dir
            .to_str()
            .context("environment path is not valid UTF-8")?;
        self.run_checked(interpreter, &["-m", "venv", env]).await
    }

    async fn install_manifest(&self, env_dir: &Path, manifest: &Path) -> Result<()> {
        let pip = env_dir.join("bin").join("pip");
        let pip = pip.to_str().context("pip path is not valid UTF-8")?;
        let manifest = manifest
            .to_str()
            .context("manifest path is not valid UTF-8")?;
        self.run_checked(pip, &["install", "-r", manifest]).await
    }
}
