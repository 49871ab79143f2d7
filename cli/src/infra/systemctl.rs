//! Infrastructure implementation of the `ServiceManager` port.
//!
//! `SystemctlManager<R>` routes every request through `systemctl` via a
//! `CommandRunner`. Requests are synchronous from systemd's point of view:
//! each call returns once the manager has answered.

use std::process::Output;

use tracing::debug;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::error::ServiceManagerError;
use crate::domain::unit::UnitState;

/// Default service manager binary.
pub const SYSTEMCTL: &str = "systemctl";

/// Environment variable overriding the `systemctl` binary path.
pub const SYSTEMCTL_ENV: &str = "PORTFLEET_SYSTEMCTL";

/// `$PORTFLEET_SYSTEMCTL` when set, `systemctl` otherwise.
#[must_use]
pub fn program_from_env() -> String {
    std::env::var(SYSTEMCTL_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| SYSTEMCTL.to_string())
}

/// Generic over `R: CommandRunner` so tests can inject a mock runner
/// without touching the real service manager.
pub struct SystemctlManager<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> SystemctlManager<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// The underlying command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn invoke(&self, args: &[&str]) -> Result<Output, ServiceManagerError> {
        debug!(program = %self.program, ?args, "service manager request");
        self.runner
            .run(&self.program, args)
            .await
            .map_err(|e| ServiceManagerError::Unreachable(format!("{e:#}")))
    }

    async fn request(
        &self,
        action: &'static str,
        unit: &str,
        args: &[&str],
    ) -> Result<(), ServiceManagerError> {
        let output = self.invoke(args).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ServiceManagerError::CommandFailed {
                action,
                unit: unit.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl<R: CommandRunner> ServiceManager for SystemctlManager<R> {
    async fn reload(&self) -> Result<(), ServiceManagerError> {
        self.request("daemon-reload", "*", &["daemon-reload"]).await
    }

    async fn start(&self, unit: &str) -> Result<(), ServiceManagerError> {
        self.request("start", unit, &["start", unit]).await
    }

    async fn enable(&self, unit: &str) -> Result<(), ServiceManagerError> {
        self.request("enable", unit, &["enable", unit]).await
    }

    async fn stop(&self, unit: &str) -> Result<(), ServiceManagerError> {
        self.request("stop", unit, &["stop", unit]).await
    }

    async fn disable(&self, unit: &str) -> Result<(), ServiceManagerError> {
        self.request("disable", unit, &["disable", unit]).await
    }

    async fn status(&self, unit: &str) -> Result<UnitState, ServiceManagerError> {
        let output = self
            .invoke(&["show", "-p", "LoadState,ActiveState", unit])
            .await?;
        if !output.status.success() {
            return Err(ServiceManagerError::CommandFailed {
                action: "show",
                unit: unit.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(parse_show_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Map `systemctl show -p LoadState,ActiveState` output onto `UnitState`.
#[must_use]
pub fn parse_show_output(stdout: &str) -> UnitState {
    let mut load = "";
    let mut active = "";
    for line in stdout.lines() {
        match line.trim().split_once('=') {
            Some(("LoadState", v)) => load = v,
            Some(("ActiveState", v)) => active = v,
            _ => {}
        }
    }
    if load == "not-found" {
        return UnitState::Absent;
    }
    match active {
        "active" | "activating" | "reloading" => UnitState::Running,
        "failed" => UnitState::Failed,
        _ => UnitState::Stopped,
    }
}
