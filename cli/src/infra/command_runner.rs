//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` runs external programs (`systemctl`, `python`, `pip`)
//! with a hard timeout; a child that outlives it is killed.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::application::ports::CommandRunner;

/// Default timeout for service manager requests.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(90);

/// Production `CommandRunner` backed by `tokio::process`.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

async fn read_all<S: AsyncRead + Unpin>(stream: Option<S>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut s) = stream {
        let _ = s.read_to_end(&mut buf).await;
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        debug!(program, ?args, "running");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) =
                    tokio::join!(child.wait(), read_all(stdout), read_all(stderr));
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", timeout.as_secs())
            }
        }
    }
}
