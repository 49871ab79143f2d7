//! `portfleet bootstrap`: prepare the runtime environment.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::bootstrap::{BootstrapRequest, bootstrap};
use crate::domain::error::ValidationError;
use crate::domain::report::Outcome;
use crate::domain::spec::DEFAULT_RUNTIME_DIR;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::host::SystemHost;
use crate::infra::installer::PipInstaller;
use crate::output::TerminalReporter;

/// Arguments for the bootstrap command.
#[derive(Args, Debug, Clone)]
pub struct BootstrapArgs {
    /// Working directory that holds the environment and the manifest
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Environment directory under the working directory [default: venv]
    #[arg(long, value_name = "DIR")]
    pub runtime_dir: Option<String>,

    /// Interpreter used to create the environment
    #[arg(long, default_value = "python3")]
    pub python: String,

    /// Dependency manifest, relative to the working directory or absolute
    #[arg(long, default_value = "requirements.txt", value_name = "PATH")]
    pub manifest: PathBuf,
}

/// Run `portfleet bootstrap`.
///
/// # Errors
///
/// Returns an error for invalid input or a failed installer step.
pub async fn run(app: &AppContext, args: &BootstrapArgs) -> Result<Outcome> {
    let workdir = args
        .workdir
        .clone()
        .or_else(|| app.fleet.working_directory.clone())
        .ok_or(ValidationError::MissingField("workdir"))?;
    let runtime_dir = args
        .runtime_dir
        .clone()
        .or_else(|| app.fleet.runtime_dir.clone())
        .unwrap_or_else(|| DEFAULT_RUNTIME_DIR.to_string());

    let request = BootstrapRequest {
        working_directory: &workdir,
        runtime_dir: &runtime_dir,
        interpreter: &args.python,
        manifest: &args.manifest,
    };
    let installer = PipInstaller::new(TokioCommandRunner::default());
    let report = {
        let reporter = TerminalReporter::new(&app.output);
        bootstrap(&request, &SystemHost, &installer, &reporter).await?
    };

    app.renderer().render_bootstrap(&report)?;
    Ok(Outcome::Success)
}
