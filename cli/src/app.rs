//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once from the top-level flags: output mode, the
//! loaded fleet file, the resolved unit directory, and prompt behaviour.
//! Adapters are constructed on demand so commands that never touch the
//! service manager never spawn it.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::config::{FleetFile, resolve_unit_dir};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlFleetLoader;
use crate::infra::systemctl::{SystemctlManager, program_from_env};
use crate::infra::unit_store::FsUnitStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Environment variable overriding the unit directory.
pub const UNIT_DIR_ENV: &str = "PORTFLEET_UNIT_DIR";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    /// Skip interactive prompts (also set by `CI` / `PORTFLEET_YES`).
    pub yes: bool,
    /// Explicit fleet file.
    pub file: Option<PathBuf>,
    /// Explicit unit directory.
    pub unit_dir: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Quiet in JSON mode so stdout stays JSON.
    pub output: OutputContext,
    pub mode: OutputMode,
    /// Fleet file contents; empty when none was found.
    pub fleet: FleetFile,
    /// Directory holding unit definitions.
    pub unit_dir: PathBuf,
    /// Service manager binary.
    pub systemctl: String,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the fleet file cannot be read or parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("PORTFLEET_YES").is_ok();
        let non_interactive = flags.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let fleet = YamlFleetLoader::load(flags.file.as_deref())?;
        let env_unit_dir = std::env::var_os(UNIT_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let unit_dir = resolve_unit_dir(flags.unit_dir.clone(), env_unit_dir, &fleet);

        Ok(Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            fleet,
            unit_dir,
            systemctl: program_from_env(),
            non_interactive,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Unit store rooted at the resolved unit directory.
    #[must_use]
    pub fn unit_store(&self) -> FsUnitStore {
        FsUnitStore::new(&self.unit_dir)
    }

    /// Service manager honouring `PORTFLEET_SYSTEMCTL`.
    #[must_use]
    pub fn service_manager(&self) -> SystemctlManager<TokioCommandRunner> {
        SystemctlManager::new(TokioCommandRunner::default(), self.systemctl.as_str())
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `PORTFLEET_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
