//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use serde::Serialize;

pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::bootstrap::BootstrapReport;
use crate::domain::report::{ApplyReport, DecommissionReport, UnitStatus};
use crate::domain::unit::ServiceUnit;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// JSON view of a rendered definition.
#[derive(Serialize)]
struct RenderedUnit<'a> {
    name: &'a str,
    path: String,
    content: &'a str,
}

/// Prints command results as JSON envelopes on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn emit<T: Serialize>(command: &str, outcome: &str, result: &T) -> Result<()> {
        println!("{}", json::envelope(command, outcome, result)?);
        Ok(())
    }
}

/// Output mode dispatch chosen once per invocation.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_apply(&self, report: &ApplyReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_apply(report);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::emit("provision", report.outcome().label(), report),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_decommission(&self, report: &DecommissionReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_decommission(report);
                Ok(())
            }
            Self::Json(_) => {
                JsonRenderer::emit("decommission", report.outcome().label(), report)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, statuses: &[UnitStatus]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_status(statuses);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::emit("status", "success", &statuses),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_units(&self, units: &[ServiceUnit]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_units(units);
                Ok(())
            }
            Self::Json(_) => {
                let views: Vec<RenderedUnit<'_>> = units
                    .iter()
                    .map(|u| RenderedUnit {
                        name: &u.name,
                        path: u.definition_path.display().to_string(),
                        content: &u.rendered_content,
                    })
                    .collect();
                JsonRenderer::emit("render", "success", &views)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_bootstrap(&self, report: &BootstrapReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_bootstrap(report);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::emit("bootstrap", "success", report),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => {
                let obj = serde_json::json!({ "version": version });
                println!("{}", serde_json::to_string_pretty(&obj)?);
                Ok(())
            }
        }
    }
}
