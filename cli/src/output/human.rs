//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::bootstrap::BootstrapReport;
use crate::domain::report::{
    ApplyReport, DecommissionReport, RemovalOutcome, StepOutcome, UnitStatus,
};
use crate::domain::unit::{ServiceUnit, UnitState};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("portfleet {version}");
    }

    /// Render the result of `provision`.
    pub fn render_apply(&self, report: &ApplyReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&format!("Units ({}*)", report.prefix));
        for unit in &report.units {
            let line = format!(
                "{:<20} {:<36} {}",
                unit.unit,
                unit.labels().join(" · "),
                state_display(unit.live_state)
            );
            if unit.is_failed() {
                self.ctx.warn(&line);
                for (action, step) in [("start", &unit.start), ("enable", &unit.enable)] {
                    if let StepOutcome::Failed { message } = step {
                        self.ctx.kv(&format!("    {action}:"), message);
                    }
                }
            } else {
                self.ctx.success(&line);
            }
        }
        println!();
        self.ctx.info(&apply_summary(report));
    }

    /// Render the result of `decommission`.
    pub fn render_decommission(&self, report: &DecommissionReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&format!("Units ({}*)", report.prefix));
        for unit in &report.units {
            let line = format!("{:<20} {}", unit.unit, removal_display(&unit.outcome));
            if unit.outcome.is_failed() {
                self.ctx.warn(&line);
            } else {
                self.ctx.success(&line);
            }
        }
        if report.reloaded {
            println!();
            self.ctx.info("Service manager configuration reloaded");
        }
    }

    /// Render the result of `status` as a table.
    pub fn render_status(&self, statuses: &[UnitStatus]) {
        let probed = statuses.iter().any(|s| s.listening.is_some());
        let mut header = format!("{:<20} {:<6} {:<8} {:<8}", "UNIT", "PORT", "DEFINED", "STATE");
        if probed {
            header.push_str(" LISTENING");
        }
        println!("  {}", header.trim_end().style(self.ctx.styles.bold));
        for status in statuses {
            let style = self.ctx.styles.live_state(status.live_state);
            let state = state_display(status.live_state);
            let lead = format!(
                "{:<20} {:<6} {:<8}",
                status.unit,
                status.port,
                if status.defined { "yes" } else { "no" },
            );
            match status.listening {
                Some(listening) => println!(
                    "  {lead} {} {}",
                    format!("{state:<8}").style(style),
                    if listening { "yes" } else { "no" }
                ),
                None => println!("  {lead} {}", state.style(style)),
            }
        }
    }

    /// Print rendered definitions. Not suppressed by `quiet`: this is the
    /// command's output.
    pub fn render_units(&self, units: &[ServiceUnit]) {
        for (i, unit) in units.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!(
                "{}",
                format!("# {}", unit.definition_path.display()).style(self.ctx.styles.dim)
            );
            print!("{}", unit.rendered_content);
        }
    }

    /// Render the result of `bootstrap`.
    pub fn render_bootstrap(&self, report: &BootstrapReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        let env = report.env_dir.display().to_string();
        self.ctx.kv("Environment:", &env);
        self.ctx.kv(
            "Created:",
            if report.env_created { "yes" } else { "no (reused)" },
        );
        self.ctx
            .kv("Manifest:", &report.manifest.display().to_string());
    }
}

/// Live state for display; `unknown` when the query failed.
#[must_use]
pub fn state_display(state: Option<UnitState>) -> String {
    state.map_or_else(|| "unknown".to_string(), |s| s.to_string())
}

/// One-line summary of an apply report.
#[must_use]
pub fn apply_summary(report: &ApplyReport) -> String {
    let total = report.units.len();
    let changed = report.changed_count();
    let failed = report.failed_ports();
    let mut summary = format!("{total} units, {changed} definitions changed");
    if !report.reloaded {
        summary.push_str(", reload skipped");
    }
    if !failed.is_empty() {
        let ports: Vec<String> = failed.iter().map(u16::to_string).collect();
        summary.push_str(&format!(", failed: {}", ports.join(", ")));
    }
    summary
}

/// Short description of a removal outcome.
#[must_use]
pub fn removal_display(outcome: &RemovalOutcome) -> String {
    match outcome {
        RemovalOutcome::AlreadyAbsent => "already absent".to_string(),
        RemovalOutcome::Removed { stop, disable } => format!(
            "removed ({}, {})",
            step_display(stop, "stopped", "stop"),
            step_display(disable, "disabled", "disable")
        ),
        RemovalOutcome::NoDefinition { stop, disable } => format!(
            "no definition ({}, {})",
            step_display(stop, "stopped", "stop"),
            step_display(disable, "disabled", "disable")
        ),
    }
}

fn step_display(outcome: &StepOutcome, done: &str, action: &str) -> String {
    match outcome {
        StepOutcome::Ok => done.to_string(),
        StepOutcome::Failed { message } => format!("{action} failed: {message}"),
        StepOutcome::Skipped => format!("{action} skipped"),
    }
}
