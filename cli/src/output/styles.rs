//! Terminal stylesheet (owo-colors), including the colours for unit states.

use owo_colors::Style;

use crate::domain::unit::UnitState;

/// Styles for every kind of line the CLI prints. All plain until
/// [`Styles::colorize`] is called.
#[derive(Default, Clone)]
pub struct Styles {
    /// Units that came up, removals that completed.
    pub success: Style,
    /// Units with a failed start/enable/stop/disable step.
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Definition paths above rendered units.
    pub dim: Style,
    /// Status table header.
    pub bold: Style,
    pub header: Style,
    /// Live unit states.
    pub running: Style,
    pub stopped: Style,
    pub failed: Style,
    pub unknown: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
        self.running = Style::new().green();
        self.stopped = Style::new().yellow();
        self.failed = Style::new().bold().red();
        self.unknown = Style::new().dimmed();
    }

    /// Style for a live state column; `None` means the query failed.
    #[must_use]
    pub fn live_state(&self, state: Option<UnitState>) -> Style {
        match state {
            Some(UnitState::Running) => self.running,
            Some(UnitState::Stopped) => self.stopped,
            Some(UnitState::Failed) => self.failed,
            Some(UnitState::Absent) | None => self.unknown,
        }
    }
}
