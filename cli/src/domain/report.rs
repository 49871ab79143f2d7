//! Outcome reports and exit-code classification.
//!
//! Reports enumerate, per port, what happened in each phase. They are the
//! user-visible result of `apply`, `decommission` and `status` and serialize
//! directly into the `--json` output.

use std::process::ExitCode;

use serde::Serialize;

use crate::domain::error::{ApplyError, DecommissionError, ValidationError};
use crate::domain::unit::UnitState;

// ── Phase outcomes ───────────────────────────────────────────────────────────

/// What happened to a unit's definition file during `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefinitionOutcome {
    Created,
    Updated,
    Unchanged,
}

impl DefinitionOutcome {
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of one service-manager request for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum StepOutcome {
    Ok,
    Failed { message: String },
    Skipped,
}

impl StepOutcome {
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

// ── Apply ────────────────────────────────────────────────────────────────────

/// Per-port result of `apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortReport {
    pub port: u16,
    pub unit: String,
    pub definition: DefinitionOutcome,
    pub start: StepOutcome,
    pub enable: StepOutcome,
    /// Observed after start/enable; `None` if the query itself failed.
    pub live_state: Option<UnitState>,
}

impl PortReport {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.start.is_failed() || self.enable.is_failed()
    }

    /// Short labels, e.g. `created · started · enabled`.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = vec![match self.definition {
            DefinitionOutcome::Created => "created",
            DefinitionOutcome::Updated => "updated",
            DefinitionOutcome::Unchanged => "unchanged",
        }];
        labels.push(match self.start {
            StepOutcome::Ok => "started",
            StepOutcome::Failed { .. } => "start-failed",
            StepOutcome::Skipped => "start-skipped",
        });
        labels.push(match self.enable {
            StepOutcome::Ok => "enabled",
            StepOutcome::Failed { .. } => "enable-failed",
            StepOutcome::Skipped => "enable-skipped",
        });
        labels
    }
}

/// Full result of `apply`, ports in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub prefix: String,
    /// Whether the single configuration reload was issued.
    pub reloaded: bool,
    pub units: Vec<PortReport>,
}

impl ApplyReport {
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.units.iter().filter(|u| u.definition.changed()).count()
    }

    #[must_use]
    pub fn failed_ports(&self) -> Vec<u16> {
        self.units
            .iter()
            .filter(|u| u.is_failed())
            .map(|u| u.port)
            .collect()
    }

    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        self.units.iter().any(PortReport::is_failed)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.is_partial_failure() {
            Outcome::PartialFailure
        } else {
            Outcome::Success
        }
    }
}

// ── Decommission ─────────────────────────────────────────────────────────────

/// What happened to one port during `decommission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum RemovalOutcome {
    /// Nothing was defined or loaded; nothing to do.
    AlreadyAbsent,
    /// Definition removed; stop/disable results recorded alongside.
    Removed {
        stop: StepOutcome,
        disable: StepOutcome,
    },
    /// Unit was loaded but had no definition file under the unit directory.
    /// Stopped and disabled only.
    NoDefinition {
        stop: StepOutcome,
        disable: StepOutcome,
    },
}

impl RemovalOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        match self {
            Self::AlreadyAbsent => false,
            Self::Removed { stop, disable } | Self::NoDefinition { stop, disable } => {
                stop.is_failed() || disable.is_failed()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    pub port: u16,
    pub unit: String,
    #[serde(flatten)]
    pub outcome: RemovalOutcome,
}

/// Full result of `decommission`, ports in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecommissionReport {
    pub prefix: String,
    pub reloaded: bool,
    pub units: Vec<RemovalReport>,
}

impl DecommissionReport {
    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        self.units.iter().any(|u| u.outcome.is_failed())
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.is_partial_failure() {
            Outcome::PartialFailure
        } else {
            Outcome::Success
        }
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

/// Observed state of one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    pub port: u16,
    pub unit: String,
    pub defined: bool,
    /// `None` when the service manager could not be queried for this unit.
    pub live_state: Option<UnitState>,
    /// `None` unless probing was requested.
    pub listening: Option<bool>,
}

// ── Exit codes ───────────────────────────────────────────────────────────────

/// Process-level result of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ValidationFailed,
    PartialFailure,
    Fatal,
}

impl Outcome {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ValidationFailed => 1,
            Self::PartialFailure => 2,
            Self::Fatal => 3,
        }
    }

    /// Kebab-case name used in JSON output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ValidationFailed => "validation-failed",
            Self::PartialFailure => "partial-failure",
            Self::Fatal => "fatal",
        }
    }

    /// Classify a command error: bad input is `ValidationFailed`, anything
    /// else is `Fatal`.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let is_validation = err.chain().any(|cause| {
            cause.is::<ValidationError>()
                || matches!(
                    cause.downcast_ref::<ApplyError>(),
                    Some(ApplyError::Validation(_))
                )
                || matches!(
                    cause.downcast_ref::<DecommissionError>(),
                    Some(DecommissionError::Validation(_))
                )
        });
        if is_validation {
            Self::ValidationFailed
        } else {
            Self::Fatal
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}
