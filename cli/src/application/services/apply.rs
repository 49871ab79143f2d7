//! Application service: reconcile unit definitions and live state.
//!
//! Phases, in order: validate, render every unit, write changed definitions,
//! one configuration reload if anything changed, then start and enable each
//! unit in ascending port order. Validation, render and write failures abort
//! before the service manager is touched; start/enable failures are recorded
//! per unit and processing continues unless the service manager is unreachable.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::application::ports::{HostProbe, ProgressReporter, ServiceManager, UnitStore};
use crate::application::services::step_outcome;
use crate::application::services::validate::validate;
use crate::domain::error::{ApplyError, RenderError, WriteError};
use crate::domain::report::{ApplyReport, DefinitionOutcome, PortReport};
use crate::domain::spec::{ServiceSpec, ValidatedSpec};
use crate::domain::unit::{ServiceUnit, render};

/// Render every unit of a validated spec, ascending by port.
///
/// # Errors
///
/// Returns the first `RenderError`.
pub fn render_units(spec: &ValidatedSpec, unit_dir: &Path) -> Result<Vec<ServiceUnit>, RenderError> {
    spec.ports().map(|port| render(spec, unit_dir, port)).collect()
}

/// Bring the definitions and live state of every unit in `spec` in line.
///
/// # Errors
///
/// Returns `ApplyError` for validation, render, write or reload failures, and
/// when the service manager cannot be reached at all. Individual start/enable
/// failures are reported in the `ApplyReport`.
pub async fn apply(
    spec: &ServiceSpec,
    host: &impl HostProbe,
    store: &impl UnitStore,
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
) -> Result<ApplyReport, ApplyError> {
    let validated = validate(spec, host)?;
    let units = render_units(&validated, store.root())?;

    let mut definitions = Vec::with_capacity(units.len());
    for unit in &units {
        definitions.push(sync_definition(store, unit)?);
    }

    let reloaded = definitions.iter().any(|d| d.changed());
    if reloaded {
        reporter.step("Reloading service manager configuration...");
        manager.reload().await.map_err(ApplyError::Reload)?;
        info!(changed = definitions.iter().filter(|d| d.changed()).count(), "configuration reloaded");
    } else {
        debug!("all definitions unchanged, skipping reload");
    }

    let mut reports = Vec::with_capacity(units.len());
    for (unit, definition) in units.iter().zip(definitions) {
        let file = unit.unit_file_name();
        reporter.step(&format!("Starting {file}..."));

        let start = step_outcome("start", &file, manager.start(&file).await)
            .map_err(ApplyError::Unreachable)?;
        let enable = step_outcome("enable", &file, manager.enable(&file).await)
            .map_err(ApplyError::Unreachable)?;
        let live_state = match manager.status(&file).await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(unit = %file, error = %e, "cannot query unit state");
                None
            }
        };

        let report = PortReport {
            port: unit.port,
            unit: unit.name.clone(),
            definition,
            start,
            enable,
            live_state,
        };
        if report.is_failed() {
            reporter.warn(&format!("{file}: {}", report.labels().join(" · ")));
        } else {
            reporter.success(&format!("{file}: {}", report.labels().join(" · ")));
        }
        reports.push(report);
    }

    Ok(ApplyReport {
        prefix: spec.name_prefix.clone(),
        reloaded,
        units: reports,
    })
}

/// Write `unit` unless the definition on disk is already byte-identical.
fn sync_definition(store: &impl UnitStore, unit: &ServiceUnit) -> Result<DefinitionOutcome, WriteError> {
    let path = &unit.definition_path;
    let content = unit.rendered_content.as_bytes();
    let outcome = match store.read(path)? {
        Some(existing) if existing == content => return Ok(DefinitionOutcome::Unchanged),
        Some(_) => DefinitionOutcome::Updated,
        None => DefinitionOutcome::Created,
    };
    store.write_atomic(path, content)?;
    info!(unit = %unit.name, path = %path.display(), ?outcome, "definition written");
    Ok(outcome)
}
