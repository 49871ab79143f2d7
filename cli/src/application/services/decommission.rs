//! Application service: explicit removal of named instances.
//!
//! Only the ports the caller names are touched; nothing is inferred from the
//! prefix. Removing an already-absent unit succeeds and is reported as such.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::application::ports::{ProgressReporter, ServiceManager, UnitStore};
use crate::application::services::step_outcome;
use crate::application::services::validate::validate_target;
use crate::domain::error::DecommissionError;
use crate::domain::report::{DecommissionReport, RemovalOutcome, RemovalReport, StepOutcome};
use crate::domain::unit::{UnitState, definition_path, unit_file_name, unit_name};

/// Stop, disable and remove the definition of each named port.
///
/// # Errors
///
/// Returns `DecommissionError` for invalid input, a definition that cannot be
/// removed, a failed reload, or an unreachable service manager. Stop/disable
/// failures are reported per port.
pub async fn decommission(
    prefix: &str,
    ports: &[u16],
    store: &impl UnitStore,
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
) -> Result<DecommissionReport, DecommissionError> {
    validate_target(prefix, ports)?;
    let ordered: BTreeSet<u16> = ports.iter().copied().collect();

    let mut removed_any = false;
    let mut units = Vec::with_capacity(ordered.len());
    for port in ordered {
        let name = unit_name(prefix, port);
        let file = unit_file_name(&name);
        let path = definition_path(store.root(), &name);

        let defined = store.read(&path)?.is_some();
        let state = match manager.status(&file).await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(unit = %file, error = %e, "cannot query unit state");
                None
            }
        };
        let loaded = state != Some(UnitState::Absent);

        if !defined && !loaded {
            reporter.step(&format!("{file} already absent"));
            units.push(RemovalReport {
                port,
                unit: name,
                outcome: RemovalOutcome::AlreadyAbsent,
            });
            continue;
        }

        reporter.step(&format!("Removing {file}..."));
        let stop = if loaded {
            step_outcome("stop", &file, manager.stop(&file).await)
                .map_err(DecommissionError::Unreachable)?
        } else {
            StepOutcome::Skipped
        };
        // An unloaded unit can still have enablement links from an earlier
        // enable; `disable` reads them from the definition file.
        let disable = step_outcome("disable", &file, manager.disable(&file).await)
            .map_err(DecommissionError::Unreachable)?;

        let outcome = if defined {
            store.remove(&path)?;
            removed_any = true;
            info!(unit = %name, path = %path.display(), "definition removed");
            RemovalOutcome::Removed { stop, disable }
        } else {
            RemovalOutcome::NoDefinition { stop, disable }
        };
        if outcome.is_failed() {
            reporter.warn(&format!("{file} removed with errors"));
        } else {
            reporter.success(&format!("{file} removed"));
        }
        units.push(RemovalReport {
            port,
            unit: name,
            outcome,
        });
    }

    if removed_any {
        manager.reload().await.map_err(DecommissionError::Reload)?;
        info!("configuration reloaded after removal");
    }

    Ok(DecommissionReport {
        prefix: prefix.to_string(),
        reloaded: removed_any,
        units,
    })
}
