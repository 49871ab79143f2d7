//! Application service: observe instance state.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::warn;

use crate::application::ports::{PortProbe, ServiceManager, UnitStore};
use crate::application::services::validate::validate_target;
use crate::domain::report::UnitStatus;
use crate::domain::unit::{definition_path, unit_file_name, unit_name};

/// Report definition presence, live state and (when `probe_host` is given)
/// port reachability for each port, ascending.
///
/// # Errors
///
/// Returns an error for invalid input or an unreadable unit directory. A
/// failed state query for one unit is reported as unknown state.
pub async fn status(
    prefix: &str,
    ports: &[u16],
    store: &impl UnitStore,
    manager: &impl ServiceManager,
    probe: &impl PortProbe,
    probe_host: Option<&str>,
) -> Result<Vec<UnitStatus>> {
    validate_target(prefix, ports)?;
    let ordered: BTreeSet<u16> = ports.iter().copied().collect();

    let mut statuses = Vec::with_capacity(ordered.len());
    for port in ordered {
        let name = unit_name(prefix, port);
        let file = unit_file_name(&name);
        let defined = store
            .read(&definition_path(store.root(), &name))?
            .is_some();
        let live_state = match manager.status(&file).await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(unit = %file, error = %e, "cannot query unit state");
                None
            }
        };
        let listening = match probe_host {
            Some(host) => Some(probe.is_listening(host, port).await),
            None => None,
        };
        statuses.push(UnitStatus {
            port,
            unit: name,
            defined,
            live_state,
            listening,
        });
    }
    Ok(statuses)
}
