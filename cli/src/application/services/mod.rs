//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod apply;
pub mod bootstrap;
pub mod decommission;
pub mod status;
pub mod validate;

use tracing::warn;

use crate::domain::error::ServiceManagerError;
use crate::domain::report::StepOutcome;

/// Record a per-unit service-manager result without aborting.
///
/// A refused request is recorded against the unit. An unreachable manager
/// is returned as an error: no later unit can succeed either.
pub(crate) fn step_outcome(
    action: &str,
    unit: &str,
    result: Result<(), ServiceManagerError>,
) -> Result<StepOutcome, ServiceManagerError> {
    match result {
        Ok(()) => Ok(StepOutcome::Ok),
        Err(e @ ServiceManagerError::Unreachable(_)) => {
            warn!(unit = %unit, action, error = %e, "service manager unreachable");
            Err(e)
        }
        Err(e) => {
            warn!(unit = %unit, action, error = %e, "service manager request failed");
            Ok(StepOutcome::failed(e.to_string()))
        }
    }
}
