//! Application service: spec validation.
//!
//! Side-effect free: only reads host facts through `HostProbe`.

use tracing::debug;

use crate::application::ports::HostProbe;
use crate::domain::error::ValidationError;
use crate::domain::spec::{
    ServiceSpec, ValidatedSpec, check_static, resolved_entry_script, validate_name_prefix,
    validate_ports,
};

/// Validate a spec against its own rules and the host.
///
/// Stops at the first violation.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate(spec: &ServiceSpec, host: &impl HostProbe) -> Result<ValidatedSpec, ValidationError> {
    check_static(spec)?;

    let workdir = &spec.working_directory;
    if !host.is_readable(workdir) {
        return Err(ValidationError::PathNotReadable {
            what: "Working directory",
            path: workdir.clone(),
        });
    }
    if !host.is_dir(workdir) {
        return Err(ValidationError::NotADirectory(workdir.clone()));
    }
    if !host.is_readable(&spec.runtime_executable) {
        return Err(ValidationError::PathNotReadable {
            what: "Runtime executable",
            path: spec.runtime_executable.clone(),
        });
    }
    let script = resolved_entry_script(spec);
    if !host.is_readable(&script) {
        return Err(ValidationError::PathNotReadable {
            what: "Entry script",
            path: script,
        });
    }

    let user_found = host
        .user_exists(&spec.owning_user)
        .map_err(|e| ValidationError::IdentityLookup {
            what: "user",
            name: spec.owning_user.clone(),
            reason: format!("{e:#}"),
        })?;
    if !user_found {
        return Err(ValidationError::UnknownUser(spec.owning_user.clone()));
    }
    let group_found = host
        .group_exists(&spec.owning_group)
        .map_err(|e| ValidationError::IdentityLookup {
            what: "group",
            name: spec.owning_group.clone(),
            reason: format!("{e:#}"),
        })?;
    if !group_found {
        return Err(ValidationError::UnknownGroup(spec.owning_group.clone()));
    }

    debug!(prefix = %spec.name_prefix, ports = spec.ports.len(), "spec validated");
    Ok(ValidatedSpec::from_checked(spec.clone()))
}

/// Validate the prefix and port list used to address existing units.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_target(prefix: &str, ports: &[u16]) -> Result<(), ValidationError> {
    validate_ports(ports)?;
    validate_name_prefix(prefix)
}
