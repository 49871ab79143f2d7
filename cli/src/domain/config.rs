//! Fleet file schema and merging with command-line flags.
//!
//! Pure functions only: no I/O and no async.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::spec::{DEFAULT_RUNTIME_DIR, RestartPolicy, ServiceSpec, parse_port_list};
use crate::domain::unit::DEFAULT_UNIT_DIR;

// ── Fleet file schema ────────────────────────────────────────────────────────

/// Contents of a fleet file (YAML). Every field is optional; command-line
/// flags take precedence. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetFile {
    pub prefix: Option<String>,
    pub ports: Option<PortsField>,
    pub working_directory: Option<PathBuf>,
    pub exec: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub restart: Option<String>,
    pub description: Option<String>,
    pub runtime_dir: Option<String>,
    pub unit_dir: Option<PathBuf>,
}

/// `ports:` accepts a YAML list, a single number, or a port expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortsField {
    List(Vec<u16>),
    Single(u16),
    Expr(String),
}

impl PortsField {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPortList` for a malformed expression.
    pub fn to_ports(&self) -> Result<Vec<u16>, ValidationError> {
        match self {
            Self::List(ports) => Ok(ports.clone()),
            Self::Single(port) => Ok(vec![*port]),
            Self::Expr(expr) => parse_port_list(expr),
        }
    }
}

// ── Command-line overrides ───────────────────────────────────────────────────

/// Spec fields given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecOverrides {
    pub prefix: Option<String>,
    /// Port expression, e.g. `6691-6695`.
    pub ports: Option<String>,
    pub working_directory: Option<PathBuf>,
    pub exec: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub restart: Option<String>,
    pub description: Option<String>,
    pub runtime_dir: Option<String>,
}

fn required<T: Clone>(
    flag: Option<&T>,
    file: Option<&T>,
    name: &'static str,
) -> Result<T, ValidationError> {
    flag.or(file).cloned().ok_or(ValidationError::MissingField(name))
}

fn merged_ports(
    flag: Option<&String>,
    file: Option<&PortsField>,
) -> Result<Vec<u16>, ValidationError> {
    match (flag, file) {
        (Some(expr), _) => parse_port_list(expr),
        (None, Some(field)) => field.to_ports(),
        (None, None) => Err(ValidationError::MissingField("ports")),
    }
}

/// Build a full `ServiceSpec` from flags layered over the fleet file.
///
/// # Errors
///
/// Returns `MissingField` for the first required setting present in
/// neither source, or the parse error of the ports / restart values.
pub fn build_spec(file: &FleetFile, cli: &SpecOverrides) -> Result<ServiceSpec, ValidationError> {
    let name_prefix = required(cli.prefix.as_ref(), file.prefix.as_ref(), "prefix")?;
    let ports = merged_ports(cli.ports.as_ref(), file.ports.as_ref())?;
    let working_directory = required(
        cli.working_directory.as_ref(),
        file.working_directory.as_ref(),
        "workdir",
    )?;
    let runtime_executable = required(cli.exec.as_ref(), file.exec.as_ref(), "exec")?;
    let entry_script = required(cli.script.as_ref(), file.script.as_ref(), "script")?;
    let owning_user = required(cli.user.as_ref(), file.user.as_ref(), "user")?;
    let owning_group = required(cli.group.as_ref(), file.group.as_ref(), "group")?;
    let restart_policy = match cli.restart.as_ref().or(file.restart.as_ref()) {
        Some(value) => value.parse()?,
        None => RestartPolicy::default(),
    };

    Ok(ServiceSpec {
        name_prefix,
        ports,
        working_directory,
        runtime_executable,
        entry_script,
        owning_user,
        owning_group,
        restart_policy,
        description: cli.description.clone().or_else(|| file.description.clone()),
        runtime_dir: cli
            .runtime_dir
            .clone()
            .or_else(|| file.runtime_dir.clone())
            .unwrap_or_else(|| DEFAULT_RUNTIME_DIR.to_string()),
    })
}

/// Prefix and ports only, for operations that address existing units.
///
/// # Errors
///
/// Returns `MissingField` or the ports parse error.
pub fn build_target(
    file: &FleetFile,
    prefix: Option<&String>,
    ports: Option<&String>,
) -> Result<(String, Vec<u16>), ValidationError> {
    let prefix = required(prefix, file.prefix.as_ref(), "prefix")?;
    let ports = merged_ports(ports, file.ports.as_ref())?;
    Ok((prefix, ports))
}

/// Unit directory precedence: flag, environment, fleet file, default.
#[must_use]
pub fn resolve_unit_dir(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    file: &FleetFile,
) -> PathBuf {
    flag.or(env)
        .or_else(|| file.unit_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_UNIT_DIR))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
