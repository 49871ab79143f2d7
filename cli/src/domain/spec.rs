//! Service spec types and pure validation.
//!
//! All functions in this module are synchronous and take data in, returning
//! data out. Checks that need the host (paths, users, groups) live in
//! `application::services::validate`.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;

/// Runtime sub-directory used when none is configured.
pub const DEFAULT_RUNTIME_DIR: &str = "venv";

/// Longest accepted name prefix.
pub const MAX_PREFIX_LEN: usize = 64;

/// Starts with a letter so `systemctl` never reads a unit name as an option;
/// never ends with a digit so `prefix + port` splits back unambiguously.
pub static NAME_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z](?:[A-Za-z0-9-]*[A-Za-z-])?$").expect("valid regex")
});

// ── Restart policy ───────────────────────────────────────────────────────────

/// How the service manager reacts when an instance exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    Never,
    OnFailure,
    #[default]
    Always,
}

impl RestartPolicy {
    /// Value written to the `Restart=` directive.
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::Never => "no",
            Self::OnFailure => "on-failure",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Never => "never",
            Self::OnFailure => "on-failure",
            Self::Always => "always",
        })
    }
}

impl FromStr for RestartPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "on-failure" => Ok(Self::OnFailure),
            "always" => Ok(Self::Always),
            other => Err(ValidationError::InvalidRestartPolicy(other.to_string())),
        }
    }
}

// ── Service spec ─────────────────────────────────────────────────────────────

/// Declarative input describing one fleet of service instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Prepended to every port to form the unit name.
    pub name_prefix: String,
    /// Instance ports, as given (order and duplicates preserved for validation).
    pub ports: Vec<u16>,
    pub working_directory: PathBuf,
    pub runtime_executable: PathBuf,
    /// Relative paths resolve against `working_directory`.
    pub entry_script: PathBuf,
    pub owning_user: String,
    pub owning_group: String,
    pub restart_policy: RestartPolicy,
    /// Defaults to `"<prefix> service"`.
    pub description: Option<String>,
    /// Runtime environment directory under `working_directory`; its `bin/`
    /// becomes the unit's `PATH`.
    pub runtime_dir: String,
}

/// A `ServiceSpec` that passed every check, with its ports deduplicated and
/// sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSpec {
    spec: ServiceSpec,
    ports: BTreeSet<u16>,
}

impl ValidatedSpec {
    /// Wrap a spec whose static and host checks have already passed.
    pub(crate) fn from_checked(spec: ServiceSpec) -> Self {
        let ports = spec.ports.iter().copied().collect();
        Self { spec, ports }
    }

    #[must_use]
    pub fn spec(&self) -> &ServiceSpec {
        &self.spec
    }

    /// Ports in ascending numeric order.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.iter().copied()
    }

    #[must_use]
    pub fn contains_port(&self, port: u16) -> bool {
        self.ports.contains(&port)
    }

    #[must_use]
    pub fn description(&self) -> String {
        self.spec
            .description
            .clone()
            .unwrap_or_else(|| format!("{} service", self.spec.name_prefix))
    }
}

/// Entry script location on disk (relative scripts resolve against the
/// working directory, the way the service manager launches them).
#[must_use]
pub fn resolved_entry_script(spec: &ServiceSpec) -> PathBuf {
    if spec.entry_script.is_absolute() {
        spec.entry_script.clone()
    } else {
        spec.working_directory.join(&spec.entry_script)
    }
}

// ── Port expressions ─────────────────────────────────────────────────────────

/// Parse a port expression such as `6691-6695`, `6691,6693` or
/// `6688,6691-6693`.
///
/// Duplicates are kept so that validation can report them. The empty
/// expression yields an empty list.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPortList` for malformed items, values
/// outside `0..=65535`, or descending ranges.
pub fn parse_port_list(expr: &str) -> Result<Vec<u16>, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidPortList {
        expr: expr.to_string(),
        reason,
    };

    let mut ports = Vec::new();
    if expr.trim().is_empty() {
        return Ok(ports);
    }

    for item in expr.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(invalid("empty item".to_string()));
        }
        match item.split_once('-') {
            Some((lo, hi)) => {
                let lo = parse_port(lo.trim()).map_err(&invalid)?;
                let hi = parse_port(hi.trim()).map_err(&invalid)?;
                if lo > hi {
                    return Err(invalid(format!("range {lo}-{hi} is descending")));
                }
                ports.extend(lo..=hi);
            }
            None => ports.push(parse_port(item).map_err(&invalid)?),
        }
    }
    Ok(ports)
}

fn parse_port(s: &str) -> Result<u16, String> {
    s.parse::<u16>()
        .map_err(|_| format!("'{s}' is not a port number (0-65535)"))
}

// ── Static checks ────────────────────────────────────────────────────────────

/// Validate a unit name prefix.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPrefix` if the prefix is too long or does
/// not match [`NAME_PREFIX_RE`].
pub fn validate_name_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.len() > MAX_PREFIX_LEN || !NAME_PREFIX_RE.is_match(prefix) {
        return Err(ValidationError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Validate a port list: non-empty, no zero, no duplicates.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_ports(ports: &[u16]) -> Result<(), ValidationError> {
    if ports.is_empty() {
        return Err(ValidationError::EmptyPorts);
    }
    if ports.contains(&0) {
        return Err(ValidationError::ZeroPort);
    }
    let mut seen = BTreeSet::new();
    for &port in ports {
        if !seen.insert(port) {
            return Err(ValidationError::DuplicatePort(port));
        }
    }
    Ok(())
}

/// Reject values that would break the line-oriented definition format.
///
/// # Errors
///
/// Returns `ValidationError::ControlCharacters` naming `field`.
pub fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacters {
            field,
            value: value.escape_default().to_string(),
        });
    }
    Ok(())
}

/// Paths are rendered into the definition as text.
///
/// # Errors
///
/// Returns `NonUtf8Path` or `ControlCharacters` naming `field`.
pub fn validate_path_text(field: &'static str, path: &Path) -> Result<(), ValidationError> {
    let text = path.to_str().ok_or_else(|| ValidationError::NonUtf8Path {
        field,
        path: path.to_path_buf(),
    })?;
    validate_text(field, text)
}

/// The service manager only accepts absolute paths for the working directory
/// and the executable.
///
/// # Errors
///
/// Returns `ValidationError::RelativePath` naming `field`.
pub fn validate_absolute(field: &'static str, path: &Path) -> Result<(), ValidationError> {
    if !path.is_absolute() {
        return Err(ValidationError::RelativePath {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// The runtime directory must stay inside the working directory.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRuntimeDir` for empty, absolute, or
/// parent-relative paths.
pub fn validate_runtime_dir(dir: &str) -> Result<(), ValidationError> {
    let path = Path::new(dir);
    let all_normal = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if dir.is_empty() || !all_normal || path.components().next().is_none() {
        return Err(ValidationError::InvalidRuntimeDir(dir.to_string()));
    }
    validate_text("runtime directory", dir)
}

/// Every check that does not touch the host, in order.
///
/// # Errors
///
/// Returns the first violation found; later checks are not attempted.
pub fn check_static(spec: &ServiceSpec) -> Result<(), ValidationError> {
    validate_ports(&spec.ports)?;
    validate_name_prefix(&spec.name_prefix)?;
    if let Some(description) = &spec.description {
        validate_text("description", description)?;
    }
    validate_text("user", &spec.owning_user)?;
    validate_text("group", &spec.owning_group)?;
    validate_runtime_dir(&spec.runtime_dir)?;
    validate_path_text("working directory", &spec.working_directory)?;
    validate_absolute("working directory", &spec.working_directory)?;
    validate_path_text("runtime executable", &spec.runtime_executable)?;
    validate_absolute("runtime executable", &spec.runtime_executable)?;
    validate_path_text("entry script", &spec.entry_script)?;
    Ok(())
}
