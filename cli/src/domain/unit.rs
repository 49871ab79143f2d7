//! Service unit naming and definition rendering.
//!
//! `render` is a pure function: the same validated spec and port always
//! produce byte-identical content.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::RenderError;
use crate::domain::spec::ValidatedSpec;

/// Default directory holding unit definitions.
pub const DEFAULT_UNIT_DIR: &str = "/etc/systemd/system";

/// File extension of a definition.
pub const UNIT_SUFFIX: &str = ".service";

/// Ordering dependency written to `After=`.
pub const AFTER_TARGET: &str = "network.target";

/// Enablement target written to `WantedBy=`.
pub const WANTED_BY_TARGET: &str = "multi-user.target";

/// Mode applied to every written definition.
pub const UNIT_FILE_MODE: u32 = 0o644;

/// Live state of a unit as observed from the service manager. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitState {
    Absent,
    Stopped,
    Running,
    Failed,
}

impl std::fmt::Display for UnitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Absent => "absent",
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Failed => "failed",
        })
    }
}

/// One rendered instance definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    pub port: u16,
    /// `prefix + port`.
    pub name: String,
    pub definition_path: PathBuf,
    pub rendered_content: String,
}

impl ServiceUnit {
    /// Name as passed to the service manager (`<name>.service`).
    #[must_use]
    pub fn unit_file_name(&self) -> String {
        unit_file_name(&self.name)
    }
}

/// `prefix + port`.
#[must_use]
pub fn unit_name(prefix: &str, port: u16) -> String {
    format!("{prefix}{port}")
}

#[must_use]
pub fn unit_file_name(name: &str) -> String {
    format!("{name}{UNIT_SUFFIX}")
}

/// Where the definition for `name` lives under `unit_dir`.
#[must_use]
pub fn definition_path(unit_dir: &Path, name: &str) -> PathBuf {
    unit_dir.join(unit_file_name(name))
}

/// Render the definition for `port`.
///
/// # Errors
///
/// Returns `RenderError::PortNotDeclared` if `port` is not one of the service spec's
/// ports, and `RenderError::NonUtf8Path` if a path cannot be written as text.
pub fn render(spec: &ValidatedSpec, unit_dir: &Path, port: u16) -> Result<ServiceUnit, RenderError> {
    if !spec.contains_port(port) {
        return Err(RenderError::PortNotDeclared(port));
    }
    let s = spec.spec();
    let working_directory = path_text("working directory", &s.working_directory)?;
    let executable = path_text("runtime executable", &s.runtime_executable)?;
    let script = path_text("entry script", &s.entry_script)?;

    let name = unit_name(&s.name_prefix, port);
    let port_text = port.to_string();
    let exec_start = [executable, script, "--port", port_text.as_str()]
        .iter()
        .map(|arg| quote_exec_arg(arg))
        .collect::<Vec<_>>()
        .join(" ");
    let runtime_bin = format!(
        "{}/{}/bin",
        working_directory.trim_end_matches('/'),
        s.runtime_dir.trim_end_matches('/')
    );

    let mut content = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        content,
        "[Unit]\n\
         Description={description} on port {port}\n\
         After={AFTER_TARGET}\n\
         \n\
         [Service]\n\
         User={user}\n\
         Group={group}\n\
         WorkingDirectory={working_directory}\n\
         ExecStart={exec_start}\n\
         Environment=\"{environment}\"\n\
         Restart={restart}\n\
         \n\
         [Install]\n\
         WantedBy={WANTED_BY_TARGET}\n",
        description = escape_specifiers(&spec.description()),
        user = s.owning_user,
        group = s.owning_group,
        working_directory = escape_specifiers(working_directory),
        environment = escape_quoted(&format!("PATH={runtime_bin}")),
        restart = s.restart_policy.directive(),
    );

    Ok(ServiceUnit {
        port,
        definition_path: definition_path(unit_dir, &name),
        name,
        rendered_content: content,
    })
}

fn path_text<'a>(field: &'static str, path: &'a Path) -> Result<&'a str, RenderError> {
    path.to_str().ok_or_else(|| RenderError::NonUtf8Path {
        field,
        path: path.to_path_buf(),
    })
}

/// `%` introduces a specifier in unit files.
fn escape_specifiers(value: &str) -> String {
    value.replace('%', "%%")
}

/// Escape for use inside a double-quoted unit-file value.
fn escape_quoted(value: &str) -> String {
    escape_specifiers(&value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote one `ExecStart=` argument when it would otherwise be split or
/// unescaped by the service manager.
fn quote_exec_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | ';'));
    if needs_quotes {
        format!("\"{}\"", escape_quoted(arg))
    } else {
        escape_specifiers(arg)
    }
}
