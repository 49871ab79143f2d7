//! Command implementations

pub mod bootstrap;
pub mod decommission;
pub mod provision;
pub mod render;
pub mod status;
pub mod version;

use std::path::PathBuf;

use clap::Args;

use crate::domain::config::SpecOverrides;

/// Spec settings accepted on the command line. Each one may instead come
/// from the fleet file; flags win.
#[derive(Args, Debug, Default, Clone)]
pub struct SpecArgs {
    /// Unit name prefix; each unit is named <PREFIX><PORT>
    #[arg(long)]
    pub prefix: Option<String>,

    /// Ports to run, e.g. `6691-6695` or `6691,6693`
    #[arg(long, value_name = "LIST")]
    pub ports: Option<String>,

    /// Working directory of every instance
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Runtime executable, e.g. the interpreter inside the environment
    #[arg(long, value_name = "PATH")]
    pub exec: Option<PathBuf>,

    /// Entry script, relative to the working directory or absolute
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// User the instances run as
    #[arg(long)]
    pub user: Option<String>,

    /// Group the instances run as
    #[arg(long)]
    pub group: Option<String>,

    /// Restart policy: never, on-failure, always [default: always]
    #[arg(long, value_name = "POLICY")]
    pub restart: Option<String>,

    /// Unit description [default: "<PREFIX> service"]
    #[arg(long)]
    pub description: Option<String>,

    /// Runtime environment directory under the working directory [default: venv]
    #[arg(long, value_name = "DIR")]
    pub runtime_dir: Option<String>,
}

impl SpecArgs {
    #[must_use]
    pub fn overrides(&self) -> SpecOverrides {
        SpecOverrides {
            prefix: self.prefix.clone(),
            ports: self.ports.clone(),
            working_directory: self.workdir.clone(),
            exec: self.exec.clone(),
            script: self.script.clone(),
            user: self.user.clone(),
            group: self.group.clone(),
            restart: self.restart.clone(),
            description: self.description.clone(),
            runtime_dir: self.runtime_dir.clone(),
        }
    }
}

/// Addresses existing units by prefix and ports.
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    /// Unit name prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Ports to address, e.g. `6691-6695` or `6691,6693`
    #[arg(long, value_name = "LIST")]
    pub ports: Option<String>,
}
