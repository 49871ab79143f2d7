//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;
use crate::domain::report::Outcome;

/// Provision one service instance per port under the system service manager
#[derive(Parser)]
#[command(
    name = "portfleet",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Fleet file (YAML) with default settings
    #[arg(short = 'f', long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory holding unit definitions [default: /etc/systemd/system]
    #[arg(long, global = true, value_name = "DIR")]
    pub unit_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write unit definitions and start/enable every instance
    Provision(commands::SpecArgs),

    /// Stop, disable and remove named instances
    Decommission(commands::TargetArgs),

    /// Show definition and live state of each instance
    Status(commands::status::StatusArgs),

    /// Print rendered unit definitions without applying them
    Render(commands::render::RenderArgs),

    /// Create the runtime environment and install dependencies
    Bootstrap(commands::bootstrap::BootstrapArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input or a fatal failure. Per-unit
    /// failures are reported through the returned `Outcome`.
    pub async fn run(self) -> Result<Outcome> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            file,
            unit_dir,
            command,
        } = self;

        let output = OutputFlags {
            no_color,
            quiet,
            json,
        };
        if let Command::Version = command {
            return commands::version::run(output);
        }

        let app = AppContext::new(&AppFlags {
            output,
            yes,
            file,
            unit_dir,
        })?;

        match command {
            Command::Provision(args) => commands::provision::run(&app, &args).await,
            Command::Decommission(args) => commands::decommission::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Render(args) => commands::render::run(&app, &args),
            Command::Bootstrap(args) => commands::bootstrap::run(&app, &args).await,
            Command::Version => commands::version::run(output),
        }
    }
}
