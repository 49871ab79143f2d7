//! `portfleet status`: show definition and live state of each instance.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::status::status;
use crate::commands::TargetArgs;
use crate::domain::config::build_target;
use crate::domain::report::Outcome;
use crate::infra::network::TcpPortProbe;

/// Arguments for the status command.
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Also check that each port accepts TCP connections
    #[arg(long)]
    pub probe: bool,

    /// Host to probe
    #[arg(long, default_value = "127.0.0.1", requires = "probe")]
    pub host: String,
}

/// Run `portfleet status`.
///
/// # Errors
///
/// Returns an error for invalid input or an unreadable unit directory.
pub async fn run(app: &AppContext, args: &StatusArgs) -> Result<Outcome> {
    let (prefix, ports) = build_target(
        &app.fleet,
        args.target.prefix.as_ref(),
        args.target.ports.as_ref(),
    )?;
    let probe_host = args.probe.then_some(args.host.as_str());

    let statuses = status(
        &prefix,
        &ports,
        &app.unit_store(),
        &app.service_manager(),
        &TcpPortProbe,
        probe_host,
    )
    .await?;

    app.renderer().render_status(&statuses)?;
    Ok(Outcome::Success)
}
