//! `portfleet render`: print unit definitions without applying them.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::apply::render_units;
use crate::application::services::validate::validate;
use crate::commands::SpecArgs;
use crate::domain::config::build_spec;
use crate::domain::report::Outcome;
use crate::domain::unit::render;
use crate::infra::host::SystemHost;

/// Arguments for the render command.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Render only this port
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run `portfleet render`.
///
/// # Errors
///
/// Returns an error for invalid input or a port outside the service spec.
pub fn run(app: &AppContext, args: &RenderArgs) -> Result<Outcome> {
    let spec = build_spec(&app.fleet, &args.spec.overrides())?;
    let validated = validate(&spec, &SystemHost)?;
    let units = match args.port {
        Some(port) => vec![render(&validated, &app.unit_dir, port)?],
        None => render_units(&validated, &app.unit_dir)?,
    };
    app.renderer().render_units(&units)?;
    Ok(Outcome::Success)
}
