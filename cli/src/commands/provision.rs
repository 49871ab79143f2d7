//! `portfleet provision`: write unit definitions and bring every instance up.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::apply::apply;
use crate::commands::SpecArgs;
use crate::domain::config::build_spec;
use crate::domain::report::Outcome;
use crate::infra::host::SystemHost;
use crate::output::TerminalReporter;

/// Run `portfleet provision`.
///
/// # Errors
///
/// Returns an error for invalid input, a failed definition write, or a
/// failed reload. Start/enable failures yield `Outcome::PartialFailure`.
pub async fn run(app: &AppContext, args: &SpecArgs) -> Result<Outcome> {
    let spec = build_spec(&app.fleet, &args.overrides())?;
    let store = app.unit_store();
    let manager = app.service_manager();

    let report = {
        let reporter = TerminalReporter::new(&app.output);
        apply(&spec, &SystemHost, &store, &manager, &reporter).await?
    };

    app.renderer().render_apply(&report)?;
    Ok(report.outcome())
}
