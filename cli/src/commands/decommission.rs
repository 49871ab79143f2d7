//! `portfleet decommission`: stop, disable and remove named instances.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::decommission::decommission;
use crate::commands::TargetArgs;
use crate::domain::config::build_target;
use crate::domain::report::Outcome;
use crate::domain::unit::unit_name;
use crate::output::TerminalReporter;

/// Run `portfleet decommission`.
///
/// # Errors
///
/// Returns an error for invalid input, a definition that cannot be removed,
/// or a failed reload. Stop/disable failures yield `Outcome::PartialFailure`.
pub async fn run(app: &AppContext, args: &TargetArgs) -> Result<Outcome> {
    let (prefix, ports) = build_target(&app.fleet, args.prefix.as_ref(), args.ports.as_ref())?;

    if !app.non_interactive {
        let names: Vec<String> = ports.iter().map(|p| unit_name(&prefix, *p)).collect();
        eprintln!();
        eprintln!("This will stop, disable and remove:");
        for name in &names {
            eprintln!("  • {name}");
        }
        eprintln!();
        if !app.confirm("Continue?", false)? {
            eprintln!("Cancelled.");
            return Ok(Outcome::Success);
        }
    }

    let store = app.unit_store();
    let manager = app.service_manager();
    let report = {
        let reporter = TerminalReporter::new(&app.output);
        decommission(&prefix, &ports, &store, &manager, &reporter).await?
    };

    app.renderer().render_decommission(&report)?;
    Ok(report.outcome())
}
