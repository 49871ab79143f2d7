//! Version command

use anyhow::Result;

use crate::app::OutputFlags;
use crate::domain::report::Outcome;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(flags: OutputFlags) -> Result<Outcome> {
    let version = env!("CARGO_PKG_VERSION");
    let ctx = OutputContext::new(flags.no_color, flags.quiet);
    let renderer = if flags.json {
        Renderer::Json(JsonRenderer)
    } else {
        Renderer::Human(HumanRenderer::new(&ctx))
    };
    renderer.render_version(version)?;
    Ok(Outcome::Success)
}
