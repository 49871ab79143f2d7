//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY, `step()` drives a spinner that the next `success()` or `warn()`
/// finishes. Otherwise each event is one line. All output is suppressed when
/// `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }

    fn finish(&self, mark: &str, message: &str) -> bool {
        match self.spinner.borrow_mut().take() {
            Some(pb) => {
                progress::finish_with(&pb, mark, message);
                true
            }
            None => false,
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        if self.ctx.show_progress() {
            let mut slot = self.spinner.borrow_mut();
            match slot.as_ref() {
                Some(pb) => pb.set_message(message.to_string()),
                None => *slot = Some(progress::spinner(message)),
            }
        } else {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        let mark = format!("{}", "✓".style(self.ctx.styles.success));
        if !self.finish(&mark, message) {
            println!("  {mark} {message}");
        }
    }

    fn warn(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        let mark = format!("{}", "!".style(self.ctx.styles.warning));
        if !self.finish(&mark, message) {
            println!("  {mark} {message}");
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.get_mut().take() {
            pb.finish_and_clear();
        }
    }
}
