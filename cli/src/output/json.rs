//! JSON output helpers.
//!
//! Every `--json` result is wrapped in the same envelope; failures use the
//! error object instead.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Wrap a command result in the JSON envelope.
///
/// ```json
/// {
///   "command": "provision",
///   "generated_at": "2026-01-01T00:00:00Z",
///   "outcome": "success",
///   "result": { ... }
/// }
/// ```
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub fn envelope<T: Serialize>(command: &str, outcome: &str, result: &T) -> Result<String> {
    let obj = serde_json::json!({
        "command": command,
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "outcome": outcome,
        "result": result,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
