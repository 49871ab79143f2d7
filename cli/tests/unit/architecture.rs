//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain, application, infra, commands, output) hold.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `dir`, with their
/// location for error messages.
fn production_lines(dir: &Path) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    for file in collect_rs_files(dir) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") || trimmed.is_empty() {
                continue;
            }
            lines.push((format!("{rel}:{}", i + 1), line.to_string()));
        }
    }
    lines
}

fn src_dir(parts: &[&str]) -> PathBuf {
    parts.iter().fold(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("src"),
        |dir, part| dir.join(part),
    )
}

fn violations(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    production_lines(dir)
        .into_iter()
        .filter(|(_, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(loc, line)| format!("{loc}: {}", line.trim()))
        .collect()
}

// ── Domain purity ─────────────────────────────────────────────────────────────

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let found = violations(
        &src_dir(&["domain"]),
        &[
            "std::fs",
            "std::process::Command",
            "std::net",
            "tokio",
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
        ],
    );
    assert!(
        found.is_empty(),
        "domain/ must stay pure:\n{}",
        found.join("\n")
    );
}

// ── Application boundaries ────────────────────────────────────────────────────

#[test]
fn application_has_no_imports_from_infra_commands_or_output() {
    let found = violations(
        &src_dir(&["application"]),
        &["crate::infra", "crate::commands", "crate::output"],
    );
    assert!(
        found.is_empty(),
        "application/ must depend only on domain/ and its own ports:\n{}",
        found.join("\n")
    );
}

#[test]
fn services_take_trait_bounds_not_adapters() {
    let found = violations(
        &src_dir(&["application", "services"]),
        &[
            "SystemctlManager",
            "FsUnitStore",
            "TokioCommandRunner",
            "PipInstaller",
            "SystemHost",
        ],
    );
    assert!(
        found.is_empty(),
        "services must be generic over ports:\n{}",
        found.join("\n")
    );
}

// ── Infra boundaries ──────────────────────────────────────────────────────────

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let found = violations(&src_dir(&["infra"]), &["crate::commands", "crate::output"]);
    assert!(
        found.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        found.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let found = violations(&src_dir(&["infra"]), &["println!", "eprintln!"]);
    assert!(
        found.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        found.join("\n")
    );
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[test]
fn no_inline_json_branching_in_commands() {
    let found: Vec<String> = production_lines(&src_dir(&["commands"]))
        .into_iter()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            line.contains("json: bool")
                || trimmed.starts_with("if json")
                || trimmed.starts_with("if !json")
                || trimmed.contains("serde_json::")
        })
        .map(|(loc, line)| format!("{loc}: {}", line.trim()))
        .collect();
    assert!(
        found.is_empty(),
        "Found inline JSON handling in commands/, use app.renderer() instead:\n{}",
        found.join("\n")
    );
}

#[test]
fn no_direct_systemctl_invocation_outside_infra() {
    let mut found = Vec::new();
    for dir in ["commands", "application", "domain", "output"] {
        found.extend(violations(
            &src_dir(&[dir]),
            &["Command::new(", "TokioCommandRunner::new"],
        ));
    }
    assert!(
        found.is_empty(),
        "process execution must go through infra adapters:\n{}",
        found.join("\n")
    );
}
