//! CLI Config Command
//!
//! Prints the effective configuration (file + environment) with credentials
//! masked, followed by any validation findings.

use anyhow::Result;

use nutrilens_config::{redact, validate, NutrilensConfig};

use crate::terminal_output::{note_error, note_success, note_warn};

pub fn run(config: &NutrilensConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&redact(config))?);

    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success("Configuration is valid");
    }
    Ok(())
}
