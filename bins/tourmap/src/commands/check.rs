//! Check command - validate a destination draft before it is submitted

use crate::output::{print_json, Status};
use crate::OutputFormat;
use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use tourmap_core::validation::DestinationDraft;

pub fn run(format: OutputFormat, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let draft: DestinationDraft =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a destination draft", path.display()))?;

    let (result, coordinate) = draft.check();

    match format {
        OutputFormat::Json => print_json(&json!({
            "valid": result.is_valid(),
            "errors": result.errors(),
            "coordinate": coordinate,
        }))?,
        OutputFormat::Text if result.is_valid() => {
            Status::success(&format!("{} is ready to submit", draft.name.trim()));
        }
        OutputFormat::Text => {
            Status::header("Draft has problems");
            for error in result.errors() {
                println!("  {} {}", error.field.red(), error.message);
            }
        }
    }

    if !result.is_valid() {
        bail!("{} field(s) failed validation", result.errors().len());
    }
    Ok(())
}
