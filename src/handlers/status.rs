//! Handler for the `status` command.

use super::{paint, RenderConfig};
use anyhow::{Context, Result};
use colored::Colorize;
use pipeline_view::engine::load::read_json;
use pipeline_view::engine::state::{get_status, StatusIcon};
use pipeline_view::engine::types::Resource;
use std::path::Path;

/// Shows the `Succeeded` condition of one resource.
///
/// # Errors
/// Returns error if the resource file cannot be read or decoded.
pub fn handle(path: &Path, config: &RenderConfig) -> Result<()> {
    let resource: Resource = read_json(path)
        .with_context(|| format!("reading resource {}", path.display()))?;
    let condition = get_status(&resource);
    let icon = condition.and_then(StatusIcon::for_condition);
    tracing::debug!(name = %resource.metadata.name, ?icon, "derived resource status");

    if config.json {
        let report = serde_json::json!({
            "name": resource.metadata.name,
            "kind": resource.kind,
            "condition": condition,
            "icon": icon.map(|i| i.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let label = icon.map_or_else(|| "NO STATUS".to_string(), |i| i.to_string());
    println!(
        "{} [{}] {}",
        paint(icon),
        resource.metadata.name.cyan().bold(),
        label
    );
    if let Some(condition) = condition {
        if let Some(reason) = &condition.reason {
            println!("   Reason:  {}", reason.dimmed());
        }
        if let Some(message) = &condition.message {
            println!("   Message: {message}");
        }
    }

    Ok(())
}
