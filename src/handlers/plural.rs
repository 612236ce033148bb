//! Handler for the `plural` command.

use super::RenderConfig;
use anyhow::Result;
use pipeline_view::engine::resolver::type_to_plural;

/// Prints the plural tag for a resource type.
///
/// # Errors
/// Returns error if JSON output cannot be serialized.
pub fn handle(kind: &str, config: &RenderConfig) -> Result<()> {
    let plural = type_to_plural(kind);
    if config.json {
        let report = serde_json::json!({ "kind": kind, "plural": plural });
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{plural}");
    }
    Ok(())
}
