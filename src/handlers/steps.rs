//! Handler for the `steps` command.

use super::{paint, step_summary, RenderConfig};
use anyhow::{Context, Result};
use colored::Colorize;
use pipeline_view::engine::load::{read_json, read_list};
use pipeline_view::engine::resolver::selected_task;
use pipeline_view::engine::steps::task_run_view;
use pipeline_view::engine::types::{Resource, Task};
use std::path::Path;

/// Lists the display steps of one task run.
///
/// # Errors
/// Returns error if either file cannot be read or decoded.
pub fn handle(tasks_path: &Path, run_path: &Path, config: &RenderConfig) -> Result<()> {
    let tasks: Vec<Task> = read_list(tasks_path)
        .with_context(|| format!("reading tasks {}", tasks_path.display()))?;
    let resource: Resource = read_json(run_path)
        .with_context(|| format!("reading task run {}", run_path.display()))?;

    let task = task_for(&resource, &tasks);
    let run = task_run_view(&resource, task);
    let steps = run.steps.unwrap_or_default();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    println!("{} Steps of {}:", "📋".cyan(), resource.metadata.name.bold());
    for step in &steps {
        println!(
            "   {} [{}] {}",
            paint(step.icon()),
            step.step_name.blue(),
            step_summary(step).dimmed()
        );
    }
    Ok(())
}

/// Finds the task a run references.
pub(crate) fn task_for<'a>(resource: &Resource, tasks: &'a [Task]) -> Option<&'a Task> {
    let name = &resource.spec.task_ref.as_ref()?.name;
    let task = selected_task(name, tasks);
    if task.is_none() {
        tracing::warn!(task = %name, run = %resource.metadata.name, "referenced task not found");
    }
    task
}
