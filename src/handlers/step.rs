//! Handler for the `step` command.

use super::steps::task_for;
use super::{format_duration, paint, RenderConfig};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use pipeline_view::engine::load::read_list;
use pipeline_view::engine::resolver::selected_task_run;
use pipeline_view::engine::steps::{task_run_step, task_run_view};
use pipeline_view::engine::types::{Resource, SelectedStep, Task, TaskRun};
use std::path::Path;

/// Shows the detail of one step of one task run.
///
/// # Errors
/// Returns error if a file cannot be read or the step does not exist.
pub fn handle(
    tasks_path: &Path,
    runs_path: &Path,
    run_id: &str,
    step_id: &str,
    config: &RenderConfig,
) -> Result<()> {
    let tasks: Vec<Task> = read_list(tasks_path)
        .with_context(|| format!("reading tasks {}", tasks_path.display()))?;
    let resources: Vec<Resource> = read_list(runs_path)
        .with_context(|| format!("reading task runs {}", runs_path.display()))?;
    let runs: Vec<TaskRun> = resources
        .iter()
        .map(|r| task_run_view(r, task_for(r, &tasks)))
        .collect();

    let Some(selected) = task_run_step(step_id, selected_task_run(run_id, &runs)) else {
        bail!("No step '{step_id}' in task run '{run_id}'");
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    print_human(&selected)
}

fn print_human(selected: &SelectedStep) -> Result<()> {
    println!("{} {}", paint(selected.icon()), selected.step_name.cyan().bold());
    if let Some(status) = selected.status {
        println!("   Status:  {status}");
    }
    if let Some(reason) = &selected.reason {
        println!("   Reason:  {}", reason.dimmed());
    }

    if let Some(terminated) = selected.step_status.as_ref().and_then(|s| s.terminated.as_ref()) {
        if let Some(code) = terminated.exit_code {
            println!("   Exit:    {code}");
        }
        if let Some(d) = terminated.duration() {
            println!("   Took:    {}", format_duration(d));
        }
    }

    println!("\n   Definition:");
    for line in serde_json::to_string_pretty(&selected.definition)?.lines() {
        println!("     {line}");
    }
    Ok(())
}
