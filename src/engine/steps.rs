//! Step Views: Merges declared steps with live step state.

use super::state::{get_status, StatusIcon};
use super::types::{
    DisplayStep, Resource, SelectedStep, Step, StepPhase, StepState, Task, TaskRun,
};
use serde_json::{Map, Value};

/// Keys a [`DisplayStep`] sets itself; declared fields with these names are dropped.
const RESERVED_KEYS: [&str; 5] = ["reason", "status", "stepStatus", "stepName", "id"];

/// Icon for a step phase. A terminated step succeeded only if it completed.
#[must_use]
pub fn step_icon(status: Option<StepPhase>, reason: Option<&str>) -> Option<StatusIcon> {
    match status? {
        StepPhase::Terminated if reason == Some("Completed") => Some(StatusIcon::Success),
        StepPhase::Terminated => Some(StatusIcon::Failure),
        StepPhase::Running => Some(StatusIcon::Running),
        StepPhase::Waiting => None,
    }
}

impl DisplayStep {
    #[must_use]
    pub fn icon(&self) -> Option<StatusIcon> {
        step_icon(self.status, self.reason.as_deref())
    }
}

impl SelectedStep {
    #[must_use]
    pub fn icon(&self) -> Option<StatusIcon> {
        step_icon(self.status, self.reason.as_deref())
    }
}

/// Classifies a live step state. Terminated wins over running over waiting.
fn classify(state: &StepState) -> (Option<StepPhase>, Option<String>) {
    if let Some(terminated) = &state.terminated {
        return (Some(StepPhase::Terminated), terminated.reason.clone());
    }
    if state.running.is_some() {
        return (Some(StepPhase::Running), None);
    }
    if state.waiting.is_some() {
        return (Some(StepPhase::Waiting), None);
    }
    (None, None)
}

/// Builds the display list for a task run.
///
/// Declared steps come first in declared order. After them come live steps
/// with no declaration that terminated with a non-zero exit code, so failures
/// in implicit init steps (credential setup, source fetch) stay visible.
#[must_use]
pub fn steps_status(task_steps: &[Step], task_run_steps_status: &[StepState]) -> Vec<DisplayStep> {
    let mut steps: Vec<DisplayStep> = task_steps
        .iter()
        .map(|step| {
            let state = task_run_steps_status.iter().find(|s| s.name == step.name);
            let (status, reason) = state.map_or((None, None), classify);

            let mut fields = step.fields.clone();
            fields.insert("name".to_string(), Value::String(step.name.clone()));
            for key in RESERVED_KEYS {
                fields.remove(key);
            }

            DisplayStep {
                fields,
                reason,
                status,
                step_status: state.cloned(),
                step_name: step.name.clone(),
                id: step.name.clone(),
            }
        })
        .collect();

    for state in task_run_steps_status {
        if task_steps.iter().any(|step| step.name == state.name) {
            continue;
        }
        let Some(terminated) = state.terminated.as_ref().filter(|t| t.failed()) else {
            continue;
        };

        tracing::debug!(step = %state.name, reason = ?terminated.reason, "surfacing failed undeclared step");
        steps.push(DisplayStep {
            fields: Map::new(),
            reason: terminated.reason.clone(),
            status: Some(StepPhase::Terminated),
            step_status: Some(state.clone()),
            step_name: state.name.clone(),
            id: state.name.clone(),
        });
    }

    steps
}

/// Pulls apart the step with `selected_step_id` for a detail view.
///
/// `None` when there is no task run, it has no steps, or no step matches.
#[must_use]
pub fn task_run_step(selected_step_id: &str, task_run: Option<&TaskRun>) -> Option<SelectedStep> {
    let step = task_run?
        .steps
        .as_ref()?
        .iter()
        .find(|s| s.id == selected_step_id)?;

    let mut definition = step.fields.clone();
    definition.insert("id".to_string(), Value::String(step.id.clone()));

    Some(SelectedStep {
        definition,
        reason: step.reason.clone(),
        step_name: step.step_name.clone(),
        step_status: step.step_status.clone(),
        status: step.status,
    })
}

/// Builds the dashboard view of a task run resource.
///
/// The id is the resource uid, or its name when no uid is set. `task` supplies
/// the declared steps; without it only failed undeclared steps appear.
#[must_use]
pub fn task_run_view(resource: &Resource, task: Option<&Task>) -> TaskRun {
    let declared = task.map_or(&[][..], |t| t.spec.steps.as_slice());
    let live = resource
        .status
        .as_ref()
        .map_or(&[][..], |s| s.steps.as_slice());

    let mut fields = Map::new();
    fields.insert(
        "taskRunName".to_string(),
        Value::String(resource.metadata.name.clone()),
    );
    if let Some(task_ref) = &resource.spec.task_ref {
        fields.insert("taskName".to_string(), Value::String(task_ref.name.clone()));
    }
    if let Some(condition) = get_status(resource) {
        fields.insert("status".to_string(), Value::String(condition.status.clone()));
        if let Some(reason) = &condition.reason {
            fields.insert("reason".to_string(), Value::String(reason.clone()));
        }
    }

    TaskRun {
        id: resource
            .metadata
            .uid
            .clone()
            .unwrap_or_else(|| resource.metadata.name.clone()),
        steps: Some(steps_status(declared, live)),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Terminated;
    use serde_json::json;

    fn states(value: Value) -> Vec<StepState> {
        serde_json::from_value(value).unwrap()
    }

    fn terminated(name: &str, reason: &str, exit_code: i32) -> StepState {
        StepState {
            name: name.to_string(),
            terminated: Some(Terminated {
                reason: Some(reason.to_string()),
                exit_code: Some(exit_code),
                ..Terminated::default()
            }),
            ..StepState::default()
        }
    }

    #[test]
    fn test_declared_step_terminated() {
        let steps = steps_status(&[Step::named("a")], &[terminated("a", "Completed", 0)]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].status, Some(StepPhase::Terminated));
        assert_eq!(steps[0].reason.as_deref(), Some("Completed"));
        assert_eq!(steps[0].id, "a");
        assert_eq!(steps[0].step_name, "a");
        assert_eq!(steps[0].icon(), Some(StatusIcon::Success));
    }

    #[test]
    fn test_classification_priority() {
        let live = states(json!([
            {"name": "a", "running": {}, "waiting": {}},
            {"name": "b", "waiting": {"reason": "PodInitializing"}},
            {"name": "c", "terminated": {"reason": "Error", "exitCode": 1}, "running": {}}
        ]));
        let declared = [Step::named("a"), Step::named("b"), Step::named("c"), Step::named("d")];
        let steps = steps_status(&declared, &live);

        assert_eq!(steps[0].status, Some(StepPhase::Running));
        assert_eq!(steps[0].reason, None);
        assert_eq!(steps[1].status, Some(StepPhase::Waiting));
        assert_eq!(steps[1].reason, None);
        assert_eq!(steps[2].status, Some(StepPhase::Terminated));
        assert_eq!(steps[2].reason.as_deref(), Some("Error"));
        assert_eq!(steps[3].status, None);
        assert!(steps[3].step_status.is_none());
    }

    #[test]
    fn test_failed_undeclared_step_is_appended() {
        let steps = steps_status(&[Step::named("a")], &[terminated("init", "Error", 1)]);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].id, "a");
        assert_eq!(steps[0].status, None);
        assert_eq!(steps[1].id, "init");
        assert_eq!(steps[1].status, Some(StepPhase::Terminated));
        assert_eq!(steps[1].reason.as_deref(), Some("Error"));
        assert!(steps[1].fields.is_empty());
        assert_eq!(steps[1].icon(), Some(StatusIcon::Failure));
    }

    #[test]
    fn test_successful_undeclared_step_is_omitted() {
        let steps = steps_status(&[Step::named("a")], &[terminated("init", "Done", 0)]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, "a");
    }

    #[test]
    fn test_undeclared_without_termination_is_omitted() {
        let live = states(json!([
            {"name": "sidecar", "running": {}},
            {"name": "creds", "terminated": {"reason": "OOMKilled"}}
        ]));
        let steps = steps_status(&[], &live);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, "creds");
    }

    #[test]
    fn test_undeclared_keep_live_order() {
        let live = vec![
            terminated("git-source", "Error", 128),
            terminated("build", "Completed", 0),
            terminated("init-creds", "Error", 1),
        ];
        let ids: Vec<_> = steps_status(&[Step::named("build")], &live)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, ["build", "git-source", "init-creds"]);
    }

    #[test]
    fn test_synthetic_keys_overwrite_declared_fields() {
        let step: Step = serde_json::from_value(json!({
            "name": "build",
            "id": "stale-id",
            "stepName": "other",
            "status": "bogus",
            "image": "alpine"
        }))
        .unwrap();
        let steps = steps_status(&[step], &[]);
        let value = serde_json::to_value(&steps[0]).unwrap();
        assert_eq!(value["id"], json!("build"));
        assert_eq!(value["stepName"], json!("build"));
        assert_eq!(value["name"], json!("build"));
        assert_eq!(value["image"], json!("alpine"));
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_first_live_match_wins() {
        let live = states(json!([
            {"name": "a", "running": {}},
            {"name": "a", "terminated": {"reason": "Error", "exitCode": 1}}
        ]));
        let steps = steps_status(&[Step::named("a")], &live);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].status, Some(StepPhase::Running));
        assert_eq!(steps[0].reason, None);
        assert!(steps[0].step_status.as_ref().unwrap().running.is_some());
    }

    #[test]
    fn test_repeated_undeclared_failures_all_appended() {
        let live = vec![
            terminated("init", "E1", 2),
            terminated("init", "E2", 3),
        ];
        let steps = steps_status(&[Step::named("a")], &live);
        let summary: Vec<_> = steps
            .iter()
            .map(|s| (s.id.as_str(), s.status, s.reason.as_deref()))
            .collect();
        assert_eq!(
            summary,
            [
                ("a", None, None),
                ("init", Some(StepPhase::Terminated), Some("E1")),
                ("init", Some(StepPhase::Terminated), Some("E2")),
            ]
        );
    }

    #[test]
    fn test_task_run_step_matches() {
        let run: TaskRun = serde_json::from_value(json!({
            "id": "run-1",
            "steps": [{"id": "s1", "stepName": "build", "status": "running", "extra": 1}]
        }))
        .unwrap();
        let selected = task_run_step("s1", Some(&run)).unwrap();
        assert_eq!(selected.step_name, "build");
        assert_eq!(selected.status, Some(StepPhase::Running));
        assert_eq!(selected.reason, None);
        assert!(selected.step_status.is_none());
        assert_eq!(selected.definition["extra"], json!(1));
        assert_eq!(selected.definition["id"], json!("s1"));
        for key in ["stepName", "stepStatus", "status", "reason"] {
            assert!(!selected.definition.contains_key(key));
        }
    }

    #[test]
    fn test_task_run_step_not_found() {
        let empty = TaskRun {
            id: "run-1".to_string(),
            ..TaskRun::default()
        };
        let with_steps = TaskRun {
            id: "run-1".to_string(),
            steps: Some(steps_status(&[Step::named("a")], &[])),
            ..TaskRun::default()
        };
        assert!(task_run_step("a", None).is_none());
        assert!(task_run_step("a", Some(&empty)).is_none());
        assert!(task_run_step("b", Some(&with_steps)).is_none());
        assert!(task_run_step("a", Some(&with_steps)).is_some());
    }

    #[test]
    fn test_task_run_view() {
        let resource: Resource = serde_json::from_value(json!({
            "metadata": {"name": "build-run-x7k2"},
            "spec": {"taskRef": {"name": "build"}},
            "status": {
                "conditions": [{"type": "Succeeded", "status": "False", "reason": "Failed"}],
                "steps": [
                    {"name": "compile", "terminated": {"reason": "Error", "exitCode": 2}},
                    {"name": "credential-initializer", "terminated": {"exitCode": 0}}
                ]
            }
        }))
        .unwrap();
        let task = Task {
            spec: crate::engine::types::TaskSpec {
                steps: vec![Step::named("compile"), Step::named("publish")],
            },
            ..Task::default()
        };

        let run = task_run_view(&resource, Some(&task));
        assert_eq!(run.id, "build-run-x7k2");
        assert_eq!(run.fields["taskName"], json!("build"));
        assert_eq!(run.fields["reason"], json!("Failed"));
        let steps = run.steps.unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].reason.as_deref(), Some("Error"));
        assert_eq!(steps[1].status, None);
    }
}
