//! Core record types for pipeline resources.
//!
//! These mirror the JSON shapes served by the resource API. Fields the views
//! do not interpret are kept in flattened maps so they survive reshaping.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Condition type that carries the overall outcome of a run.
pub const SUCCEEDED: &str = "Succeeded";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// A status entry on a resource.
///
/// `status` is tri-state: "True", "False" or "Unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ref: Option<TaskRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Live step states, present on task runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}

/// Any watched resource (pipeline run, task run, build).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ResourceSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

/// A step as declared in a task definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Step {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A task definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: TaskSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl Terminated {
    /// Returns true unless the step reported exit code 0.
    ///
    /// A missing exit code counts as a failure.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.exit_code != Some(0)
    }

    /// Wall time between `startedAt` and `finishedAt`.
    ///
    /// Returns `None` if either timestamp is missing or unparseable, or if the
    /// step finished before it started.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        let started = DateTime::parse_from_rfc3339(self.started_at.as_deref()?).ok()?;
        let finished = DateTime::parse_from_rfc3339(self.finished_at.as_deref()?).ok()?;
        let elapsed = finished.signed_duration_since(started);
        (elapsed >= chrono::Duration::zero()).then_some(elapsed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Running {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waiting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Live runtime state of one step.
///
/// At most one of `terminated`, `running` and `waiting` is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepState {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated: Option<Terminated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<Running>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting: Option<Waiting>,
    /// Container and image fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Phase shown for a step in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPhase {
    Terminated,
    Running,
    Waiting,
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated => write!(f, "terminated"),
            Self::Running => write!(f, "running"),
            Self::Waiting => write!(f, "waiting"),
        }
    }
}

/// A step merged with its live state, ready for rendering.
///
/// `fields` holds every declared step field (including `name`) except the
/// five keys this struct sets itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStep {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StepPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_status: Option<StepState>,
    #[serde(default)]
    pub step_name: String,
    #[serde(default)]
    pub id: String,
}

/// A task run as held by the dashboard: an id plus its display steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRun {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<DisplayStep>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The fields of one task run step pulled apart for a detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedStep {
    /// The step without `stepName`, `stepStatus`, `status` and `reason`.
    pub definition: Map<String, Value>,
    pub reason: Option<String>,
    pub step_name: String,
    pub step_status: Option<StepState>,
    pub status: Option<StepPhase>,
}
