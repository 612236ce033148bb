//! Status Engine: Derives display status from resource conditions.
//!
//! Pure functions over decoded records. No I/O, safe to call per render.

use super::types::{Condition, Resource, SUCCEEDED};

/// The icon shown next to a resource or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    /// Still executing (spinner in graphical front-ends)
    Running,
    /// Finished and succeeded
    Success,
    /// Finished and failed
    Failure,
}

impl StatusIcon {
    /// Returns the terminal glyph for this icon.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Running => "◌",
            StatusIcon::Success => "✓",
            StatusIcon::Failure => "✗",
        }
    }

    /// Returns the display color hint for UI rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            StatusIcon::Running => "blue",
            StatusIcon::Success => "green",
            StatusIcon::Failure => "red",
        }
    }

    /// Icon for a condition, if its state has one.
    #[must_use]
    pub fn for_condition(condition: &Condition) -> Option<Self> {
        status_icon(condition.reason.as_deref(), Some(&condition.status))
    }
}

impl std::fmt::Display for StatusIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusIcon::Running => write!(f, "RUNNING"),
            StatusIcon::Success => write!(f, "SUCCEEDED"),
            StatusIcon::Failure => write!(f, "FAILED"),
        }
    }
}

/// Returns the first `Succeeded` condition of a resource.
///
/// `None` when the resource has no status, no conditions, or no such type.
#[must_use]
pub fn get_status(resource: &Resource) -> Option<&Condition> {
    resource
        .status
        .as_ref()?
        .conditions
        .iter()
        .find(|condition| condition.kind == SUCCEEDED)
}

/// Returns true if a (reason, status) pair describes work in progress.
#[must_use]
pub fn is_running(reason: Option<&str>, status: Option<&str>) -> bool {
    status == Some("Unknown") && matches!(reason, Some("Running" | "Building"))
}

/// Maps a (reason, status) pair to its icon.
///
/// Unknown states without a running reason have no icon.
#[must_use]
pub fn status_icon(reason: Option<&str>, status: Option<&str>) -> Option<StatusIcon> {
    if is_running(reason, status) {
        return Some(StatusIcon::Running);
    }

    match status {
        Some("True") => Some(StatusIcon::Success),
        Some("False") => Some(StatusIcon::Failure),
        _ => None,
    }
}
