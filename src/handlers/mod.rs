//! Command handlers and shared rendering helpers.

pub mod plural;
pub mod status;
pub mod step;
pub mod steps;

use colored::{ColoredString, Colorize};
use pipeline_view::engine::state::StatusIcon;
use pipeline_view::engine::types::DisplayStep;

/// Output settings shared by every command.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub color: bool,
    pub json: bool,
}

impl RenderConfig {
    /// Turns color off when `disabled` is set.
    #[must_use]
    pub fn without_color(mut self, disabled: bool) -> Self {
        if disabled {
            self.color = false;
        }
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
        }
    }
}

/// Colored glyph for an icon; a dimmed circle when there is none.
pub fn paint(icon: Option<StatusIcon>) -> ColoredString {
    match icon {
        Some(icon) => icon.glyph().color(icon.color_hint()),
        None => "○".dimmed(),
    }
}

/// One-line summary of a step: phase, reason and duration when known.
pub fn step_summary(step: &DisplayStep) -> String {
    let phase = step
        .status
        .map_or_else(|| "pending".to_string(), |s| s.to_string());
    let mut summary = match &step.reason {
        Some(reason) => format!("{phase} ({reason})"),
        None => phase,
    };

    let duration = step
        .step_status
        .as_ref()
        .and_then(|s| s.terminated.as_ref())
        .and_then(|t| t.duration());
    if let Some(d) = duration {
        summary.push_str(&format!(" in {}", format_duration(d)));
    }
    summary
}

pub fn format_duration(d: chrono::Duration) -> String {
    let secs = d.num_seconds();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs >= 1 {
        format!("{secs}s")
    } else {
        format!("{}ms", d.num_milliseconds())
    }
}
