//! Resolver: Finds selected records and derives type tags.

use super::types::{Task, TaskRun};

/// Finds the task named `selected_task_name`.
#[must_use]
pub fn selected_task<'a>(selected_task_name: &str, tasks: &'a [Task]) -> Option<&'a Task> {
    tasks.iter().find(|t| t.metadata.name == selected_task_name)
}

/// Finds the task run whose id is `selected_task_id`.
#[must_use]
pub fn selected_task_run<'a>(selected_task_id: &str, task_runs: &'a [TaskRun]) -> Option<&'a TaskRun> {
    task_runs.iter().find(|run| run.id == selected_task_id)
}

/// Splits an identifier into words.
///
/// Non-alphanumeric characters separate words, and a new word starts at a
/// lower-to-upper transition, at the last capital of an acronym followed by
/// lowercase (`HTTPServer` -> `HTTP`, `Server`), and between letters and digits.
/// Apostrophes are dropped first, so `Task'sRun` splits as `Tasks`, `Run`.
#[must_use]
pub fn split_words(input: &str) -> Vec<String> {
    let input: String = input.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')).collect();
    let mut words = Vec::new();

    for chunk in input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
    {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let acronym_end = prev.is_uppercase()
                && cur.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || prev.is_numeric() != cur.is_numeric()
                || acronym_end;
            if boundary {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        words.push(chars[start..].iter().collect());
    }

    words
}

/// Lower snake case: `PipelineRun` -> `pipeline_run`.
#[must_use]
pub fn snake_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a resource type to its plural tag: `TaskRun` -> `TASK_RUNS`.
#[must_use]
pub fn type_to_plural(kind: &str) -> String {
    format!("{}S", snake_case(kind).to_uppercase())
}
