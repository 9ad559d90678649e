//! Console rendering for breakdowns
//!
//! Shape only - the breakdown itself is produced and validated by the
//! strategies; this module just makes it readable.

use colored::Colorize;

use crate::domain::{Breakdown, TaskDescriptor};

/// Render a breakdown as human-readable text.
pub fn render_text(task: &TaskDescriptor, breakdown: &Breakdown) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", "Task:".bold(), breakdown.task_description));
    out.push_str(&format!("{} {}", "Category:".bold(), task.category.as_str().cyan()));
    if !task.scope.is_empty() {
        out.push_str(&format!("    {} {}", "Scope:".bold(), task.scope));
    }
    out.push_str("\n\n");

    for step in &breakdown.steps {
        out.push_str(&format!(
            "{} {}\n",
            format!("{}.", step.id).green().bold(),
            step.title.bold()
        ));
        out.push_str(&format!("   {}\n", step.description));
        if !step.files.is_empty() {
            out.push_str(&format!("   {}\n", step.files.join(", ").dimmed()));
        }
    }

    out
}

/// Render a breakdown as pretty JSON, with the classification alongside.
pub fn render_json(task: &TaskDescriptor, breakdown: &Breakdown) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "task": breakdown.task_description,
        "category": task.category,
        "scope": task.scope,
        "steps": breakdown.steps,
    }))
}
