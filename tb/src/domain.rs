//! Core domain types for task breakdowns

use serde::{Deserialize, Serialize};

/// Coarse category assigned to a task by the classifier
///
/// Exactly one category per task; [`TaskCategory::Other`] is the fallback
/// when no keyword rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    Crud,
    Authentication,
    Refactor,
    Feature,
    Bugfix,
    #[default]
    Other,
}

impl TaskCategory {
    /// All categories, in classifier rule order
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Crud,
        TaskCategory::Authentication,
        TaskCategory::Refactor,
        TaskCategory::Feature,
        TaskCategory::Bugfix,
        TaskCategory::Other,
    ];

    /// Canonical uppercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Crud => "CRUD",
            TaskCategory::Authentication => "AUTHENTICATION",
            TaskCategory::Refactor => "REFACTOR",
            TaskCategory::Feature => "FEATURE",
            TaskCategory::Bugfix => "BUGFIX",
            TaskCategory::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified task: the original text, its category, and the code area
/// it appears to target
///
/// Created once by the classifier and never mutated afterwards. `scope`
/// may be empty; strategies supply their own fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub description: String,
    pub category: TaskCategory,
    pub scope: String,
}

impl TaskDescriptor {
    pub fn new(description: impl Into<String>, category: TaskCategory, scope: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category,
            scope: scope.into(),
        }
    }
}

/// One actionable step within a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position within the breakdown, 1-based and contiguous
    pub id: u32,

    /// Short imperative title
    pub title: String,

    /// What the step accomplishes
    pub description: String,

    /// File paths the step is likely to touch (may be empty)
    #[serde(default)]
    pub files: Vec<String>,
}

/// The full result of analyzing one task: the originating text plus an
/// ordered step sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub task_description: String,
    pub steps: Vec<Step>,
}

impl Breakdown {
    pub fn new(task_description: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            task_description: task_description.into(),
            steps,
        }
    }

    /// A well-formed breakdown has at least one step and step ids that
    /// match their 1-based position exactly.
    pub fn is_well_formed(&self) -> bool {
        !self.steps.is_empty()
            && self
                .steps
                .iter()
                .enumerate()
                .all(|(idx, step)| step.id == (idx + 1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: u32) -> Step {
        Step {
            id,
            title: format!("Step {}", id),
            description: "Do the thing".to_string(),
            files: vec![],
        }
    }

    #[test]
    fn test_category_display_matches_serialized_form() {
        for category in TaskCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_category_default_is_other() {
        assert_eq!(TaskCategory::default(), TaskCategory::Other);
    }

    #[test]
    fn test_breakdown_well_formed() {
        let breakdown = Breakdown::new("do something", vec![step(1), step(2), step(3)]);
        assert!(breakdown.is_well_formed());
    }

    #[test]
    fn test_breakdown_empty_is_not_well_formed() {
        let breakdown = Breakdown::new("do something", vec![]);
        assert!(!breakdown.is_well_formed());
    }

    #[test]
    fn test_breakdown_with_gap_is_not_well_formed() {
        let breakdown = Breakdown::new("do something", vec![step(1), step(3)]);
        assert!(!breakdown.is_well_formed());
    }

    #[test]
    fn test_step_files_default_when_missing() {
        let step: Step = serde_json::from_str(r#"{"id": 1, "title": "t", "description": "d"}"#).unwrap();
        assert!(step.files.is_empty());
    }
}
