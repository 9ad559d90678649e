//! Template breakdown strategy
//!
//! Deterministic and offline: each category maps to a fixed step skeleton
//! with the task's scope substituted into titles, descriptions, and file
//! paths. Slug fallbacks guarantee a non-empty breakdown for every input,
//! including a fully empty description.

use async_trait::async_trait;
use tracing::debug;

use super::{BreakdownStrategy, StrategyError};
use crate::domain::{Breakdown, Step, TaskCategory, TaskDescriptor};

/// Longest description prefix used as the OTHER-category scope fallback
const FALLBACK_TOKEN_MAX: usize = 20;

/// Fixed per-category step templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateStrategy;

impl TemplateStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BreakdownStrategy for TemplateStrategy {
    async fn analyze(&self, task: &TaskDescriptor) -> Result<Breakdown, StrategyError> {
        debug!(category = %task.category, scope = %task.scope, "analyze: called");
        Ok(Breakdown::new(task.description.clone(), build_steps(task)))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

/// Dispatch to the per-category generator.
pub(crate) fn build_steps(task: &TaskDescriptor) -> Vec<Step> {
    match task.category {
        TaskCategory::Crud => crud_steps(task),
        TaskCategory::Authentication => authentication_steps(task),
        TaskCategory::Refactor => refactor_steps(task),
        TaskCategory::Feature => feature_steps(task),
        TaskCategory::Bugfix => bugfix_steps(task),
        TaskCategory::Other => other_steps(task),
    }
}

/// Sanitize a scope string into a filesystem-safe slug.
///
/// Lowercase; spaces, underscores, and hyphens collapse to single hyphens;
/// everything else non-alphanumeric is stripped; leading and trailing
/// hyphens are trimmed. An empty result falls back to the literal "scope".
/// Idempotent: sanitizing a slug returns it unchanged.
pub fn slugify(scope: &str) -> String {
    let mut slug = String::with_capacity(scope.len());
    let mut pending_hyphen = false;

    for c in scope.trim().to_lowercase().chars() {
        match c {
            ' ' | '_' | '-' => pending_hyphen = !slug.is_empty(),
            c if c.is_ascii_alphanumeric() => {
                if pending_hyphen {
                    slug.push('-');
                    pending_hyphen = false;
                }
                slug.push(c);
            }
            _ => {}
        }
    }

    if slug.is_empty() {
        "scope".to_string()
    } else {
        slug
    }
}

/// The task's scope, or a category-specific fallback when it is empty.
fn scope_or<'a>(task: &'a TaskDescriptor, fallback: &'a str) -> &'a str {
    let scope = task.scope.trim();
    if scope.is_empty() { fallback } else { scope }
}

/// First whitespace/punctuation-delimited token of the description,
/// truncated to [`FALLBACK_TOKEN_MAX`] characters.
fn first_token(description: &str) -> Option<String> {
    description
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .find(|token| !token.is_empty())
        .map(|token| token.chars().take(FALLBACK_TOKEN_MAX).collect())
}

/// Number the parts 1..n in order.
fn steps_from(parts: Vec<(String, String, Vec<String>)>) -> Vec<Step> {
    parts
        .into_iter()
        .enumerate()
        .map(|(idx, (title, description, files))| Step {
            id: (idx + 1) as u32,
            title,
            description,
            files,
        })
        .collect()
}

fn crud_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = scope_or(task, "resource");
    let slug = slugify(scope);
    steps_from(vec![
        (
            format!("Define the {scope} data model"),
            format!("Create the schema and model type for {scope}, including field types and constraints."),
            vec![format!("src/models/{slug}.rs")],
        ),
        (
            format!("Add input validation for {scope}"),
            format!("Validate create and update payloads for {scope} before they reach the handlers."),
            vec![format!("src/validators/{slug}.rs")],
        ),
        (
            "Implement create, read, update, and delete handlers".to_string(),
            format!("Wire the {scope} model into handlers covering all four operations."),
            vec![format!("src/controllers/{slug}.rs")],
        ),
        (
            format!("Register the {scope} routes"),
            format!("Expose the handlers under RESTful routes for {scope}."),
            vec![format!("src/routes/{slug}.rs")],
        ),
        (
            format!("Write CRUD tests for {scope}"),
            "Cover each operation plus the main validation failures.".to_string(),
            vec![format!("tests/{slug}_test.rs")],
        ),
        (
            format!("Document the {scope} endpoints"),
            format!("Describe request and response shapes for every {scope} endpoint."),
            vec![format!("docs/{slug}.md")],
        ),
    ])
}

/// Authentication is a whole-system concern, so its file paths are fixed
/// rather than derived from the scope.
fn authentication_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = scope_or(task, "the application");
    steps_from(vec![
        (
            "Create User model with password field".to_string(),
            "Define the user record with a unique identifier and a field for the hashed password.".to_string(),
            vec!["src/models/user.rs".to_string()],
        ),
        (
            "Add password hashing and verification".to_string(),
            "Hash passwords on write and verify them on login; never store plaintext.".to_string(),
            vec!["src/auth/password.rs".to_string()],
        ),
        (
            "Implement the registration endpoint".to_string(),
            format!("Accept signup requests for {scope}, validate them, and persist new users."),
            vec!["src/routes/auth.rs".to_string(), "src/controllers/auth.rs".to_string()],
        ),
        (
            "Implement login and token issuance".to_string(),
            "Check credentials and hand back a session token on success.".to_string(),
            vec!["src/auth/token.rs".to_string(), "src/controllers/auth.rs".to_string()],
        ),
        (
            "Add an authentication middleware".to_string(),
            format!("Reject unauthenticated requests to the protected parts of {scope}."),
            vec!["src/middleware/authenticate.rs".to_string()],
        ),
        (
            "Implement logout and session invalidation".to_string(),
            "Invalidate the session token so it cannot be replayed.".to_string(),
            vec!["src/controllers/auth.rs".to_string()],
        ),
        (
            "Write end-to-end tests for the auth flow".to_string(),
            "Cover register, login, an authenticated request, and logout in one flow.".to_string(),
            vec!["tests/auth_flow_test.rs".to_string()],
        ),
    ])
}

fn refactor_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = scope_or(task, "the code");
    let slug = slugify(scope);
    steps_from(vec![
        (
            format!("Map the current structure of {scope}"),
            "List the involved types and call paths, and note what makes them hard to change.".to_string(),
            vec![format!("docs/refactor-{slug}.md")],
        ),
        (
            format!("Add characterization tests around {scope}"),
            "Pin down the current observable behavior before touching anything.".to_string(),
            vec![format!("tests/{slug}_characterization.rs")],
        ),
        (
            format!("Restructure {scope} incrementally"),
            "Apply the restructuring in small, always-passing moves.".to_string(),
            vec![],
        ),
        (
            "Update call sites and remove dead code".to_string(),
            format!("Migrate everything that used the old shape of {scope}, then delete the leftovers."),
            vec![],
        ),
        (
            "Verify behavior and update documentation".to_string(),
            "Run the characterization tests and record the new structure.".to_string(),
            vec![format!("docs/refactor-{slug}.md")],
        ),
    ])
}

fn feature_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = scope_or(task, "the feature");
    let slug = slugify(scope);
    steps_from(vec![
        (
            format!("Write a short design note for {scope}"),
            "Capture the intended behavior, inputs, outputs, and edge cases.".to_string(),
            vec![format!("docs/{slug}-design.md")],
        ),
        (
            format!("Extend the data model for {scope}"),
            "Add or adjust the records and fields the feature needs.".to_string(),
            vec![format!("src/models/{slug}.rs")],
        ),
        (
            "Implement the core logic".to_string(),
            format!("Build the behavior of {scope} behind a small, testable interface."),
            vec![format!("src/services/{slug}.rs")],
        ),
        (
            format!("Expose {scope} through the API"),
            "Wire the new logic into routes or commands users can reach.".to_string(),
            vec![format!("src/routes/{slug}.rs")],
        ),
        (
            format!("Write tests for {scope}"),
            "Cover the happy path and each documented edge case.".to_string(),
            vec![format!("tests/{slug}_test.rs")],
        ),
        (
            format!("Document {scope}"),
            "Describe how to use the feature and any configuration it takes.".to_string(),
            vec![format!("docs/{slug}.md")],
        ),
    ])
}

fn bugfix_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = scope_or(task, "the defect");
    let slug = slugify(scope);
    steps_from(vec![
        (
            "Reproduce the issue with a failing test".to_string(),
            format!("Write a regression test that captures the faulty behavior around {scope}."),
            vec![format!("tests/{slug}_regression.rs")],
        ),
        (
            "Isolate the root cause".to_string(),
            format!("Trace the failure through {scope} and identify the code responsible."),
            vec![],
        ),
        (
            "Apply the fix".to_string(),
            "Correct the behavior with the smallest change that makes the regression test pass.".to_string(),
            vec![],
        ),
        (
            "Verify the fix and check for regressions".to_string(),
            format!("Run the full suite and confirm nothing else changed around {scope}."),
            vec![format!("tests/{slug}_regression.rs")],
        ),
    ])
}

fn other_steps(task: &TaskDescriptor) -> Vec<Step> {
    let scope = if task.scope.trim().is_empty() {
        first_token(&task.description).unwrap_or_else(|| "task".to_string())
    } else {
        task.scope.trim().to_string()
    };
    let slug = slugify(&scope);
    steps_from(vec![
        (
            format!("Clarify requirements for {scope}"),
            "Restate the goal, note open questions, and agree on what done means.".to_string(),
            vec![format!("docs/{slug}-notes.md")],
        ),
        (
            "Implement the change".to_string(),
            format!("Make the change in small commits, keeping {scope} working throughout."),
            vec![],
        ),
        (
            "Verify and document the result".to_string(),
            "Check the outcome against the agreed goal and record what changed.".to_string(),
            vec![format!("docs/{slug}-notes.md")],
        ),
    ])
}
