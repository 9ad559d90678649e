//! Task classifier - free text to a structured [`TaskDescriptor`]
//!
//! Classification is an ordered decision list; the first matching rule
//! wins. The rule order is a behavioral contract - reordering it changes
//! how ambiguous descriptions (say, one containing both "fix" and
//! "feature") are categorized.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{TaskCategory, TaskDescriptor};

/// CRUD keywords match as whole words only, so "updated" or "creates"
/// do not trigger the rule.
static CRUD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(create|read|update|delete|crud)\b").expect("valid regex"));

const AUTH_KEYWORDS: [&str; 7] = [
    "authentication",
    "auth",
    "login",
    "logout",
    "register",
    "signup",
    "signin",
];

const REFACTOR_KEYWORDS: [&str; 4] = ["refactor", "restructure", "clean up", "improve code"];

const FEATURE_KEYWORDS: [&str; 5] = ["feature", "add", "implement", "support", "enhance"];

const BUGFIX_KEYWORDS: [&str; 6] = ["bug", "fix", "error", "issue", "defect", "patch"];

/// Preposition pattern: everything after the first whole-word `in`, `for`,
/// or `to` names the scope.
static PREPOSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:in|for|to)\s+(.+)$").expect("valid regex"));

/// Entity pattern, kind first: "function parseDate", "module billing".
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(function|file|class|module|component)\s+([A-Za-z0-9_][A-Za-z0-9_./-]*)")
        .expect("valid regex")
});

/// Entity pattern, noun first: "payment module", "checkout component".
static NOUN_KIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z][A-Za-z0-9_-]*)\s+(function|file|class|module|component)\b")
        .expect("valid regex")
});

/// Classify a raw task description.
///
/// Pure: the same text always yields the same descriptor. Empty scope is
/// a normal outcome, never an error.
pub fn classify(text: &str) -> TaskDescriptor {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    let category = detect_category(trimmed, &lower);
    let scope = extract_scope(trimmed);
    debug!(%category, %scope, "classify: resolved");

    TaskDescriptor::new(trimmed, category, scope)
}

/// Ordered decision list; first matching rule wins.
fn detect_category(text: &str, lower: &str) -> TaskCategory {
    if CRUD_RE.is_match(text) {
        TaskCategory::Crud
    } else if AUTH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TaskCategory::Authentication
    } else if REFACTOR_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TaskCategory::Refactor
    } else if FEATURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TaskCategory::Feature
    } else if BUGFIX_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TaskCategory::Bugfix
    } else {
        TaskCategory::Other
    }
}

/// Extract the code area a task targets, or empty when nothing matches.
fn extract_scope(text: &str) -> String {
    if let Some(caps) = PREPOSITION_RE.captures(text) {
        debug!("extract_scope: preposition pattern matched");
        return tidy_scope(&caps[1]);
    }

    if let Some(caps) = ENTITY_RE.captures(text) {
        debug!("extract_scope: entity pattern matched");
        return format!("{} {}", caps[1].to_lowercase(), &caps[2]);
    }

    if let Some(caps) = NOUN_KIND_RE.captures(text) {
        debug!("extract_scope: noun-kind pattern matched");
        let noun = &caps[1];
        let kind = caps[2].to_lowercase();
        if is_article(noun) {
            return kind;
        }
        return format!("{} {}", noun, kind);
    }

    String::new()
}

/// Trim whitespace and trailing punctuation, then strip one leading article.
fn tidy_scope(raw: &str) -> String {
    let mut scope = raw
        .trim()
        .trim_end_matches(['.', ',', ';', ':', '!', '?'])
        .trim();

    for article in ["the ", "a ", "an "] {
        if scope.len() > article.len()
            && scope
                .get(..article.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(article))
        {
            scope = scope[article.len()..].trim_start();
            break;
        }
    }

    scope.to_string()
}

fn is_article(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "the" | "a" | "an")
}
