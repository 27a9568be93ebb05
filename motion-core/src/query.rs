//! Natural-language search queries.
//!
//! Free text like "urgent tasks assigned to alice in project launch" is reduced to a
//! priority filter, a completion filter, assignee/project search strings, and whatever
//! is left over as a name filter. Matching is keyword based; there is no grammar.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::keywords::{group, KeywordTable};
use crate::task::Priority;

/// Priority keywords inside free-text queries.
pub const PRIORITY_QUERY_KEYWORDS: KeywordTable<Priority> = KeywordTable::new(&[
    group(&["urgent", "asap", "critical"], Priority::Asap),
    group(&["high priority", "important"], Priority::High),
    group(&["low priority", "minor"], Priority::Low),
    group(&["medium priority", "normal"], Priority::Medium),
]);

/// Priority keywords for a dedicated priority field ("high", "low", ...).
pub const PRIORITY_FIELD_KEYWORDS: KeywordTable<Priority> = KeywordTable::new(&[
    group(&["urgent", "asap", "critical"], Priority::Asap),
    group(&["high", "important"], Priority::High),
    group(&["low", "minor"], Priority::Low),
    group(&["medium", "normal"], Priority::Medium),
]);

/// Completion keywords when searching.
pub const COMPLETION_SEARCH_KEYWORDS: KeywordTable<bool> = KeywordTable::new(&[
    group(&["completed", "done", "finished"], true),
    group(&["pending", "incomplete", "todo"], false),
]);

/// Generic words that carry no filter meaning in a search.
const FILLER_WORDS: &[&str] = &["show me", "show", "find", "list", "all", "my", "tasks", "task"];

static ASSIGNEE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"assigned to (\w+)").expect("invalid assignee regex"));
static PROJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"in project (\w+)").expect("invalid project regex"));
static ASSIGNEE_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)assigned to \w+").expect("invalid assignee span regex"));
static PROJECT_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)in project \w+").expect("invalid project span regex"));
static PRIORITY_SPAN_RE: Lazy<Regex> = Lazy::new(|| alternation(PRIORITY_QUERY_KEYWORDS.needles()));
static COMPLETION_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| alternation(COMPLETION_SEARCH_KEYWORDS.needles()));
static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    let words: Vec<String> = FILLER_WORDS.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).expect("invalid filler regex")
});

fn alternation<'a>(needles: impl Iterator<Item = &'a str>) -> Regex {
    let parts: Vec<String> = needles.map(regex::escape).collect();
    Regex::new(&format!("(?i)(?:{})", parts.join("|"))).expect("invalid keyword alternation")
}

/// Interpret a priority phrase inside a query. `None` means unresolved.
pub fn parse_query_priority(text: &str) -> Option<Priority> {
    PRIORITY_QUERY_KEYWORDS.resolve(text)
}

/// Interpret a dedicated priority field. `None` means unresolved; callers substitute a default.
pub fn parse_priority_field(text: &str) -> Option<Priority> {
    PRIORITY_FIELD_KEYWORDS.resolve(text.trim())
}

/// Ternary completion filter: `Some(true)`, `Some(false)` or unknown.
pub fn parse_search_completion(text: &str) -> Option<bool> {
    COMPLETION_SEARCH_KEYWORDS.resolve(text)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Remaining free text; empty means no name filter.
    pub name: String,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    /// Lower-cased single token from "assigned to X".
    pub assignee_search: Option<String>,
    /// Lower-cased single token from "in project X".
    pub project_search: Option<String>,
}

impl SearchQuery {
    pub fn name_filter(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

pub fn parse_search_query(query: &str) -> SearchQuery {
    let lower = query.to_lowercase();

    let priority = PRIORITY_QUERY_KEYWORDS.resolve_lowered(&lower);
    let completed = COMPLETION_SEARCH_KEYWORDS.resolve_lowered(&lower);
    let assignee_search = ASSIGNEE_RE
        .captures(&lower)
        .map(|c| c[1].to_string());
    let project_search = PROJECT_RE
        .captures(&lower)
        .map(|c| c[1].to_string());

    let mut rest = query.to_string();
    if priority.is_some() {
        rest = PRIORITY_SPAN_RE.replace_all(&rest, "").into_owned();
    }
    if completed.is_some() {
        rest = COMPLETION_SPAN_RE.replace_all(&rest, "").into_owned();
    }
    if assignee_search.is_some() {
        rest = ASSIGNEE_SPAN_RE.replace_all(&rest, "").into_owned();
    }
    if project_search.is_some() {
        rest = PROJECT_SPAN_RE.replace_all(&rest, "").into_owned();
    }
    rest = FILLER_RE.replace_all(&rest, "").into_owned();

    SearchQuery {
        name: rest.split_whitespace().collect::<Vec<_>>().join(" "),
        priority,
        completed,
        assignee_search,
        project_search,
    }
}
