//! Natural-language task updates: "mark as done", "set as urgent", "in progress".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::keywords::{group, KeywordTable};
use crate::query::PRIORITY_QUERY_KEYWORDS;
use crate::task::Priority;

/// Completion keywords for updates. Narrower than the search table.
pub const COMPLETION_UPDATE_KEYWORDS: KeywordTable<bool> = KeywordTable::new(&[
    group(&["complete", "done", "finished"], true),
    group(&["incomplete", "reopen", "not done"], false),
]);

/// Coarse workflow labels. Only reported; never resolved to a remote status id.
pub const STATUS_LABEL_KEYWORDS: KeywordTable<&'static str> = KeywordTable::new(&[
    group(&["in progress", "working on"], "In Progress"),
    group(&["todo", "to do"], "Todo"),
    group(&["review", "reviewing"], "Review"),
    group(&["blocked", "waiting"], "Blocked"),
]);

static TASK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-f0-9-]{36}$").expect("invalid task id regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateQuery {
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub status_label: Option<&'static str>,
}

impl UpdateQuery {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.completed.is_none() && self.status_label.is_none()
    }
}

pub fn parse_update_query(query: &str) -> UpdateQuery {
    let lower = query.to_lowercase();
    UpdateQuery {
        priority: PRIORITY_QUERY_KEYWORDS.resolve_lowered(&lower),
        completed: COMPLETION_UPDATE_KEYWORDS.resolve_lowered(&lower),
        status_label: STATUS_LABEL_KEYWORDS.resolve_lowered(&lower),
    }
}

/// True when `identifier` has the shape of a task id rather than a name.
pub fn looks_like_task_id(identifier: &str) -> bool {
    TASK_ID_RE.is_match(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_done() {
        let u = parse_update_query("mark as done");
        assert_eq!(u.completed, Some(true));
        assert_eq!(u.priority, None);
        assert_eq!(u.status_label, None);
    }

    #[test]
    fn reopen_sets_incomplete() {
        assert_eq!(parse_update_query("reopen it").completed, Some(false));
    }

    // The `true` row is checked first and its needles are substrings of these.
    #[test]
    fn negated_completion_words_still_match_complete() {
        assert_eq!(parse_update_query("mark as incomplete").completed, Some(true));
        assert_eq!(parse_update_query("not done yet").completed, Some(true));
    }

    #[test]
    fn urgent_and_status_together() {
        let u = parse_update_query("Set as URGENT and move to review");
        assert_eq!(u.priority, Some(Priority::Asap));
        assert_eq!(u.status_label, Some("Review"));
        assert_eq!(u.completed, None);
    }

    #[test]
    fn status_label_precedence() {
        assert_eq!(parse_update_query("working on it").status_label, Some("In Progress"));
        assert_eq!(parse_update_query("back to do").status_label, Some("Todo"));
        assert_eq!(parse_update_query("waiting on vendor").status_label, Some("Blocked"));
    }

    #[test]
    fn nothing_recognized_is_empty() {
        let u = parse_update_query("rename to something nicer");
        assert!(u.is_empty());
    }

    #[test]
    fn task_id_shape() {
        assert!(looks_like_task_id("0b6c1c2e-4a7f-4d5e-9f3a-1b2c3d4e5f60"));
        assert!(looks_like_task_id("0B6C1C2E-4A7F-4D5E-9F3A-1B2C3D4E5F60"));
        assert!(!looks_like_task_id("Write launch post"));
        assert!(!looks_like_task_id("0b6c1c2e"));
    }
}
