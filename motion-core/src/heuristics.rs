//! Display heuristics derived from status names and timestamps.
//!
//! Progress values are presentation signals for list rendering, not completion
//! percentages reported by the service. Status names are matched against fixed English
//! keywords; a name that matches nothing lands in the lowest-confidence bucket.

use chrono::{DateTime, Duration, Utc};

use crate::keywords::{contains_any, group, KeywordTable};
use crate::task::{Priority, Status, Task};
use crate::workspace::Project;

/// Status names that mark a project as finished or shelved.
pub const INACTIVE_STATUS_WORDS: &[&str] = &[
    "completed",
    "complete",
    "done",
    "finished",
    "cancelled",
    "canceled",
    "archived",
    "closed",
    "resolved",
    "ended",
];

/// Status names that count as fully done for progress.
const COMPLETED_STATUS_WORDS: &[&str] = &["completed", "complete", "done", "finished"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusPhase {
    InProgress,
    Planned,
    Backlog,
}

pub const STATUS_PHASE_KEYWORDS: KeywordTable<StatusPhase> = KeywordTable::new(&[
    group(&["progress", "active", "current"], StatusPhase::InProgress),
    group(&["todo", "planned", "ready", "next"], StatusPhase::Planned),
    group(&["backlog", "future", "someday"], StatusPhase::Backlog),
]);

/// Bucket for a status with no keyword match and no default flag.
pub const UNMATCHED_BUCKET: u8 = 4;
/// Bucket for projects without a status.
pub const PROJECT_NO_STATUS_BUCKET: u8 = 3;

pub fn status_phase(status: &Status) -> Option<StatusPhase> {
    STATUS_PHASE_KEYWORDS.resolve(&status.name)
}

/// Ordinal bucket for a status: in progress 1, planned 2, backlog 3, other 4.
/// An unmatched default status counts as planned.
pub fn status_bucket(status: &Status) -> u8 {
    match status_phase(status) {
        Some(StatusPhase::InProgress) => 1,
        Some(StatusPhase::Planned) => 2,
        Some(StatusPhase::Backlog) => 3,
        None if status.is_default_status => 2,
        None => UNMATCHED_BUCKET,
    }
}

pub fn project_bucket(project: &Project) -> u8 {
    project
        .status
        .as_ref()
        .map(status_bucket)
        .unwrap_or(PROJECT_NO_STATUS_BUCKET)
}

/// Active unless the status is resolved or its name contains an inactive word.
pub fn is_active_project(project: &Project) -> bool {
    match &project.status {
        None => true,
        Some(s) => !s.is_resolved_status && !contains_any(&s.name, INACTIVE_STATUS_WORDS),
    }
}

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 86_400.0
}

/// Heuristic progress estimate for a project in `[0.0, 1.0]`.
pub fn project_progress(project: &Project, now: DateTime<Utc>) -> f64 {
    let Some(status) = &project.status else {
        return 0.2;
    };

    if status.is_resolved_status || contains_any(&status.name, COMPLETED_STATUS_WORDS) {
        return 1.0;
    }

    match status_phase(status) {
        Some(StatusPhase::InProgress) => {
            let since_update = days_between(project.updated_time, now);
            let mut progress: f64 = 0.3;
            if since_update < 1.0 {
                progress = progress.max(0.8);
            } else if since_update < 3.0 {
                progress = progress.max(0.6);
            } else if since_update < 7.0 {
                progress = progress.max(0.5);
            }
            if days_between(project.created_time, now) > 30.0 {
                progress = (progress + 0.2).min(0.9);
            }
            progress
        }
        Some(StatusPhase::Planned) => 0.1,
        None if status.is_default_status => 0.1,
        Some(StatusPhase::Backlog) => 0.05,
        None => 0.2,
    }
}

fn priority_base(priority: Option<Priority>) -> f64 {
    match priority {
        Some(Priority::Asap) => 0.8,
        Some(Priority::High) => 0.6,
        Some(Priority::Medium) => 0.4,
        Some(Priority::Low) => 0.2,
        None => 0.3,
    }
}

/// Heuristic progress/urgency for a task in `[0.0, 1.0]`. 0.9 marks the overdue alert tier.
pub fn task_progress(task: &Task, now: DateTime<Utc>) -> f64 {
    let resolved = task.status.as_ref().is_some_and(|s| s.is_resolved_status);
    if task.completed || resolved {
        return 1.0;
    }

    if let Some(due) = task.due_date {
        if due < now {
            return 0.9;
        }
        let until = due - now;
        if until < Duration::days(1) {
            return 0.8;
        }
        if until < Duration::days(3) {
            return 0.6;
        }
    }

    priority_base(task.priority)
}
