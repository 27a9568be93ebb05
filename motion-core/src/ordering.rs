//! Sort orders for list rendering.

use std::cmp::Ordering;

use crate::heuristics::project_bucket;
use crate::task::{priority_ordinal, Task};
use crate::workspace::Project;

/// Incomplete before completed, then priority, then dated before undated (earliest first),
/// then newest first.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| priority_ordinal(a.priority).cmp(&priority_ordinal(b.priority)))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_time.cmp(&a.created_time))
}

pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Status bucket ascending, then most recently updated first.
pub fn compare_projects(a: &Project, b: &Project) -> Ordering {
    project_bucket(a)
        .cmp(&project_bucket(b))
        .then_with(|| b.updated_time.cmp(&a.updated_time))
}

pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(compare_projects);
}

/// Most recently updated first, ignoring status.
pub fn sort_projects_by_recency(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.updated_time.cmp(&a.updated_time));
}
