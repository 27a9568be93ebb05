//! Client-side filters and name matching.

use crate::query::SearchQuery;
use crate::task::Task;
use crate::workspace::Project;

/// Case-insensitive exact match first, then containment in either direction.
pub fn find_project_by_name<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    projects
        .iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .or_else(|| {
            projects.iter().find(|p| {
                let have = p.name.to_lowercase();
                have.contains(&wanted) || wanted.contains(&have)
            })
        })
}

/// Filters the API cannot apply: priority, completion, assignee and project search.
pub fn apply_search_filters(tasks: Vec<Task>, query: &SearchQuery) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| query.priority.is_none() || t.priority == query.priority)
        .filter(|t| query.completed.is_none_or(|c| t.completed == c))
        .filter(|t| match &query.assignee_search {
            None => true,
            Some(needle) => t
                .assignees
                .iter()
                .any(|a| a.name.to_lowercase().contains(needle.as_str())),
        })
        .filter(|t| match &query.project_search {
            None => true,
            Some(needle) => t
                .project_name()
                .is_some_and(|name| name.to_lowercase().contains(needle.as_str())),
        })
        .collect()
}

/// Project search by name or (raw) description.
pub fn project_matches(project: &Project, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty()
        || project.name.to_lowercase().contains(&q)
        || project.description.to_lowercase().contains(&q)
}
