//! motion-core: entity model, natural-language interpreters and display heuristics
//! for the Motion task-management service.
//!
//! Everything here is pure: no network, no clock reads. Callers pass `now` explicitly.

pub mod dates;
pub mod heuristics;
pub mod keywords;
pub mod matching;
pub mod ordering;
pub mod query;
pub mod summary;
pub mod task;
pub mod text;
pub mod time;
pub mod update;
pub mod workspace;

pub use dates::parse_natural_date;
pub use heuristics::{
    is_active_project, project_bucket, project_progress, status_bucket, task_progress,
    StatusPhase,
};
pub use keywords::{KeywordGroup, KeywordTable};
pub use matching::{apply_search_filters, find_project_by_name, project_matches};
pub use ordering::{compare_projects, compare_tasks, sort_projects, sort_tasks};
pub use query::{parse_priority_field, parse_query_priority, parse_search_query, SearchQuery};
pub use summary::{summarize_tasks, PriorityCounts, ProjectTaskStats, Recommendation, TaskSummary};
pub use task::{
    priority_emoji, priority_ordinal, DeadlineType, DurationKeyword, Label, Priority, Status, Task,
    TaskDuration, TaskProject,
};
pub use text::{sanitize_description, truncate_chars};
pub use update::{looks_like_task_id, parse_update_query, UpdateQuery};
pub use workspace::{Person, Project, Workspace, WorkspaceType};
