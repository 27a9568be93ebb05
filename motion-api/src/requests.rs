//! Request and response payloads.

use chrono::{DateTime, Utc};
use motion_core::time::serialize_iso8601_opt;
use motion_core::{DeadlineType, Person, Priority, Project, Task, TaskDuration, Workspace};
use serde::{Deserialize, Serialize};

/// Filters for `GET /tasks`. Unset fields are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListParams {
    pub assignee_id: Option<String>,
    pub cursor: Option<String>,
    pub include_all_statuses: Option<bool>,
    pub label: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<String>,
    /// Repeated as `status=a&status=b`.
    pub status: Vec<String>,
    pub workspace_id: Option<String>,
}

impl TaskListParams {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn in_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    /// Query pairs in a fixed key order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(v) = &self.assignee_id {
            q.push(("assigneeId", v.clone()));
        }
        if let Some(v) = &self.cursor {
            q.push(("cursor", v.clone()));
        }
        if let Some(v) = self.include_all_statuses {
            q.push(("includeAllStatuses", v.to_string()));
        }
        if let Some(v) = &self.label {
            q.push(("label", v.clone()));
        }
        if let Some(v) = &self.name {
            q.push(("name", v.clone()));
        }
        if let Some(v) = &self.project_id {
            q.push(("projectId", v.clone()));
        }
        for s in &self.status {
            q.push(("status", s.clone()));
        }
        if let Some(v) = &self.workspace_id {
            q.push(("workspaceId", v.clone()));
        }
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TasksPage {
    #[serde(default)]
    pub meta: PageMeta,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProjectsPage {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WorkspacesPage {
    pub workspaces: Vec<Workspace>,
}

/// Body for `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_iso8601_opt"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_type: Option<DeadlineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Body for `PATCH /tasks/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.completed.is_none()
    }
}

/// The authenticated account.
pub type User = Person;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn query_repeats_status_and_skips_unset() {
        let params = TaskListParams {
            name: Some("report".into()),
            status: vec!["Todo".into(), "In Progress".into()],
            workspace_id: Some("ws1".into()),
            include_all_statuses: Some(false),
            ..TaskListParams::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("includeAllStatuses", "false".to_string()),
                ("name", "report".to_string()),
                ("status", "Todo".to_string()),
                ("status", "In Progress".to_string()),
                ("workspaceId", "ws1".to_string()),
            ]
        );
        assert!(TaskListParams::default().to_query().is_empty());
    }

    #[test]
    fn new_task_serializes_only_set_fields() {
        let mut t = NewTask::named("Ship it");
        t.priority = Some(Priority::Asap);
        t.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        t.deadline_type = Some(DeadlineType::Hard);
        t.duration = Some(TaskDuration::Minutes(30));

        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "name": "Ship it",
                "duration": 30,
                "dueDate": "2024-01-15T00:00:00.000Z",
                "deadlineType": "HARD",
                "priority": "ASAP"
            })
        );
    }

    #[test]
    fn patch_omits_untouched_fields() {
        let patch = TaskPatch {
            completed: Some(true),
            ..TaskPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({"completed": true}));
    }
}
