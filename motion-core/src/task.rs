//! Task model as returned by the Motion REST API.
//!
//! Entities are read-only snapshots: every command fetches them fresh and drops them after
//! rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workspace::{Person, Workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Asap,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Asap, Priority::High, Priority::Medium, Priority::Low];

    /// Sort ordinal: ASAP first.
    pub fn ordinal(self) -> u8 {
        match self {
            Priority::Asap => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Asap => "ASAP",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Priority::Asap => "🔴",
            Priority::High => "🟠",
            Priority::Medium => "🟡",
            Priority::Low => "🔵",
        }
    }

    /// Parse the canonical upper-case name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Ordinal for an optional priority; unknown sorts after LOW.
pub fn priority_ordinal(priority: Option<Priority>) -> u8 {
    priority.map(Priority::ordinal).unwrap_or(4)
}

/// Marker for an optional priority; unknown renders as a white circle.
pub fn priority_emoji(priority: Option<Priority>) -> &'static str {
    priority.map(Priority::emoji).unwrap_or("⚪")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeadlineType {
    Hard,
    Soft,
    None,
}

impl DeadlineType {
    pub fn from_name(s: &str) -> Option<DeadlineType> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HARD" => Some(DeadlineType::Hard),
            "SOFT" => Some(DeadlineType::Soft),
            "NONE" => Some(DeadlineType::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationKeyword {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "REMINDER")]
    Reminder,
}

/// Task duration: minutes, or one of the service's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskDuration {
    Minutes(u32),
    Keyword(DurationKeyword),
}

impl TaskDuration {
    /// `"NONE"`, `"REMINDER"` or a positive integer; anything else is unresolved.
    pub fn parse(s: &str) -> Option<TaskDuration> {
        let s = s.trim();
        match s {
            "NONE" => Some(TaskDuration::Keyword(DurationKeyword::None)),
            "REMINDER" => Some(TaskDuration::Keyword(DurationKeyword::Reminder)),
            _ => match s.parse::<u32>() {
                Ok(n) if n > 0 => Some(TaskDuration::Minutes(n)),
                _ => None,
            },
        }
    }

    pub fn minutes(self) -> Option<u32> {
        match self {
            TaskDuration::Minutes(n) => Some(n),
            TaskDuration::Keyword(_) => None,
        }
    }
}

/// Status label with its two workspace flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub name: String,
    #[serde(default)]
    pub is_default_status: bool,
    #[serde(default)]
    pub is_resolved_status: bool,
}

impl Status {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default_status: false,
            is_resolved_status: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Project reference embedded in a task. Some payloads capitalise the keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProject {
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "WorkspaceId")]
    pub workspace_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: Option<TaskDuration>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deadline_type: Option<DeadlineType>,
    #[serde(default)]
    pub parent_recurring_task_id: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub creator: Option<Person>,
    #[serde(default)]
    pub project: Option<TaskProject>,
    #[serde(default)]
    pub status: Option<Status>,
    pub workspace: Workspace,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignees: Vec<Person>,
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub scheduling_issue: bool,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        workspace: Workspace,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            duration: None,
            due_date: None,
            deadline_type: None,
            parent_recurring_task_id: None,
            completed: false,
            creator: None,
            project: None,
            status: None,
            workspace,
            labels: Vec::new(),
            statuses: Vec::new(),
            priority: None,
            assignees: Vec::new(),
            scheduled_start: None,
            scheduled_end: None,
            created_time,
            scheduling_issue: false,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_project(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.project = Some(TaskProject {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            workspace_id: self.workspace.id.clone(),
        });
        self
    }

    pub fn with_assignee(mut self, person: Person) -> Self {
        self.assignees.push(person);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Overdue iff a due date exists, is in the past, and the task is not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    pub fn assignee_names(&self) -> String {
        self.assignees
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
