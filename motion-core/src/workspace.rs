//! Workspaces, projects and people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkspaceType {
    Team,
    Individual,
    #[serde(other)]
    Unknown,
}

impl WorkspaceType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkspaceType::Team => "TEAM",
            WorkspaceType::Individual => "INDIVIDUAL",
            WorkspaceType::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(rename = "type", default = "unknown_type")]
    pub kind: WorkspaceType,
}

fn unknown_type() -> WorkspaceType {
    WorkspaceType::Unknown
}

impl Workspace {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team_id: None,
            kind: WorkspaceType::Team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// HTML-bearing; run through `sanitize_description` before display.
    #[serde(default)]
    pub description: String,
    pub workspace_id: String,
    #[serde(default)]
    pub status: Option<Status>,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        workspace_id: impl Into<String>,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            workspace_id: workspace_id.into(),
            status: None,
            created_time,
            updated_time: created_time,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn updated_at(mut self, updated: DateTime<Utc>) -> Self {
        self.updated_time = updated;
        self
    }
}

/// A user: assignee, creator, or the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
        }
    }
}
