//! In-memory `MotionApi` for tool and command tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use motion_api::{
    ApiError, MotionApi, NewTask, PageMeta, Result, TaskListParams, TaskPatch, TasksPage, User,
};
use motion_core::{Person, Project, Task, Workspace};

use super::ToolContext;
use crate::config::Defaults;

#[derive(Default)]
pub struct FakeApi {
    pub workspaces: Vec<Workspace>,
    pub projects: HashMap<String, Vec<Project>>,
    pub tasks: Vec<Task>,
    /// Status code returned by every call when set.
    pub fail_with: Option<u16>,
    /// Workspaces whose project listing fails.
    pub broken_workspaces: Vec<String>,
    /// Projects whose task listing fails.
    pub broken_projects: Vec<String>,
    pub created: Mutex<Vec<NewTask>>,
    pub patched: Mutex<Vec<(String, TaskPatch)>>,
    pub task_queries: Mutex<Vec<TaskListParams>>,
}

pub fn status_error(code: u16) -> ApiError {
    let text = match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Error",
    };
    ApiError::Status {
        status: code,
        status_text: text.to_string(),
    }
}

impl FakeApi {
    fn check(&self) -> Result<()> {
        match self.fail_with {
            Some(code) => Err(status_error(code)),
            None => Ok(()),
        }
    }

    pub fn created(&self) -> Vec<NewTask> {
        self.created.lock().unwrap().clone()
    }

    pub fn patched(&self) -> Vec<(String, TaskPatch)> {
        self.patched.lock().unwrap().clone()
    }

    pub fn task_queries(&self) -> Vec<TaskListParams> {
        self.task_queries.lock().unwrap().clone()
    }

    fn find_task(&self, id: &str) -> Result<Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| status_error(404))
    }
}

#[async_trait]
impl MotionApi for FakeApi {
    async fn list_tasks(&self, params: &TaskListParams) -> Result<TasksPage> {
        self.check()?;
        self.task_queries.lock().unwrap().push(params.clone());
        if let Some(pid) = &params.project_id {
            if self.broken_projects.contains(pid) {
                return Err(status_error(500));
            }
        }
        let tasks = self
            .tasks
            .iter()
            .filter(|t| match &params.name {
                Some(n) => t.name.to_lowercase().contains(&n.to_lowercase()),
                None => true,
            })
            .filter(|t| match &params.project_id {
                Some(pid) => t.project.as_ref().is_some_and(|p| &p.id == pid),
                None => true,
            })
            .filter(|t| match &params.workspace_id {
                Some(ws) => &t.workspace.id == ws,
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();
        Ok(TasksPage {
            meta: PageMeta {
                next_cursor: None,
                page_size: tasks.len() as u32,
            },
            tasks,
        })
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.check()?;
        self.find_task(task_id)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.check()?;
        self.created.lock().unwrap().push(task.clone());
        let ws_id = task.workspace_id.clone().unwrap_or_default();
        let workspace = self
            .workspaces
            .iter()
            .find(|w| w.id == ws_id)
            .cloned()
            .unwrap_or_else(|| Workspace::new(ws_id.clone(), "Unknown"));
        let mut created = Task::new("new-task", task.name.clone(), workspace, now());
        created.priority = task.priority;
        created.duration = task.duration;
        created.due_date = task.due_date;
        created.deadline_type = task.deadline_type;
        if let Some(pid) = &task.project_id {
            let name = self
                .projects
                .values()
                .flatten()
                .find(|p| &p.id == pid)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| pid.clone());
            created = created.with_project(pid.clone(), name);
        }
        Ok(created)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        self.check()?;
        self.patched
            .lock()
            .unwrap()
            .push((task_id.to_string(), patch.clone()));
        let mut task = self.find_task(task_id)?;
        if let Some(p) = patch.priority {
            task.priority = Some(p);
        }
        if let Some(c) = patch.completed {
            task.completed = c;
        }
        Ok(task)
    }

    async fn list_projects(&self, workspace_id: Option<&str>) -> Result<Vec<Project>> {
        self.check()?;
        match workspace_id {
            Some(ws) if self.broken_workspaces.iter().any(|b| b == ws) => Err(status_error(500)),
            Some(ws) => Ok(self.projects.get(ws).cloned().unwrap_or_default()),
            None => {
                let mut all: Vec<Project> = self.projects.values().flatten().cloned().collect();
                all.sort_by(|a, b| a.id.cmp(&b.id));
                Ok(all)
            }
        }
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.check()?;
        self.projects
            .values()
            .flatten()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| status_error(404))
    }

    async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.check()?;
        Ok(self.workspaces.clone())
    }

    async fn current_user(&self) -> Result<User> {
        self.check()?;
        Ok(Person::new("me", "Test User"))
    }
}

/// Fixed clock for deterministic output: Tuesday 2026-03-10 15:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap()
}

pub fn context() -> ToolContext {
    ToolContext {
        defaults: Defaults::default(),
        tz: Tz::UTC,
        now: now(),
    }
}
