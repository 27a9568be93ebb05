//! `create-motion-task`: create a task from loosely worded fields.

use anyhow::{bail, Result};
use motion_api::{MotionApi, NewTask};
use motion_core::{
    find_project_by_name, parse_natural_date, parse_priority_field, priority_emoji, DeadlineType,
    Priority, Task, TaskDuration,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::ToolContext;
use crate::hints::{wrap_failure, CREATE_TASK_HINTS};

pub const NAME: &str = "create-motion-task";
pub const FAILURE: &str = "Failed to create Motion task";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTaskParams {
    pub task_name: String,
    pub task_description: Option<String>,
    /// Free text such as "urgent" or "low".
    pub priority: Option<String>,
    pub duration_minutes: Option<i64>,
    /// "today", "in 3 days", "next friday", or an absolute date.
    pub due_date: Option<String>,
    pub project_name: Option<String>,
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, params: CreateTaskParams) -> Result<String> {
    create(api, ctx, params)
        .await
        .map_err(|e| wrap_failure(FAILURE, e, CREATE_TASK_HINTS))
}

async fn create(api: &dyn MotionApi, ctx: &ToolContext, params: CreateTaskParams) -> Result<String> {
    info!(name = %params.task_name, "creating task");

    let name = params.task_name.trim();
    if name.is_empty() {
        bail!("Task name is required");
    }
    let mut task = NewTask::named(name);

    task.description = params
        .task_description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);

    let priority = params
        .priority
        .as_deref()
        .and_then(parse_priority_field)
        .or_else(|| ctx.defaults.priority())
        .unwrap_or(Priority::Medium);
    task.priority = Some(priority);

    task.duration = match params.duration_minutes {
        Some(n) if n > 0 => u32::try_from(n).ok().map(TaskDuration::Minutes),
        _ => ctx.defaults.duration(),
    };

    if let Some(raw) = params.due_date.as_deref() {
        match parse_natural_date(raw, ctx.now, ctx.tz) {
            Some(due) => {
                task.due_date = Some(due);
                task.deadline_type = Some(if priority == Priority::Asap {
                    DeadlineType::Hard
                } else {
                    DeadlineType::Soft
                });
            }
            None => warn!(due = raw, "could not parse due date, leaving it unset"),
        }
    }

    let workspace_id = match &ctx.defaults.workspace_id {
        Some(ws) => ws.clone(),
        None => api.default_workspace_id().await?,
    };

    match params.project_name.as_deref() {
        Some(wanted) => match api.list_projects(Some(&workspace_id)).await {
            Ok(projects) => match find_project_by_name(&projects, wanted) {
                Some(p) => {
                    info!(project = %p.name, id = %p.id, "matched project");
                    task.project_id = Some(p.id.clone());
                }
                None => {
                    let available: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
                    warn!(wanted, available = %available.join(", "), "no matching project");
                }
            },
            Err(e) => warn!(error = %e, "project lookup failed"),
        },
        None => task.project_id = ctx.defaults.project_id.clone(),
    }
    task.workspace_id = Some(workspace_id);

    let created = api.create_task(&task).await?;
    info!(id = %created.id, "task created");
    Ok(format_created(&created, ctx))
}

fn format_created(task: &Task, ctx: &ToolContext) -> String {
    let mut out = format!("✅ Successfully created task: \"{}\"", task.name);
    if let Some(project) = task.project_name() {
        out.push_str(&format!("\n📁 Project: {project}"));
    }
    if let Some(p) = task.priority {
        out.push_str(&format!("\n{} Priority: {}", priority_emoji(Some(p)), p.as_str()));
    }
    if let Some(minutes) = task.duration.and_then(TaskDuration::minutes) {
        out.push_str(&format!("\n⏱️ Duration: {minutes} minutes"));
    }
    if let Some(due) = task.due_date {
        out.push_str(&format!("\n📅 Due: {}", ctx.date(due)));
    }
    out.push_str(&format!("\n🏢 Workspace: {}", task.workspace.name));
    out.push_str(&format!("\n🔗 Task ID: {}", task.id));
    out
}
