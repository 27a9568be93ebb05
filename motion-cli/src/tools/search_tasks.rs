//! `search-motion-tasks`: natural-language task search.

use anyhow::{bail, Result};
use motion_api::{MotionApi, TaskListParams};
use motion_core::{
    apply_search_filters, parse_search_query, priority_emoji, sort_tasks, truncate_chars,
    SearchQuery, Task,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::{plural, ToolContext};
use crate::hints::{wrap_failure, SEARCH_TASKS_HINTS};

pub const NAME: &str = "search-motion-tasks";
pub const FAILURE: &str = "Failed to search Motion tasks";

const DESCRIPTION_PREVIEW: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchTasksParams {
    pub search_query: String,
    pub limit: Option<usize>,
    pub workspace_id: Option<String>,
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, params: SearchTasksParams) -> Result<String> {
    search(api, ctx, params)
        .await
        .map_err(|e| wrap_failure(FAILURE, e, SEARCH_TASKS_HINTS))
}

async fn search(api: &dyn MotionApi, ctx: &ToolContext, params: SearchTasksParams) -> Result<String> {
    info!(query = %params.search_query, "searching tasks");
    if params.search_query.trim().is_empty() {
        bail!("Search query is required");
    }

    let query = parse_search_query(&params.search_query);
    debug!(?query, "parsed search query");

    let request = TaskListParams {
        name: query.name_filter().map(String::from),
        workspace_id: params.workspace_id.clone(),
        ..TaskListParams::default()
    };
    let page = api.list_tasks(&request).await?;

    let mut tasks = apply_search_filters(page.tasks, &query);
    sort_tasks(&mut tasks);
    if let Some(limit) = params.limit.filter(|&n| n > 0) {
        tasks.truncate(limit);
    }

    Ok(format_results(&tasks, &query, ctx))
}

fn format_results(tasks: &[Task], query: &SearchQuery, ctx: &ToolContext) -> String {
    if tasks.is_empty() {
        return "No tasks found matching your search criteria.".to_string();
    }

    let mut out = format!("Found {} task{}:\n\n", tasks.len(), plural(tasks.len()));
    for (i, task) in tasks.iter().enumerate() {
        let done = if task.completed { "✅" } else { "⏳" };
        out.push_str(&format!("{}. {done} **{}**\n", i + 1, task.name));
        out.push_str(&format!(
            "   {} Priority: {}\n",
            priority_emoji(task.priority),
            task.priority.map_or("NONE", |p| p.as_str())
        ));
        if let Some(project) = task.project_name() {
            out.push_str(&format!("   📁 Project: {project}\n"));
        }
        if let Some(status) = &task.status {
            out.push_str(&format!("   📊 Status: {}\n", status.name));
        }
        if let Some(due) = task.due_date {
            let flag = if task.is_overdue(ctx.now) { " (⚠️ OVERDUE)" } else { "" };
            out.push_str(&format!("   📅 Due: {}{flag}\n", ctx.date(due)));
        }
        if !task.assignees.is_empty() {
            out.push_str(&format!("   👤 Assigned to: {}\n", task.assignee_names()));
        }
        if !task.description.is_empty() {
            out.push_str(&format!(
                "   📝 Description: {}\n",
                truncate_chars(&task.description, DESCRIPTION_PREVIEW)
            ));
        }
        if task.scheduling_issue {
            out.push_str("   ⚠️ Has scheduling issues\n");
        }
        out.push_str(&format!("   🔗 ID: {}\n\n", task.id));
    }

    if let Some(name) = query.name_filter() {
        out.push_str(&format!("🔍 Searched for tasks containing: \"{name}\"\n"));
    }
    if let Some(p) = query.priority {
        out.push_str(&format!("🎯 Filtered by priority: {}\n", p.as_str()));
    }
    if let Some(done) = query.completed {
        let label = if done { "Completed" } else { "Pending" };
        out.push_str(&format!("📊 Filtered by status: {label}\n"));
    }
    out
}
