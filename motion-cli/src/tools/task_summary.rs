//! `get-task-summary`: workload overview with recommendations.

use anyhow::Result;
use motion_api::{MotionApi, TaskListParams};
use motion_core::time::local_midnight_utc;
use motion_core::{priority_emoji, summarize_tasks, Recommendation, Task, TaskSummary};
use serde::Deserialize;
use tracing::info;

use super::{plural, ToolContext};
use crate::hints::{wrap_failure, TASK_SUMMARY_HINTS};

pub const NAME: &str = "get-task-summary";
pub const FAILURE: &str = "Failed to get task summary";

/// Items listed per section before "... and N more".
const SECTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSummaryParams {
    pub workspace_id: Option<String>,
    pub include_completed: bool,
}

impl Default for TaskSummaryParams {
    fn default() -> Self {
        Self {
            workspace_id: None,
            include_completed: true,
        }
    }
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, params: TaskSummaryParams) -> Result<String> {
    summary(api, ctx, params)
        .await
        .map_err(|e| wrap_failure(FAILURE, e, TASK_SUMMARY_HINTS))
}

async fn summary(api: &dyn MotionApi, ctx: &ToolContext, params: TaskSummaryParams) -> Result<String> {
    info!(workspace = ?params.workspace_id, include_completed = params.include_completed, "summarising tasks");

    let request = TaskListParams {
        workspace_id: params.workspace_id.clone(),
        include_all_statuses: (!params.include_completed).then_some(false),
        ..TaskListParams::default()
    };
    let mut tasks = api.list_tasks(&request).await?.tasks;
    if !params.include_completed {
        tasks.retain(|t| !t.completed);
    }
    if tasks.is_empty() {
        return Ok("📭 No tasks found. Time to create some new ones!".to_string());
    }

    let since = local_midnight_utc(ctx.now, ctx.tz);
    let summary = summarize_tasks(&tasks, ctx.now, since);
    Ok(format_summary(&summary, ctx))
}

fn format_summary(s: &TaskSummary<'_>, ctx: &ToolContext) -> String {
    let mut out = String::from("# 📊 Motion Task Summary\n\n");

    out.push_str("## 📈 Overall Statistics\n");
    out.push_str(&format!("• **Total Tasks:** {}\n", s.total));
    out.push_str(&format!(
        "• **Completed:** {} ({}%)\n",
        s.completed,
        s.completion_percent()
    ));
    out.push_str(&format!("• **Pending:** {}\n", s.pending));
    if s.overdue > 0 {
        out.push_str(&format!("• **⚠️ Overdue:** {}\n", s.overdue));
    }
    if s.scheduling_issues > 0 {
        out.push_str(&format!("• **🚨 Scheduling Issues:** {}\n", s.scheduling_issues));
    }
    out.push('\n');

    if !s.created_today.is_empty() {
        let n = s.created_today.len();
        out.push_str("## 🆕 Today's New Tasks\n");
        out.push_str(&format!("Created {n} task{} today:\n\n", plural(n)));
        for (i, task) in s.created_today.iter().take(SECTION_LIMIT).enumerate() {
            out.push_str(&format!(
                "{}. {} **{}**\n",
                i + 1,
                priority_emoji(task.priority),
                task.name
            ));
            push_project(&mut out, task);
        }
        push_more(&mut out, n);
        out.push('\n');
    }

    if !s.urgent.is_empty() {
        let n = s.urgent.len();
        out.push_str("## 🚨 Urgent Tasks Requiring Attention\n");
        out.push_str(&format!("You have {n} urgent task{}:\n\n", plural(n)));
        for (i, task) in s.urgent.iter().take(SECTION_LIMIT).enumerate() {
            out.push_str(&format!("{}. 🔴 **{}**\n", i + 1, task.name));
            if let Some(due) = task.due_date {
                let flag = if due < ctx.now { " (OVERDUE)" } else { "" };
                out.push_str(&format!("   📅 Due: {}{flag}\n", ctx.date(due)));
            }
            push_project(&mut out, task);
        }
        push_more(&mut out, n);
        out.push('\n');
    }

    out.push_str("## 🎯 Priority Breakdown\n");
    for (priority, count) in s.priorities.non_zero() {
        out.push_str(&format!(
            "• {} **{}:** {count}\n",
            priority.emoji(),
            priority.as_str()
        ));
    }
    out.push('\n');

    if !s.top_projects.is_empty() {
        out.push_str("## 📁 Top Projects by Task Count\n");
        for (name, count) in &s.top_projects {
            out.push_str(&format!("• **{name}:** {count} task{}\n", plural(*count)));
        }
        out.push('\n');
    }

    out.push_str("## 💡 Recommendations\n");
    for rec in s.recommendations() {
        out.push_str("• ");
        out.push_str(&recommendation_text(rec));
        out.push('\n');
    }
    out
}

fn push_project(out: &mut String, task: &Task) {
    if let Some(project) = task.project_name() {
        out.push_str(&format!("   📁 {project}\n"));
    }
}

fn push_more(out: &mut String, n: usize) {
    if n > SECTION_LIMIT {
        out.push_str(&format!("\n... and {} more\n", n - SECTION_LIMIT));
    }
}

fn recommendation_text(rec: Recommendation) -> String {
    match rec {
        Recommendation::Overdue(n) => format!(
            "⚠️ You have {n} overdue task{}. Consider prioritizing these.",
            plural(n)
        ),
        Recommendation::TooManyUrgent(n) => {
            format!("🚨 You have {n} urgent tasks. Consider if some can be reprioritized.")
        }
        Recommendation::SchedulingIssues(n) => format!(
            "🗓️ {n} {} scheduling issues. Check Motion for conflicts.",
            if n == 1 { "task has" } else { "tasks have" }
        ),
        Recommendation::GreatProgress(pct) => {
            format!("🎉 Great work! You've completed {pct}% of your tasks.")
        }
        Recommendation::LowCompletion(pct) => {
            format!("📈 Focus on completing more tasks. Current completion rate: {pct}%")
        }
    }
}
