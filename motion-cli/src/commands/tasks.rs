use anyhow::{Context, Result};
use motion_api::{MotionApi, TaskListParams};
use motion_core::{priority_emoji, sort_tasks, task_progress, Task};

use crate::tools::ToolContext;

#[derive(Debug, Clone, Default)]
pub struct TasksArgs {
    pub workspace_id: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, args: TasksArgs) -> Result<String> {
    let request = TaskListParams {
        workspace_id: args.workspace_id.or_else(|| ctx.defaults.workspace_id.clone()),
        cursor: args.cursor,
        ..TaskListParams::default()
    };
    let page = api
        .list_tasks(&request)
        .await
        .context("Failed to load tasks")?;

    let mut tasks = page.tasks;
    if tasks.is_empty() {
        return Ok(
            "No tasks found. You don't have any tasks in Motion or they couldn't be loaded."
                .to_string(),
        );
    }
    sort_tasks(&mut tasks);
    if let Some(limit) = args.limit {
        tasks.truncate(limit);
    }

    let mut out = String::new();
    for task in &tasks {
        out.push_str(&render_line(task, ctx));
        out.push('\n');
    }
    if let Some(cursor) = page.meta.next_cursor {
        out.push_str(&format!("\nMore tasks available: --cursor {cursor}\n"));
    }
    Ok(out)
}

/// `<priority> <name> · <project • status • due> [accessories] urgency=N`
fn render_line(task: &Task, ctx: &ToolContext) -> String {
    let mut line = format!("{} {}", priority_emoji(task.priority), task.name);

    let mut subtitle = Vec::new();
    if let Some(project) = task.project_name() {
        subtitle.push(project.to_string());
    }
    if let Some(status) = &task.status {
        subtitle.push(status.name.clone());
    }
    if let Some(due) = task.due_date {
        subtitle.push(format!("Due: {}", ctx.date(due)));
    }
    if !subtitle.is_empty() {
        line.push_str(" · ");
        line.push_str(&subtitle.join(" • "));
    }

    if task.completed {
        line.push_str(" [✓ done]");
    }
    if task.scheduling_issue {
        line.push_str(" [⚠ scheduling issue]");
    }
    if !task.assignees.is_empty() {
        line.push_str(&format!(" [{}]", task.assignee_names()));
    }
    line.push_str(&format!(" urgency={:.2}", task_progress(task, ctx.now)));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fake::{context, now, FakeApi};
    use chrono::Duration;
    use motion_core::{Person, Priority, Status, Workspace};
    use pretty_assertions::assert_eq;

    fn task(id: &str) -> Task {
        Task::new(id, format!("Task {id}"), Workspace::new("ws1", "Acme"), now())
    }

    #[tokio::test]
    async fn sorted_lines_with_accessories() {
        let api = FakeApi {
            tasks: vec![
                task("low").with_priority(Priority::Low),
                task("done").with_priority(Priority::Asap).completed(),
                task("high")
                    .with_priority(Priority::High)
                    .with_due(now() + Duration::hours(12))
                    .with_project("p1", "Launch")
                    .with_status(Status::new("Todo"))
                    .with_assignee(Person::new("u1", "Alice")),
            ],
            ..FakeApi::default()
        };
        let out = run(&api, &context(), TasksArgs::default()).await.unwrap();
        assert_eq!(
            out,
            "🟠 Task high · Launch • Todo • Due: 2026-03-11 [Alice] urgency=0.80\n\
             🔵 Task low urgency=0.20\n\
             🔴 Task done [✓ done] urgency=1.00\n"
        );
    }

    #[tokio::test]
    async fn limit_and_workspace_default() {
        let mut ctx = context();
        ctx.defaults.workspace_id = Some("ws1".into());
        let api = FakeApi {
            tasks: vec![task("a"), task("b")],
            ..FakeApi::default()
        };
        let args = TasksArgs {
            limit: Some(1),
            ..TasksArgs::default()
        };
        let out = run(&api, &ctx, args).await.unwrap();
        assert_eq!(out.lines().count(), 1);
        assert_eq!(api.task_queries()[0].workspace_id.as_deref(), Some("ws1"));
    }

    #[tokio::test]
    async fn empty_list_message() {
        let out = run(&FakeApi::default(), &context(), TasksArgs::default())
            .await
            .unwrap();
        assert!(out.starts_with("No tasks found."));
    }

    #[tokio::test]
    async fn failure_keeps_status_in_message() {
        let api = FakeApi {
            fail_with: Some(401),
            ..FakeApi::default()
        };
        let err = run(&api, &context(), TasksArgs::default()).await.unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Failed to load tasks: Motion API error: 401 Unauthorized"
        );
    }
}
