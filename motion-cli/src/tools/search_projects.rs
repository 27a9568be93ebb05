//! `search-projects`: list projects with per-project task statistics.

use anyhow::Result;
use motion_api::{MotionApi, TaskListParams};
use motion_core::ordering::sort_projects_by_recency;
use motion_core::{project_matches, sanitize_description, truncate_chars, Project, ProjectTaskStats};
use serde::Deserialize;
use tracing::{info, warn};

use super::{plural, ToolContext};
use crate::hints::{wrap_failure, SEARCH_PROJECTS_HINTS};
use crate::input::QueryShorthand;

pub const NAME: &str = "search-projects";
pub const FAILURE: &str = "Failed to search Motion projects";

const DESCRIPTION_PREVIEW: usize = 150;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchProjectsParams {
    pub search_query: Option<String>,
    pub workspace_id: Option<String>,
}

impl QueryShorthand for SearchProjectsParams {
    fn from_query(query: String) -> Self {
        Self {
            search_query: Some(query),
            workspace_id: None,
        }
    }
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, params: SearchProjectsParams) -> Result<String> {
    search(api, ctx, params)
        .await
        .map_err(|e| wrap_failure(FAILURE, e, SEARCH_PROJECTS_HINTS))
}

async fn search(api: &dyn MotionApi, ctx: &ToolContext, params: SearchProjectsParams) -> Result<String> {
    info!(query = ?params.search_query, workspace = ?params.workspace_id, "searching projects");

    let projects = api.list_projects(params.workspace_id.as_deref()).await?;
    if projects.is_empty() {
        let msg = if params.workspace_id.is_some() {
            "No projects found in the specified workspace."
        } else {
            "No projects found. Create your first project in Motion to get started!"
        };
        return Ok(msg.to_string());
    }

    let query = params
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    let mut matched: Vec<Project> = projects
        .into_iter()
        .filter(|p| query.is_none_or(|q| project_matches(p, q)))
        .collect();
    sort_projects_by_recency(&mut matched);

    let mut out = format_projects(api, ctx, &matched).await;
    if let Some(q) = query {
        out.push_str(&format!("\n🔍 Searched for projects containing: \"{q}\""));
    }
    Ok(out)
}

async fn format_projects(api: &dyn MotionApi, ctx: &ToolContext, projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found matching your search criteria.".to_string();
    }

    let mut out = format!("Found {} project{}:\n\n", projects.len(), plural(projects.len()));
    for (i, project) in projects.iter().enumerate() {
        out.push_str(&format!("{}. **{}**\n", i + 1, project.name));

        let description = sanitize_description(&project.description);
        if !description.is_empty() {
            out.push_str(&format!(
                "   📝 Description: {}\n",
                truncate_chars(&description, DESCRIPTION_PREVIEW)
            ));
        }
        if let Some(status) = &project.status {
            out.push_str(&format!("   📊 Status: {}\n", status.name));
        }

        match api.list_tasks(&TaskListParams::in_project(&project.id)).await {
            Ok(page) => push_stats(&mut out, &ProjectTaskStats::from_tasks(&page.tasks)),
            Err(e) => {
                warn!(project = %project.id, error = %e, "could not count project tasks");
                out.push_str("   📋 Tasks: Unable to fetch task count\n");
            }
        }

        out.push_str(&format!("   🕐 Created: {}\n", ctx.date(project.created_time)));
        out.push_str(&format!("   🔄 Updated: {}\n", ctx.date(project.updated_time)));
        out.push_str(&format!("   🔗 ID: {}\n\n", project.id));
    }
    out
}

fn push_stats(out: &mut String, stats: &ProjectTaskStats) {
    out.push_str(&format!(
        "   📋 Tasks: {} total, {} completed",
        stats.total, stats.completed
    ));
    if let Some(pct) = stats.completion_percent() {
        out.push_str(&format!(" ({pct}%)"));
    }
    out.push('\n');

    let breakdown: Vec<String> = stats
        .priorities
        .non_zero()
        .into_iter()
        .map(|(p, n)| format!("{} {n} {}", p.emoji(), p.as_str()))
        .collect();
    if !breakdown.is_empty() {
        out.push_str(&format!("   🎯 Priority: {}\n", breakdown.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ToolInput;
    use crate::tools::fake::{context, now, FakeApi};
    use chrono::Duration;
    use motion_core::{Priority, Status, Task, Workspace};
    use pretty_assertions::assert_eq;

    fn api() -> FakeApi {
        let ws = Workspace::new("ws1", "Acme");
        let mut api = FakeApi {
            tasks: vec![
                Task::new("t1", "Spec", ws.clone(), now())
                    .with_project("p1", "Website")
                    .with_priority(Priority::Asap)
                    .completed(),
                Task::new("t2", "Build", ws.clone(), now())
                    .with_project("p1", "Website")
                    .with_priority(Priority::Medium),
                Task::new("t3", "Deploy", ws, now())
                    .with_project("p1", "Website")
                    .with_priority(Priority::Medium),
            ],
            broken_projects: vec!["p3".into()],
            ..FakeApi::default()
        };
        let created = now() - Duration::days(40);
        api.projects.insert(
            "ws1".into(),
            vec![
                Project::new("p1", "Website", "ws1", created)
                    .with_description("<p>New&nbsp;marketing <b>site</b></p>")
                    .with_status(Status::new("In Progress"))
                    .updated_at(now() - Duration::days(1)),
                Project::new("p2", "Hiring", "ws1", created).updated_at(now()),
                Project::new("p3", "Legacy", "ws1", created)
                    .updated_at(now() - Duration::days(9)),
            ],
        );
        api
    }

    #[tokio::test]
    async fn lists_by_recency_with_task_stats() {
        let api = api();
        let out = run(&api, &context(), SearchProjectsParams::default()).await.unwrap();

        assert!(out.starts_with("Found 3 projects:\n\n1. **Hiring**\n"));
        assert!(out.contains("   📋 Tasks: 0 total, 0 completed\n"));
        assert!(out.contains(
            "2. **Website**\n   📝 Description: New marketing site\n   📊 Status: In Progress\n   📋 Tasks: 3 total, 1 completed (33%)\n   🎯 Priority: 🔴 1 ASAP, 🟡 2 MEDIUM\n   🕐 Created: 2026-01-29\n   🔄 Updated: 2026-03-09\n   🔗 ID: p1\n\n"
        ));
        // One project's task listing failing does not sink the rest.
        assert!(out.contains("3. **Legacy**\n   📋 Tasks: Unable to fetch task count\n"));
    }

    #[tokio::test]
    async fn bare_string_shorthand_filters_by_name_or_description() {
        let api = api();
        let params = ToolInput::<SearchProjectsParams>::from_raw("marketing")
            .unwrap()
            .normalize();
        let out = run(&api, &context(), params).await.unwrap();

        assert!(out.starts_with("Found 1 project:\n\n1. **Website**\n"));
        assert!(out.ends_with("\n🔍 Searched for projects containing: \"marketing\""));
    }

    #[tokio::test]
    async fn no_match_and_empty_workspace_messages() {
        let api = api();
        let params = SearchProjectsParams::from_query("zebra".into());
        let out = run(&api, &context(), params).await.unwrap();
        assert_eq!(
            out,
            "No projects found matching your search criteria.\n🔍 Searched for projects containing: \"zebra\""
        );

        let params = SearchProjectsParams {
            workspace_id: Some("ws-empty".into()),
            ..SearchProjectsParams::default()
        };
        let out = run(&api, &context(), params).await.unwrap();
        assert_eq!(out, "No projects found in the specified workspace.");

        let out = run(&FakeApi::default(), &context(), SearchProjectsParams::default())
            .await
            .unwrap();
        assert!(out.starts_with("No projects found. Create your first project"));
    }

    #[tokio::test]
    async fn listing_failure_is_wrapped() {
        let api = FakeApi {
            fail_with: Some(403),
            ..FakeApi::default()
        };
        let err = run(&api, &context(), SearchProjectsParams::default()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Failed to search Motion projects: Motion API error: 403 Forbidden\n\n{}",
                SEARCH_PROJECTS_HINTS[0].tip
            )
        );
    }
}
