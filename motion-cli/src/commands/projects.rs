use anyhow::{bail, Result};
use motion_api::MotionApi;
use motion_core::{
    compare_projects, is_active_project, project_matches, project_progress, sanitize_description,
    Project, Workspace,
};

use super::load_workspace_projects;
use crate::tools::{plural, ToolContext};

#[derive(Debug, Clone, Default)]
pub struct ProjectsArgs {
    /// Matches project name, description or workspace name.
    pub query: Option<String>,
    /// Include completed, cancelled and archived projects.
    pub all: bool,
    /// Render the detail view for one project id.
    pub show: Option<String>,
}

struct Entry {
    project: Project,
    workspace: Workspace,
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, args: ProjectsArgs) -> Result<String> {
    let entries: Vec<Entry> = load_workspace_projects(api)
        .await?
        .into_iter()
        .flat_map(|wp| {
            let workspace = wp.workspace;
            wp.projects.into_iter().map(move |project| Entry {
                project,
                workspace: workspace.clone(),
            })
        })
        .collect();

    if let Some(id) = args.show.as_deref() {
        return match entries.iter().find(|e| e.project.id == id) {
            Some(entry) => Ok(render_detail(entry, ctx)),
            None => bail!("Project not found: {id}"),
        };
    }

    let query = args.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let mut shown: Vec<&Entry> = entries
        .iter()
        .filter(|e| args.all || is_active_project(&e.project))
        .filter(|e| query.is_none_or(|q| matches_entry(e, q)))
        .collect();
    shown.sort_by(|a, b| compare_projects(&a.project, &b.project));

    if shown.is_empty() {
        let hint = if query.is_some() {
            "Try adjusting your search terms."
        } else {
            "No projects available."
        };
        return Ok(format!("No projects found. {hint}"));
    }

    let mut out = format!("Found {} project{}:\n\n", shown.len(), plural(shown.len()));
    for entry in shown {
        let p = &entry.project;
        out.push_str(&format!(
            "{} {} · {} · {} · updated {} · progress {:.0}%\n",
            status_icon(p),
            p.name,
            entry.workspace.name,
            status_name(p),
            ctx.date(p.updated_time),
            project_progress(p, ctx.now) * 100.0
        ));
    }
    Ok(out)
}

fn matches_entry(entry: &Entry, query: &str) -> bool {
    project_matches(&entry.project, query)
        || entry.workspace.name.to_lowercase().contains(&query.to_lowercase())
}

fn status_icon(project: &Project) -> &'static str {
    match &project.status {
        Some(s) if s.is_resolved_status => "✅",
        Some(s) if s.is_default_status => "🔄",
        _ => "📋",
    }
}

fn status_name(project: &Project) -> &str {
    project
        .status
        .as_ref()
        .map_or("No status", |s| s.name.as_str())
}

fn render_detail(entry: &Entry, ctx: &ToolContext) -> String {
    let p = &entry.project;
    let description = sanitize_description(&p.description);
    let description = if description.is_empty() {
        "No description available".to_string()
    } else {
        description
    };
    format!(
        "# {name}\n\n\
         **Workspace:** {workspace}\n\
         **Status:** {status}\n\
         **Created:** {created}\n\
         **Updated:** {updated}\n\n\
         ## Description\n\n\
         {description}\n\n\
         ---\n\n\
         **Project ID:** `{id}`\n\
         **Workspace ID:** `{workspace_id}`\n",
        name = p.name,
        workspace = entry.workspace.name,
        status = status_name(p),
        created = ctx.date(p.created_time),
        updated = ctx.date(p.updated_time),
        id = p.id,
        workspace_id = p.workspace_id,
    )
}
