use anyhow::Result;
use motion_api::MotionApi;
use motion_core::WorkspaceType;

use super::{load_workspace_projects, WorkspaceProjects};

pub async fn run(api: &dyn MotionApi) -> Result<String> {
    let loaded = load_workspace_projects(api).await?;
    Ok(render(&loaded))
}

fn render(loaded: &[WorkspaceProjects]) -> String {
    if loaded.is_empty() {
        return "No workspaces found.".to_string();
    }
    let mut out = String::new();
    for entry in loaded {
        let ws = &entry.workspace;
        let icon = if ws.kind == WorkspaceType::Team { "👥" } else { "👤" };
        out.push_str(&format!(
            "{icon} {} ({}) · Workspace ID: {} · {} projects\n",
            ws.name,
            ws.kind.as_str(),
            ws.id,
            entry.projects.len()
        ));
        for project in &entry.projects {
            let described = if project.description.is_empty() {
                "No description"
            } else {
                "Has description"
            };
            out.push_str(&format!(
                "   📁 {} · Project ID: {} · {described}\n",
                project.name, project.id
            ));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fake::{now, FakeApi};
    use motion_core::{Project, Workspace};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn renders_each_workspace_with_its_projects() {
        let mut personal = Workspace::new("ws2", "Me");
        personal.kind = WorkspaceType::Individual;
        let mut api = FakeApi {
            workspaces: vec![Workspace::new("ws1", "Acme"), personal],
            ..FakeApi::default()
        };
        api.projects.insert(
            "ws1".into(),
            vec![
                Project::new("p1", "Website", "ws1", now()).with_description("<p>x</p>"),
                Project::new("p2", "Hiring", "ws1", now()),
            ],
        );

        let out = run(&api).await.unwrap();
        assert_eq!(
            out,
            "👥 Acme (TEAM) · Workspace ID: ws1 · 2 projects\n\
             \x20  📁 Website · Project ID: p1 · Has description\n\
             \x20  📁 Hiring · Project ID: p2 · No description\n\
             \n\
             👤 Me (INDIVIDUAL) · Workspace ID: ws2 · 0 projects\n\n"
        );
    }

    #[tokio::test]
    async fn no_workspaces() {
        let out = run(&FakeApi::default()).await.unwrap();
        assert_eq!(out, "No workspaces found.");
    }
}
