//! Interactive command equivalents. Each returns the text to print.

use anyhow::Result;
use motion_api::MotionApi;
use motion_core::{Project, Workspace};
use tracing::{info, warn};

pub mod capture;
pub mod debug;
pub mod projects;
pub mod tasks;
pub mod workspaces;

/// One workspace with whatever projects could be loaded for it.
#[derive(Debug, Clone)]
pub struct WorkspaceProjects {
    pub workspace: Workspace,
    pub projects: Vec<Project>,
}

/// Projects for every accessible workspace, one workspace at a time. A workspace whose
/// project listing fails contributes an empty list; only the workspace listing itself
/// is fatal.
pub async fn load_workspace_projects(api: &dyn MotionApi) -> Result<Vec<WorkspaceProjects>> {
    let workspaces = api.list_workspaces().await?;
    let mut out = Vec::with_capacity(workspaces.len());
    for workspace in workspaces {
        let projects = match api.list_projects(Some(&workspace.id)).await {
            Ok(projects) => projects,
            Err(e) => {
                warn!(workspace = %workspace.name, error = %e, "failed to load projects");
                Vec::new()
            }
        };
        out.push(WorkspaceProjects {
            workspace,
            projects,
        });
    }
    info!(
        workspaces = out.len(),
        projects = out.iter().map(|w| w.projects.len()).sum::<usize>(),
        "loaded workspaces and projects"
    );
    Ok(out)
}
