//! `update-task-status`: apply a natural-language update to one task.

use anyhow::{bail, Result};
use motion_api::{MotionApi, TaskListParams, TaskPatch};
use motion_core::{looks_like_task_id, parse_update_query, priority_emoji, Task, UpdateQuery};
use serde::Deserialize;
use tracing::{debug, info};

use crate::hints::{wrap_failure, UPDATE_TASK_HINTS};

pub const NAME: &str = "update-task-status";
pub const FAILURE: &str = "Failed to update task status";

const UPDATE_EXAMPLES: &str = "Try phrases like:\n\
• 'mark as complete' or 'done'\n\
• 'set priority to high'\n\
• 'mark as in progress'\n\
• 'set as urgent'";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskParams {
    /// Task id or (part of) its name.
    pub task_identifier: String,
    pub update_query: String,
}

pub async fn run(api: &dyn MotionApi, params: UpdateTaskParams) -> Result<String> {
    update(api, params)
        .await
        .map_err(|e| wrap_failure(FAILURE, e, UPDATE_TASK_HINTS))
}

async fn update(api: &dyn MotionApi, params: UpdateTaskParams) -> Result<String> {
    info!(task = %params.task_identifier, update = %params.update_query, "updating task");

    let identifier = params.task_identifier.trim();
    if identifier.is_empty() {
        bail!("Task identifier (name or ID) is required");
    }
    if params.update_query.trim().is_empty() {
        bail!("Update query is required");
    }

    let mut matches = find_tasks(api, identifier).await?;
    let task = match matches.len() {
        0 => return Ok(format!("❌ No tasks found matching: \"{identifier}\"")),
        1 => matches.remove(0),
        n => {
            let listing: Vec<String> = matches
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}. {} (ID: {})", i + 1, t.name, t.id))
                .collect();
            return Ok(format!(
                "⚠️ Found {n} tasks matching \"{identifier}\". Please be more specific:\n\n{}",
                listing.join("\n")
            ));
        }
    };

    let updates = parse_update_query(&params.update_query);
    if updates.is_empty() {
        return Ok(format!(
            "❌ Could not understand the update: \"{}\"\n\n{UPDATE_EXAMPLES}",
            params.update_query
        ));
    }
    debug!(?updates, "parsed update query");

    let patch = TaskPatch {
        priority: updates.priority,
        completed: updates.completed,
    };
    if patch.is_empty() {
        // Only a status label was recognised; nothing can be sent.
        let mut out = format!("⚠️ No changes applied to task: \"{}\"\n\n", task.name);
        push_status_note(&mut out, &updates);
        out.push_str(&format!("🔗 Task ID: {}", task.id));
        return Ok(out);
    }

    let updated = api.update_task(&task.id, &patch).await?;
    Ok(format_update(&task, &updated, &updates))
}

/// Direct lookup for id-shaped identifiers, falling back to a name search.
async fn find_tasks(api: &dyn MotionApi, identifier: &str) -> Result<Vec<Task>> {
    if looks_like_task_id(identifier) {
        match api.get_task(identifier).await {
            Ok(task) => return Ok(vec![task]),
            Err(e) => debug!(error = %e, "id lookup failed, searching by name"),
        }
    }
    let page = api.list_tasks(&TaskListParams::named(identifier)).await?;
    Ok(page.tasks)
}

fn push_status_note(out: &mut String, updates: &UpdateQuery) {
    if let Some(label) = updates.status_label {
        out.push_str(&format!(
            "ℹ️ Status change to \"{label}\" was not applied: workspace status mapping is not supported yet.\n\n"
        ));
    }
}

fn format_update(before: &Task, after: &Task, updates: &UpdateQuery) -> String {
    let mut out = format!("✅ Successfully updated task: \"{}\"\n\n", after.name);

    let mut changes = Vec::new();
    if let Some(p) = updates.priority {
        changes.push(format!(
            "{} Priority: {} → {}",
            priority_emoji(Some(p)),
            before.priority.map_or("NONE", |old| old.as_str()),
            p.as_str()
        ));
    }
    if let Some(done) = updates.completed {
        changes.push(format!(
            "Status: {} → {}",
            completion_label(before.completed),
            completion_label(done)
        ));
    }
    if !changes.is_empty() {
        out.push_str(&format!("**Changes made:**\n{}\n\n", changes.join("\n")));
    }
    push_status_note(&mut out, updates);
    out.push_str(&format!("🔗 Task ID: {}", after.id));
    out
}

fn completion_label(done: bool) -> &'static str {
    if done { "✅ Complete" } else { "⏳ Incomplete" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fake::{now, FakeApi};
    use motion_core::{Priority, Workspace};
    use pretty_assertions::assert_eq;

    const UUID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    fn api() -> FakeApi {
        let ws = Workspace::new("ws1", "Acme");
        FakeApi {
            tasks: vec![
                Task::new(UUID, "Quarterly report", ws.clone(), now()).with_priority(Priority::Low),
                Task::new("t2", "Team sync notes", ws.clone(), now()),
                Task::new("t3", "Team sync agenda", ws, now()),
            ],
            ..FakeApi::default()
        }
    }

    fn params(task: &str, update: &str) -> UpdateTaskParams {
        UpdateTaskParams {
            task_identifier: task.into(),
            update_query: update.into(),
        }
    }

    #[tokio::test]
    async fn completes_task_found_by_name() {
        let api = api();
        let out = run(&api, params("quarterly", "mark as done")).await.unwrap();

        assert_eq!(
            api.patched(),
            vec![(
                UUID.to_string(),
                TaskPatch {
                    priority: None,
                    completed: Some(true)
                }
            )]
        );
        assert_eq!(
            out,
            format!(
                "✅ Successfully updated task: \"Quarterly report\"\n\n**Changes made:**\nStatus: ⏳ Incomplete → ✅ Complete\n\n🔗 Task ID: {UUID}"
            )
        );
    }

    #[tokio::test]
    async fn id_lookup_and_priority_change() {
        let api = api();
        let out = run(&api, params(UUID, "this is urgent")).await.unwrap();
        assert!(api.task_queries().is_empty());
        assert!(out.contains("🔴 Priority: LOW → ASAP"));
    }

    #[tokio::test]
    async fn unknown_id_falls_back_to_name_search() {
        let api = api();
        let missing = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
        let out = run(&api, params(missing, "done")).await.unwrap();
        assert_eq!(api.task_queries()[0].name.as_deref(), Some(missing));
        assert_eq!(out, format!("❌ No tasks found matching: \"{missing}\""));
    }

    #[tokio::test]
    async fn ambiguous_name_lists_candidates() {
        let api = api();
        let out = run(&api, params("team sync", "done")).await.unwrap();
        assert_eq!(
            out,
            "⚠️ Found 2 tasks matching \"team sync\". Please be more specific:\n\n\
             1. Team sync notes (ID: t2)\n2. Team sync agenda (ID: t3)"
        );
        assert!(api.patched().is_empty());
    }

    #[tokio::test]
    async fn unrecognised_update_returns_guidance() {
        let api = api();
        let out = run(&api, params("quarterly", "make it pretty")).await.unwrap();
        assert!(out.starts_with("❌ Could not understand the update: \"make it pretty\""));
        assert!(out.contains("• 'set as urgent'"));
        assert!(api.patched().is_empty());
    }

    #[tokio::test]
    async fn status_label_alone_is_reported_not_sent() {
        let api = api();
        let out = run(&api, params("quarterly", "blocked")).await.unwrap();
        assert!(api.patched().is_empty());
        assert!(out.starts_with("⚠️ No changes applied to task: \"Quarterly report\""));
        assert!(out.contains("\"Blocked\" was not applied"));
    }

    #[tokio::test]
    async fn missing_inputs_are_rejected() {
        let api = api();
        let err = run(&api, params(" ", "done")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to update task status: Task identifier (name or ID) is required"
        );
        let err = run(&api, params("quarterly", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update task status: Update query is required");
    }

    #[tokio::test]
    async fn not_found_on_patch_gets_task_id_tip() {
        let api = FakeApi {
            fail_with: Some(404),
            ..FakeApi::default()
        };
        let err = run(&api, params("anything", "done")).await.unwrap_err();
        assert!(err.to_string().ends_with(UPDATE_TASK_HINTS[1].tip));
    }
}
