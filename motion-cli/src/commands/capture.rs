use anyhow::{bail, Result};
use motion_api::{MotionApi, NewTask};
use motion_core::{
    parse_natural_date, parse_priority_field, DeadlineType, Priority, TaskDuration,
};
use tracing::{debug, warn};

use crate::hints::{wrap_failure, CAPTURE_HINTS};
use crate::tools::ToolContext;

pub const TEST_TASK_NAME: &str = "Test Task from Motion CLI";

#[derive(Debug, Clone, Default)]
pub struct CaptureArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub deadline_type: Option<String>,
    pub duration: Option<String>,
    /// Create the minimal test task and ignore every other field.
    pub test: bool,
}

pub async fn run(api: &dyn MotionApi, ctx: &ToolContext, args: CaptureArgs) -> Result<String> {
    if args.test {
        return capture_test(api, ctx)
            .await
            .map_err(|e| wrap_failure("Failed to create test task", e, &[]));
    }
    capture(api, ctx, args)
        .await
        .map_err(|e| wrap_failure("Failed to create task", e, CAPTURE_HINTS))
}

async fn capture(api: &dyn MotionApi, ctx: &ToolContext, args: CaptureArgs) -> Result<String> {
    let name = args.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        bail!("Task name is required (--name)");
    }

    let mut task = NewTask::named(name);
    task.priority = Some(
        args.priority
            .as_deref()
            .and_then(parse_priority_field)
            .or_else(|| ctx.defaults.priority())
            .unwrap_or(Priority::Medium),
    );
    task.description = args
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);

    if let Some(raw) = args.due.as_deref() {
        match parse_natural_date(raw, ctx.now, ctx.tz) {
            Some(due) => task.due_date = Some(due),
            None => bail!("Could not parse due date: {raw}"),
        }
    }

    // SOFT is the service default and is not sent.
    if let Some(raw) = args.deadline_type.as_deref() {
        match DeadlineType::from_name(raw) {
            Some(DeadlineType::Soft) => {}
            Some(kind) => task.deadline_type = Some(kind),
            None => bail!("Unknown deadline type: {raw} (expected HARD, SOFT or NONE)"),
        }
    }

    task.duration = match args.duration.as_deref() {
        Some(raw) => match TaskDuration::parse(raw) {
            Some(d) => Some(d),
            None => {
                warn!(duration = raw, "ignoring invalid duration");
                None
            }
        },
        None => ctx.defaults.duration(),
    };

    task.workspace_id = Some(match &ctx.defaults.workspace_id {
        Some(ws) => ws.clone(),
        None => api.default_workspace_id().await?,
    });
    task.project_id = ctx.defaults.project_id.clone();

    debug!(?task, "creating task");
    let created = api.create_task(&task).await?;
    Ok(format!(
        "✅ Task Created: \"{}\" has been added to Motion\n🔗 Task ID: {}",
        created.name, created.id
    ))
}

async fn capture_test(api: &dyn MotionApi, ctx: &ToolContext) -> Result<String> {
    let mut task = NewTask::named(TEST_TASK_NAME);
    task.priority = Some(Priority::Medium);
    task.workspace_id = Some(match &ctx.defaults.workspace_id {
        Some(ws) => ws.clone(),
        None => api.default_workspace_id().await?,
    });
    let created = api.create_task(&task).await?;
    Ok(format!(
        "✅ Test Task Created: \"{}\" has been added to Motion\n🔗 Task ID: {}",
        created.name, created.id
    ))
}
