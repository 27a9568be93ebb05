//! Connectivity check: user lookup, workspace listing, minimal task creation.

use anyhow::{anyhow, Result};
use motion_api::{ApiError, MotionApi, NewTask};
use motion_core::time::to_iso8601;
use motion_core::Priority;
use tracing::info;

use crate::hints::{describe_failure, DEBUG_HINTS};
use crate::tools::ToolContext;

/// Runs every step in order, stopping at the first failure. The error carries the steps
/// that completed so the user can see how far the check got.
pub async fn run(api: &dyn MotionApi, ctx: &ToolContext) -> Result<String> {
    let mut report = String::from("🧪 Motion API debug test\n");
    match steps(api, ctx, &mut report).await {
        Ok(()) => {
            report.push_str("\n🎉 All tests passed! Your Motion API integration is working.\n");
            Ok(report)
        }
        Err(e) => {
            report.push_str("\n❌ ");
            report.push_str(&describe_failure("Debug test failed", &e.to_string(), DEBUG_HINTS));
            Err(anyhow!(report))
        }
    }
}

async fn steps(api: &dyn MotionApi, ctx: &ToolContext, report: &mut String) -> Result<(), ApiError> {
    report.push_str("\n1️⃣ Testing user authentication...\n");
    let user = api.current_user().await?;
    info!(user = %user.name, "authenticated");
    report.push_str(&format!("✅ User authenticated: {} ({})\n", user.name, user.email));

    report.push_str("\n2️⃣ Testing workspace access...\n");
    let workspaces = api.list_workspaces().await?;
    report.push_str(&format!("✅ Found workspaces: {}\n", workspaces.len()));
    for (i, ws) in workspaces.iter().enumerate() {
        report.push_str(&format!(
            "   {}. {} ({}) - Type: {}\n",
            i + 1,
            ws.name,
            ws.id,
            ws.kind.as_str()
        ));
    }

    report.push_str("\n3️⃣ Testing task creation...\n");
    let mut task = NewTask::named(format!("Debug Test Task - {}", to_iso8601(ctx.now)));
    task.priority = Some(Priority::Low);
    task.workspace_id = Some(
        workspaces
            .first()
            .map(|w| w.id.clone())
            .ok_or(ApiError::NoWorkspace)?,
    );
    let created = api.create_task(&task).await?;
    report.push_str("✅ Test task created successfully!\n");
    report.push_str(&format!("   Task ID: {}\n", created.id));
    report.push_str(&format!("   Task Name: {}\n", created.name));
    report.push_str(&format!("   Workspace: {}\n", created.workspace.name));
    Ok(())
}
