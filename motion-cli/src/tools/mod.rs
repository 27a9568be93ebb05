//! AI-invocable tools. Each takes a parameter struct and returns formatted markdown, or an
//! error whose message already carries the failure prefix and troubleshooting tip.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use motion_api::MotionApi;
use serde::de::DeserializeOwned;

use crate::config::{Config, Defaults};
use crate::hints::{
    wrap_failure, Hint, CREATE_TASK_HINTS, SEARCH_PROJECTS_HINTS, SEARCH_TASKS_HINTS,
    TASK_SUMMARY_HINTS, UPDATE_TASK_HINTS,
};
use crate::input::{parse_params, ToolInput};

pub mod create_task;
pub mod search_projects;
pub mod search_tasks;
pub mod task_summary;
pub mod update_task;

#[cfg(test)]
pub(crate) mod fake;

/// Per-invocation settings shared by tools and commands.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub defaults: Defaults,
    pub tz: Tz,
    pub now: DateTime<Utc>,
}

impl ToolContext {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self {
            defaults: cfg.defaults.clone(),
            tz: cfg.timezone()?,
            now: Utc::now(),
        })
    }

    pub fn date(&self, dt: DateTime<Utc>) -> String {
        motion_core::time::format_local_date(dt, self.tz)
    }
}

pub const TOOL_NAMES: [&str; 5] = [
    create_task::NAME,
    search_tasks::NAME,
    update_task::NAME,
    task_summary::NAME,
    search_projects::NAME,
];

/// Run a tool by name with raw JSON parameters (or a bare string where the tool allows it).
pub async fn dispatch(api: &dyn MotionApi, ctx: &ToolContext, name: &str, raw: &str) -> Result<String> {
    match name {
        create_task::NAME => {
            let params = decode(raw, create_task::FAILURE, CREATE_TASK_HINTS)?;
            create_task::run(api, ctx, params).await
        }
        search_tasks::NAME => {
            let params = decode(raw, search_tasks::FAILURE, SEARCH_TASKS_HINTS)?;
            search_tasks::run(api, ctx, params).await
        }
        update_task::NAME => {
            let params = decode(raw, update_task::FAILURE, UPDATE_TASK_HINTS)?;
            update_task::run(api, params).await
        }
        task_summary::NAME => {
            let params = decode(raw, task_summary::FAILURE, TASK_SUMMARY_HINTS)?;
            task_summary::run(api, ctx, params).await
        }
        search_projects::NAME => {
            let params = ToolInput::<search_projects::SearchProjectsParams>::from_raw(raw)
                .map_err(|e| wrap_failure(search_projects::FAILURE, e, SEARCH_PROJECTS_HINTS))?
                .normalize();
            search_projects::run(api, ctx, params).await
        }
        other => bail!("Unknown tool: {other} (available: {})", TOOL_NAMES.join(", ")),
    }
}

/// Object-only parameters, failing with the tool's own prefix.
fn decode<P: DeserializeOwned>(raw: &str, prefix: &str, hints: &[Hint]) -> Result<P> {
    parse_params(raw).map_err(|e| wrap_failure(prefix, e, hints))
}

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
