//! Failure wrapping with troubleshooting tips.
//!
//! Each entry point has its own ordered table. The first row whose needle appears in the
//! underlying error message contributes its tip; the rest are skipped.

use anyhow::anyhow;

#[derive(Debug, Clone, Copy)]
pub struct Hint {
    pub needles: &'static [&'static str],
    pub tip: &'static str,
}

const fn hint(needles: &'static [&'static str], tip: &'static str) -> Hint {
    Hint { needles, tip }
}

const AUTH_TIP: &str = "💡 Tip: Check your Motion API key (MOTION_API_KEY or ~/.motion/config.toml).";

pub const CREATE_TASK_HINTS: &[Hint] = &[
    hint(
        &["workspaceId"],
        "💡 Tip: Make sure your Motion API key has access to at least one workspace.",
    ),
    hint(&["401", "403", "invalid API key"], AUTH_TIP),
    hint(
        &["400"],
        "💡 Tip: Check that the task name is valid and all parameters are correct.",
    ),
];

pub const SEARCH_TASKS_HINTS: &[Hint] = &[hint(&["401", "403", "invalid API key"], AUTH_TIP)];

pub const TASK_SUMMARY_HINTS: &[Hint] = &[hint(&["401", "403", "invalid API key"], AUTH_TIP)];

pub const UPDATE_TASK_HINTS: &[Hint] = &[
    hint(&["401", "403", "invalid API key"], AUTH_TIP),
    hint(
        &["404"],
        "💡 Tip: Make sure the task ID is correct and you have access to it.",
    ),
];

pub const SEARCH_PROJECTS_HINTS: &[Hint] = &[
    hint(&["401", "403", "invalid API key"], AUTH_TIP),
    hint(
        &["workspaceId"],
        "💡 Tip: Make sure the workspace ID is valid and you have access to it.",
    ),
];

pub const CAPTURE_HINTS: &[Hint] = &[
    hint(
        &["workspaceId"],
        "Troubleshooting: Please ensure your Motion API key has access to at least one workspace.",
    ),
    hint(
        &["400"],
        "Troubleshooting: Please check that all required fields are filled correctly.",
    ),
    hint(
        &["401", "403", "invalid API key"],
        "Troubleshooting: Please check your Motion API key.",
    ),
];

pub const DEBUG_HINTS: &[Hint] = &[
    hint(&["401", "403", "invalid API key"], "💡 Check your Motion API key"),
    hint(&["workspaceId"], "💡 Your API key might not have access to any workspaces"),
    hint(&["400"], "💡 The request format might be incorrect"),
];

/// Tip for the first matching row, if any.
pub fn tip_for(message: &str, hints: &[Hint]) -> Option<&'static str> {
    hints
        .iter()
        .find(|h| h.needles.iter().any(|n| message.contains(*n)))
        .map(|h| h.tip)
}

/// `<prefix>: <message>` plus the matching tip on its own paragraph.
pub fn describe_failure(prefix: &str, message: &str, hints: &[Hint]) -> String {
    let mut out = format!("{prefix}: {message}");
    if let Some(tip) = tip_for(message, hints) {
        out.push_str("\n\n");
        out.push_str(tip);
    }
    out
}

/// Wrap an error at a command boundary.
pub fn wrap_failure(prefix: &str, err: anyhow::Error, hints: &[Hint]) -> anyhow::Error {
    anyhow!(describe_failure(prefix, &format!("{err:#}"), hints))
}
