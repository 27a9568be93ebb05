//! motion-api: authenticated HTTP client for the Motion REST API.

pub mod client;
pub mod error;
pub mod requests;

pub use client::{MotionApi, MotionClient, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use requests::{NewTask, PageMeta, TaskListParams, TaskPatch, TasksPage, User};
