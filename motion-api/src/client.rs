use async_trait::async_trait;
use motion_core::{Project, Task, Workspace};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::requests::{
    NewTask, ProjectsPage, TaskListParams, TaskPatch, TasksPage, User, WorkspacesPage,
};

pub const DEFAULT_BASE_URL: &str = "https://api.usemotion.com/v1";
const API_KEY_HEADER: &str = "X-API-Key";

/// Operations the commands need from the service.
///
/// `MotionClient` talks HTTP; tests substitute an in-memory implementation.
#[async_trait]
pub trait MotionApi: Send + Sync {
    async fn list_tasks(&self, params: &TaskListParams) -> Result<TasksPage>;
    async fn get_task(&self, task_id: &str) -> Result<Task>;
    async fn create_task(&self, task: &NewTask) -> Result<Task>;
    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task>;
    async fn list_projects(&self, workspace_id: Option<&str>) -> Result<Vec<Project>>;
    async fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn list_workspaces(&self) -> Result<Vec<Workspace>>;
    async fn current_user(&self) -> Result<User>;

    /// First workspace the key can see.
    async fn default_workspace_id(&self) -> Result<String> {
        self.list_workspaces()
            .await?
            .into_iter()
            .next()
            .map(|w| w.id)
            .ok_or(ApiError::NoWorkspace)
    }
}

#[derive(Debug, Clone)]
pub struct MotionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MotionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key).map_err(|_| ApiError::InvalidApiKey)?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "motion request");

        let mut req = self
            .http
            .request(method, &url)
            .headers(self.headers()?)
            .query(query);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }
}

#[async_trait]
impl MotionApi for MotionClient {
    async fn list_tasks(&self, params: &TaskListParams) -> Result<TasksPage> {
        self.get("/tasks", &params.to_query()).await
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.get(&format!("/tasks/{task_id}"), &[]).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.request(Method::POST, "/tasks", &[], Some(task)).await
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        self.request(Method::PATCH, &format!("/tasks/{task_id}"), &[], Some(patch))
            .await
    }

    async fn list_projects(&self, workspace_id: Option<&str>) -> Result<Vec<Project>> {
        let query: Vec<(&'static str, String)> = workspace_id
            .map(|id| vec![("workspaceId", id.to_string())])
            .unwrap_or_default();
        let page: ProjectsPage = self.get("/projects", &query).await?;
        Ok(page.projects)
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get(&format!("/projects/{project_id}"), &[]).await
    }

    async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let page: WorkspacesPage = self.get("/workspaces", &[]).await?;
        Ok(page.workspaces)
    }

    async fn current_user(&self) -> Result<User> {
        self.get("/users/me", &[]).await
    }
}
