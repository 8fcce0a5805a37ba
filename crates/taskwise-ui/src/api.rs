use gloo::net::http::{Request, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskwise_shared::model::{
    ActivityDto, DashboardStats, NotificationDto, ProjectDto, ProjectDraft, SubtaskDto, TaskCreate,
    TaskDto, TaskPatch, TaskStatus,
};

/// Failures of a single REST call, in the order they can occur: the fetch
/// itself, the `success` envelope flag, the payload decode.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Transport(String),
    Envelope(String),
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "network error: {message}"),
            Self::Envelope(message) => write!(f, "server rejected request: {message}"),
            Self::Decode(message) => write!(f, "unexpected server response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Every endpoint wraps its payload in `{ "success": bool, "error": ... }`.
/// Anything without `success: true` is treated as a failure, HTTP status
/// notwithstanding.
async fn unwrap_envelope(builder: RequestBuilder) -> Result<Value, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|error| ApiError::Transport(error.to_string()))?;
    let body: Value = response
        .json()
        .await
        .map_err(|error| ApiError::Decode(error.to_string()))?;

    if body.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(body);
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Err(ApiError::Envelope(message))
}

async fn unwrap_json_envelope<B: Serialize>(
    builder: RequestBuilder,
    body: &B,
) -> Result<Value, ApiError> {
    let request = builder
        .json(body)
        .map_err(|error| ApiError::Transport(error.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|error| ApiError::Transport(error.to_string()))?;
    let value: Value = response
        .json()
        .await
        .map_err(|error| ApiError::Decode(error.to_string()))?;

    if value.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(value);
    }

    let message = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Err(ApiError::Envelope(message))
}

fn extract<T: DeserializeOwned>(mut body: Value, field: &str) -> Result<T, ApiError> {
    let payload = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("missing `{field}` field")))?;
    serde_json::from_value(payload).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Optional server-side narrowing of the task list. The pages filter
/// client-side and fetch everything; the query form exists for callers that
/// only need a slice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskQuery {
    pub project_id: Option<i64>,
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    fn query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(project_id) = self.project_id {
            parts.push(format!("project_id={project_id}"));
        }
        if let Some(status) = self.status {
            parts.push(format!("status={}", status.as_str()));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

pub async fn list_tasks(query: TaskQuery) -> Result<Vec<TaskDto>, ApiError> {
    let url = format!("/api/tasks{}", query.query_string());
    let body = unwrap_envelope(Request::get(&url)).await?;
    extract(body, "tasks")
}

pub async fn recent_tasks(limit: usize) -> Result<Vec<TaskDto>, ApiError> {
    let url = format!("/api/tasks/recent?limit={limit}");
    let body = unwrap_envelope(Request::get(&url)).await?;
    extract(body, "tasks")
}

pub async fn create_task(create: &TaskCreate) -> Result<TaskDto, ApiError> {
    let body = unwrap_json_envelope(Request::post("/api/tasks"), create).await?;
    extract(body, "task")
}

pub async fn update_task(task_id: i64, patch: &TaskPatch) -> Result<TaskDto, ApiError> {
    let url = format!("/api/tasks/{task_id}");
    let body = unwrap_json_envelope(Request::put(&url), patch).await?;
    extract(body, "task")
}

pub async fn update_task_status(task_id: i64, status: TaskStatus) -> Result<TaskDto, ApiError> {
    let url = format!("/api/tasks/{task_id}/status");
    let body = unwrap_json_envelope(Request::patch(&url), &TaskPatch::status_only(status)).await?;
    extract(body, "task")
}

pub async fn delete_task(task_id: i64) -> Result<(), ApiError> {
    let url = format!("/api/tasks/{task_id}");
    unwrap_envelope(Request::delete(&url)).await.map(|_| ())
}

pub async fn list_subtasks(task_id: i64) -> Result<Vec<SubtaskDto>, ApiError> {
    let url = format!("/api/tasks/{task_id}/subtasks");
    let body = unwrap_envelope(Request::get(&url)).await?;
    extract(body, "subtasks")
}

pub async fn create_subtask(task_id: i64, title: &str) -> Result<SubtaskDto, ApiError> {
    let url = format!("/api/tasks/{task_id}/subtasks");
    let body = unwrap_json_envelope(Request::post(&url), &serde_json::json!({ "title": title }))
        .await?;
    extract(body, "subtask")
}

pub async fn toggle_subtask(subtask_id: i64) -> Result<SubtaskDto, ApiError> {
    let url = format!("/api/subtasks/{subtask_id}/toggle");
    let body = unwrap_envelope(Request::put(&url)).await?;
    extract(body, "subtask")
}

pub async fn delete_subtask(subtask_id: i64) -> Result<(), ApiError> {
    let url = format!("/api/subtasks/{subtask_id}");
    unwrap_envelope(Request::delete(&url)).await.map(|_| ())
}

pub async fn list_projects() -> Result<Vec<ProjectDto>, ApiError> {
    let body = unwrap_envelope(Request::get("/api/projects")).await?;
    extract(body, "projects")
}

pub async fn create_project(draft: &ProjectDraft) -> Result<ProjectDto, ApiError> {
    let body = unwrap_json_envelope(Request::post("/api/projects"), draft).await?;
    extract(body, "project")
}

pub async fn update_project(project_id: i64, draft: &ProjectDraft) -> Result<ProjectDto, ApiError> {
    let url = format!("/api/projects/{project_id}");
    let body = unwrap_json_envelope(Request::put(&url), draft).await?;
    extract(body, "project")
}

pub async fn delete_project(project_id: i64) -> Result<(), ApiError> {
    let url = format!("/api/projects/{project_id}");
    unwrap_envelope(Request::delete(&url)).await.map(|_| ())
}

pub async fn dashboard_stats() -> Result<DashboardStats, ApiError> {
    let body = unwrap_envelope(Request::get("/api/stats")).await?;
    extract(body, "stats")
}

pub async fn activity(limit: usize) -> Result<Vec<ActivityDto>, ApiError> {
    let url = format!("/api/activity?limit={limit}");
    let body = unwrap_envelope(Request::get(&url)).await?;
    extract(body, "activity")
}

pub async fn list_notifications() -> Result<Vec<NotificationDto>, ApiError> {
    let body = unwrap_envelope(Request::get("/api/notifications")).await?;
    extract(body, "notifications")
}

pub async fn add_notification(title: &str, message: &str) -> Result<(), ApiError> {
    unwrap_json_envelope(
        Request::post("/api/notifications/add"),
        &serde_json::json!({ "title": title, "message": message }),
    )
    .await
    .map(|_| ())
}

pub async fn mark_notification_read(notification_id: i64) -> Result<(), ApiError> {
    unwrap_json_envelope(
        Request::post("/api/notifications/mark_read"),
        &serde_json::json!({ "id": notification_id }),
    )
    .await
    .map(|_| ())
}

/// Single and bulk delete share one endpoint; a lone id is a one-element
/// batch.
pub async fn delete_notifications(ids: &[i64]) -> Result<(), ApiError> {
    unwrap_json_envelope(
        Request::post("/api/notifications/delete"),
        &serde_json::json!({ "ids": ids }),
    )
    .await
    .map(|_| ())
}
