use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::parse_wire_timestamp;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubtaskDto {
    pub id: i64,
    #[serde(default)]
    pub task_id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A server-owned task record. The client never mutates these in place; they
/// are replaced wholesale on every reload. Timestamps stay in wire form and
/// are parsed where a computation needs them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub progress: i64,
    pub card_color: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub completed_at: Option<String>,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub project_color: Option<String>,
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskDto>,
    #[serde(default)]
    pub subtask_count: i64,
    #[serde(default)]
    pub completed_subtasks: i64,
}

impl TaskDto {
    pub fn due_utc(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_wire_timestamp)
    }

    pub fn completed_utc(&self) -> Option<DateTime<Utc>> {
        self.completed_at.as_deref().and_then(parse_wire_timestamp)
    }

    pub fn updated_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_wire_timestamp)
    }

    pub fn created_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_wire_timestamp)
    }

    pub fn project_label(&self) -> &str {
        match self.project_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "No Project",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_tasks: i64,
    #[serde(default)]
    pub completed_tasks: i64,
}

impl ProjectDto {
    /// Server-derived counters, read-only to the client.
    pub fn progress_percent(&self) -> i64 {
        if self.total_tasks <= 0 {
            return 0;
        }
        ((self.completed_tasks as f64 / self.total_tasks as f64) * 100.0).round() as i64
    }

    pub fn is_finished(&self) -> bool {
        self.total_tasks > 0 && self.completed_tasks >= self.total_tasks
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationDto {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub event_type: Option<String>,
    pub message: Option<String>,
    pub created_at: Option<String>,
}

impl ActivityDto {
    /// Pseudo-activity entry derived from a task record, used when the
    /// dedicated activity endpoint is unavailable.
    pub fn from_task(task: &TaskDto) -> Self {
        Self {
            id: Some(task.id),
            event_type: Some("task_update".to_string()),
            message: Some(format!("{} ({})", task.title, task.status.label())),
            created_at: task.updated_at.clone().or_else(|| task.created_at.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_tasks: i64,
    #[serde(default)]
    pub completed_tasks: i64,
    #[serde(default)]
    pub in_progress_tasks: i64,
    #[serde(default)]
    pub overdue_tasks: i64,
    #[serde(default)]
    pub todo_tasks: i64,
    #[serde(default)]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Option<i64>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub card_color: Option<String>,
    pub progress: i64,
    /// Random high-entropy token letting the server collapse duplicate
    /// submissions of the same create request.
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_color: Option<String>,
}

impl TaskPatch {
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn due_date_only(due_date: Option<String>) -> Self {
        Self {
            due_date: Some(due_date),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_decodes_backend_shape() {
        let raw = r##"{
            "id": 7,
            "title": "Write report",
            "description": null,
            "status": "in_progress",
            "priority": "high",
            "progress": 40,
            "card_color": "#fecaca",
            "due_date": "2024-01-01T10:00:00+00:00",
            "created_at": "2023-12-20T09:00:00Z",
            "updated_at": null,
            "completed_at": null,
            "project_id": null,
            "project_name": null,
            "project_color": "#667eea",
            "estimated_hours": 2.5,
            "subtasks": [{"id": 1, "task_id": 7, "title": "outline", "completed": true}],
            "subtask_count": 1,
            "completed_subtasks": 1
        }"##;

        let task: TaskDto = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.project_id, None);
        assert_eq!(task.project_label(), "No Project");
        assert!(task.due_utc().is_some());
        assert_eq!(task.subtasks.len(), 1);
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let raw = r#"{"id": 1, "title": "Bare", "description": null,
            "card_color": null, "due_date": null, "created_at": null,
            "updated_at": null, "completed_at": null, "project_id": null,
            "project_name": null, "project_color": null, "estimated_hours": null}"#;
        let task: TaskDto = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = TaskPatch::status_only(TaskStatus::Completed);
        let json = serde_json::to_value(&patch).expect("encode patch");
        let object = json.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["status"], "completed");
    }

    #[test]
    fn due_date_patch_can_clear() {
        let patch = TaskPatch::due_date_only(None);
        let json = serde_json::to_value(&patch).expect("encode patch");
        assert!(json.as_object().expect("object").contains_key("due_date"));
        assert_eq!(json["due_date"], serde_json::Value::Null);
    }

    #[test]
    fn project_progress_percent() {
        let project = ProjectDto {
            id: 1,
            name: "Atlas".to_string(),
            description: None,
            color: None,
            created_at: None,
            total_tasks: 3,
            completed_tasks: 2,
        };
        assert_eq!(project.progress_percent(), 67);
        assert!(!project.is_finished());
    }

    #[test]
    fn empty_project_has_zero_progress() {
        let project = ProjectDto {
            id: 1,
            name: "Empty".to_string(),
            description: None,
            color: None,
            created_at: None,
            total_tasks: 0,
            completed_tasks: 0,
        };
        assert_eq!(project.progress_percent(), 0);
        assert!(!project.is_finished());
    }
}
