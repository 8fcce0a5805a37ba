use std::rc::Rc;

use taskwise_shared::draft::{TaskDraft, ValidationPolicy};
use taskwise_shared::model::{
    DashboardStats, ProjectDto, ProjectDraft, TaskDto, TaskPatch, TaskStatus,
};
use taskwise_shared::reminders;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::{Reducible, UseReducerHandle};

use crate::api;
use crate::notify::{self, ToastHandle};

/// In-memory mirror of the server state. Collections are only ever replaced
/// wholesale; a write that fails leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub tasks: Vec<TaskDto>,
    pub projects: Vec<ProjectDto>,
    pub stats: DashboardStats,
}

pub enum StoreAction {
    TasksLoaded(Vec<TaskDto>),
    ProjectsLoaded(Vec<ProjectDto>),
    StatsLoaded(DashboardStats),
}

impl Reducible for Store {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            StoreAction::TasksLoaded(tasks) => next.tasks = tasks,
            StoreAction::ProjectsLoaded(projects) => next.projects = projects,
            StoreAction::StatsLoaded(stats) => next.stats = stats,
        }
        Rc::new(next)
    }
}

/// The single mutation path for tasks and projects. Every write goes to the
/// server first; only a confirmed write triggers a reload of the affected
/// collections, so the cache can lag the server but never diverge from it.
#[derive(Clone, PartialEq)]
pub struct StoreHandle {
    pub store: UseReducerHandle<Store>,
    pub toasts: ToastHandle,
}

impl StoreHandle {
    pub fn new(store: UseReducerHandle<Store>, toasts: ToastHandle) -> Self {
        Self { store, toasts }
    }

    pub fn load_tasks(&self) {
        let handle = self.clone();
        spawn_local(async move {
            match api::list_tasks(api::TaskQuery::default()).await {
                Ok(tasks) => handle.store.dispatch(StoreAction::TasksLoaded(tasks)),
                // Read failures are silent: stale tasks stay visible and only
                // the refresh is lost.
                Err(error) => tracing::error!(%error, "failed loading tasks"),
            }
        });
    }

    pub fn load_projects(&self) {
        let handle = self.clone();
        spawn_local(async move {
            match api::list_projects().await {
                Ok(projects) => handle.store.dispatch(StoreAction::ProjectsLoaded(projects)),
                Err(error) => tracing::error!(%error, "failed loading projects"),
            }
        });
    }

    pub fn refresh_stats(&self) {
        let handle = self.clone();
        spawn_local(async move {
            match api::dashboard_stats().await {
                Ok(stats) => handle.store.dispatch(StoreAction::StatsLoaded(stats)),
                Err(error) => tracing::error!(%error, "failed loading stats"),
            }
        });
    }

    pub fn reload_all(&self) {
        self.load_tasks();
        self.load_projects();
        self.refresh_stats();
    }

    /// Validates the draft client-side, then submits with a fresh idempotency
    /// token. Nothing reaches the network when validation fails.
    pub fn create_task(&self, draft: &TaskDraft, policy: ValidationPolicy) {
        let mut create = match draft.validate(policy) {
            Ok(create) => create,
            Err(message) => {
                self.toasts.error(&message);
                return;
            }
        };
        create.client_token = Some(Uuid::new_v4().to_string());
        let pending_subtasks = draft.pending_subtasks();

        let handle = self.clone();
        spawn_local(async move {
            match api::create_task(&create).await {
                Ok(task) => {
                    tracing::info!(task_id = task.id, "task created");
                    // Subtask rows typed before the task existed get posted
                    // now that there is an id to hang them on.
                    for title in &pending_subtasks {
                        if let Err(error) = api::create_subtask(task.id, title).await {
                            tracing::error!(%error, task_id = task.id, "failed adding subtask");
                        }
                    }
                    handle.toasts.success("Task created successfully");
                    handle.load_tasks();
                    handle.refresh_stats();
                }
                Err(error) => {
                    tracing::error!(%error, "failed creating task");
                    handle.toasts.error("Failed to create task");
                }
            }
        });
    }

    pub fn update_task(&self, task_id: i64, patch: TaskPatch) {
        let handle = self.clone();
        spawn_local(async move {
            match api::update_task(task_id, &patch).await {
                Ok(_) => {
                    handle.toasts.success("Task updated");
                    handle.load_tasks();
                    handle.refresh_stats();
                }
                Err(error) => {
                    tracing::error!(%error, task_id, "failed updating task");
                    handle.toasts.error("Failed to update task");
                }
            }
        });
    }

    /// Due-date-only reschedule used by calendar drag and drop. The calendar
    /// renders from the cache, so a failed patch leaves the event where it
    /// was.
    pub fn reschedule_task(&self, task_id: i64, due_date: Option<String>) {
        let handle = self.clone();
        spawn_local(async move {
            match api::update_task(task_id, &TaskPatch::due_date_only(due_date)).await {
                Ok(_) => {
                    handle.toasts.success("Task rescheduled");
                    handle.load_tasks();
                }
                Err(error) => {
                    tracing::error!(%error, task_id, "failed rescheduling task");
                    handle.toasts.error("Failed to reschedule task");
                }
            }
        });
    }

    pub fn delete_task(&self, task_id: i64) {
        if !confirm("Delete this task?") {
            return;
        }
        let handle = self.clone();
        spawn_local(async move {
            match api::delete_task(task_id).await {
                Ok(()) => {
                    handle.toasts.success("Task deleted");
                    handle.load_tasks();
                    handle.refresh_stats();
                }
                Err(error) => {
                    tracing::error!(%error, task_id, "failed deleting task");
                    handle.toasts.error("Failed to delete task");
                }
            }
        });
    }

    pub fn set_task_status(&self, task_id: i64, status: TaskStatus) {
        let handle = self.clone();
        spawn_local(async move {
            match api::update_task_status(task_id, status).await {
                Ok(task) => {
                    if status == TaskStatus::Completed {
                        handle
                            .toasts
                            .success(&format!("🎉 \"{}\" completed!", task.title));
                        notify::browser_notification("Task Completed", &task.title);
                        // Completion also lands in the notification center,
                        // unless a reopen/complete cycle already put it there.
                        let duplicate = match api::list_notifications().await {
                            Ok(existing) => {
                                reminders::already_in_center(
                                    &existing,
                                    "Task Completed",
                                    &task.title,
                                )
                            }
                            Err(error) => {
                                tracing::error!(%error, "failed loading notification center");
                                false
                            }
                        };
                        if !duplicate
                            && let Err(error) =
                                api::add_notification("Task Completed", &task.title).await
                        {
                            tracing::error!(%error, "failed persisting completion notification");
                        }
                    } else {
                        handle.toasts.success("Task status updated");
                    }
                    handle.load_tasks();
                    handle.refresh_stats();
                }
                Err(error) => {
                    tracing::error!(%error, task_id, "failed updating task status");
                    handle.toasts.error("Failed to update task status");
                }
            }
        });
    }

    pub fn save_project(&self, project_id: Option<i64>, draft: ProjectDraft) {
        if draft.name.trim().is_empty() {
            self.toasts.error("Project name is required");
            return;
        }
        let handle = self.clone();
        spawn_local(async move {
            let result = match project_id {
                Some(id) => api::update_project(id, &draft).await,
                None => api::create_project(&draft).await,
            };
            match result {
                Ok(_) => {
                    handle.toasts.success("Project saved");
                    handle.load_projects();
                    handle.load_tasks();
                }
                Err(error) => {
                    tracing::error!(%error, "failed saving project");
                    handle.toasts.error("Failed to save project");
                }
            }
        });
    }

    /// Tasks keep existing when their project goes away; they fall back to
    /// "No Project" on the next reload.
    pub fn delete_project(&self, project_id: i64) {
        if !confirm("Delete this project? Its tasks will be kept.") {
            return;
        }
        let handle = self.clone();
        spawn_local(async move {
            match api::delete_project(project_id).await {
                Ok(()) => {
                    handle.toasts.success("Project deleted");
                    handle.load_projects();
                    handle.load_tasks();
                }
                Err(error) => {
                    tracing::error!(%error, project_id, "failed deleting project");
                    handle.toasts.error("Failed to delete project");
                }
            }
        });
    }

    pub fn add_subtask(&self, task_id: i64, title: String) {
        if title.trim().is_empty() {
            self.toasts.error("Subtask title is required");
            return;
        }
        let handle = self.clone();
        spawn_local(async move {
            match api::create_subtask(task_id, title.trim()).await {
                Ok(_) => handle.load_tasks(),
                Err(error) => {
                    tracing::error!(%error, task_id, "failed adding subtask");
                    handle.toasts.error("Failed to add subtask");
                }
            }
        });
    }

    /// The server owns the parent's progress; reloading the task list is what
    /// makes the recomputed value visible.
    pub fn toggle_subtask(&self, subtask_id: i64) {
        let handle = self.clone();
        spawn_local(async move {
            match api::toggle_subtask(subtask_id).await {
                Ok(_) => handle.load_tasks(),
                Err(error) => {
                    tracing::error!(%error, subtask_id, "failed toggling subtask");
                    handle.toasts.error("Failed to update subtask");
                }
            }
        });
    }

    pub fn delete_subtask(&self, subtask_id: i64) {
        let handle = self.clone();
        spawn_local(async move {
            match api::delete_subtask(subtask_id).await {
                Ok(()) => handle.load_tasks(),
                Err(error) => {
                    tracing::error!(%error, subtask_id, "failed deleting subtask");
                    handle.toasts.error("Failed to delete subtask");
                }
            }
        });
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
