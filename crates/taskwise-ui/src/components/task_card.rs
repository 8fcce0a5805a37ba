use chrono::Utc;
use taskwise_shared::lateness::{self, clamp_progress};
use taskwise_shared::model::{TaskDto, TaskPriority, TaskStatus};
use yew::{Callback, Html, Properties, classes, function_component, html, use_context};

use crate::store::StoreHandle;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
    pub task: TaskDto,
    pub on_edit: Callback<TaskDto>,
}

fn priority_icon(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "🟢",
        TaskPriority::Medium => "🟡",
        TaskPriority::High => "🔴",
    }
}

/// Derives a border color from a card background by scaling each channel
/// down. Non-hex colors keep themselves as the border.
fn darker_border(color: &str) -> String {
    let raw = color.trim().trim_start_matches('#');
    if raw.len() == 6
        && let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&raw[0..2], 16),
            u8::from_str_radix(&raw[2..4], 16),
            u8::from_str_radix(&raw[4..6], 16),
        )
    {
        let scale = |channel: u8| (f64::from(channel) * 0.72).round() as u8;
        return format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b));
    }
    color.trim().to_string()
}

#[function_component(TaskCard)]
pub fn task_card(props: &TaskCardProps) -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let task = &props.task;
    let now = Utc::now();

    let lateness = lateness::classify(task, now);
    let progress = clamp_progress(task.progress);

    let style = task.card_color.as_deref().map(|color| {
        format!(
            "background-color: {}; border-color: {};",
            color,
            darker_border(color)
        )
    });

    let on_edit = {
        let task = task.clone();
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(task.clone()))
    };

    let on_delete = {
        let store = store.clone();
        let task_id = task.id;
        Callback::from(move |_| store.delete_task(task_id))
    };

    let status_button = |label: &'static str, status: TaskStatus| {
        let store = store.clone();
        let task_id = task.id;
        html! {
            <button
                class="status-button"
                onclick={Callback::from(move |_| store.set_task_status(task_id, status))}
            >
                { label }
            </button>
        }
    };

    let actions = match task.status {
        TaskStatus::Todo | TaskStatus::Overdue => html! {
            <>
                { status_button("Start", TaskStatus::InProgress) }
                { status_button("Complete", TaskStatus::Completed) }
            </>
        },
        TaskStatus::InProgress => status_button("Complete", TaskStatus::Completed),
        TaskStatus::Completed => status_button("Reopen", TaskStatus::Todo),
    };

    html! {
        <div class={classes!("task-card", lateness.css_class())} style={style}>
            <div class="task-card-head">
                <span class="priority-icon" title={task.priority.label()}>
                    { priority_icon(task.priority) }
                </span>
                <span class="task-title">{ &task.title }</span>
                if let Some(badge) = lateness.badge() {
                    <span class={classes!("lateness-badge", lateness.css_class())}>{ badge }</span>
                }
            </div>
            if let Some(description) = &task.description {
                <p class="task-description">{ description }</p>
            }
            <div class="task-meta">
                <span class="task-project">
                    if let Some(color) = &task.project_color {
                        <span
                            class="project-dot"
                            style={format!("background-color: {color};")}
                        />
                    }
                    { task.project_label() }
                </span>
                if let Some(due) = task.due_utc() {
                    <span class="task-due">{ due.format("%b %-d, %H:%M").to_string() }</span>
                }
            </div>
            <div class="progress-track">
                <div class="progress-fill" style={format!("width: {progress}%;")} />
                <span class="progress-label">{ format!("{progress}%") }</span>
            </div>
            if task.subtask_count > 0 {
                <div class="subtask-counter">
                    { format!("{} / {} subtasks", task.completed_subtasks, task.subtask_count) }
                </div>
            }
            <div class="task-actions">
                { actions }
                <button class="link-button" onclick={on_edit}>{ "Edit" }</button>
                <button class="link-button danger" onclick={on_delete}>{ "Delete" }</button>
            </div>
        </div>
    }
}
