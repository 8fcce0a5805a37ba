use taskwise_shared::draft::{TaskDraft, ValidationPolicy};
use taskwise_shared::model::{SubtaskDto, TaskDto, TaskPatch, TaskPriority, TaskStatus};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent};
use yew::{
    Callback, Html, Properties, TargetCast, classes, function_component, html, use_context,
    use_effect_with, use_state,
};

use crate::api;
use crate::store::StoreHandle;

const CARD_COLORS: [&str; 6] = [
    "#fecaca", "#fed7aa", "#fef08a", "#bbf7d0", "#bfdbfe", "#e9d5ff",
];

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
    /// `Some` switches the modal into edit mode.
    pub task: Option<TaskDto>,
    pub policy: ValidationPolicy,
    pub on_close: Callback<()>,
}

fn draft_from_task(task: &TaskDto) -> TaskDraft {
    let (due_date, due_time) = match task.due_utc() {
        Some(due) => (
            due.format("%Y-%m-%d").to_string(),
            due.format("%H:%M").to_string(),
        ),
        None => (String::new(), String::new()),
    };

    TaskDraft {
        title: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        status: task.status,
        priority: Some(task.priority),
        project_id: task.project_id,
        due_date,
        due_time,
        estimated_hours: task
            .estimated_hours
            .map(|hours| hours.to_string())
            .unwrap_or_default(),
        card_color: task.card_color.clone(),
        progress: task.progress,
        subtasks: Vec::new(),
    }
}

fn parse_status(raw: &str) -> TaskStatus {
    match raw {
        "in_progress" => TaskStatus::InProgress,
        "completed" => TaskStatus::Completed,
        "overdue" => TaskStatus::Overdue,
        _ => TaskStatus::Todo,
    }
}

fn parse_priority(raw: &str) -> Option<TaskPriority> {
    match raw {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}

#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let draft = use_state(|| {
        props
            .task
            .as_ref()
            .map(draft_from_task)
            .unwrap_or_default()
    });
    let subtasks = use_state(Vec::<SubtaskDto>::new);
    let new_subtask = use_state(String::new);

    let task_id = props.task.as_ref().map(|task| task.id);

    // Subtasks live on the server; re-fetch whenever the task cache moves so
    // toggles show the server-recomputed state.
    {
        let subtasks = subtasks.clone();
        use_effect_with((task_id, store.store.tasks.clone()), move |(task_id, _)| {
            if let Some(task_id) = *task_id {
                let subtasks = subtasks.clone();
                spawn_local(async move {
                    match api::list_subtasks(task_id).await {
                        Ok(list) => subtasks.set(list),
                        Err(error) => {
                            tracing::error!(%error, task_id, "failed loading subtasks");
                        }
                    }
                });
            }
        });
    }

    let edit = |update: fn(&mut TaskDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*draft).clone();
            update(&mut next, value);
            draft.set(next);
        })
    };

    let on_title = edit(|draft, value| draft.title = value);
    let on_due_date = edit(|draft, value| draft.due_date = value);
    let on_due_time = edit(|draft, value| draft.due_time = value);
    let on_hours = edit(|draft, value| draft.estimated_hours = value);
    let on_progress = edit(|draft, value| draft.progress = value.parse().unwrap_or(0));

    let on_description = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*draft).clone();
            next.description = value;
            draft.set(next);
        })
    };

    let on_status = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*draft).clone();
            next.status = parse_status(&value);
            draft.set(next);
        })
    };

    let on_priority = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*draft).clone();
            next.priority = parse_priority(&value);
            draft.set(next);
        })
    };

    let on_project = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*draft).clone();
            next.project_id = value.parse().ok();
            draft.set(next);
        })
    };

    let on_pick_color = {
        let draft = draft.clone();
        Callback::from(move |color: Option<String>| {
            let mut next = (*draft).clone();
            next.card_color = color;
            draft.set(next);
        })
    };

    let on_save = {
        let store = store.clone();
        let draft = draft.clone();
        let on_close = props.on_close.clone();
        let policy = props.policy;
        Callback::from(move |_| {
            let create = match draft.validate(policy) {
                Ok(create) => create,
                Err(message) => {
                    store.toasts.error(&message);
                    return;
                }
            };
            match task_id {
                Some(id) => {
                    let patch = TaskPatch {
                        title: Some(create.title),
                        description: Some(create.description.unwrap_or_default()),
                        status: Some(create.status),
                        priority: Some(create.priority),
                        progress: Some(create.progress),
                        project_id: Some(create.project_id),
                        due_date: Some(create.due_date),
                        estimated_hours: Some(create.estimated_hours),
                        card_color: create.card_color,
                    };
                    store.update_task(id, patch);
                }
                None => store.create_task(&draft, policy),
            }
            on_close.emit(());
        })
    };

    // On an existing task new rows go straight to the server; on a new one
    // they queue on the draft and are posted after the create.
    let on_add_subtask = {
        let store = store.clone();
        let draft = draft.clone();
        let new_subtask = new_subtask.clone();
        Callback::from(move |_| {
            let title = new_subtask.trim().to_string();
            if title.is_empty() {
                return;
            }
            match task_id {
                Some(task_id) => store.add_subtask(task_id, title),
                None => {
                    let mut next = (*draft).clone();
                    next.subtasks.push(title);
                    draft.set(next);
                }
            }
            new_subtask.set(String::new());
        })
    };

    let on_remove_pending = {
        let draft = draft.clone();
        Callback::from(move |index: usize| {
            let mut next = (*draft).clone();
            if index < next.subtasks.len() {
                next.subtasks.remove(index);
            }
            draft.set(next);
        })
    };

    let on_subtask_input = {
        let new_subtask = new_subtask.clone();
        Callback::from(move |event: InputEvent| {
            new_subtask.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let strict = props.policy == ValidationPolicy::Strict;

    html! {
        <div class="modal-backdrop">
            <div class="modal task-modal">
                <div class="modal-head">
                    <h2>{ if task_id.is_some() { "Edit Task" } else { "New Task" } }</h2>
                    <button class="link-button" onclick={on_close.clone()}>{ "✕" }</button>
                </div>

                <label>{ "Title" }
                    <input type="text" value={draft.title.clone()} oninput={on_title} />
                </label>
                <label>{ "Description" }
                    <textarea value={draft.description.clone()} oninput={on_description} />
                </label>

                <div class="modal-row">
                    <label>{ "Status" }
                        <select onchange={on_status}>
                            {
                                for [
                                    TaskStatus::Todo,
                                    TaskStatus::InProgress,
                                    TaskStatus::Completed,
                                ].into_iter().map(|status| html! {
                                    <option
                                        value={status.as_str()}
                                        selected={draft.status == status}
                                    >
                                        { status.label() }
                                    </option>
                                })
                            }
                        </select>
                    </label>
                    <label>{ if strict { "Priority *" } else { "Priority" } }
                        <select onchange={on_priority}>
                            <option value="" selected={draft.priority.is_none()}>
                                { "Select..." }
                            </option>
                            {
                                for [
                                    TaskPriority::Low,
                                    TaskPriority::Medium,
                                    TaskPriority::High,
                                ].into_iter().map(|priority| html! {
                                    <option
                                        value={priority.as_str()}
                                        selected={draft.priority == Some(priority)}
                                    >
                                        { priority.label() }
                                    </option>
                                })
                            }
                        </select>
                    </label>
                </div>

                <div class="modal-row">
                    <label>{ if strict { "Due date *" } else { "Due date" } }
                        <input type="date" value={draft.due_date.clone()} oninput={on_due_date} />
                    </label>
                    <label>{ if strict { "Due time *" } else { "Due time" } }
                        <input type="time" value={draft.due_time.clone()} oninput={on_due_time} />
                    </label>
                </div>

                <div class="modal-row">
                    <label>{ "Project" }
                        <select onchange={on_project}>
                            <option value="" selected={draft.project_id.is_none()}>
                                { "No Project" }
                            </option>
                            {
                                for store.store.projects.iter().map(|project| html! {
                                    <option
                                        value={project.id.to_string()}
                                        selected={draft.project_id == Some(project.id)}
                                    >
                                        { &project.name }
                                    </option>
                                })
                            }
                        </select>
                    </label>
                    <label>{ "Estimated hours" }
                        <input
                            type="number"
                            step="0.5"
                            value={draft.estimated_hours.clone()}
                            oninput={on_hours}
                        />
                    </label>
                </div>

                <label>{ "Progress" }
                    <input
                        type="range"
                        min="0"
                        max="100"
                        value={draft.progress.to_string()}
                        oninput={on_progress}
                    />
                </label>

                <div class="color-picker">
                    <span>{ "Card color" }</span>
                    {
                        for CARD_COLORS.into_iter().map(|color| {
                            let on_pick = on_pick_color.clone();
                            let selected = draft.card_color.as_deref() == Some(color);
                            html! {
                                <button
                                    class={classes!("color-swatch", selected.then_some("selected"))}
                                    style={format!("background-color: {color};")}
                                    onclick={Callback::from(move |_| {
                                        on_pick.emit(Some(color.to_string()))
                                    })}
                                />
                            }
                        })
                    }
                    <button
                        class="color-swatch none"
                        onclick={Callback::from(move |_| on_pick_color.emit(None))}
                    >
                        { "✕" }
                    </button>
                </div>

                <div class="subtask-editor">
                    <h3>{ "Subtasks" }</h3>
                    if task_id.is_none() {
                        <ul>
                            {
                                for draft.subtasks.iter().cloned().enumerate().map(|(index, title)| {
                                    let remove = {
                                        let on_remove_pending = on_remove_pending.clone();
                                        Callback::from(move |_| on_remove_pending.emit(index))
                                    };
                                    html! {
                                        <li key={index.to_string()}>
                                            <span>{ title }</span>
                                            <button class="link-button" onclick={remove}>
                                                { "✕" }
                                            </button>
                                        </li>
                                    }
                                })
                            }
                        </ul>
                    } else {
                        <ul>
                            {
                                for subtasks.iter().cloned().map(|subtask| {
                                    let toggle = {
                                        let store = store.clone();
                                        let id = subtask.id;
                                        Callback::from(move |_| store.toggle_subtask(id))
                                    };
                                    let remove = {
                                        let store = store.clone();
                                        let id = subtask.id;
                                        Callback::from(move |_| store.delete_subtask(id))
                                    };
                                    html! {
                                        <li key={subtask.id}>
                                            <input
                                                type="checkbox"
                                                checked={subtask.completed}
                                                onchange={toggle}
                                            />
                                            <span class={classes!(
                                                subtask.completed.then_some("done")
                                            )}>
                                                { &subtask.title }
                                            </span>
                                            <button class="link-button" onclick={remove}>
                                                { "✕" }
                                            </button>
                                        </li>
                                    }
                                })
                            }
                        </ul>
                    }
                    <div class="subtask-add">
                        <input
                            type="text"
                            placeholder="New subtask"
                            value={(*new_subtask).clone()}
                            oninput={on_subtask_input}
                        />
                        <button onclick={on_add_subtask}>{ "Add" }</button>
                    </div>
                </div>

                <div class="modal-actions">
                    <button class="primary" onclick={on_save}>{ "Save" }</button>
                    <button onclick={on_close}>{ "Cancel" }</button>
                </div>
            </div>
        </div>
    }
}
