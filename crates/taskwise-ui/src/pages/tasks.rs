use taskwise_shared::draft::ValidationPolicy;
use taskwise_shared::filter::TaskFilter;
use taskwise_shared::model::{TaskDto, TaskPriority, TaskStatus};
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::{
    Callback, Html, TargetCast, function_component, html, use_context, use_state,
};

use crate::components::{TaskGrid, TaskModal};
use crate::store::StoreHandle;

enum ModalState {
    Closed,
    New,
    Edit(TaskDto),
}

fn parse_status_filter(raw: &str) -> Option<TaskStatus> {
    match raw {
        "todo" => Some(TaskStatus::Todo),
        "in_progress" => Some(TaskStatus::InProgress),
        "completed" => Some(TaskStatus::Completed),
        "overdue" => Some(TaskStatus::Overdue),
        _ => None,
    }
}

fn parse_priority_filter(raw: &str) -> Option<TaskPriority> {
    match raw {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}

#[function_component(TasksPage)]
pub fn tasks_page() -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let filter = use_state(TaskFilter::default);
    let modal = use_state(|| ModalState::Closed);

    let visible: Vec<TaskDto> = store
        .store
        .tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |event: InputEvent| {
            let mut next = (*filter).clone();
            next.search = event.target_unchecked_into::<HtmlInputElement>().value();
            filter.set(next);
        })
    };

    let on_status = {
        let filter = filter.clone();
        Callback::from(move |event: Event| {
            let mut next = (*filter).clone();
            next.status =
                parse_status_filter(&event.target_unchecked_into::<HtmlSelectElement>().value());
            filter.set(next);
        })
    };

    let on_priority = {
        let filter = filter.clone();
        Callback::from(move |event: Event| {
            let mut next = (*filter).clone();
            next.priority =
                parse_priority_filter(&event.target_unchecked_into::<HtmlSelectElement>().value());
            filter.set(next);
        })
    };

    let on_open_modal = {
        let modal = modal.clone();
        Callback::from(move |task: Option<TaskDto>| {
            modal.set(match task {
                Some(task) => ModalState::Edit(task),
                None => ModalState::New,
            });
        })
    };

    let on_close_modal = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(ModalState::Closed))
    };

    html! {
        <div class="page tasks-page">
            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search tasks..."
                    value={filter.search.clone()}
                    oninput={on_search}
                />
                <select onchange={on_status}>
                    <option value="">{ "All statuses" }</option>
                    <option value="todo">{ "To Do" }</option>
                    <option value="in_progress">{ "In Progress" }</option>
                    <option value="completed">{ "Completed" }</option>
                    <option value="overdue">{ "Overdue" }</option>
                </select>
                <select onchange={on_priority}>
                    <option value="">{ "All priorities" }</option>
                    <option value="low">{ "Low" }</option>
                    <option value="medium">{ "Medium" }</option>
                    <option value="high">{ "High" }</option>
                </select>
            </div>
            <TaskGrid tasks={visible} on_open_modal={on_open_modal} />
            {
                match &*modal {
                    ModalState::Closed => html! {},
                    ModalState::New => html! {
                        <TaskModal
                            task={None}
                            policy={ValidationPolicy::Lenient}
                            on_close={on_close_modal}
                        />
                    },
                    ModalState::Edit(task) => html! {
                        <TaskModal
                            task={Some(task.clone())}
                            policy={ValidationPolicy::Lenient}
                            on_close={on_close_modal}
                        />
                    },
                }
            }
        </div>
    }
}
