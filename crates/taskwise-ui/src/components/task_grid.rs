use chrono::Utc;
use taskwise_shared::filter::QuickFilter;
use taskwise_shared::model::TaskDto;
use yew::{Callback, Html, Properties, classes, function_component, html, use_state};

use super::TaskCard;

#[derive(Properties, PartialEq)]
pub struct TaskGridProps {
    pub tasks: Vec<TaskDto>,
    /// `None` asks for the creation modal, `Some` for edit.
    pub on_open_modal: Callback<Option<TaskDto>>,
    #[prop_or(true)]
    pub show_quick_filters: bool,
}

#[function_component(TaskGrid)]
pub fn task_grid(props: &TaskGridProps) -> Html {
    let active_filter = use_state(QuickFilter::default);
    let now = Utc::now();

    let visible: Vec<&TaskDto> = props
        .tasks
        .iter()
        .filter(|task| active_filter.matches(task, now))
        .collect();

    let on_add = {
        let on_open_modal = props.on_open_modal.clone();
        Callback::from(move |_| on_open_modal.emit(None))
    };

    let on_edit = {
        let on_open_modal = props.on_open_modal.clone();
        Callback::from(move |task: TaskDto| on_open_modal.emit(Some(task)))
    };

    html! {
        <div class="task-grid-wrap">
            if props.show_quick_filters {
                <div class="quick-filters">
                    {
                        for QuickFilter::all().into_iter().map(|filter| {
                            let active_filter = active_filter.clone();
                            let is_active = *active_filter == filter;
                            html! {
                                <button
                                    class={classes!("filter-tab", is_active.then_some("active"))}
                                    onclick={Callback::from(move |_| active_filter.set(filter))}
                                >
                                    { filter.label() }
                                </button>
                            }
                        })
                    }
                </div>
            }
            <div class="task-grid">
                {
                    for visible.into_iter().cloned().map(|task| html! {
                        <TaskCard key={task.id} task={task.clone()} on_edit={on_edit.clone()} />
                    })
                }
                <div class="task-card add-card" onclick={on_add}>
                    <span class="add-icon">{ "+" }</span>
                    <span>{ "Add new task" }</span>
                </div>
            </div>
        </div>
    }
}
