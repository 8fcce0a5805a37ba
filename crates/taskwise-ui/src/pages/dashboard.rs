use taskwise_shared::draft::ValidationPolicy;
use taskwise_shared::model::TaskDto;
use wasm_bindgen_futures::spawn_local;
use yew::{
    Callback, Html, function_component, html, use_context, use_effect_with, use_state,
};

use crate::api;
use crate::components::{StatsRow, TaskGrid, TaskModal};
use crate::store::StoreHandle;

const RECENT_LIMIT: usize = 6;

enum ModalState {
    Closed,
    New,
    Edit(TaskDto),
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let recent = use_state(Vec::<TaskDto>::new);
    let modal = use_state(|| ModalState::Closed);

    // Recent tasks are a server-side slice, re-fetched whenever the task
    // cache moves so a mutation shows up here too.
    {
        let recent = recent.clone();
        use_effect_with(store.store.tasks.clone(), move |_| {
            spawn_local(async move {
                match api::recent_tasks(RECENT_LIMIT).await {
                    Ok(tasks) => recent.set(tasks),
                    Err(error) => tracing::error!(%error, "failed loading recent tasks"),
                }
            });
        });
    }

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
        <div class="page dashboard-page">
            <StatsRow stats={store.store.stats.clone()} />
            <h2>{ "Recent Tasks" }</h2>
            <TaskGrid
                tasks={(*recent).clone()}
                on_open_modal={on_open_modal}
            />
            {
                match &*modal {
                    ModalState::Closed => html! {},
                    ModalState::New => html! {
                        <TaskModal
                            task={None}
                            policy={ValidationPolicy::Strict}
                            on_close={on_close_modal}
                        />
                    },
                    ModalState::Edit(task) => html! {
                        <TaskModal
                            task={Some(task.clone())}
                            policy={ValidationPolicy::Strict}
                            on_close={on_close_modal}
                        />
                    },
                }
            }
        </div>
    }
}
