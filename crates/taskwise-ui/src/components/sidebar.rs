use taskwise_shared::model::ProjectDto;
use yew::{Callback, Html, classes, function_component, html, use_context, use_state};

use super::ProjectModal;
use crate::store::StoreHandle;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ProjectTab {
    Active,
    Completed,
}

enum ModalState {
    Closed,
    New,
    Edit(ProjectDto),
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let tab = use_state(|| ProjectTab::Active);
    let modal = use_state(|| ModalState::Closed);

    let projects: Vec<&ProjectDto> = store
        .store
        .projects
        .iter()
        .filter(|project| match *tab {
            ProjectTab::Active => !project.is_finished(),
            ProjectTab::Completed => project.is_finished(),
        })
        .collect();

    let on_add = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(ModalState::New))
    };

    let on_close_modal = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(ModalState::Closed))
    };

    let tab_button = |target: ProjectTab, label: &'static str| {
        let tab = tab.clone();
        let is_active = *tab == target;
        html! {
            <button
                class={classes!("filter-tab", is_active.then_some("active"))}
                onclick={Callback::from(move |_| tab.set(target))}
            >
                { label }
            </button>
        }
    };

    html! {
        <aside class="sidebar">
            <div class="sidebar-head">
                <h1 class="brand">{ "TaskWise" }</h1>
            </div>
            <div class="sidebar-tabs">
                { tab_button(ProjectTab::Active, "Active") }
                { tab_button(ProjectTab::Completed, "Completed") }
            </div>
            <ul class="project-list">
                {
                    for projects.into_iter().cloned().map(|project| {
                        let on_edit = {
                            let modal = modal.clone();
                            let project = project.clone();
                            Callback::from(move |_| modal.set(ModalState::Edit(project.clone())))
                        };
                        let on_delete = {
                            let store = store.clone();
                            let project_id = project.id;
                            Callback::from(move |_| store.delete_project(project_id))
                        };
                        let percent = project.progress_percent();
                        html! {
                            <li key={project.id} class="project-item">
                                <div class="project-row">
                                    if let Some(color) = &project.color {
                                        <span
                                            class="project-dot"
                                            style={format!("background-color: {color};")}
                                        />
                                    }
                                    <span class="project-name">{ &project.name }</span>
                                    <span class="project-count">
                                        { format!("{}/{}", project.completed_tasks, project.total_tasks) }
                                    </span>
                                </div>
                                <div class="progress-track small">
                                    <div
                                        class="progress-fill"
                                        style={format!("width: {percent}%;")}
                                    />
                                </div>
                                <div class="project-actions">
                                    <button class="link-button" onclick={on_edit}>{ "Edit" }</button>
                                    <button class="link-button danger" onclick={on_delete}>
                                        { "Delete" }
                                    </button>
                                </div>
                            </li>
                        }
                    })
                }
            </ul>
            <button class="sidebar-add" onclick={on_add}>{ "+ Add project" }</button>

            {
                match &*modal {
                    ModalState::Closed => html! {},
                    ModalState::New => html! {
                        <ProjectModal project={None} on_close={on_close_modal} />
                    },
                    ModalState::Edit(project) => html! {
                        <ProjectModal
                            project={Some(project.clone())}
                            on_close={on_close_modal}
                        />
                    },
                }
            }
        </aside>
    }
}
