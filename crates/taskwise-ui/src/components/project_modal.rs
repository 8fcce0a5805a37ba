use taskwise_shared::model::{ProjectDto, ProjectDraft};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::{
    Callback, Html, Properties, TargetCast, classes, function_component, html, use_context,
    use_state,
};

use crate::store::StoreHandle;

const PROJECT_COLORS: [&str; 6] = [
    "#667eea", "#f56565", "#48bb78", "#ed8936", "#9f7aea", "#38b2ac",
];

#[derive(Properties, PartialEq)]
pub struct ProjectModalProps {
    pub project: Option<ProjectDto>,
    pub on_close: Callback<()>,
}

#[function_component(ProjectModal)]
pub fn project_modal(props: &ProjectModalProps) -> Html {
    let store = use_context::<StoreHandle>().expect("store context");

    let name = use_state(|| {
        props
            .project
            .as_ref()
            .map(|project| project.name.clone())
            .unwrap_or_default()
    });
    let description = use_state(|| {
        props
            .project
            .as_ref()
            .and_then(|project| project.description.clone())
            .unwrap_or_default()
    });
    let color = use_state(|| {
        props
            .project
            .as_ref()
            .and_then(|project| project.color.clone())
            .unwrap_or_else(|| PROJECT_COLORS[0].to_string())
    });

    let project_id = props.project.as_ref().map(|project| project.id);

    let on_name = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            name.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_description = {
        let description = description.clone();
        Callback::from(move |event: InputEvent| {
            description.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let on_save = {
        let store = store.clone();
        let name = name.clone();
        let description = description.clone();
        let color = color.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            let draft = ProjectDraft {
                name: name.trim().to_string(),
                description: match description.trim() {
                    "" => None,
                    text => Some(text.to_string()),
                },
                color: Some((*color).clone()),
            };
            if draft.name.is_empty() {
                store.toasts.error("Project name is required");
                return;
            }
            store.save_project(project_id, draft);
            on_close.emit(());
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal project-modal">
                <div class="modal-head">
                    <h2>{ if project_id.is_some() { "Edit Project" } else { "New Project" } }</h2>
                    <button class="link-button" onclick={on_close.clone()}>{ "✕" }</button>
                </div>

                <label>{ "Name" }
                    <input type="text" value={(*name).clone()} oninput={on_name} />
                </label>
                <label>{ "Description" }
                    <textarea value={(*description).clone()} oninput={on_description} />
                </label>

                <div class="color-picker">
                    <span>{ "Color" }</span>
                    {
                        for PROJECT_COLORS.into_iter().map(|candidate| {
                            let color = color.clone();
                            let selected = *color == candidate;
                            html! {
                                <button
                                    class={classes!(
                                        "color-swatch",
                                        selected.then_some("selected")
                                    )}
                                    style={format!("background-color: {candidate};")}
                                    onclick={Callback::from(move |_| {
                                        color.set(candidate.to_string())
                                    })}
                                />
                            }
                        })
                    }
                </div>

                <div class="modal-actions">
                    <button class="primary" onclick={on_save}>{ "Save" }</button>
                    <button onclick={on_close}>{ "Cancel" }</button>
                </div>
            </div>
        </div>
    }
}
