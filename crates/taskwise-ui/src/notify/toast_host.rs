use gloo::timers::callback::Timeout;
use yew::{Callback, Html, Properties, classes, function_component, html, use_effect_with};

use super::{Toast, ToastAction, ToastHandle};

const TOAST_DISMISS_MS: u32 = 3_500;

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub handle: ToastHandle,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    let handle = props.handle.clone();
    let on_dismiss = Callback::from(move |id: u64| {
        handle.0.dispatch(ToastAction::Dismiss(id));
    });

    html! {
        <div class="toast-host">
            {
                for props.handle.0.toasts.iter().cloned().map(|toast| html! {
                    <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
                })
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |_| {
            let timeout = Timeout::new(TOAST_DISMISS_MS, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("toast", props.toast.kind.css_class())} onclick={on_click}>
            { &props.toast.message }
        </div>
    }
}
