mod bell;
mod reminder_poll;
mod toast_host;

use std::rc::Rc;

pub use bell::NotificationBell;
pub use reminder_poll::ReminderPoll;
pub use toast_host::ToastHost;
use yew::{Reducible, UseReducerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
            Self::Info => "toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u64),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
                next.next_id += 1;
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastHandle(pub UseReducerHandle<ToastList>);

impl ToastHandle {
    pub fn success(&self, message: &str) {
        self.0
            .dispatch(ToastAction::Push(ToastKind::Success, message.to_string()));
    }

    pub fn error(&self, message: &str) {
        self.0
            .dispatch(ToastAction::Push(ToastKind::Error, message.to_string()));
    }

    pub fn info(&self, message: &str) {
        self.0
            .dispatch(ToastAction::Push(ToastKind::Info, message.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPermission {
    Unsupported,
    Default,
    Granted,
    Denied,
}

/// Probes for the Notification API before touching it; some embedded
/// runtimes expose `web_sys::Notification` bindings without the backing
/// object.
pub fn browser_notification_permission() -> NotifyPermission {
    let Some(window) = web_sys::window() else {
        return NotifyPermission::Unsupported;
    };

    let has_notification = js_sys::Reflect::has(
        window.as_ref(),
        &wasm_bindgen::JsValue::from_str("Notification"),
    )
    .unwrap_or(false);
    if !has_notification {
        return NotifyPermission::Unsupported;
    }

    match web_sys::Notification::permission() {
        web_sys::NotificationPermission::Default => NotifyPermission::Default,
        web_sys::NotificationPermission::Granted => NotifyPermission::Granted,
        web_sys::NotificationPermission::Denied => NotifyPermission::Denied,
        _ => NotifyPermission::Unsupported,
    }
}

/// Asks the browser for notification permission. Fire and forget; the next
/// permission probe sees the outcome.
pub fn request_browser_permission() {
    if browser_notification_permission() != NotifyPermission::Default {
        return;
    }

    match web_sys::Notification::request_permission() {
        Ok(promise) => {
            wasm_bindgen_futures::spawn_local(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
                tracing::info!(
                    permission = ?browser_notification_permission(),
                    "notification permission request completed"
                );
            });
        }
        Err(error) => {
            tracing::error!(error = ?error, "failed requesting notification permission");
        }
    }
}

/// Emits a native browser notification when permitted; a silent no-op
/// everywhere else.
pub fn browser_notification(title: &str, body: &str) {
    if browser_notification_permission() != NotifyPermission::Granted {
        return;
    }

    let options = web_sys::NotificationOptions::new();
    options.set_body(body);
    options.set_icon("/static/favicon-32x32.png");

    match web_sys::Notification::new_with_options(title, &options) {
        Ok(_) => tracing::info!(title, "emitted browser notification"),
        Err(error) => {
            tracing::error!(error = ?error, title, "failed emitting browser notification");
        }
    }
}
