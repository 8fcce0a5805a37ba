use chrono::Utc;
use gloo::timers::callback::Interval;
use taskwise_shared::reminders::{already_in_center, collect_due_reminders};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, Properties, function_component, html, use_effect_with};

use super::{ToastHandle, browser_notification, request_browser_permission};
use crate::api;
use crate::app::storage;

const POLL_INTERVAL_MS: u32 = 60_000;

#[derive(Properties, PartialEq)]
pub struct ReminderPollProps {
    pub toasts: ToastHandle,
}

/// Invisible component owning the due-date reminder loop: one scan at mount,
/// then one per minute.
#[function_component(ReminderPoll)]
pub fn reminder_poll(props: &ReminderPollProps) -> Html {
    let toasts = props.toasts.clone();
    use_effect_with((), move |_| {
        run_scan(toasts.clone());
        let interval = Interval::new(POLL_INTERVAL_MS, move || run_scan(toasts.clone()));
        move || drop(interval)
    });

    html! {}
}

fn run_scan(toasts: ToastHandle) {
    spawn_local(async move {
        let tasks = match api::list_tasks(api::TaskQuery::default()).await {
            Ok(tasks) => tasks,
            Err(error) => {
                tracing::error!(%error, "reminder scan could not load tasks");
                return;
            }
        };

        let mut seen = storage::load_sent_reminders();
        let due = collect_due_reminders(&tasks, &seen, Utc::now());
        if due.is_empty() {
            return;
        }

        // Ask for permission the first time something is actually worth
        // showing, not at page load.
        request_browser_permission();

        let existing = match api::list_notifications().await {
            Ok(existing) => existing,
            Err(error) => {
                tracing::error!(%error, "reminder scan could not load notification center");
                Vec::new()
            }
        };

        for reminder in due {
            let duplicate = already_in_center(&existing, &reminder.title, &reminder.message);
            if !duplicate {
                if let Err(error) = api::add_notification(&reminder.title, &reminder.message).await
                {
                    tracing::error!(%error, task_id = reminder.task_id, "failed persisting reminder");
                    continue;
                }
                toasts.info(&reminder.message);
                browser_notification(&reminder.title, &reminder.message);
            }
            seen.insert(reminder.key);
        }

        storage::save_sent_reminders(&seen);
    });
}
