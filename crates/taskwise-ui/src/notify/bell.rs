use std::collections::BTreeSet;

use taskwise_shared::model::NotificationDto;
use wasm_bindgen_futures::spawn_local;
use yew::{
    Callback, Html, Properties, UseStateHandle, classes, function_component, html, use_effect_with,
    use_state,
};

use crate::api;

#[derive(Properties, PartialEq)]
pub struct NotificationBellProps {}

fn refetch(notifications: UseStateHandle<Vec<NotificationDto>>) {
    spawn_local(async move {
        match api::list_notifications().await {
            Ok(list) => notifications.set(list),
            Err(error) => tracing::error!(%error, "failed loading notifications"),
        }
    });
}

#[function_component(NotificationBell)]
pub fn notification_bell(_props: &NotificationBellProps) -> Html {
    let open = use_state(|| false);
    let notifications = use_state(Vec::<NotificationDto>::new);
    let selected = use_state(BTreeSet::<i64>::new);

    {
        let notifications = notifications.clone();
        use_effect_with((), move |_| {
            refetch(notifications);
        });
    }

    let unread = notifications.iter().filter(|n| !n.read).count();

    let on_toggle = {
        let open = open.clone();
        let notifications = notifications.clone();
        Callback::from(move |_| {
            let now_open = !*open;
            open.set(now_open);
            if now_open {
                refetch(notifications.clone());
            }
        })
    };

    let on_mark_read = {
        let notifications = notifications.clone();
        Callback::from(move |id: i64| {
            let notifications = notifications.clone();
            spawn_local(async move {
                match api::mark_notification_read(id).await {
                    Ok(()) => refetch(notifications),
                    Err(error) => tracing::error!(%error, id, "failed marking notification read"),
                }
            });
        })
    };

    // Mark-all is a client-side loop over the visible unread entries; there
    // is no bulk endpoint for it.
    let on_mark_all_read = {
        let notifications = notifications.clone();
        Callback::from(move |_| {
            let unread_ids: Vec<i64> = notifications
                .iter()
                .filter(|n| !n.read)
                .map(|n| n.id)
                .collect();
            let notifications = notifications.clone();
            spawn_local(async move {
                for id in unread_ids {
                    if let Err(error) = api::mark_notification_read(id).await {
                        tracing::error!(%error, id, "failed marking notification read");
                    }
                }
                refetch(notifications);
            });
        })
    };

    let on_delete = {
        let notifications = notifications.clone();
        Callback::from(move |id: i64| {
            let notifications = notifications.clone();
            spawn_local(async move {
                match api::delete_notifications(&[id]).await {
                    Ok(()) => refetch(notifications),
                    Err(error) => tracing::error!(%error, id, "failed deleting notification"),
                }
            });
        })
    };

    let on_toggle_select = {
        let selected = selected.clone();
        Callback::from(move |id: i64| {
            let mut next = (*selected).clone();
            if !next.remove(&id) {
                next.insert(id);
            }
            selected.set(next);
        })
    };

    let on_delete_selected = {
        let notifications = notifications.clone();
        let selected = selected.clone();
        Callback::from(move |_| {
            let ids: Vec<i64> = selected.iter().copied().collect();
            if ids.is_empty() {
                return;
            }
            let notifications = notifications.clone();
            let selected = selected.clone();
            spawn_local(async move {
                match api::delete_notifications(&ids).await {
                    Ok(()) => {
                        selected.set(BTreeSet::new());
                        refetch(notifications);
                    }
                    Err(error) => tracing::error!(%error, "failed deleting notifications"),
                }
            });
        })
    };

    html! {
        <div class="notification-bell">
            <button class="bell-button" onclick={on_toggle}>
                { "🔔" }
                if unread > 0 {
                    <span class="bell-badge">{ unread }</span>
                }
            </button>
            if *open {
                <div class="bell-dropdown">
                    <div class="bell-header">
                        <span>{ "Notifications" }</span>
                        <button class="link-button" onclick={on_mark_all_read}>
                            { "Mark all read" }
                        </button>
                        <button class="link-button" onclick={on_delete_selected}>
                            { "Delete selected" }
                        </button>
                    </div>
                    if notifications.is_empty() {
                        <div class="bell-empty">{ "No notifications" }</div>
                    } else {
                        <ul class="bell-list">
                            {
                                for notifications.iter().cloned().map(|notification| {
                                    let id = notification.id;
                                    let mark = on_mark_read.clone();
                                    let delete = on_delete.clone();
                                    let toggle = on_toggle_select.clone();
                                    let checked = selected.contains(&id);
                                    html! {
                                        <li
                                            key={id}
                                            class={classes!(
                                                "bell-item",
                                                (!notification.read).then_some("unread")
                                            )}
                                        >
                                            <input
                                                type="checkbox"
                                                checked={checked}
                                                onchange={Callback::from(move |_| toggle.emit(id))}
                                            />
                                            <div class="bell-body">
                                                <div class="bell-title">{ &notification.title }</div>
                                                <div class="bell-message">{ &notification.message }</div>
                                                if let Some(time) = &notification.time {
                                                    <div class="bell-time">{ time }</div>
                                                }
                                            </div>
                                            if !notification.read {
                                                <button
                                                    class="link-button"
                                                    onclick={Callback::from(move |_| mark.emit(id))}
                                                >
                                                    { "Read" }
                                                </button>
                                            }
                                            <button
                                                class="link-button"
                                                onclick={Callback::from(move |_| delete.emit(id))}
                                            >
                                                { "✕" }
                                            </button>
                                        </li>
                                    }
                                })
                            }
                        </ul>
                    }
                </div>
            }
        </div>
    }
}
