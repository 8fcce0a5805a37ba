use chrono::{Datelike, Duration, NaiveDate, Utc};
use taskwise_shared::filter::CalendarFilter;
use taskwise_shared::lateness;
use taskwise_shared::model::{TaskDto, TaskPriority};
use web_sys::{DragEvent, Event, HtmlSelectElement};
use yew::{
    Callback, Html, TargetCast, classes, function_component, html, use_context, use_state,
};

use crate::store::StoreHandle;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Six Monday-started weeks covering the given month, padded with the
/// surrounding days.
fn month_grid(year: i32, month: u32) -> Vec<Vec<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = i64::from(first.weekday().num_days_from_monday());
    let start = first - Duration::days(offset);

    (0..6)
        .map(|week| {
            (0..7)
                .map(|day| start + Duration::days(week * 7 + day))
                .collect()
        })
        .collect()
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + delta;
    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

fn parse_priority_filter(raw: &str) -> Option<TaskPriority> {
    match raw {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let today = Utc::now().date_naive();
    let focus = use_state(|| (today.year(), today.month()));
    let filter = use_state(CalendarFilter::default);

    let (year, month) = *focus;
    let now = Utc::now();

    let on_prev = {
        let focus = focus.clone();
        Callback::from(move |_| focus.set(shift_month(year, month, -1)))
    };
    let on_next = {
        let focus = focus.clone();
        Callback::from(move |_| focus.set(shift_month(year, month, 1)))
    };
    let on_today = {
        let focus = focus.clone();
        Callback::from(move |_| focus.set((today.year(), today.month())))
    };

    let on_project_filter = {
        let filter = filter.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*filter).clone();
            next.project_id = value.parse().ok();
            filter.set(next);
        })
    };

    let on_priority_filter = {
        let filter = filter.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*filter).clone();
            next.priority = parse_priority_filter(&value);
            filter.set(next);
        })
    };

    let month_label = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_default();

    let day_cell = |date: NaiveDate| -> Html {
        let in_month = date.month() == month;
        let is_today = date == today;

        let events: Vec<&TaskDto> = store
            .store
            .tasks
            .iter()
            .filter(|task| filter.shows(task))
            .filter(|task| {
                task.due_utc()
                    .is_some_and(|due| due.date_naive() == date)
            })
            .collect();

        // A dropped chip keeps its original time of day; only the date moves.
        // The cache is untouched until the server confirms, so a failed drop
        // leaves the chip where it was.
        let on_drop = {
            let store = store.clone();
            Callback::from(move |event: DragEvent| {
                event.prevent_default();
                let Some(raw) = event
                    .data_transfer()
                    .and_then(|transfer| transfer.get_data("text/plain").ok())
                else {
                    return;
                };
                let Ok(task_id) = raw.parse::<i64>() else {
                    return;
                };
                let time = store
                    .store
                    .tasks
                    .iter()
                    .find(|task| task.id == task_id)
                    .and_then(|task| task.due_utc())
                    .map(|due| due.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "23:59:00".to_string());
                let due = format!("{}T{}", date.format("%Y-%m-%d"), time);
                store.reschedule_task(task_id, Some(due));
            })
        };

        let on_drag_over = Callback::from(|event: DragEvent| event.prevent_default());

        html! {
            <div
                class={classes!(
                    "calendar-day",
                    (!in_month).then_some("outside"),
                    is_today.then_some("today")
                )}
                ondragover={on_drag_over}
                ondrop={on_drop}
            >
                <span class="day-number">{ date.day() }</span>
                {
                    for events.into_iter().map(|task| {
                        let late = lateness::classify(task, now);
                        let task_id = task.id;
                        let on_drag_start = Callback::from(move |event: DragEvent| {
                            if let Some(transfer) = event.data_transfer() {
                                let _ = transfer.set_data("text/plain", &task_id.to_string());
                            }
                        });
                        let style = task
                            .project_color
                            .as_deref()
                            .map(|color| format!("border-left-color: {color};"));
                        html! {
                            <div
                                key={task.id}
                                class={classes!("calendar-event", late.css_class())}
                                style={style}
                                draggable="true"
                                ondragstart={on_drag_start}
                            >
                                <span class="event-title">{ &task.title }</span>
                                if let Some(badge) = late.badge() {
                                    <span class="lateness-badge">{ badge }</span>
                                }
                            </div>
                        }
                    })
                }
            </div>
        }
    };

    html! {
        <div class="page calendar-page">
            <div class="calendar-toolbar">
                <button onclick={on_prev}>{ "‹" }</button>
                <span class="calendar-title">{ month_label }</span>
                <button onclick={on_next}>{ "›" }</button>
                <button onclick={on_today}>{ "Today" }</button>
                <select onchange={on_project_filter}>
                    <option value="">{ "All projects" }</option>
                    {
                        for store.store.projects.iter().map(|project| html! {
                            <option value={project.id.to_string()}>{ &project.name }</option>
                        })
                    }
                </select>
                <select onchange={on_priority_filter}>
                    <option value="">{ "All priorities" }</option>
                    <option value="low">{ "Low" }</option>
                    <option value="medium">{ "Medium" }</option>
                    <option value="high">{ "High" }</option>
                </select>
            </div>
            <div class="calendar-weekdays">
                { for WEEKDAY_LABELS.iter().map(|label| html! { <span>{ *label }</span> }) }
            </div>
            <div class="calendar-grid">
                {
                    for month_grid(year, month)
                        .into_iter()
                        .flatten()
                        .map(day_cell)
                }
            </div>
        </div>
    }
}
