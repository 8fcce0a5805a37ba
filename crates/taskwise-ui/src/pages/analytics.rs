use gloo::timers::callback::Interval;
use taskwise_shared::analytics::{activity_fallback, project_counts, status_distribution};
use taskwise_shared::model::ActivityDto;
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_context, use_effect_with, use_state};

use crate::api;
use crate::components::{BarChart, ChartSlice, PieChart, StatsRow};
use crate::store::StoreHandle;

const REFRESH_INTERVAL_MS: u32 = 60_000;
const ACTIVITY_LIMIT: usize = 50;

const STATUS_COLORS: [(&str, &str); 4] = [
    ("To Do", "#a0aec0"),
    ("In Progress", "#4299e1"),
    ("Completed", "#48bb78"),
    ("Overdue", "#f56565"),
];

#[function_component(AnalyticsPage)]
pub fn analytics_page() -> Html {
    let store = use_context::<StoreHandle>().expect("store context");
    let activity = use_state(Vec::<ActivityDto>::new);

    // Activity comes from its own endpoint; when that fails the feed is
    // synthesized from task timestamps instead of going blank.
    {
        let store = store.clone();
        let activity = activity.clone();
        use_effect_with(store.store.tasks.clone(), move |tasks| {
            let tasks = tasks.clone();
            spawn_local(async move {
                match api::activity(ACTIVITY_LIMIT).await {
                    Ok(feed) if !feed.is_empty() => activity.set(feed),
                    Ok(_) => activity.set(activity_fallback(&tasks)),
                    Err(error) => {
                        tracing::warn!(%error, "activity endpoint unavailable, using fallback");
                        activity.set(activity_fallback(&tasks));
                    }
                }
            });
        });
    }

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(REFRESH_INTERVAL_MS, move || {
                store.load_tasks();
                store.refresh_stats();
            });
            move || drop(interval)
        });
    }

    let distribution = status_distribution(&store.store.tasks);
    let slices: Vec<ChartSlice> = STATUS_COLORS
        .iter()
        .zip(distribution)
        .map(|((label, color), value)| ChartSlice {
            label: (*label).to_string(),
            value,
            color: (*color).to_string(),
        })
        .collect();

    let bars = project_counts(&store.store.tasks);

    html! {
        <div class="page analytics-page">
            <StatsRow stats={store.store.stats.clone()} />
            <div class="analytics-charts">
                <section class="chart-panel">
                    <h3>{ "Tasks by Status" }</h3>
                    <PieChart slices={slices} />
                </section>
                <section class="chart-panel">
                    <h3>{ "Tasks by Project" }</h3>
                    <BarChart bars={bars} />
                </section>
            </div>
            <section class="activity-feed">
                <h3>{ "Recent Activity" }</h3>
                if activity.is_empty() {
                    <div class="chart-empty">{ "No activity yet" }</div>
                } else {
                    <ul>
                        {
                            for activity.iter().enumerate().map(|(index, entry)| html! {
                                <li key={entry.id.unwrap_or(index as i64)}>
                                    <span class="activity-message">
                                        { entry.message.as_deref().unwrap_or("(no detail)") }
                                    </span>
                                    if let Some(at) = &entry.created_at {
                                        <span class="activity-time">{ at }</span>
                                    }
                                </li>
                            })
                        }
                    </ul>
                }
            </section>
        </div>
    }
}
