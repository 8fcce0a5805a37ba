use taskwise_shared::model::DashboardStats;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct StatsRowProps {
    pub stats: DashboardStats,
}

#[function_component(StatsRow)]
pub fn stats_row(props: &StatsRowProps) -> Html {
    let stats = &props.stats;
    let card = |label: &'static str, value: String, class: &'static str| {
        html! {
            <div class={format!("stat-card {class}")}>
                <div class="stat-value">{ value }</div>
                <div class="stat-label">{ label }</div>
            </div>
        }
    };

    html! {
        <div class="stats-row">
            { card("Total Tasks", stats.total_tasks.to_string(), "stat-total") }
            { card("Completed", stats.completed_tasks.to_string(), "stat-completed") }
            { card("In Progress", stats.in_progress_tasks.to_string(), "stat-progress") }
            { card("Overdue", stats.overdue_tasks.to_string(), "stat-overdue") }
            { card("Completion", format!("{:.0}%", stats.completion_rate), "stat-rate") }
        </div>
    }
}
