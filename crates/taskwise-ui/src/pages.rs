mod analytics;
mod calendar;
mod dashboard;
mod focus;
mod tasks;

pub use analytics::AnalyticsPage;
pub use calendar::CalendarPage;
pub use dashboard::DashboardPage;
pub use focus::FocusPage;
pub use tasks::TasksPage;
