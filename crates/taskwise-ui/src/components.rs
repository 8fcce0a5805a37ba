mod charts;
mod project_modal;
mod sidebar;
mod stats_row;
mod task_card;
mod task_grid;
mod task_modal;

pub use charts::{BarChart, ChartSlice, PieChart};
pub use project_modal::ProjectModal;
pub use sidebar::Sidebar;
pub use stats_row::StatsRow;
pub use task_card::TaskCard;
pub use task_grid::TaskGrid;
pub use task_modal::TaskModal;
