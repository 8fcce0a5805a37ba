use chrono::{DateTime, Datelike, Duration, Utc};

use crate::model::{TaskDto, TaskPriority, TaskStatus};

/// Grid tab filters on the dashboard and tasks pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickFilter {
    #[default]
    All,
    Today,
    Week,
    HighPriority,
}

impl QuickFilter {
    pub fn all() -> [Self; 4] {
        [Self::All, Self::Today, Self::Week, Self::HighPriority]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::HighPriority => "High Priority",
        }
    }

    pub fn matches(self, task: &TaskDto, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Today => task
                .due_utc()
                .is_some_and(|due| due.date_naive() == now.date_naive()),
            Self::Week => task.due_utc().is_some_and(|due| {
                due >= now - Duration::days(i64::from(now.weekday().num_days_from_monday()))
                    && due < now + Duration::days(7)
            }),
            Self::HighPriority => task.priority == TaskPriority::High,
        }
    }
}

/// The tasks page filter bar: free-text search plus optional status and
/// priority dropdowns. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &TaskDto) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        true
    }
}

/// Calendar display filter. Hides events without touching the underlying
/// cache; clearing it brings everything back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarFilter {
    pub project_id: Option<i64>,
    pub priority: Option<TaskPriority>,
}

impl CalendarFilter {
    pub fn shows(&self, task: &TaskDto) -> bool {
        if let Some(project_id) = self.project_id
            && task.project_id != Some(project_id)
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, priority: TaskPriority, due: Option<DateTime<Utc>>) -> TaskDto {
        TaskDto {
            id: 1,
            title: title.to_string(),
            description: Some("background notes".to_string()),
            status: TaskStatus::Todo,
            priority,
            progress: 0,
            card_color: None,
            due_date: due.map(crate::datetime::to_wire_timestamp),
            created_at: None,
            updated_at: None,
            completed_at: None,
            project_id: Some(9),
            project_name: Some("Atlas".to_string()),
            project_color: None,
            estimated_hours: None,
            subtasks: Vec::new(),
            subtask_count: 0,
            completed_subtasks: 0,
        }
    }

    fn noon() -> DateTime<Utc> {
        crate::datetime::parse_wire_timestamp("2024-05-01T12:00:00Z").expect("timestamp")
    }

    #[test]
    fn quick_filter_today_and_high_priority() {
        let now = noon();
        let today = task("a", TaskPriority::Low, Some(now + Duration::hours(1)));
        let next_month = task("b", TaskPriority::High, Some(now + Duration::days(40)));

        assert!(QuickFilter::Today.matches(&today, now));
        assert!(!QuickFilter::Today.matches(&next_month, now));
        assert!(QuickFilter::HighPriority.matches(&next_month, now));
        assert!(QuickFilter::All.matches(&next_month, now));
    }

    #[test]
    fn quick_filter_week_requires_due_date() {
        let now = noon();
        let undated = task("a", TaskPriority::Medium, None);
        assert!(!QuickFilter::Week.matches(&undated, now));
        assert!(QuickFilter::Week.matches(
            &task("b", TaskPriority::Medium, Some(now + Duration::days(2))),
            now
        ));
    }

    #[test]
    fn search_hits_title_and_description() {
        let task = task("Write report", TaskPriority::Medium, None);
        let by_title = TaskFilter {
            search: "REPORT".to_string(),
            ..TaskFilter::default()
        };
        let by_description = TaskFilter {
            search: "background".to_string(),
            ..TaskFilter::default()
        };
        let miss = TaskFilter {
            search: "invoice".to_string(),
            ..TaskFilter::default()
        };
        assert!(by_title.matches(&task));
        assert!(by_description.matches(&task));
        assert!(!miss.matches(&task));
    }

    #[test]
    fn status_and_priority_narrow_results() {
        let task = task("Write report", TaskPriority::High, None);
        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            ..TaskFilter::default()
        };
        assert!(!filter.matches(&task));

        let filter = TaskFilter {
            status: Some(TaskStatus::Todo),
            priority: Some(TaskPriority::High),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&task));
    }

    #[test]
    fn calendar_filter_is_display_only_predicate() {
        let task = task("Write report", TaskPriority::High, None);
        assert!(CalendarFilter::default().shows(&task));
        assert!(
            CalendarFilter {
                project_id: Some(9),
                priority: Some(TaskPriority::High),
            }
            .shows(&task)
        );
        assert!(
            !CalendarFilter {
                project_id: Some(2),
                priority: None,
            }
            .shows(&task)
        );
    }
}
