use chrono::{DateTime, Utc};

use crate::model::{TaskDto, TaskStatus};

/// Lateness is derived at render time and never stored: a cached value would
/// go stale the moment the clock passes the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lateness {
    NotLate,
    /// Incomplete task whose due date has passed.
    Overdue,
    /// Completed after its due date.
    SubmittedLate,
}

impl Lateness {
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::NotLate => None,
            Self::Overdue => Some("OVERDUE"),
            Self::SubmittedLate => Some("SUBMITTED LATE"),
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::NotLate => "on-time",
            Self::Overdue => "overdue",
            Self::SubmittedLate => "submitted-late",
        }
    }
}

pub fn classify(task: &TaskDto, now: DateTime<Utc>) -> Lateness {
    let Some(due) = task.due_utc() else {
        return Lateness::NotLate;
    };

    if task.status == TaskStatus::Completed {
        match task.completed_utc() {
            Some(completed) if completed > due => Lateness::SubmittedLate,
            _ => Lateness::NotLate,
        }
    } else if due < now {
        Lateness::Overdue
    } else {
        Lateness::NotLate
    }
}

pub fn clamp_progress(progress: i64) -> i64 {
    progress.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::TaskPriority;

    fn task(status: TaskStatus, due: Option<&str>, completed: Option<&str>) -> TaskDto {
        TaskDto {
            id: 1,
            title: "Write report".to_string(),
            description: None,
            status,
            priority: TaskPriority::High,
            progress: 0,
            card_color: None,
            due_date: due.map(str::to_string),
            created_at: None,
            updated_at: None,
            completed_at: completed.map(str::to_string),
            project_id: None,
            project_name: None,
            project_color: None,
            estimated_hours: None,
            subtasks: Vec::new(),
            subtask_count: 0,
            completed_subtasks: 0,
        }
    }

    fn at(raw: &str) -> DateTime<Utc> {
        crate::datetime::parse_wire_timestamp(raw).expect("timestamp")
    }

    #[test]
    fn completed_after_due_is_submitted_late() {
        let task = task(
            TaskStatus::Completed,
            Some("2024-01-01T10:00:00Z"),
            Some("2024-01-01T12:00:00Z"),
        );
        assert_eq!(classify(&task, Utc::now()), Lateness::SubmittedLate);
        assert_eq!(
            classify(&task, Utc::now()).badge(),
            Some("SUBMITTED LATE")
        );
    }

    #[test]
    fn completed_on_or_before_due_is_on_time() {
        let task = task(
            TaskStatus::Completed,
            Some("2024-01-01T10:00:00Z"),
            Some("2024-01-01T10:00:00Z"),
        );
        assert_eq!(classify(&task, Utc::now()), Lateness::NotLate);
    }

    #[test]
    fn incomplete_past_due_is_overdue() {
        let task = task(TaskStatus::Todo, Some("2024-01-01T10:00:00Z"), None);
        assert_eq!(
            classify(&task, at("2024-01-02T00:00:00Z")),
            Lateness::Overdue
        );
    }

    #[test]
    fn incomplete_before_due_is_not_late() {
        let task = task(TaskStatus::InProgress, Some("2024-06-01T10:00:00Z"), None);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("now");
        assert_eq!(classify(&task, now), Lateness::NotLate);
    }

    #[test]
    fn no_due_date_is_never_late() {
        let task = task(TaskStatus::Todo, None, None);
        assert_eq!(classify(&task, Utc::now()), Lateness::NotLate);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(250), 100);
    }
}
