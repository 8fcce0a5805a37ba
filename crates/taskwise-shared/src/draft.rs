use chrono::{NaiveDate, NaiveTime};

use crate::model::{TaskCreate, TaskPriority, TaskStatus};

/// How strictly a task form is checked before submission. The dashboard modal
/// requires a full schedule up front; the tasks page accepts a bare title and
/// lets details be filled in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    Strict,
    Lenient,
}

/// Raw form state as typed by the user. Fields stay strings until `validate`
/// turns them into a create payload; a failed validation never leaves the
/// client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<i64>,
    pub due_date: String,
    pub due_time: String,
    pub estimated_hours: String,
    pub card_color: Option<String>,
    pub progress: i64,
    /// Subtask rows typed before the task exists. They ride along with the
    /// draft and are posted one by one once the create succeeds.
    pub subtasks: Vec<String>,
}

impl TaskDraft {
    pub fn validate(&self, policy: ValidationPolicy) -> Result<TaskCreate, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Task title is required".to_string());
        }

        if policy == ValidationPolicy::Strict {
            if self.priority.is_none() {
                return Err("Priority is required".to_string());
            }
            if self.due_date.trim().is_empty() {
                return Err("Due date is required".to_string());
            }
            if self.due_time.trim().is_empty() {
                return Err("Due time is required".to_string());
            }
        }

        let due_date = self.combined_due()?;

        let estimated_hours = match self.estimated_hours.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|_| "Estimated hours must be a number".to_string())?,
            ),
        };

        let description = match self.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(TaskCreate {
            title: title.to_string(),
            description,
            status: self.status,
            priority: self.priority.unwrap_or_default(),
            project_id: self.project_id,
            due_date,
            estimated_hours,
            card_color: self.card_color.clone(),
            progress: self.progress.clamp(0, 100),
            client_token: None,
        })
    }

    /// Queued subtask titles, trimmed, with blank rows dropped.
    pub fn pending_subtasks(&self) -> Vec<String> {
        self.subtasks
            .iter()
            .map(|title| title.trim())
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Joins the date and time inputs into a naive ISO wire timestamp. A date
    /// without a time defaults to end of day, matching how the backend treats
    /// date-only deadlines.
    fn combined_due(&self) -> Result<Option<String>, String> {
        let date_raw = self.due_date.trim();
        if date_raw.is_empty() {
            return Ok(None);
        }

        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| "Due date is not a valid date".to_string())?;

        let time = match self.due_time.trim() {
            "" => NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default(),
            raw => NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| "Due time is not a valid time".to_string())?,
        };

        Ok(Some(format!(
            "{}T{}",
            date.format("%Y-%m-%d"),
            time.format("%H:%M:%S")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TaskDraft {
        TaskDraft {
            title: "Ship the release".to_string(),
            description: "notes".to_string(),
            priority: Some(TaskPriority::High),
            due_date: "2024-03-01".to_string(),
            due_time: "14:30".to_string(),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn strict_accepts_full_draft() {
        let create = filled().validate(ValidationPolicy::Strict).expect("valid");
        assert_eq!(create.title, "Ship the release");
        assert_eq!(create.due_date.as_deref(), Some("2024-03-01T14:30:00"));
    }

    #[test]
    fn empty_title_rejected_under_both_policies() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            ..filled()
        };
        assert!(draft.validate(ValidationPolicy::Strict).is_err());
        assert!(draft.validate(ValidationPolicy::Lenient).is_err());
    }

    #[test]
    fn strict_requires_schedule() {
        let mut draft = filled();
        draft.due_time.clear();
        assert_eq!(
            draft.validate(ValidationPolicy::Strict),
            Err("Due time is required".to_string())
        );

        draft.due_date.clear();
        assert_eq!(
            draft.validate(ValidationPolicy::Strict),
            Err("Due date is required".to_string())
        );

        draft.priority = None;
        assert_eq!(
            draft.validate(ValidationPolicy::Strict),
            Err("Priority is required".to_string())
        );
    }

    #[test]
    fn lenient_accepts_title_only() {
        let draft = TaskDraft {
            title: "Quick note".to_string(),
            ..TaskDraft::default()
        };
        let create = draft.validate(ValidationPolicy::Lenient).expect("valid");
        assert_eq!(create.due_date, None);
        assert_eq!(create.priority, TaskPriority::Medium);
    }

    #[test]
    fn date_without_time_defaults_to_end_of_day() {
        let draft = TaskDraft {
            title: "Deadline".to_string(),
            due_date: "2024-03-01".to_string(),
            ..TaskDraft::default()
        };
        let create = draft.validate(ValidationPolicy::Lenient).expect("valid");
        assert_eq!(create.due_date.as_deref(), Some("2024-03-01T23:59:00"));
    }

    #[test]
    fn pending_subtasks_drop_blank_rows() {
        let draft = TaskDraft {
            subtasks: vec![
                "  outline  ".to_string(),
                String::new(),
                "   ".to_string(),
                "review".to_string(),
            ],
            ..filled()
        };
        assert_eq!(draft.pending_subtasks(), vec!["outline", "review"]);
    }

    #[test]
    fn bad_hours_rejected() {
        let draft = TaskDraft {
            estimated_hours: "soon".to_string(),
            ..filled()
        };
        assert_eq!(
            draft.validate(ValidationPolicy::Lenient),
            Err("Estimated hours must be a number".to_string())
        );
    }
}
