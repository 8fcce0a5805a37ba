use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::model::{NotificationDto, TaskDto, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// Due within the next hour.
    DueSoon,
    /// Due within the next 24 hours.
    DueToday,
    Overdue,
}

impl ReminderKind {
    fn tag(self) -> &'static str {
        match self {
            Self::DueSoon => "due_soon",
            Self::DueToday => "due_today",
            Self::Overdue => "overdue",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::DueSoon => "Task Due Soon",
            Self::DueToday => "Task Due Today",
            Self::Overdue => "Task Overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub task_id: i64,
    /// Dedup key, persisted by the caller. Built from the due timestamp so a
    /// rescheduled task produces a fresh key and reminds again.
    pub key: String,
    pub kind: ReminderKind,
    pub title: String,
    pub message: String,
}

fn reminder_key(task_id: i64, due: DateTime<Utc>, kind: ReminderKind) -> String {
    format!("{}:{}:{}", task_id, due.timestamp(), kind.tag())
}

fn classify_due(due: DateTime<Utc>, now: DateTime<Utc>) -> Option<ReminderKind> {
    let until_due = due.signed_duration_since(now);
    if until_due.num_seconds() < 0 {
        Some(ReminderKind::Overdue)
    } else if until_due.num_hours() < 1 {
        Some(ReminderKind::DueSoon)
    } else if until_due.num_hours() < 24 {
        Some(ReminderKind::DueToday)
    } else {
        None
    }
}

fn reminder_message(task: &TaskDto, kind: ReminderKind) -> String {
    match kind {
        ReminderKind::DueSoon => format!("\"{}\" is due within the hour", task.title),
        ReminderKind::DueToday => format!("\"{}\" is due today", task.title),
        ReminderKind::Overdue => format!("\"{}\" is overdue", task.title),
    }
}

/// Scans the task cache for deadlines worth announcing. Completed tasks never
/// remind; a (task, due date) pair reminds at most once, at whichever urgency
/// it is first seen.
pub fn collect_due_reminders(
    tasks: &[TaskDto],
    seen: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> Vec<DueReminder> {
    let mut out = Vec::new();
    for task in tasks {
        if task.status == TaskStatus::Completed {
            continue;
        }
        let Some(due) = task.due_utc() else {
            continue;
        };
        let Some(kind) = classify_due(due, now) else {
            continue;
        };

        let key = reminder_key(task.id, due, kind);
        if seen.contains(&key) {
            continue;
        }
        // A pair that already fired at another urgency stays quiet until the
        // due date itself changes.
        let already_fired = [
            ReminderKind::DueSoon,
            ReminderKind::DueToday,
            ReminderKind::Overdue,
        ]
        .iter()
        .any(|other| seen.contains(&reminder_key(task.id, due, *other)));
        if already_fired {
            continue;
        }

        out.push(DueReminder {
            task_id: task.id,
            key,
            kind,
            title: kind.title().to_string(),
            message: reminder_message(task, kind),
        });
    }
    out
}

/// The backend stores whatever it is sent; callers check the center for an
/// identical title+message pair before posting another entry.
pub fn already_in_center(existing: &[NotificationDto], title: &str, message: &str) -> bool {
    existing
        .iter()
        .any(|notification| notification.title == title && notification.message == message)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::model::TaskPriority;

    fn task(id: i64, status: TaskStatus, due: Option<DateTime<Utc>>) -> TaskDto {
        TaskDto {
            id,
            title: format!("Task {id}"),
            description: None,
            status,
            priority: TaskPriority::Medium,
            progress: 0,
            card_color: None,
            due_date: due.map(crate::datetime::to_wire_timestamp),
            created_at: None,
            updated_at: None,
            completed_at: None,
            project_id: None,
            project_name: None,
            project_color: None,
            estimated_hours: None,
            subtasks: Vec::new(),
            subtask_count: 0,
            completed_subtasks: 0,
        }
    }

    #[test]
    fn urgency_bands() {
        let now = Utc::now();
        let tasks = vec![
            task(1, TaskStatus::Todo, Some(now + Duration::minutes(30))),
            task(2, TaskStatus::Todo, Some(now + Duration::hours(5))),
            task(3, TaskStatus::Todo, Some(now - Duration::hours(1))),
            task(4, TaskStatus::Todo, Some(now + Duration::days(3))),
            task(5, TaskStatus::Todo, None),
        ];

        let reminders = collect_due_reminders(&tasks, &BTreeSet::new(), now);
        let kinds: Vec<_> = reminders.iter().map(|r| (r.task_id, r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1, ReminderKind::DueSoon),
                (2, ReminderKind::DueToday),
                (3, ReminderKind::Overdue),
            ]
        );
    }

    #[test]
    fn completed_tasks_never_remind() {
        let now = Utc::now();
        let tasks = vec![task(
            1,
            TaskStatus::Completed,
            Some(now - Duration::hours(2)),
        )];
        assert!(collect_due_reminders(&tasks, &BTreeSet::new(), now).is_empty());
    }

    #[test]
    fn seen_keys_suppress_repeats() {
        let now = Utc::now();
        let tasks = vec![task(1, TaskStatus::Todo, Some(now + Duration::minutes(10)))];

        let first = collect_due_reminders(&tasks, &BTreeSet::new(), now);
        assert_eq!(first.len(), 1);

        let mut seen = BTreeSet::new();
        seen.insert(first[0].key.clone());
        assert!(collect_due_reminders(&tasks, &seen, now).is_empty());
    }

    #[test]
    fn escalation_does_not_re_fire_same_due_date() {
        let now = Utc::now();
        let due = now + Duration::minutes(10);
        let tasks = vec![task(1, TaskStatus::Todo, Some(due))];

        let mut seen = BTreeSet::new();
        for reminder in collect_due_reminders(&tasks, &seen, now) {
            seen.insert(reminder.key);
        }

        // Same deadline, now in the past: the pair already announced.
        let later = due + Duration::hours(1);
        assert!(collect_due_reminders(&tasks, &seen, later).is_empty());
    }

    #[test]
    fn identical_center_entries_are_detected() {
        let entry = |title: &str, message: &str| NotificationDto {
            id: 1,
            title: title.to_string(),
            message: message.to_string(),
            read: false,
            time: None,
        };
        let existing = vec![
            entry("Task Completed", "\"Ship the release\" completed"),
            entry("Task Due Soon", "\"Write report\" is due within the hour"),
        ];

        assert!(already_in_center(
            &existing,
            "Task Completed",
            "\"Ship the release\" completed"
        ));
        // Same title, different message: a distinct event.
        assert!(!already_in_center(
            &existing,
            "Task Completed",
            "\"Write report\" completed"
        ));
        assert!(!already_in_center(&[], "Task Completed", "anything"));
    }

    #[test]
    fn rescheduling_produces_a_fresh_key() {
        let now = Utc::now();
        let mut seen = BTreeSet::new();

        let tasks = vec![task(1, TaskStatus::Todo, Some(now + Duration::minutes(10)))];
        for reminder in collect_due_reminders(&tasks, &seen, now) {
            seen.insert(reminder.key);
        }

        let moved = vec![task(1, TaskStatus::Todo, Some(now + Duration::minutes(45)))];
        let again = collect_due_reminders(&moved, &seen, now);
        assert_eq!(again.len(), 1);
        assert!(!seen.contains(&again[0].key));
    }
}
