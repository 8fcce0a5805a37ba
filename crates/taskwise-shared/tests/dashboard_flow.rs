use std::collections::BTreeSet;

use chrono::Duration;
use taskwise_shared::draft::{TaskDraft, ValidationPolicy};
use taskwise_shared::filter::{QuickFilter, TaskFilter};
use taskwise_shared::lateness::{self, Lateness};
use taskwise_shared::model::{TaskDto, TaskPriority, TaskStatus};
use taskwise_shared::reminders::collect_due_reminders;
use taskwise_shared::{analytics, datetime};

#[test]
fn draft_to_reminder_flow() {
    // A fixed mid-day clock keeps the "due today" assertions away from the
    // midnight boundary.
    let now = datetime::parse_wire_timestamp("2024-05-01T12:00:00Z").expect("timestamp");

    // A user fills the dashboard modal for a task due in half an hour.
    let due = now + Duration::minutes(30);
    let draft = TaskDraft {
        title: "Prepare demo".to_string(),
        priority: Some(TaskPriority::High),
        due_date: due.format("%Y-%m-%d").to_string(),
        due_time: due.format("%H:%M").to_string(),
        ..TaskDraft::default()
    };
    let create = draft.validate(ValidationPolicy::Strict).expect("valid draft");

    // Simulate the server echoing the record back on reload.
    let task = TaskDto {
        id: 42,
        title: create.title.clone(),
        description: create.description.clone(),
        status: create.status,
        priority: create.priority,
        progress: create.progress,
        card_color: None,
        due_date: create.due_date.clone(),
        created_at: Some(datetime::to_wire_timestamp(now)),
        updated_at: Some(datetime::to_wire_timestamp(now)),
        completed_at: None,
        project_id: None,
        project_name: None,
        project_color: None,
        estimated_hours: None,
        subtasks: Vec::new(),
        subtask_count: 0,
        completed_subtasks: 0,
    };

    assert_eq!(lateness::classify(&task, now), Lateness::NotLate);
    assert!(QuickFilter::Today.matches(&task, now));
    assert!(QuickFilter::HighPriority.matches(&task, now));
    assert!(
        TaskFilter {
            search: "demo".to_string(),
            ..TaskFilter::default()
        }
        .matches(&task)
    );

    // The 60 s poll announces it once, then stays quiet.
    let mut seen = BTreeSet::new();
    let reminders = collect_due_reminders(std::slice::from_ref(&task), &seen, now);
    assert_eq!(reminders.len(), 1);
    seen.insert(reminders[0].key.clone());
    assert!(collect_due_reminders(std::slice::from_ref(&task), &seen, now).is_empty());

    // Completing it removes it from every alerting path.
    let mut completed = task.clone();
    completed.status = TaskStatus::Completed;
    completed.completed_at = Some(datetime::to_wire_timestamp(now + Duration::hours(2)));
    seen.clear();
    assert!(collect_due_reminders(std::slice::from_ref(&completed), &seen, now).is_empty());
    assert_eq!(
        lateness::classify(&completed, now + Duration::hours(3)),
        Lateness::SubmittedLate
    );

    let counts = analytics::status_distribution(&[task, completed]);
    assert_eq!(counts, [1, 0, 1, 0]);
}
