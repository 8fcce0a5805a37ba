use std::collections::HashMap;

use crate::model::{ActivityDto, TaskDto, TaskStatus};

/// Task counts in status order: todo, in progress, completed, overdue.
pub fn status_distribution(tasks: &[TaskDto]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for task in tasks {
        let slot = match task.status {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Overdue => 3,
        };
        counts[slot] += 1;
    }
    counts
}

/// Tasks per project, largest first, capped at ten bars. Tasks without a
/// project land in a "No Project" bucket.
pub fn project_counts(tasks: &[TaskDto]) -> Vec<(String, usize)> {
    let mut buckets: HashMap<String, usize> = HashMap::new();
    for task in tasks {
        *buckets.entry(task.project_label().to_string()).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = buckets.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out.truncate(10);
    out
}

/// Synthesizes an activity feed from task timestamps, newest first. Used when
/// the activity endpoint fails or returns nothing.
pub fn activity_fallback(tasks: &[TaskDto]) -> Vec<ActivityDto> {
    let mut entries: Vec<(i64, ActivityDto)> = tasks
        .iter()
        .filter_map(|task| {
            let stamp = task.updated_utc().or_else(|| task.created_utc())?;
            Some((stamp.timestamp(), ActivityDto::from_task(task)))
        })
        .collect();
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskPriority;

    fn task(id: i64, status: TaskStatus, project: Option<&str>, updated: Option<&str>) -> TaskDto {
        TaskDto {
            id,
            title: format!("Task {id}"),
            description: None,
            status,
            priority: TaskPriority::Medium,
            progress: 0,
            card_color: None,
            due_date: None,
            created_at: None,
            updated_at: updated.map(str::to_string),
            completed_at: None,
            project_id: project.map(|_| id),
            project_name: project.map(str::to_string),
            project_color: None,
            estimated_hours: None,
            subtasks: Vec::new(),
            subtask_count: 0,
            completed_subtasks: 0,
        }
    }

    #[test]
    fn distribution_counts_every_status() {
        let tasks = vec![
            task(1, TaskStatus::Todo, None, None),
            task(2, TaskStatus::Todo, None, None),
            task(3, TaskStatus::InProgress, None, None),
            task(4, TaskStatus::Completed, None, None),
            task(5, TaskStatus::Overdue, None, None),
        ];
        assert_eq!(status_distribution(&tasks), [2, 1, 1, 1]);
    }

    #[test]
    fn projects_bucket_and_sort() {
        let tasks = vec![
            task(1, TaskStatus::Todo, Some("Atlas"), None),
            task(2, TaskStatus::Todo, Some("Atlas"), None),
            task(3, TaskStatus::Todo, Some("Beacon"), None),
            task(4, TaskStatus::Todo, None, None),
        ];
        let counts = project_counts(&tasks);
        assert_eq!(counts[0], ("Atlas".to_string(), 2));
        assert!(counts.contains(&("No Project".to_string(), 1)));
    }

    #[test]
    fn project_counts_cap_at_ten() {
        let tasks: Vec<TaskDto> = (0..15)
            .map(|i| {
                let name = format!("P{i}");
                let mut t = task(i, TaskStatus::Todo, Some(&name), None);
                t.project_name = Some(name);
                t
            })
            .collect();
        assert_eq!(project_counts(&tasks).len(), 10);
    }

    #[test]
    fn fallback_sorts_newest_first_and_skips_undated() {
        let tasks = vec![
            task(1, TaskStatus::Todo, None, Some("2024-01-01T10:00:00Z")),
            task(2, TaskStatus::Todo, None, Some("2024-02-01T10:00:00Z")),
            task(3, TaskStatus::Todo, None, None),
        ];
        let feed = activity_fallback(&tasks);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].id, Some(2));
        assert_eq!(feed[1].id, Some(1));
    }
}
