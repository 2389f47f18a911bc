use std::cmp::Ordering;

use crate::model::task::{Status, Task};

/// Active table ordering: everything not done, by priority rank ascending,
/// then deadline ascending with empty deadlines last. Stable beyond the keys.
pub fn active_view(tasks: &[Task]) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| t.status != Status::Done).collect();
    out.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
    out
}

/// Completed table ordering: done tasks by completion time descending, with
/// missing completion times last. Stable beyond the key.
pub fn completed_view(tasks: &[Task]) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| t.status == Status::Done).collect();
    out.sort_by(|a, b| match (a.completed_at, b.completed_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{self, Priority, TaskDraft};
    use pretty_assertions::assert_eq;

    fn task(summary: &str, priority: Priority, status: Status) -> Task {
        let mut t = Task::from_draft(TaskDraft {
            summary: summary.to_string(),
            priority: Some(priority),
            status: Some(status),
            ..Default::default()
        });
        // Deterministic creation time so ordering tests only exercise the keys
        t.created_at = task::parse_timestamp("2024-06-01T08:00:00").unwrap();
        t
    }

    fn with_deadline(mut t: Task, deadline: &str) -> Task {
        t.deadline = task::parse_date(deadline);
        t
    }

    fn with_completed(mut t: Task, ts: &str) -> Task {
        t.completed_at = task::parse_timestamp(ts);
        t
    }

    fn summaries(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.summary.clone()).collect()
    }

    #[test]
    fn active_orders_by_priority_rank_then_deadline() {
        let tasks = vec![
            with_deadline(
                task("important", Priority::Important, Status::Todo),
                "2024-06-12",
            ),
            task("urgent", Priority::Urgent, Status::Todo),
            with_deadline(
                task("urgent-important", Priority::UrgentImportant, Status::Todo),
                "2024-06-10",
            ),
        ];
        let view = active_view(&tasks);
        assert_eq!(
            summaries(&view),
            vec!["urgent-important", "urgent", "important"]
        );
    }

    #[test]
    fn active_sorts_empty_deadline_last_within_priority() {
        let tasks = vec![
            task("no deadline", Priority::Urgent, Status::Todo),
            with_deadline(task("later", Priority::Urgent, Status::Todo), "2024-06-20"),
            with_deadline(task("sooner", Priority::Urgent, Status::Todo), "2024-06-11"),
        ];
        let view = active_view(&tasks);
        assert_eq!(summaries(&view), vec!["sooner", "later", "no deadline"]);
    }

    #[test]
    fn active_excludes_done() {
        let tasks = vec![
            task("open", Priority::Routine, Status::InProgress),
            task("closed", Priority::UrgentImportant, Status::Done),
            task("blocked", Priority::Routine, Status::Stuck),
        ];
        let view = active_view(&tasks);
        assert_eq!(summaries(&view), vec!["open", "blocked"]);
    }

    #[test]
    fn active_ties_keep_original_order() {
        let tasks = vec![
            task("first", Priority::Routine, Status::Todo),
            task("second", Priority::Routine, Status::Todo),
            task("third", Priority::Routine, Status::Todo),
        ];
        let view = active_view(&tasks);
        assert_eq!(summaries(&view), vec!["first", "second", "third"]);
    }

    #[test]
    fn completed_orders_by_completion_descending_with_empty_last() {
        let tasks = vec![
            with_completed(
                task("older", Priority::Routine, Status::Done),
                "2024-06-09T10:00",
            ),
            task("unstamped", Priority::Routine, Status::Done),
            with_completed(
                task("newer", Priority::Routine, Status::Done),
                "2024-06-11T09:00",
            ),
        ];
        let view = completed_view(&tasks);
        assert_eq!(summaries(&view), vec!["newer", "older", "unstamped"]);
    }

    #[test]
    fn completed_excludes_open_tasks() {
        let tasks = vec![
            task("open", Priority::Urgent, Status::Todo),
            with_completed(
                task("closed", Priority::Urgent, Status::Done),
                "2024-06-11T09:00",
            ),
        ];
        let view = completed_view(&tasks);
        assert_eq!(summaries(&view), vec!["closed"]);
    }

    #[test]
    fn views_do_not_mutate_input_order() {
        let tasks = vec![
            task("b", Priority::Routine, Status::Todo),
            task("a", Priority::UrgentImportant, Status::Todo),
        ];
        let _ = active_view(&tasks);
        let _ = completed_view(&tasks);
        assert_eq!(tasks[0].summary, "b");
        assert_eq!(tasks[1].summary, "a");
    }
}
