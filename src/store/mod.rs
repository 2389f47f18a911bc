use crate::model::task::{self, Priority, Status, Task, TaskDraft};

const UNDO_STACK_LIMIT: usize = 500;

/// Error type for rejected store mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task summary must not be empty")]
    EmptySummary,
    #[error("no task with id {0}")]
    UnknownId(String),
}

/// The authoritative ordered task collection plus linear undo/redo history.
///
/// Every accepted mutation pushes the pre-mutation state onto the undo stack
/// and clears the redo stack. Undo and redo move whole snapshots between the
/// stacks and the current state. History lives only for the process lifetime.
pub struct TaskStore {
    tasks: Vec<Task>,
    undo_stack: Vec<Vec<Task>>,
    redo_stack: Vec<Vec<Task>>,
    /// Set once the initial load has resolved; persistence is gated on it
    loaded: bool,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            loaded: false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Whether the initial load has resolved. The first save must not run
    /// before this returns true, or startup would clobber on-disk data.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Replace the current state wholesale. Used once at startup; does not
    /// touch the history stacks.
    pub fn load(&mut self, initial: Vec<Task>) {
        self.tasks = initial;
        self.loaded = true;
    }

    /// Add a task built from the draft. Rejects an empty summary with no
    /// mutation. Returns the new task's id.
    pub fn add(&mut self, draft: TaskDraft) -> Result<String, StoreError> {
        if draft.summary.is_empty() {
            return Err(StoreError::EmptySummary);
        }
        let mut new = Task::from_draft(draft);
        stamp_completed(&mut new);
        let id = new.id.clone();
        self.snapshot();
        self.tasks.push(new);
        Ok(id)
    }

    /// Replace the task matching `id` wholesale. The stored id and
    /// `created_at` are immutable and win over the replacement's values.
    /// Stamps `completed_at` when the replacement enters done without one.
    pub fn update(&mut self, id: &str, replacement: Task) -> Result<(), StoreError> {
        if replacement.summary.is_empty() {
            return Err(StoreError::EmptySummary);
        }
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::UnknownId(id.to_string()))?;

        let mut new = replacement;
        new.id = self.tasks[idx].id.clone();
        new.created_at = self.tasks[idx].created_at;
        stamp_completed(&mut new);

        self.snapshot();
        self.tasks[idx] = new;
        Ok(())
    }

    /// Remove the task matching `id`. Returns false (and records nothing)
    /// when the id is unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.snapshot();
        self.tasks.remove(idx);
        true
    }

    /// Step back one mutation. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(&mut self.tasks, prev));
        true
    }

    /// Reapply the most recently undone mutation. Returns false when the
    /// redo stack is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(std::mem::replace(&mut self.tasks, next));
        true
    }

    /// Push the pre-mutation snapshot. Clears the redo stack.
    fn snapshot(&mut self) {
        self.undo_stack.push(self.tasks.clone());
        if self.undo_stack.len() > UNDO_STACK_LIMIT {
            self.undo_stack.drain(..self.undo_stack.len() - UNDO_STACK_LIMIT);
        }
        self.redo_stack.clear();
    }
}

/// Stamp `completed_at` on entry to done if not already set. Never clears;
/// leaving done keeps the original completion time.
fn stamp_completed(task: &mut Task) {
    if task.status == Status::Done && task.completed_at.is_none() {
        task.completed_at = Some(task::now());
    }
}

/// Built-in tasks used when the persistence gateway reports no data
pub fn sample_tasks() -> Vec<Task> {
    fn at(summary: &str, priority: Priority, status: Status, created: &str) -> Task {
        let mut t = Task::from_draft(TaskDraft {
            summary: summary.to_string(),
            priority: Some(priority),
            status: Some(status),
            ..Default::default()
        });
        if let Some(ts) = task::parse_timestamp(created) {
            t.created_at = ts;
        }
        t
    }

    let mut fix = at(
        "Fix the production crash",
        Priority::UrgentImportant,
        Status::Todo,
        "2024-06-10T09:00:00",
    );
    fix.remark = "The crash takes the whole system down; needs to land today.".to_string();

    let mut report = at(
        "Write the weekly report",
        Priority::Important,
        Status::InProgress,
        "2024-06-09T14:00:00",
    );
    report.assignee = "Li Hua".to_string();

    vec![fix, report]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn draft(summary: &str) -> TaskDraft {
        TaskDraft {
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    fn loaded_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.load(Vec::new());
        store
    }

    fn deadline(s: &str) -> Option<NaiveDate> {
        task::parse_date(s)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    #[test]
    fn add_appends_a_task() {
        let mut store = loaded_store();
        let id = store.add(draft("First")).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.get(&id).unwrap().summary, "First");
    }

    #[test]
    fn add_rejects_empty_summary_without_mutation() {
        let mut store = loaded_store();
        let err = store.add(draft("")).unwrap_err();
        assert_eq!(err, StoreError::EmptySummary);
        assert!(store.tasks().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn add_stamps_completion_for_done_drafts() {
        let mut store = loaded_store();
        let mut d = draft("Already finished");
        d.status = Some(Status::Done);
        let id = store.add(d).unwrap();
        assert!(store.get(&id).unwrap().completed_at.is_some());
    }

    #[test]
    fn update_replaces_fields() {
        let mut store = loaded_store();
        let id = store.add(draft("Before")).unwrap();
        let mut replacement = store.get(&id).unwrap().clone();
        replacement.summary = "After".to_string();
        replacement.assignee = "Zhang".to_string();
        replacement.deadline = deadline("2024-06-14");
        store.update(&id, replacement).unwrap();

        let task = store.get(&id).unwrap();
        assert_eq!(task.summary, "After");
        assert_eq!(task.assignee, "Zhang");
        assert_eq!(task.deadline, deadline("2024-06-14"));
    }

    #[test]
    fn update_rejects_unknown_id() {
        let mut store = loaded_store();
        let id = store.add(draft("Only")).unwrap();
        let replacement = store.get(&id).unwrap().clone();
        let err = store.update("missing", replacement).unwrap_err();
        assert_eq!(err, StoreError::UnknownId("missing".to_string()));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn update_rejects_cleared_summary() {
        let mut store = loaded_store();
        let id = store.add(draft("Keep me")).unwrap();
        let mut replacement = store.get(&id).unwrap().clone();
        replacement.summary = String::new();
        assert_eq!(
            store.update(&id, replacement),
            Err(StoreError::EmptySummary)
        );
        assert_eq!(store.get(&id).unwrap().summary, "Keep me");
    }

    #[test]
    fn update_preserves_identity_fields() {
        let mut store = loaded_store();
        let id = store.add(draft("Task")).unwrap();
        let created = store.get(&id).unwrap().created_at;

        let mut replacement = store.get(&id).unwrap().clone();
        replacement.id = "forged".to_string();
        replacement.created_at = task::parse_timestamp("1999-01-01T00:00:00").unwrap();
        store.update(&id, replacement).unwrap();

        let task = store.get(&id).unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.created_at, created);
    }

    #[test]
    fn completion_stamped_once_then_sticky() {
        let mut store = loaded_store();
        let id = store.add(draft("Finish me")).unwrap();

        let mut done = store.get(&id).unwrap().clone();
        done.status = Status::Done;
        store.update(&id, done).unwrap();
        let first = store.get(&id).unwrap().completed_at;
        assert!(first.is_some());

        // Re-saving the same done task keeps the original stamp
        let again = store.get(&id).unwrap().clone();
        store.update(&id, again).unwrap();
        assert_eq!(store.get(&id).unwrap().completed_at, first);

        // Moving away from done does not clear it
        let mut reopened = store.get(&id).unwrap().clone();
        reopened.status = Status::Todo;
        store.update(&id, reopened).unwrap();
        assert_eq!(store.get(&id).unwrap().completed_at, first);

        // Completing again keeps the first completion time
        let mut redone = store.get(&id).unwrap().clone();
        redone.status = Status::Done;
        store.update(&id, redone).unwrap();
        assert_eq!(store.get(&id).unwrap().completed_at, first);
    }

    #[test]
    fn delete_removes_task() {
        let mut store = loaded_store();
        let id = store.add(draft("Doomed")).unwrap();
        assert!(store.delete(&id));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn delete_unknown_id_is_a_clean_noop() {
        let mut store = loaded_store();
        store.add(draft("Survivor")).unwrap();
        let undo_depth = store.undo_stack.len();
        assert!(!store.delete("missing"));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.undo_stack.len(), undo_depth);
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    #[test]
    fn undo_inverts_each_mutation_in_sequence() {
        let mut store = loaded_store();
        let before = store.tasks().to_vec();

        let a = store.add(draft("A")).unwrap();
        store.add(draft("B")).unwrap();
        let mut edited = store.get(&a).unwrap().clone();
        edited.summary = "A edited".to_string();
        store.update(&a, edited).unwrap();
        store.delete(&a);

        for _ in 0..4 {
            assert!(store.undo());
        }
        assert_eq!(store.tasks(), before.as_slice());
        assert!(!store.can_undo());
    }

    #[test]
    fn redo_round_trips_after_undo() {
        let mut store = loaded_store();
        store.add(draft("A")).unwrap();
        store.add(draft("B")).unwrap();
        let after = store.tasks().to_vec();

        assert!(store.undo());
        assert!(store.undo());
        assert!(store.redo());
        assert!(store.redo());
        assert_eq!(store.tasks(), after.as_slice());
        assert!(!store.can_redo());
    }

    #[test]
    fn mutation_after_undo_discards_redo_history() {
        let mut store = loaded_store();
        store.add(draft("A")).unwrap();
        store.add(draft("B")).unwrap();
        store.undo();
        assert!(store.can_redo());

        store.add(draft("C")).unwrap();
        assert!(!store.can_redo());
        assert!(!store.redo());
    }

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut store = loaded_store();
        assert!(!store.undo());
        assert!(!store.redo());
    }

    #[test]
    fn rejected_mutations_leave_history_untouched() {
        let mut store = loaded_store();
        store.add(draft("A")).unwrap();
        store.undo();
        assert!(store.can_redo());

        // A rejected add must not clear the redo stack
        assert!(store.add(draft("")).is_err());
        assert!(store.can_redo());
    }

    #[test]
    fn history_is_capped() {
        let mut store = loaded_store();
        for i in 0..=UNDO_STACK_LIMIT {
            store.add(draft(&format!("task {i}"))).unwrap();
        }
        assert_eq!(store.undo_stack.len(), UNDO_STACK_LIMIT);
    }

    // -----------------------------------------------------------------------
    // Load gating
    // -----------------------------------------------------------------------

    #[test]
    fn new_store_is_not_loaded() {
        assert!(!TaskStore::new().is_loaded());
    }

    #[test]
    fn load_marks_loaded_and_keeps_history() {
        let mut store = TaskStore::new();
        store.load(sample_tasks());
        assert!(store.is_loaded());
        assert_eq!(store.tasks().len(), 2);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn sample_tasks_match_defaults() {
        let tasks = sample_tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].priority, Priority::UrgentImportant);
        assert_eq!(tasks[0].status, Status::Todo);
        assert!(!tasks[0].remark.is_empty());
        assert_eq!(tasks[1].priority, Priority::Important);
        assert_eq!(tasks[1].status, Status::InProgress);
        assert_eq!(tasks[1].assignee, "Li Hua");
        assert!(tasks.iter().all(|t| t.completed_at.is_none()));
    }
}
