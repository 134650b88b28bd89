//! In-memory entity cache.
//!
//! The store mirrors server-held state for the lifetime of a session.
//! Every write goes through an explicit mutation so the reconciliation
//! rules live in one place: entities always come from the server's
//! response, ids are never synthesized locally, and a failed request
//! never reaches the store at all.

use crate::types::{MainTask, Subtask};
use tracing::debug;

/// A committed change to the task collection.
#[derive(Debug, Clone)]
pub enum TaskMutation {
    /// Wholesale replacement from a full list fetch.
    Loaded(Vec<MainTask>),
    /// Server-confirmed creation; inserted at the front (newest first).
    Created(MainTask),
    /// Server-confirmed update; replaces in place, position preserved.
    Updated(MainTask),
    /// Server-confirmed deletion by id; no-op when absent.
    Deleted(i64),
}

/// A committed change to the scoped subtask collection.
#[derive(Debug, Clone)]
pub enum SubtaskMutation {
    Loaded {
        main_task_id: i64,
        subtasks: Vec<Subtask>,
    },
    Created(Subtask),
    Updated(Subtask),
    Deleted(i64),
}

/// Client-side mirror of the task collection, plus the subtask list of
/// one task at a time (the panel the UI has open).
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<MainTask>,
    subtasks: Vec<Subtask>,
    subtask_scope: Option<i64>,
    loading: bool,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current task collection, newest first.
    pub fn tasks(&self) -> &[MainTask] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&MainTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The scoped subtask collection. Empty unless a subtask list has
    /// been loaded for some task.
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Which task the scoped subtask collection belongs to.
    pub fn subtask_scope(&self) -> Option<i64> {
        self.subtask_scope
    }

    /// Whether a full list fetch is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Count of tasks not yet done, recomputed from the collection on
    /// every call.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    /// Count of done tasks, recomputed from the collection on every call.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn apply(&mut self, mutation: TaskMutation) {
        match mutation {
            TaskMutation::Loaded(tasks) => {
                debug!(count = tasks.len(), "task cache replaced");
                self.tasks = tasks;
            }
            TaskMutation::Created(task) => {
                debug!(id = task.id, "task created");
                self.upsert_task(task);
            }
            TaskMutation::Updated(task) => {
                debug!(id = task.id, "task updated");
                self.upsert_task(task);
            }
            TaskMutation::Deleted(id) => {
                debug!(id, "task deleted");
                self.tasks.retain(|t| t.id != id);
            }
        }
    }

    pub fn apply_subtask(&mut self, mutation: SubtaskMutation) {
        match mutation {
            SubtaskMutation::Loaded {
                main_task_id,
                subtasks,
            } => {
                debug!(main_task_id, count = subtasks.len(), "subtask cache replaced");
                self.subtask_scope = Some(main_task_id);
                self.subtasks = subtasks;
            }
            SubtaskMutation::Created(subtask) => {
                debug!(id = subtask.id, "subtask created");
                self.upsert_subtask(subtask);
            }
            SubtaskMutation::Updated(subtask) => {
                debug!(id = subtask.id, "subtask updated");
                self.upsert_subtask(subtask);
            }
            SubtaskMutation::Deleted(id) => {
                debug!(id, "subtask deleted");
                self.subtasks.retain(|s| s.id != id);
            }
        }
    }

    /// Replace the entry with a matching id in place; insert at the
    /// front when absent.
    fn upsert_task(&mut self, task: MainTask) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.insert(0, task),
        }
    }

    fn upsert_subtask(&mut self, subtask: Subtask) {
        match self.subtasks.iter_mut().find(|s| s.id == subtask.id) {
            Some(slot) => *slot = subtask,
            None => self.subtasks.insert(0, subtask),
        }
    }
}
