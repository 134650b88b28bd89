//! Aggregate statistics over the task collection.
//!
//! Everything here is recomputed in full from a cache snapshot at the
//! moment of the call. There are no incremental counters and no captured
//! pre-mutation references, so the aggregates cannot drift from the
//! collection they describe.

use crate::dates::{parse_instant, same_display_day};
use crate::store::TaskStore;
use crate::types::{FlatSubtask, MainTask, TaskReport};
use chrono::{DateTime, Utc};

/// Build the full report from a task snapshot. `now` is injected so the
/// overdue and today buckets are deterministic under test.
pub fn build_report(tasks: &[MainTask], now: DateTime<Utc>) -> TaskReport {
    let total_tasks = tasks.len();
    let completed_count = tasks.iter().filter(|t| t.done).count();
    let pending_count = total_tasks - completed_count;

    let completion_rate = if total_tasks > 0 {
        completed_count as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    let overdue_tasks: Vec<MainTask> = tasks
        .iter()
        .filter(|t| !t.done && is_overdue(t.due_date.as_deref(), now))
        .cloned()
        .collect();

    let today_tasks: Vec<MainTask> = tasks
        .iter()
        .filter(|t| !t.done && is_today(t.due_date.as_deref(), now))
        .cloned()
        .collect();

    let all_subtasks: Vec<FlatSubtask> = tasks
        .iter()
        .flat_map(|t| {
            t.subtasks.iter().map(|s| FlatSubtask {
                subtask: s.clone(),
                main_task_title: t.title.clone(),
            })
        })
        .collect();

    let total_subtasks = all_subtasks.len();
    let completed_subtasks = all_subtasks.iter().filter(|s| s.subtask.done).count();
    let pending_subtasks = total_subtasks - completed_subtasks;

    let subtask_completion_rate = if total_subtasks > 0 {
        completed_subtasks as f64 / total_subtasks as f64 * 100.0
    } else {
        0.0
    };

    // Subtask buckets key on the end of the working range, the
    // subtask's deadline.
    let overdue_subtasks: Vec<FlatSubtask> = all_subtasks
        .iter()
        .filter(|s| !s.subtask.done && is_overdue(s.subtask.finish.as_deref(), now))
        .cloned()
        .collect();

    let today_subtasks: Vec<FlatSubtask> = all_subtasks
        .iter()
        .filter(|s| !s.subtask.done && is_today(s.subtask.finish.as_deref(), now))
        .cloned()
        .collect();

    TaskReport {
        total_tasks,
        pending_count,
        completed_count,
        completion_rate,
        overdue_tasks,
        today_tasks,
        total_subtasks,
        pending_subtasks,
        completed_subtasks,
        subtask_completion_rate,
        all_subtasks,
        overdue_subtasks,
        today_subtasks,
    }
}

/// A deadline counts as overdue when it parses to a valid instant
/// strictly before `now`. Absent or unparseable dates never do.
fn is_overdue(date: Option<&str>, now: DateTime<Utc>) -> bool {
    date.and_then(parse_instant).is_some_and(|due| due < now)
}

/// A deadline counts as today when its calendar day in the display
/// timezone equals today's.
fn is_today(date: Option<&str>, now: DateTime<Utc>) -> bool {
    date.and_then(parse_instant)
        .is_some_and(|due| same_display_day(due, now))
}

impl TaskStore {
    /// Report over the store's current snapshot.
    pub fn report(&self, now: DateTime<Utc>) -> TaskReport {
        build_report(self.tasks(), now)
    }
}
