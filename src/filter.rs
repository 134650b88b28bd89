//! Pure derivation of visible subsets from the cache.
//!
//! Filtering borrows from the task collection, preserves its order, and
//! never mutates it. Sorting operates on a copy of an already-filtered
//! sequence.

use crate::dates::epoch_ms;
use crate::types::{MainTask, Subtask, TaskStatus};

/// Done-state filter, parsed from the wire strings `""`, `"done"`,
/// `"pending"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoneFilter {
    #[default]
    All,
    Done,
    Pending,
}

impl DoneFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "" | "all" => Some(DoneFilter::All),
            "done" => Some(DoneFilter::Done),
            "pending" => Some(DoneFilter::Pending),
            _ => None,
        }
    }

    fn matches(&self, done: bool) -> bool {
        match self {
            DoneFilter::All => true,
            DoneFilter::Done => done,
            DoneFilter::Pending => !done,
        }
    }
}

/// Predicate set for the task list.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    /// Case-insensitive substring against title or description.
    pub search: String,
    pub done: DoneFilter,
    pub status: Option<TaskStatus>,
}

/// Predicate set for a subtask collection. Search matches titles only.
#[derive(Debug, Clone, Default)]
pub struct SubtaskFilters {
    pub search: String,
    pub done: DoneFilter,
}

/// A task is visible iff every predicate passes.
pub fn filter_tasks<'a>(tasks: &'a [MainTask], filters: &TaskFilters) -> Vec<&'a MainTask> {
    let needle = filters.search.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            let matches_search = needle.is_empty()
                || task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle);

            let matches_done = filters.done.matches(task.done);

            let matches_status = filters
                .status
                .is_none_or(|status| task.status == Some(status));

            matches_search && matches_done && matches_status
        })
        .collect()
}

pub fn filter_subtasks<'a>(
    subtasks: &'a [Subtask],
    filters: &SubtaskFilters,
) -> Vec<&'a Subtask> {
    let needle = filters.search.to_lowercase();
    subtasks
        .iter()
        .filter(|subtask| {
            let matches_search = needle.is_empty() || subtask.title.to_lowercase().contains(&needle);
            matches_search && filters.done.matches(subtask.done)
        })
        .collect()
}

/// Column to sort a table view by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    LetterDate,
    DueDate,
    CreatedAt,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "title" => Some(SortKey::Title),
            "letter_date" | "letter-date" => Some(SortKey::LetterDate),
            "due_date" | "due-date" => Some(SortKey::DueDate),
            "created_at" | "created-at" => Some(SortKey::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Sort a copy of a filtered sequence by the chosen column. Strings
/// compare case-folded; date columns compare by epoch millisecond with
/// absent or unparseable values as 0.
pub fn sort_tasks<'a>(tasks: &[&'a MainTask], key: SortKey, order: SortOrder) -> Vec<&'a MainTask> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        let ord = match key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::LetterDate => {
                epoch_ms(a.letter_date.as_deref()).cmp(&epoch_ms(b.letter_date.as_deref()))
            }
            SortKey::DueDate => {
                epoch_ms(a.due_date.as_deref()).cmp(&epoch_ms(b.due_date.as_deref()))
            }
            SortKey::CreatedAt => {
                epoch_ms(Some(&a.created_at)).cmp(&epoch_ms(Some(&b.created_at)))
            }
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str, done: bool) -> MainTask {
        MainTask {
            id,
            title: title.to_string(),
            description: String::new(),
            done,
            letter_number: String::new(),
            letter_date: None,
            due_date: None,
            status: None,
            subtasks: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn done_filter_parses_wire_strings() {
        assert_eq!(DoneFilter::from_str(""), Some(DoneFilter::All));
        assert_eq!(DoneFilter::from_str("done"), Some(DoneFilter::Done));
        assert_eq!(DoneFilter::from_str("pending"), Some(DoneFilter::Pending));
        assert_eq!(DoneFilter::from_str("finished"), None);
    }

    #[test]
    fn search_matches_description_too() {
        let mut a = task(1, "buy stamps", false);
        a.description = "for the letter archive".to_string();
        let b = task(2, "call back", false);
        let tasks = vec![a, b];

        let filters = TaskFilters {
            search: "ARCHIVE".to_string(),
            ..TaskFilters::default()
        };
        let visible = filter_tasks(&tasks, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn sorting_puts_absent_dates_first_ascending() {
        let mut a = task(1, "a", false);
        a.due_date = Some("2024-05-01T12:00:00Z".to_string());
        let b = task(2, "b", false);
        let tasks = vec![a, b];
        let refs: Vec<&MainTask> = tasks.iter().collect();

        let sorted = sort_tasks(&refs, SortKey::DueDate, SortOrder::Asc);
        assert_eq!(sorted[0].id, 2); // no date sorts as epoch 0
        assert_eq!(sorted[1].id, 1);
    }
}
