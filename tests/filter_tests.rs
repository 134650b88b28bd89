//! Integration tests for the filter engine.

use atlas_task::filter::{
    DoneFilter, SortKey, SortOrder, SubtaskFilters, TaskFilters, filter_subtasks, filter_tasks,
    sort_tasks,
};
use atlas_task::types::{MainTask, Subtask, TaskStatus};

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

fn sample_tasks() -> Vec<MainTask> {
    let mut a = task(1, "Answer the ministry letter", false);
    a.description = "needs the reference number".to_string();
    a.status = Some(TaskStatus::Action);
    a.due_date = Some("2024-05-01T03:30:00Z".to_string());

    let mut b = task(2, "archive old files", true);
    b.status = Some(TaskStatus::FollowUp);
    b.created_at = "2024-04-01T08:00:00Z".to_string();

    let mut c = task(3, "Buy printer paper", false);
    c.status = Some(TaskStatus::Reminder);
    c.due_date = Some("2024-04-20T03:30:00Z".to_string());
    c.created_at = "2024-04-10T08:00:00Z".to_string();

    vec![a, b, c]
}

mod predicate_tests {
    use super::*;

    #[test]
    fn empty_filters_show_everything_in_order() {
        let tasks = sample_tasks();
        let visible = filter_tasks(&tasks, &TaskFilters::default());

        let ids: Vec<i64> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_on_title_and_description() {
        let tasks = sample_tasks();

        let by_title = filter_tasks(
            &tasks,
            &TaskFilters {
                search: "PRINTER".to_string(),
                ..TaskFilters::default()
            },
        );
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 3);

        let by_description = filter_tasks(
            &tasks,
            &TaskFilters {
                search: "reference".to_string(),
                ..TaskFilters::default()
            },
        );
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, 1);
    }

    #[test]
    fn done_and_status_predicates_compose_with_search() {
        let tasks = sample_tasks();

        let filters = TaskFilters {
            search: "a".to_string(), // matches all three titles
            done: DoneFilter::Pending,
            status: Some(TaskStatus::Reminder),
        };
        let visible = filter_tasks(&tasks, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn done_filter_splits_the_collection() {
        let tasks = sample_tasks();

        let done = filter_tasks(
            &tasks,
            &TaskFilters {
                done: DoneFilter::Done,
                ..TaskFilters::default()
            },
        );
        let pending = filter_tasks(
            &tasks,
            &TaskFilters {
                done: DoneFilter::Pending,
                ..TaskFilters::default()
            },
        );

        assert_eq!(done.len() + pending.len(), tasks.len());
        assert!(done.iter().all(|t| t.done));
        assert!(pending.iter().all(|t| !t.done));
    }

    #[test]
    fn filtering_is_pure_and_repeatable() {
        let tasks = sample_tasks();
        let before = tasks.clone();
        let filters = TaskFilters {
            search: "letter".to_string(),
            done: DoneFilter::Pending,
            status: None,
        };

        let first: Vec<MainTask> = filter_tasks(&tasks, &filters)
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<MainTask> = filter_tasks(&tasks, &filters)
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(first, second);
        assert_eq!(tasks, before); // the source collection is untouched
    }
}

mod subtask_filter_tests {
    use super::*;

    fn subtask(id: i64, title: &str, done: bool) -> Subtask {
        Subtask {
            id,
            main_task_id: 1,
            title: title.to_string(),
            description: String::new(),
            done,
            start: None,
            finish: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn search_matches_titles_only() {
        let mut with_description = subtask(1, "draft", false);
        with_description.description = "print the form".to_string();
        let subtasks = vec![with_description, subtask(2, "print labels", false)];

        let visible = filter_subtasks(
            &subtasks,
            &SubtaskFilters {
                search: "print".to_string(),
                ..SubtaskFilters::default()
            },
        );
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn done_filter_applies_independently_of_search() {
        let subtasks = vec![subtask(1, "draft", true), subtask(2, "send", false)];

        let visible = filter_subtasks(
            &subtasks,
            &SubtaskFilters {
                done: DoneFilter::Pending,
                ..SubtaskFilters::default()
            },
        );
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }
}

mod sort_tests {
    use super::*;

    #[test]
    fn title_sort_is_case_folded() {
        let tasks = sample_tasks();
        let refs: Vec<&MainTask> = tasks.iter().collect();

        let sorted = sort_tasks(&refs, SortKey::Title, SortOrder::Asc);
        let ids: Vec<i64> = sorted.iter().map(|t| t.id).collect();
        // "Answer", "archive", "Buy": capital letters do not win.
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn due_date_sort_descending_puts_missing_dates_last() {
        let tasks = sample_tasks();
        let refs: Vec<&MainTask> = tasks.iter().collect();

        let sorted = sort_tasks(&refs, SortKey::DueDate, SortOrder::Desc);
        let ids: Vec<i64> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 2]); // task 2 has no due date (epoch 0)
    }

    #[test]
    fn sorting_does_not_reorder_the_source() {
        let tasks = sample_tasks();
        let refs: Vec<&MainTask> = tasks.iter().collect();

        let _ = sort_tasks(&refs, SortKey::CreatedAt, SortOrder::Desc);

        let ids: Vec<i64> = refs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
