//! Core types for the AtlasTask client.

use serde::{Deserialize, Serialize};

/// Task status category.
///
/// Wire values are the Persian labels the service stores and returns;
/// `from_str` also accepts the English names for CLI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "پیگیری")]
    FollowUp,
    #[serde(rename = "اقدام")]
    Action,
    #[serde(rename = "یادآوری")]
    Reminder,
}

impl TaskStatus {
    /// The wire label, as the service emits it.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::FollowUp => "پیگیری",
            TaskStatus::Action => "اقدام",
            TaskStatus::Reminder => "یادآوری",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "پیگیری" | "follow-up" | "followup" => Some(TaskStatus::FollowUp),
            "اقدام" | "action" => Some(TaskStatus::Action),
            "یادآوری" | "reminder" => Some(TaskStatus::Reminder),
            _ => None,
        }
    }
}

/// A top-level task (the service calls these main tasks).
///
/// All timestamps are ISO-8601 instant strings and are kept opaque here;
/// they are parsed only at filter/sort/display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub letter_number: String,
    #[serde(default)]
    pub letter_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Not every service build carries this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A child task. `main_task_id` is a lookup reference to the owning
/// task, not an ownership handle; subtasks are deleted by their own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    pub main_task_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    /// Start of the working range. Wire name is camelCase.
    #[serde(default, rename = "startSubtask")]
    pub start: Option<String>,
    /// End of the working range, the subtask's deadline.
    #[serde(default, rename = "finishSubtask")]
    pub finish: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Input for creating a task. Only `title` is required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMainTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Partial task update. Omitted fields are not sent; the server's
/// response is the authoritative post-update entity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMainTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl UpdateMainTask {
    /// Update that flips only the done flag.
    pub fn set_done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}

/// Input for creating a subtask. The working range is required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSubtask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(rename = "startSubtask")]
    pub start: String,
    #[serde(rename = "finishSubtask")]
    pub finish: String,
}

/// Partial subtask update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSubtask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(rename = "startSubtask", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "finishSubtask", skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

impl UpdateSubtask {
    pub fn set_done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}

/// A subtask flattened out of its owning task for cross-task views,
/// annotated with the owner for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatSubtask {
    #[serde(flatten)]
    pub subtask: Subtask,
    pub main_task_title: String,
}

/// Aggregate statistics over the current task collection.
///
/// Always recomputed in full from a cache snapshot; see `report`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskReport {
    pub total_tasks: usize,
    pub pending_count: usize,
    pub completed_count: usize,
    /// Percentage, 0.0 when there are no tasks.
    pub completion_rate: f64,
    pub overdue_tasks: Vec<MainTask>,
    pub today_tasks: Vec<MainTask>,
    pub total_subtasks: usize,
    pub pending_subtasks: usize,
    pub completed_subtasks: usize,
    pub subtask_completion_rate: f64,
    pub all_subtasks: Vec<FlatSubtask>,
    pub overdue_subtasks: Vec<FlatSubtask>,
    pub today_subtasks: Vec<FlatSubtask>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_label() {
        let json = serde_json::to_string(&TaskStatus::FollowUp).unwrap();
        assert_eq!(json, "\"پیگیری\"");

        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskStatus::FollowUp);
    }

    #[test]
    fn status_from_str_accepts_english_aliases() {
        assert_eq!(TaskStatus::from_str("action"), Some(TaskStatus::Action));
        assert_eq!(TaskStatus::from_str("follow-up"), Some(TaskStatus::FollowUp));
        assert_eq!(TaskStatus::from_str("reminder"), Some(TaskStatus::Reminder));
        assert_eq!(TaskStatus::from_str("bogus"), None);
    }

    #[test]
    fn subtask_range_uses_camel_case_wire_names() {
        let subtask: Subtask = serde_json::from_str(
            r#"{
                "id": 7,
                "main_task_id": 3,
                "title": "draft",
                "done": false,
                "startSubtask": "2024-05-01T03:30:00Z",
                "finishSubtask": "2024-05-03T03:30:00Z",
                "created_at": "2024-05-01T08:00:00Z",
                "updated_at": "2024-05-01T08:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(subtask.start.as_deref(), Some("2024-05-01T03:30:00Z"));
        assert_eq!(subtask.finish.as_deref(), Some("2024-05-03T03:30:00Z"));

        let json = serde_json::to_value(&subtask).unwrap();
        assert!(json.get("startSubtask").is_some());
        assert!(json.get("start").is_none());
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        // A minimal payload from an older service build: no status, no dates.
        let task: MainTask =
            serde_json::from_str(r#"{"id": 1, "title": "x", "done": false}"#).unwrap();

        assert_eq!(task.id, 1);
        assert!(task.status.is_none());
        assert!(task.due_date.is_none());
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = UpdateMainTask::set_done(true);
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json.get("done"), Some(&serde_json::Value::Bool(true)));
        assert!(json.get("title").is_none());
        assert!(json.get("due_date").is_none());
    }
}
