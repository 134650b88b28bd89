//! Output formatting for the CLI.

use crate::dates::{persian_digits, to_jalali};
use crate::types::{FlatSubtask, MainTask, Subtask, TaskReport};

/// Output format for list-shaped results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "table" | "markdown" | "md" => Some(OutputFormat::Table),
            _ => None,
        }
    }
}

fn done_mark(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Format a single task as markdown.
pub fn format_task_markdown(task: &MainTask) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Task: {}\n", task.title));
    md.push_str(&format!("- **id**: `{}`\n", task.id));
    md.push_str(&format!(
        "- **state**: {}\n",
        if task.done { "done" } else { "pending" }
    ));

    if let Some(status) = task.status {
        md.push_str(&format!("- **status**: {}\n", status.as_str()));
    }

    if !task.letter_number.is_empty() {
        md.push_str(&format!("- **letter**: {}\n", task.letter_number));
    }
    if task.letter_date.is_some() {
        md.push_str(&format!(
            "- **letter date**: {}\n",
            to_jalali(task.letter_date.as_deref())
        ));
    }
    if task.due_date.is_some() {
        md.push_str(&format!(
            "- **due**: {}\n",
            to_jalali(task.due_date.as_deref())
        ));
    }
    if !task.subtasks.is_empty() {
        md.push_str(&format!("- **subtasks**: {}\n", task.subtasks.len()));
    }

    if !task.description.is_empty() {
        md.push_str("\n### Description\n");
        md.push_str(&task.description);
        md.push('\n');
    }

    md
}

/// Format a task list as one compact line per task.
pub fn format_tasks_markdown(tasks: &[&MainTask]) -> String {
    if tasks.is_empty() {
        return "No tasks.\n".to_string();
    }

    let mut md = String::new();
    for task in tasks {
        let mut line = format!("- {} `{}` {}", done_mark(task.done), task.id, task.title);
        if let Some(status) = task.status {
            line.push_str(&format!(" ({})", status.as_str()));
        }
        if task.due_date.is_some() {
            line.push_str(&format!(" - due {}", to_jalali(task.due_date.as_deref())));
        }
        md.push_str(&line);
        md.push('\n');
    }
    md
}

/// Format a subtask list as one compact line per subtask.
pub fn format_subtasks_markdown(subtasks: &[&Subtask]) -> String {
    if subtasks.is_empty() {
        return "No subtasks.\n".to_string();
    }

    let mut md = String::new();
    for subtask in subtasks {
        md.push_str(&format!(
            "- {} `{}` {} ({} تا {})\n",
            done_mark(subtask.done),
            subtask.id,
            subtask.title,
            to_jalali(subtask.start.as_deref()),
            to_jalali(subtask.finish.as_deref()),
        ));
    }
    md
}

/// Format the dashboard report as markdown. Counts are rendered with
/// Persian digits, matching the tracker's audience.
pub fn format_report_markdown(report: &TaskReport) -> String {
    let mut md = String::new();

    md.push_str("# گزارش وظایف\n\n");
    md.push_str(&format!(
        "- **کل وظایف**: {}\n",
        persian_digits(&report.total_tasks.to_string())
    ));
    md.push_str(&format!(
        "- **در انتظار**: {}\n",
        persian_digits(&report.pending_count.to_string())
    ));
    md.push_str(&format!(
        "- **انجام شده**: {}\n",
        persian_digits(&report.completed_count.to_string())
    ));
    md.push_str(&format!(
        "- **نرخ تکمیل**: {}%\n",
        persian_digits(&format!("{:.0}", report.completion_rate))
    ));
    md.push_str(&format!(
        "- **کل زیروظایف**: {} ({} انجام شده)\n",
        persian_digits(&report.total_subtasks.to_string()),
        persian_digits(&report.completed_subtasks.to_string()),
    ));

    if !report.overdue_tasks.is_empty() {
        md.push_str("\n## عقب‌افتاده\n");
        for task in &report.overdue_tasks {
            md.push_str(&format!(
                "- `{}` {} - due {}\n",
                task.id,
                task.title,
                to_jalali(task.due_date.as_deref())
            ));
        }
    }

    if !report.today_tasks.is_empty() {
        md.push_str("\n## امروز\n");
        for task in &report.today_tasks {
            md.push_str(&format!("- `{}` {}\n", task.id, task.title));
        }
    }

    if !report.overdue_subtasks.is_empty() {
        md.push_str("\n## زیروظایف عقب‌افتاده\n");
        for flat in &report.overdue_subtasks {
            md.push_str(&format!(
                "- `{}` {} (از: {})\n",
                flat.subtask.id, flat.subtask.title, flat.main_task_title
            ));
        }
    }

    md
}

fn format_flat_subtasks(flats: &[FlatSubtask]) -> String {
    let mut md = String::new();
    for flat in flats {
        md.push_str(&format!(
            "- {} `{}` {} (از: {})\n",
            done_mark(flat.subtask.done),
            flat.subtask.id,
            flat.subtask.title,
            flat.main_task_title
        ));
    }
    md
}

/// Cross-task subtask view for the report's flattened listing.
pub fn format_all_subtasks_markdown(report: &TaskReport) -> String {
    if report.all_subtasks.is_empty() {
        return "No subtasks.\n".to_string();
    }
    format_flat_subtasks(&report.all_subtasks)
}
