//! CLI command definitions.
//!
//! Command structure only; dispatch lives in `main.rs`. Date arguments
//! accept either a Jalali `yyyy/mm/dd` date or an RFC 3339 instant and
//! are normalized to RFC 3339 before anything is sent.

use crate::dates;
use crate::error::{ApiError, ApiResult};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the AtlasTask service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service base URL (overrides config file and environment)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks with optional filters
    List(ListArgs),

    /// Create a new task
    Create(CreateArgs),

    /// Update fields of an existing task
    Update(UpdateArgs),

    /// Mark a task done
    Done {
        id: i64,
    },

    /// Mark a task pending again
    Undone {
        id: i64,
    },

    /// Delete a task
    Delete {
        id: i64,
    },

    /// Operate on a task's subtasks
    #[command(subcommand)]
    Subtask(SubtaskCommand),

    /// Show the dashboard report
    Report {
        /// List every subtask across all tasks instead of the summary
        #[arg(long)]
        subtasks: bool,
    },

    /// Export the full task collection as JSON
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Substring to search in title and description
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Done-state filter: all, done, or pending
    #[arg(short, long, default_value = "")]
    pub done: String,

    /// Status filter: follow-up, action, or reminder
    #[arg(long)]
    pub status: Option<String>,

    /// Sort column: title, letter_date, due_date, created_at
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc or desc
    #[arg(long, default_value = "asc")]
    pub order: String,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Task title
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Reference letter number
    #[arg(long)]
    pub letter_number: Option<String>,

    /// Letter date (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub letter_date: Option<String>,

    /// Due date (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Status: follow-up, action, or reminder
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub letter_number: Option<String>,

    /// Letter date (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub letter_date: Option<String>,

    /// Due date (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Status: follow-up, action, or reminder
    #[arg(long)]
    pub status: Option<String>,

    /// Done state
    #[arg(long)]
    pub done: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum SubtaskCommand {
    /// List the subtasks of a task
    List(SubtaskListArgs),

    /// Add a subtask to a task
    Add(SubtaskAddArgs),

    /// Update fields of a subtask
    Update(SubtaskUpdateArgs),

    /// Mark a subtask done
    Done {
        id: i64,
    },

    /// Mark a subtask pending again
    Undone {
        id: i64,
    },

    /// Delete a subtask
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct SubtaskListArgs {
    /// Owning task id
    pub task_id: i64,

    /// Substring to search in titles
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Done-state filter: all, done, or pending
    #[arg(short, long, default_value = "")]
    pub done: String,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct SubtaskAddArgs {
    /// Owning task id
    pub task_id: i64,

    /// Subtask title
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Range start (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub start: String,

    /// Range end, the deadline (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub finish: String,
}

#[derive(Args, Debug)]
pub struct SubtaskUpdateArgs {
    /// Subtask id
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Range start (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (Jalali yyyy/mm/dd or RFC 3339)
    #[arg(long)]
    pub finish: Option<String>,

    /// Done state
    #[arg(long)]
    pub done: Option<bool>,
}

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Normalize a user-supplied date to RFC 3339. Accepts an RFC 3339
/// instant as-is or converts a Jalali `yyyy/mm/dd` date.
pub fn normalize_date_arg(field: &str, raw: &str) -> ApiResult<String> {
    if dates::parse_instant(raw).is_some() {
        return Ok(raw.to_string());
    }
    dates::jalali_to_iso(raw).ok_or_else(|| {
        ApiError::invalid_value(field, "expected Jalali yyyy/mm/dd or an RFC 3339 instant")
    })
}
