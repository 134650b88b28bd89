//! AtlasTask command-line client.
//!
//! Thin presentation layer over the synchronization core: each command
//! maps to one service call (plus a list fetch where a view needs the
//! collection), then renders the result.

use anyhow::{Result, anyhow};
use atlas_task::api::{HttpTaskApi, TaskApi};
use atlas_task::cli::{
    Cli, Command, CreateArgs, ExportArgs, ListArgs, SubtaskAddArgs, SubtaskCommand,
    SubtaskListArgs, SubtaskUpdateArgs, UpdateArgs, normalize_date_arg,
};
use atlas_task::config::ClientConfig;
use atlas_task::filter::{
    DoneFilter, SortKey, SortOrder, SubtaskFilters, TaskFilters, filter_subtasks, filter_tasks,
    sort_tasks,
};
use atlas_task::format::{
    OutputFormat, format_all_subtasks_markdown, format_report_markdown,
    format_subtasks_markdown, format_task_markdown, format_tasks_markdown,
};
use atlas_task::service::TaskService;
use atlas_task::types::{CreateMainTask, CreateSubtask, TaskStatus, UpdateMainTask, UpdateSubtask};
use chrono::Utc;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::load()?;
    if let Some(url) = cli.url.clone() {
        config.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    let api = HttpTaskApi::new(config.base_url.clone(), config.timeout())?;
    let mut service = TaskService::new(api);

    match cli.command {
        Command::List(args) => cmd_list(&mut service, args).await,
        Command::Create(args) => cmd_create(&mut service, args).await,
        Command::Update(args) => cmd_update(&mut service, args).await,
        Command::Done { id } => cmd_toggle(&mut service, id, true).await,
        Command::Undone { id } => cmd_toggle(&mut service, id, false).await,
        Command::Delete { id } => {
            service.delete_task(id).await?;
            println!("Task {id} deleted.");
            Ok(())
        }
        Command::Subtask(command) => cmd_subtask(&mut service, command).await,
        Command::Report { subtasks } => cmd_report(&mut service, subtasks).await,
        Command::Export(args) => cmd_export(&mut service, args).await,
    }
}

/// Default level is warn; `-v` raises it to debug. `RUST_LOG` wins when
/// set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_status(raw: &str) -> Result<TaskStatus> {
    TaskStatus::from_str(raw)
        .ok_or_else(|| anyhow!("unknown status {raw:?}; expected follow-up, action, or reminder"))
}

fn parse_format(raw: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(raw).ok_or_else(|| anyhow!("unknown format {raw:?}"))
}

async fn cmd_list<A: TaskApi>(service: &mut TaskService<A>, args: ListArgs) -> Result<()> {
    service.load().await;

    let filters = TaskFilters {
        search: args.search,
        done: DoneFilter::from_str(&args.done)
            .ok_or_else(|| anyhow!("unknown done filter; expected all, done, or pending"))?,
        status: args.status.as_deref().map(parse_status).transpose()?,
    };

    let mut visible = filter_tasks(service.tasks(), &filters);

    if let Some(raw) = args.sort.as_deref() {
        let key =
            SortKey::from_str(raw).ok_or_else(|| anyhow!("unknown sort column {raw:?}"))?;
        let order = SortOrder::from_str(&args.order)
            .ok_or_else(|| anyhow!("unknown sort order; expected asc or desc"))?;
        visible = sort_tasks(&visible, key, order);
    }

    match parse_format(&args.format)? {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visible)?),
        OutputFormat::Table => print!("{}", format_tasks_markdown(&visible)),
    }
    Ok(())
}

async fn cmd_create<A: TaskApi>(service: &mut TaskService<A>, args: CreateArgs) -> Result<()> {
    let input = CreateMainTask {
        title: args.title,
        description: args.description,
        done: None,
        letter_number: args.letter_number,
        letter_date: args
            .letter_date
            .as_deref()
            .map(|raw| normalize_date_arg("letter_date", raw))
            .transpose()?,
        due_date: args
            .due_date
            .as_deref()
            .map(|raw| normalize_date_arg("due_date", raw))
            .transpose()?,
        status: args.status.as_deref().map(parse_status).transpose()?,
    };

    let created = service.create_task(input).await?;
    print!("{}", format_task_markdown(&created));
    Ok(())
}

async fn cmd_update<A: TaskApi>(service: &mut TaskService<A>, args: UpdateArgs) -> Result<()> {
    let input = UpdateMainTask {
        title: args.title,
        description: args.description,
        done: args.done,
        letter_number: args.letter_number,
        letter_date: args
            .letter_date
            .as_deref()
            .map(|raw| normalize_date_arg("letter_date", raw))
            .transpose()?,
        due_date: args
            .due_date
            .as_deref()
            .map(|raw| normalize_date_arg("due_date", raw))
            .transpose()?,
        status: args.status.as_deref().map(parse_status).transpose()?,
    };

    let updated = service.update_task(args.id, input).await?;
    print!("{}", format_task_markdown(&updated));
    Ok(())
}

async fn cmd_toggle<A: TaskApi>(service: &mut TaskService<A>, id: i64, done: bool) -> Result<()> {
    let updated = service.toggle_task_done(id, done).await?;
    println!(
        "Task {} is now {}.",
        updated.id,
        if updated.done { "done" } else { "pending" }
    );
    Ok(())
}

async fn cmd_subtask<A: TaskApi>(
    service: &mut TaskService<A>,
    command: SubtaskCommand,
) -> Result<()> {
    match command {
        SubtaskCommand::List(args) => cmd_subtask_list(service, args).await,
        SubtaskCommand::Add(args) => cmd_subtask_add(service, args).await,
        SubtaskCommand::Update(args) => cmd_subtask_update(service, args).await,
        SubtaskCommand::Done { id } => cmd_subtask_toggle(service, id, true).await,
        SubtaskCommand::Undone { id } => cmd_subtask_toggle(service, id, false).await,
        SubtaskCommand::Delete { id } => {
            service.delete_subtask(id).await?;
            println!("Subtask {id} deleted.");
            Ok(())
        }
    }
}

async fn cmd_subtask_list<A: TaskApi>(
    service: &mut TaskService<A>,
    args: SubtaskListArgs,
) -> Result<()> {
    service.load_subtasks(args.task_id).await;

    let filters = SubtaskFilters {
        search: args.search,
        done: DoneFilter::from_str(&args.done)
            .ok_or_else(|| anyhow!("unknown done filter; expected all, done, or pending"))?,
    };
    let visible = filter_subtasks(service.subtasks(), &filters);

    match parse_format(&args.format)? {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visible)?),
        OutputFormat::Table => print!("{}", format_subtasks_markdown(&visible)),
    }
    Ok(())
}

async fn cmd_subtask_add<A: TaskApi>(
    service: &mut TaskService<A>,
    args: SubtaskAddArgs,
) -> Result<()> {
    let input = CreateSubtask {
        title: args.title,
        description: args.description,
        done: None,
        start: normalize_date_arg("startSubtask", &args.start)?,
        finish: normalize_date_arg("finishSubtask", &args.finish)?,
    };

    let created = service.create_subtask(args.task_id, input).await?;
    println!(
        "Subtask {} added to task {}.",
        created.id, created.main_task_id
    );
    Ok(())
}

async fn cmd_subtask_update<A: TaskApi>(
    service: &mut TaskService<A>,
    args: SubtaskUpdateArgs,
) -> Result<()> {
    let input = UpdateSubtask {
        title: args.title,
        description: args.description,
        done: args.done,
        start: args
            .start
            .as_deref()
            .map(|raw| normalize_date_arg("startSubtask", raw))
            .transpose()?,
        finish: args
            .finish
            .as_deref()
            .map(|raw| normalize_date_arg("finishSubtask", raw))
            .transpose()?,
    };

    let updated = service.update_subtask(args.id, input).await?;
    println!(
        "Subtask {} is now {}.",
        updated.id,
        if updated.done { "done" } else { "pending" }
    );
    Ok(())
}

async fn cmd_subtask_toggle<A: TaskApi>(
    service: &mut TaskService<A>,
    id: i64,
    done: bool,
) -> Result<()> {
    let updated = service.toggle_subtask_done(id, done).await?;
    println!(
        "Subtask {} is now {}.",
        updated.id,
        if updated.done { "done" } else { "pending" }
    );
    Ok(())
}

async fn cmd_report<A: TaskApi>(service: &mut TaskService<A>, subtasks: bool) -> Result<()> {
    service.load().await;
    let report = service.store().report(Utc::now());
    if subtasks {
        print!("{}", format_all_subtasks_markdown(&report));
    } else {
        print!("{}", format_report_markdown(&report));
    }
    Ok(())
}

async fn cmd_export<A: TaskApi>(service: &mut TaskService<A>, args: ExportArgs) -> Result<()> {
    service.load().await;
    let json = serde_json::to_string_pretty(service.tasks())?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)?;
            println!("Exported {} tasks to {}.", service.tasks().len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
