use super::{note_unsaved, open_board, store_failure};
use crate::{
    api::{mapper::parse_due_date, Store},
    libs::{
        board::Board,
        config::Config,
        messages::Message,
        task::{Priority, TaskPatch},
        view::View,
        view_model::{enrich, SortKey, StatusFilter, TaskQuery},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, filtered, searched and sorted
    List {
        /// Status filter; defaults to the configured view
        #[arg(short, long, value_enum)]
        filter: Option<StatusFilter>,
        /// Sort order; defaults to the configured view
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Case-insensitive text matched against title and description
        #[arg(short, long)]
        search: Option<String>,
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Show {
        /// Task ID
        id: i32,
    },
    /// Create a new task
    Add {
        /// Task title
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Change fields of an existing task
    Edit {
        /// Task ID
        id: i32,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        no_due: bool,
        /// Detach the task from its project
        #[arg(long, conflicts_with = "project")]
        no_project: bool,
    },
    /// Mark a task as completed
    Done {
        /// Task ID
        id: i32,
    },
    /// Mark a completed task as pending again
    Reopen {
        /// Task ID
        id: i32,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Optional task fields shared by `add` and `edit`.
#[derive(Debug, Args)]
struct TaskFields {
    #[arg(short, long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long, value_parser = due_date_arg)]
    due: Option<NaiveDate>,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
    /// Category label
    #[arg(short, long)]
    category: Option<String>,
    /// Project ID
    #[arg(long)]
    project: Option<i32>,
}

impl TaskFields {
    fn into_patch(self, title: Option<String>) -> TaskPatch {
        TaskPatch {
            title,
            description: self.description,
            due_date: self.due.map(Some),
            priority: self.priority,
            completed: None,
            category: self.category,
            project_id: self.project.map(Some),
        }
    }
}

fn due_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_due_date(value).ok_or_else(|| Message::InvalidDueDate(value.to_string()).to_string())
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let config = Config::load()?;
    let mut board = open_board(&config).await?;

    match args.command {
        TaskCommand::List {
            filter,
            sort,
            search,
            json,
        } => {
            let defaults = config.default_query();
            let query = TaskQuery::new(
                filter.unwrap_or(defaults.filter),
                search.as_deref().unwrap_or(""),
                sort.unwrap_or(defaults.sort),
            );
            handle_list(&board, &query, json)
        }
        TaskCommand::Show { id } => handle_show(&board, id),
        TaskCommand::Add { title, fields } => handle_add(&mut board, fields.into_patch(Some(title))).await,
        TaskCommand::Edit {
            id,
            title,
            fields,
            no_due,
            no_project,
        } => {
            let mut patch = fields.into_patch(title);
            if no_due {
                patch.due_date = Some(None);
            }
            if no_project {
                patch.project_id = Some(None);
            }
            handle_edit(&mut board, id, patch).await
        }
        TaskCommand::Done { id } => handle_set_completed(&mut board, id, true).await,
        TaskCommand::Reopen { id } => handle_set_completed(&mut board, id, false).await,
        TaskCommand::Delete { id, yes } => handle_delete(&mut board, id, yes).await,
    }
}

fn handle_list(board: &Board<Store>, query: &TaskQuery, json: bool) -> Result<()> {
    let rows = board.view(query, Local::now().naive_local());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let stats = board.stats();
    msg_print!(
        Message::TaskSummary {
            total: stats.total,
            pending: stats.pending,
        },
        true
    );

    if rows.is_empty() {
        msg_info!(query.empty_state());
        msg_print!(if query.search.is_empty() {
            Message::CreateFirstTask
        } else {
            Message::TryDifferentSearch
        });
        return Ok(());
    }

    View::tasks(&rows)
}

fn handle_show(board: &Board<Store>, id: i32) -> Result<()> {
    let task = board.task(id)?;
    let row = enrich(task, board.projects(), Local::now().naive_local());

    msg_print!(Message::TaskDetailsHeader(id), true);
    View::task(&row)
}

async fn handle_add(board: &mut Board<Store>, patch: TaskPatch) -> Result<()> {
    let task = board.add_task(&patch).await.map_err(|err| store_failure(err, Message::TaskSaveFailed))?;
    msg_success!(Message::TaskCreated(task.title));
    note_unsaved(board);
    Ok(())
}

async fn handle_edit(board: &mut Board<Store>, id: i32, patch: TaskPatch) -> Result<()> {
    if patch.is_empty() {
        msg_info!(Message::NoChangesProvided);
        return Ok(());
    }

    let task = board.update_task(id, &patch).await.map_err(|err| store_failure(err, Message::TaskSaveFailed))?;
    msg_success!(Message::TaskUpdated(task.title));
    note_unsaved(board);
    Ok(())
}

async fn handle_set_completed(board: &mut Board<Store>, id: i32, completed: bool) -> Result<()> {
    let task = board.task(id)?;
    if task.completed == completed {
        msg_info!(if completed {
            Message::TaskAlreadyCompleted(task.title.clone())
        } else {
            Message::TaskAlreadyPending(task.title.clone())
        });
        return Ok(());
    }

    let task = board.toggle_task(id).await.map_err(|err| store_failure(err, Message::TaskSaveFailed))?;
    if task.completed {
        msg_success!(Message::TaskCompleted(task.title));
    } else {
        msg_success!(Message::TaskReopened(task.title));
    }
    note_unsaved(board);
    Ok(())
}

async fn handle_delete(board: &mut Board<Store>, id: i32, yes: bool) -> Result<()> {
    let title = board.task(id)?.title.clone();

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(title).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    board
        .delete_task(id)
        .await
        .map_err(|err| store_failure(err, Message::TaskDeleteFailed))?;
    msg_success!(Message::TaskDeleted(id));
    note_unsaved(board);
    Ok(())
}
