use super::{note_unsaved, open_board, store_failure};
use crate::{
    api::Store,
    libs::{board::Board, config::Config, messages::Message, task::ProjectPatch, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// List all projects
    List,
    /// Create a new project
    Add {
        /// Project name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Display color, e.g. #10b981
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit a project; prompts for every field when no flag is given
    Edit {
        /// Project ID
        id: i32,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a project. Its tasks are kept.
    Delete {
        /// Project ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: ProjectArgs) -> Result<()> {
    let config = Config::load()?;
    let mut board = open_board(&config).await?;

    match args.command {
        ProjectCommand::List => handle_list(&board),
        ProjectCommand::Add {
            name,
            description,
            color,
        } => {
            let patch = ProjectPatch {
                name: Some(name),
                description,
                color,
            };
            handle_add(&mut board, patch).await
        }
        ProjectCommand::Edit {
            id,
            name,
            description,
            color,
        } => {
            let patch = ProjectPatch { name, description, color };
            handle_edit(&mut board, id, patch).await
        }
        ProjectCommand::Delete { id, yes } => handle_delete(&mut board, id, yes).await,
    }
}

fn handle_list(board: &Board<Store>) -> Result<()> {
    if board.projects().is_empty() {
        msg_info!(Message::NoProjectsFound);
        return Ok(());
    }

    msg_print!(Message::ProjectsHeader, true);
    View::projects(board.projects(), board.tasks())
}

async fn handle_add(board: &mut Board<Store>, patch: ProjectPatch) -> Result<()> {
    let project = board.add_project(&patch).await.map_err(|err| store_failure(err, Message::RecordSaveFailed))?;
    msg_success!(Message::ProjectCreated(project.name));
    note_unsaved(board);
    Ok(())
}

async fn handle_edit(board: &mut Board<Store>, id: i32, patch: ProjectPatch) -> Result<()> {
    let patch = if patch == ProjectPatch::default() {
        prompt_project(board, id)?
    } else {
        patch
    };

    let project = board.update_project(id, &patch).await.map_err(|err| store_failure(err, Message::RecordSaveFailed))?;
    msg_success!(Message::ProjectUpdated(project.name));
    note_unsaved(board);
    Ok(())
}

fn prompt_project(board: &Board<Store>, id: i32) -> Result<ProjectPatch> {
    let project = board.project(id)?;

    msg_print!(Message::EditingRecord(project.name.clone()), true);

    let name = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptName.to_string())
        .default(project.name.clone())
        .interact_text()?;
    let description = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptDescription.to_string())
        .default(project.description.clone())
        .allow_empty(true)
        .interact_text()?;
    let color = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptColor.to_string())
        .default(project.color.clone())
        .interact_text()?;

    Ok(ProjectPatch {
        name: Some(name),
        description: Some(description),
        color: Some(color),
    })
}

async fn handle_delete(board: &mut Board<Store>, id: i32, yes: bool) -> Result<()> {
    let project = board.project(id)?;
    let task_count = board.tasks().iter().filter(|task| task.project_id == Some(id)).count();

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteProject(project.name.clone(), task_count).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    board.delete_project(id).await.map_err(|err| store_failure(err, Message::RecordDeleteFailed))?;
    msg_success!(Message::ProjectDeleted(id));
    note_unsaved(board);
    Ok(())
}
