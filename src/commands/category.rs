use super::{note_unsaved, open_board, store_failure};
use crate::{
    api::Store,
    libs::{board::Board, config::Config, messages::Message, task::CategoryPatch, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List all categories
    List,
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Display color, e.g. #f59e0b
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit a category; prompts for every field when no flag is given
    Edit {
        /// Category ID
        id: i32,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category. Task labels are not changed.
    Delete {
        /// Category ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: CategoryArgs) -> Result<()> {
    let config = Config::load()?;
    let mut board = open_board(&config).await?;

    match args.command {
        CategoryCommand::List => handle_list(&board),
        CategoryCommand::Add { name, color } => {
            let patch = CategoryPatch { name: Some(name), color };
            handle_add(&mut board, patch).await
        }
        CategoryCommand::Edit { id, name, color } => handle_edit(&mut board, id, CategoryPatch { name, color }).await,
        CategoryCommand::Delete { id, yes } => handle_delete(&mut board, id, yes).await,
    }
}

fn handle_list(board: &Board<Store>) -> Result<()> {
    if board.categories().is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(board.categories())
}

async fn handle_add(board: &mut Board<Store>, patch: CategoryPatch) -> Result<()> {
    let category = board
        .add_category(&patch)
        .await
        .map_err(|err| store_failure(err, Message::RecordSaveFailed))?;
    msg_success!(Message::CategoryCreated(category.name));
    note_unsaved(board);
    Ok(())
}

async fn handle_edit(board: &mut Board<Store>, id: i32, patch: CategoryPatch) -> Result<()> {
    let patch = if patch == CategoryPatch::default() {
        let category = board.category(id)?;
        msg_print!(Message::EditingRecord(category.name.clone()), true);

        let name = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptName.to_string())
            .default(category.name.clone())
            .interact_text()?;
        let color = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptColor.to_string())
            .default(category.color.clone())
            .interact_text()?;

        CategoryPatch {
            name: Some(name),
            color: Some(color),
        }
    } else {
        patch
    };

    let category = board
        .update_category(id, &patch)
        .await
        .map_err(|err| store_failure(err, Message::RecordSaveFailed))?;
    msg_success!(Message::CategoryUpdated(category.name));
    note_unsaved(board);
    Ok(())
}

async fn handle_delete(board: &mut Board<Store>, id: i32, yes: bool) -> Result<()> {
    let name = board.category(id)?.name.clone();

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(name).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    board
        .delete_category(id)
        .await
        .map_err(|err| store_failure(err, Message::RecordDeleteFailed))?;
    msg_success!(Message::CategoryDeleted(id));
    note_unsaved(board);
    Ok(())
}
