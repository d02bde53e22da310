pub mod category;
pub mod init;
pub mod project;
pub mod task;

use crate::api::Store;
use crate::libs::{board::Board, config::Config, error::StoreError, messages::Message};
use crate::{msg_debug, msg_error_anyhow, msg_info};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Manage projects", arg_required_else_help = true)]
    Project(project::ProjectArgs),
    #[command(about = "Manage categories", arg_required_else_help = true)]
    Category(category::CategoryArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Project(args) => project::cmd(args).await,
            Commands::Category(args) => category::cmd(args).await,
        }
    }
}

/// Builds the configured store and loads every collection into a board.
pub(crate) async fn open_board(config: &Config) -> Result<Board<Store>> {
    let store = Store::from_config(config)?;
    msg_debug!(Message::UsingBackend(config.backend().to_string()));

    let mut board = Board::new(store);
    board
        .load()
        .await
        .map_err(|err| msg_error_anyhow!(Message::DataLoadFailed(err.to_string())))?;
    Ok(board)
}

/// Reminds the user after a mutation that the memory store keeps nothing.
pub(crate) fn note_unsaved(board: &Board<Store>) {
    if !board.persists() {
        msg_info!(Message::ChangesNotPersisted);
    }
}

/// Passes `NotFound` through unchanged and wraps any other failure with `wrap`.
pub(crate) fn store_failure(err: StoreError, wrap: fn(String) -> Message) -> anyhow::Error {
    if err.is_not_found() {
        err.into()
    } else {
        msg_error_anyhow!(wrap(err.to_string()))
    }
}
