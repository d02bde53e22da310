//! Core library modules for the taskflow application.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging, errors
//! - **Domain**: Tasks, projects and categories with their partial updates
//! - **Derivation**: Due date classification and the filtered, sorted task list
//! - **Presentation**: Board state and console rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use taskflow::api::MemoryStore;
//! use taskflow::libs::board::Board;
//! use taskflow::libs::view_model::TaskQuery;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut board = Board::new(MemoryStore::seeded());
//! board.load().await?;
//! let rows = board.view(&TaskQuery::default(), Local::now().naive_local());
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod config;
pub mod data_storage;
pub mod date_status;
pub mod error;
pub mod messages;
pub mod task;
pub mod view;
pub mod view_model;
