//! # Taskflow - Personal Task Tracking
//!
//! A command-line task manager with projects, categories, due dates and
//! priorities, backed by either a remote record service or an in-memory store.
//!
//! ## Features
//!
//! - **Task Management**: Create, edit, complete and delete tasks
//! - **Smart Listing**: Filter by status, search text and sort by due date,
//!   priority or creation time
//! - **Due Date Awareness**: Overdue, today and tomorrow highlighting
//! - **Projects and Categories**: Group and label tasks
//! - **Pluggable Storage**: Remote record service or in-process memory
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
