//! Record store abstraction and its backends.
//!
//! Everything the application knows about persistence goes through
//! [`RecordStore`]. Two implementations exist and are interchangeable:
//!
//! - **[`RemoteStore`]**: talks JSON over HTTP to a table-oriented record service
//! - **[`MemoryStore`]**: keeps records in process, optionally seeded with demo data
//!
//! Which one runs is decided by configuration through [`Store::from_config`],
//! never by global state. Both backends share the [`mapper`] that converts
//! between the canonical types and the storage record shape.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::api::{RecordStore, Store};
//! use taskflow::libs::config::Config;
//! use taskflow::libs::task::TaskPatch;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = Store::from_config(&Config::read()?)?;
//! let task = store.create_task(&TaskPatch::new("Ship release")).await?;
//! store.update_task(task.id, &TaskPatch::completed(true)).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::config::{Backend, Config};
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::libs::task::{Category, CategoryPatch, Project, ProjectPatch, Task, TaskPatch};
use crate::msg_error_anyhow;
use anyhow::Result;

pub mod mapper;
pub mod memory;
pub mod remote;

pub use memory::MemoryStore;
pub use remote::{RemoteConfig, RemoteStore};

/// Asynchronous CRUD over tasks, projects and categories.
///
/// Implementations validate patches before touching their backend, report an
/// unknown id as `NotFound`, and never retry a failed call. An awaited
/// mutation is visible to the next read.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Whether changes outlive the current process.
    fn persists(&self) -> bool {
        true
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    async fn get_task(&self, id: i32) -> StoreResult<Task>;

    /// The store assigns `id`, `created_at` and `updated_at`.
    async fn create_task(&self, patch: &TaskPatch) -> StoreResult<Task>;

    /// Merges the present fields of `patch` and bumps `updated_at`.
    async fn update_task(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task>;

    async fn delete_task(&self, id: i32) -> StoreResult<bool>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn get_project(&self, id: i32) -> StoreResult<Project>;

    async fn create_project(&self, patch: &ProjectPatch) -> StoreResult<Project>;

    async fn update_project(&self, id: i32, patch: &ProjectPatch) -> StoreResult<Project>;

    /// Tasks that reference the project are not touched.
    async fn delete_project(&self, id: i32) -> StoreResult<bool>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: i32) -> StoreResult<Category>;

    async fn create_category(&self, patch: &CategoryPatch) -> StoreResult<Category>;

    async fn update_category(&self, id: i32, patch: &CategoryPatch) -> StoreResult<Category>;

    async fn delete_category(&self, id: i32) -> StoreResult<bool>;
}

/// The backend selected by configuration.
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    Remote(RemoteStore),
}

impl Store {
    /// Builds the configured backend. A remote backend with incomplete
    /// settings is rejected here, before any request is made.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.backend() {
            Backend::Memory => {
                tracing::debug!("using in-memory record store");
                Ok(Store::Memory(MemoryStore::seeded()))
            }
            Backend::Remote => {
                let remote = config
                    .remote()
                    .filter(|remote| remote.is_complete())
                    .ok_or_else(|| msg_error_anyhow!(Message::RemoteNotConfigured))?;
                tracing::debug!(api_url = %remote.api_url, "using remote record store");
                Ok(Store::Remote(RemoteStore::new(remote)))
            }
        }
    }
}

macro_rules! dispatch {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match $self {
            Store::Memory(store) => store.$method($($arg),*).await,
            Store::Remote(store) => store.$method($($arg),*).await,
        }
    };
}

impl RecordStore for Store {
    fn persists(&self) -> bool {
        match self {
            Store::Memory(store) => store.persists(),
            Store::Remote(store) => store.persists(),
        }
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        dispatch!(self.list_tasks())
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        dispatch!(self.get_task(id))
    }

    async fn create_task(&self, patch: &TaskPatch) -> StoreResult<Task> {
        dispatch!(self.create_task(patch))
    }

    async fn update_task(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        dispatch!(self.update_task(id, patch))
    }

    async fn delete_task(&self, id: i32) -> StoreResult<bool> {
        dispatch!(self.delete_task(id))
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        dispatch!(self.list_projects())
    }

    async fn get_project(&self, id: i32) -> StoreResult<Project> {
        dispatch!(self.get_project(id))
    }

    async fn create_project(&self, patch: &ProjectPatch) -> StoreResult<Project> {
        dispatch!(self.create_project(patch))
    }

    async fn update_project(&self, id: i32, patch: &ProjectPatch) -> StoreResult<Project> {
        dispatch!(self.update_project(id, patch))
    }

    async fn delete_project(&self, id: i32) -> StoreResult<bool> {
        dispatch!(self.delete_project(id))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        dispatch!(self.list_categories())
    }

    async fn get_category(&self, id: i32) -> StoreResult<Category> {
        dispatch!(self.get_category(id))
    }

    async fn create_category(&self, patch: &CategoryPatch) -> StoreResult<Category> {
        dispatch!(self.create_category(patch))
    }

    async fn update_category(&self, id: i32, patch: &CategoryPatch) -> StoreResult<Category> {
        dispatch!(self.update_category(id, patch))
    }

    async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        dispatch!(self.delete_category(id))
    }
}
