//! In-process task board state.
//!
//! [`Board`] owns the collections loaded from a [`RecordStore`] and keeps them
//! in step with the store after every awaited call. A failed call leaves the
//! local collections exactly as they were, so the caller can report the error
//! and keep showing consistent data.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use taskflow::api::MemoryStore;
//! use taskflow::libs::board::Board;
//! use taskflow::libs::task::TaskPatch;
//! use taskflow::libs::view_model::TaskQuery;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut board = Board::new(MemoryStore::seeded());
//! board.load().await?;
//! let task = board.add_task(&TaskPatch::new("Review PR")).await?;
//! board.toggle_task(task.id).await?;
//! let rows = board.view(&TaskQuery::default(), Local::now().naive_local());
//! # Ok(())
//! # }
//! ```

use crate::api::RecordStore;
use crate::libs::error::{RecordKind, StoreError, StoreResult};
use crate::libs::task::{Category, CategoryPatch, Project, ProjectPatch, Task, TaskPatch};
use crate::libs::view_model::{derive, DisplayTask, TaskQuery, TaskStats};
use chrono::NaiveDateTime;

#[derive(Debug)]
pub struct Board<S: RecordStore> {
    store: S,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    categories: Vec<Category>,
}

impl<S: RecordStore> Board<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            projects: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// False when the backing store forgets every change on exit.
    pub fn persists(&self) -> bool {
        self.store.persists()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Fetches every collection. Nothing is replaced unless all three loads succeed.
    pub async fn load(&mut self) -> StoreResult<()> {
        let tasks = self.store.list_tasks().await?;
        let projects = self.store.list_projects().await?;
        let categories = self.store.list_categories().await?;

        tracing::debug!(tasks = tasks.len(), projects = projects.len(), categories = categories.len(), "board loaded");

        self.tasks = tasks;
        self.projects = projects;
        self.categories = categories;
        Ok(())
    }

    pub fn task(&self, id: i32) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Task, id))
    }

    pub fn project(&self, id: i32) -> StoreResult<&Project> {
        self.projects
            .iter()
            .find(|project| project.id == id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Project, id))
    }

    pub fn category(&self, id: i32) -> StoreResult<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Category, id))
    }

    /// Creates a task and puts it at the front of the local list.
    pub async fn add_task(&mut self, patch: &TaskPatch) -> StoreResult<Task> {
        patch.validate_new()?;
        let task = self.store.create_task(patch).await?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    pub async fn update_task(&mut self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        let task = self.store.update_task(id, patch).await?;
        replace_by(&mut self.tasks, task.clone(), |t| t.id == id);
        Ok(task)
    }

    /// Flips completion using a patch that carries only `completed`.
    pub async fn toggle_task(&mut self, id: i32) -> StoreResult<Task> {
        let completed = !self.task(id)?.completed;
        self.update_task(id, &TaskPatch::completed(completed)).await
    }

    pub async fn delete_task(&mut self, id: i32) -> StoreResult<bool> {
        let deleted = self.store.delete_task(id).await?;
        self.tasks.retain(|task| task.id != id);
        Ok(deleted)
    }

    pub async fn add_project(&mut self, patch: &ProjectPatch) -> StoreResult<Project> {
        patch.validate_new()?;
        let project = self.store.create_project(patch).await?;
        self.projects.push(project.clone());
        Ok(project)
    }

    pub async fn update_project(&mut self, id: i32, patch: &ProjectPatch) -> StoreResult<Project> {
        let project = self.store.update_project(id, patch).await?;
        replace_by(&mut self.projects, project.clone(), |p| p.id == id);
        Ok(project)
    }

    /// Tasks keep their `project_id`; the view simply stops resolving it.
    pub async fn delete_project(&mut self, id: i32) -> StoreResult<bool> {
        let deleted = self.store.delete_project(id).await?;
        self.projects.retain(|project| project.id != id);
        Ok(deleted)
    }

    pub async fn add_category(&mut self, patch: &CategoryPatch) -> StoreResult<Category> {
        patch.validate_new()?;
        let category = self.store.create_category(patch).await?;
        self.categories.push(category.clone());
        Ok(category)
    }

    pub async fn update_category(&mut self, id: i32, patch: &CategoryPatch) -> StoreResult<Category> {
        let category = self.store.update_category(id, patch).await?;
        replace_by(&mut self.categories, category.clone(), |c| c.id == id);
        Ok(category)
    }

    pub async fn delete_category(&mut self, id: i32) -> StoreResult<bool> {
        let deleted = self.store.delete_category(id).await?;
        self.categories.retain(|category| category.id != id);
        Ok(deleted)
    }

    /// The display list for `query` over the current local state.
    pub fn view(&self, query: &TaskQuery, now: NaiveDateTime) -> Vec<DisplayTask<'_>> {
        derive(&self.tasks, &self.projects, query, now)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::of(&self.tasks)
    }
}

/// Swaps the first element matching `pred` for `value`; appends when absent.
fn replace_by<T>(items: &mut Vec<T>, value: T, pred: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|item| pred(item)) {
        Some(slot) => *slot = value,
        None => items.push(value),
    }
}
