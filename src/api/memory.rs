//! In-memory record store.
//!
//! Keeps storage-shaped records in plain vectors behind a `parking_lot`
//! mutex and runs them through the same field mapper as the remote store, so
//! both backends agree on defaults and patch semantics. Every operation takes
//! the lock, finishes, and releases it before returning; nothing is held
//! across an `.await`.
//!
//! [`MemoryStore::with_fixtures`] seeds a small demo data set with due dates
//! spread around the current day, which is what the CLI uses when no remote
//! backend is configured.

use super::mapper::{self, CategoryRecord, CategoryRecordPatch, ProjectRecord, ProjectRecordPatch, StorageRecord, TaskRecord, TaskRecordPatch};
use super::RecordStore;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::task::{Category, CategoryPatch, Priority, Project, ProjectPatch, Task, TaskPatch};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use parking_lot::Mutex;

/// One storage table with id allocation.
#[derive(Debug, Clone)]
struct Table<R> {
    rows: Vec<R>,
    next_id: i32,
}

impl<R: StorageRecord> Table<R> {
    fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    fn list(&self) -> Vec<R> {
        self.rows.clone()
    }

    fn get(&self, id: i32) -> StoreResult<R> {
        self.rows
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    fn insert(&mut self, patch: &R::Patch, now: DateTime<Utc>) -> R {
        let record = R::create(self.next_id, patch, now);
        self.next_id += 1;
        self.rows.push(record.clone());
        record
    }

    fn update(&mut self, id: i32, patch: &R::Patch, now: DateTime<Utc>) -> StoreResult<R> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        row.merge(patch, now);
        Ok(row.clone())
    }

    fn remove(&mut self, id: i32) -> StoreResult<bool> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        self.rows.remove(index);
        Ok(true)
    }
}

#[derive(Debug)]
struct Tables {
    tasks: Table<TaskRecord>,
    projects: Table<ProjectRecord>,
    categories: Table<CategoryRecord>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                tasks: Table::new(),
                projects: Table::new(),
                categories: Table::new(),
            }),
        }
    }

    /// A store seeded with demo projects, categories and tasks whose due dates
    /// are placed relative to `today`.
    pub fn with_fixtures(today: NaiveDate) -> Self {
        let store = Self::new();
        let now = Utc::now();
        {
            let mut tables = store.tables.lock();

            for (name, description, color) in [
                ("Website Redesign", "Refresh the marketing site", "#6366f1"),
                ("Mobile App", "Native client for iOS and Android", "#10b981"),
                ("Q3 Planning", "Roadmap and budget for next quarter", "#f59e0b"),
            ] {
                let patch = ProjectRecordPatch {
                    name: Some(name.to_string()),
                    description: Some(description.to_string()),
                    color: Some(color.to_string()),
                };
                tables.projects.insert(&patch, now);
            }

            for (name, color) in [("Work", "#3b82f6"), ("Personal", "#ec4899"), ("Learning", "#8b5cf6"), ("Health", "#22c55e")] {
                let patch = CategoryRecordPatch {
                    name: Some(name.to_string()),
                    color: Some(color.to_string()),
                };
                tables.categories.insert(&patch, now);
            }

            let fixtures: [(&str, &str, Option<i64>, Priority, bool, &str, Option<i32>); 8] = [
                ("Design new landing page", "Hero section, pricing table and footer", Some(2), Priority::High, false, "Work", Some(1)),
                ("Fix login redirect", "Users land on a blank page after SSO", Some(-1), Priority::High, false, "Work", Some(2)),
                ("Write release notes", "", Some(0), Priority::Medium, false, "Work", Some(2)),
                ("Book dentist appointment", "", Some(1), Priority::Low, false, "Health", None),
                ("Read async Rust chapter", "Pinning and wakers", None, Priority::Medium, false, "Learning", None),
                ("Draft quarterly budget", "Collect estimates from team leads", Some(7), Priority::Medium, false, "Work", Some(3)),
                ("Renew gym membership", "", Some(-3), Priority::Low, true, "Personal", None),
                ("Set up CI pipeline", "Build, lint and test on every push", Some(-5), Priority::High, true, "Work", Some(2)),
            ];

            for (offset, (title, description, due_in, priority, completed, category, project_id)) in fixtures.into_iter().enumerate() {
                let task = TaskPatch {
                    title: Some(title.to_string()),
                    description: Some(description.to_string()),
                    due_date: Some(due_in.map(|days| today + Duration::days(days))),
                    priority: Some(priority),
                    completed: Some(completed),
                    category: Some(category.to_string()),
                    project_id: Some(project_id),
                };
                // stagger creation so "created" sorting has something to order
                let created = now - Duration::hours(offset as i64 + 1);
                tables.tasks.insert(&mapper::write_task(&task), created);
            }
        }
        store
    }

    /// Fixture store anchored at the local calendar day.
    pub fn seeded() -> Self {
        Self::with_fixtures(Local::now().date_naive())
    }
}

impl RecordStore for MemoryStore {
    fn persists(&self) -> bool {
        false
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let now = Utc::now();
        let records = self.tables.lock().tasks.list();
        tracing::debug!(count = records.len(), "listed tasks from memory");
        Ok(records.into_iter().map(|record| mapper::read_task(record, now)).collect())
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        let record = self.tables.lock().tasks.get(id)?;
        Ok(mapper::read_task(record, Utc::now()))
    }

    async fn create_task(&self, patch: &TaskPatch) -> StoreResult<Task> {
        patch.validate_new()?;
        let now = Utc::now();
        let record = self.tables.lock().tasks.insert(&mapper::write_task(patch), now);
        tracing::debug!(id = record.id, "created task in memory");
        Ok(mapper::read_task(record, now))
    }

    async fn update_task(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        patch.validate_update()?;
        let now = Utc::now();
        let changes: TaskRecordPatch = mapper::write_task(patch);
        let record = self.tables.lock().tasks.update(id, &changes, now)?;
        tracing::debug!(id, "updated task in memory");
        Ok(mapper::read_task(record, now))
    }

    async fn delete_task(&self, id: i32) -> StoreResult<bool> {
        let deleted = self.tables.lock().tasks.remove(id)?;
        tracing::debug!(id, "deleted task from memory");
        Ok(deleted)
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let now = Utc::now();
        let mut records = self.tables.lock().projects.list();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records.into_iter().map(|record| mapper::read_project(record, now)).collect())
    }

    async fn get_project(&self, id: i32) -> StoreResult<Project> {
        let record = self.tables.lock().projects.get(id)?;
        Ok(mapper::read_project(record, Utc::now()))
    }

    async fn create_project(&self, patch: &ProjectPatch) -> StoreResult<Project> {
        patch.validate_new()?;
        let now = Utc::now();
        let record = self.tables.lock().projects.insert(&mapper::write_project(patch), now);
        Ok(mapper::read_project(record, now))
    }

    async fn update_project(&self, id: i32, patch: &ProjectPatch) -> StoreResult<Project> {
        patch.validate_update()?;
        let now = Utc::now();
        let record = self.tables.lock().projects.update(id, &mapper::write_project(patch), now)?;
        Ok(mapper::read_project(record, now))
    }

    async fn delete_project(&self, id: i32) -> StoreResult<bool> {
        // tasks pointing at this project are left alone
        self.tables.lock().projects.remove(id)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut records = self.tables.lock().categories.list();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records.into_iter().map(mapper::read_category).collect())
    }

    async fn get_category(&self, id: i32) -> StoreResult<Category> {
        let record = self.tables.lock().categories.get(id)?;
        Ok(mapper::read_category(record))
    }

    async fn create_category(&self, patch: &CategoryPatch) -> StoreResult<Category> {
        patch.validate_new()?;
        let record = self.tables.lock().categories.insert(&mapper::write_category(patch), Utc::now());
        Ok(mapper::read_category(record))
    }

    async fn update_category(&self, id: i32, patch: &CategoryPatch) -> StoreResult<Category> {
        patch.validate_update()?;
        let record = self.tables.lock().categories.update(id, &mapper::write_category(patch), Utc::now())?;
        Ok(mapper::read_category(record))
    }

    async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        self.tables.lock().categories.remove(id)
    }
}
