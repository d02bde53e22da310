//! Field mapping between canonical records and the storage shape.
//!
//! The record service stores tasks with snake_case columns (`due_date`,
//! `project_id`), a capitalised identity column (`Id`), a display column
//! (`Name`) and system timestamps (`CreatedOn`, `ModifiedOn`). The rest of the
//! crate only ever sees [`Task`], [`Project`] and [`Category`]; this module is
//! the single place where the two shapes meet.
//!
//! ## Read direction
//!
//! Every canonical field is taken from its storage column when present and
//! falls back to a fixed default otherwise:
//!
//! | canonical     | storage                 | default          |
//! |---------------|-------------------------|------------------|
//! | `title`       | `title`, then `Name`    | empty            |
//! | `description` | `description`           | empty            |
//! | `due_date`    | `due_date`              | none             |
//! | `priority`    | `priority`              | `medium`         |
//! | `completed`   | `completed`             | `false`          |
//! | `category`    | `category`              | empty            |
//! | `project_id`  | `project_id`            | none             |
//! | `created_at`  | `CreatedOn`             | reading instant  |
//! | `updated_at`  | `ModifiedOn`            | reading instant  |
//!
//! Unparseable due dates read as "no due date"; unknown priorities read as
//! `medium`.
//!
//! ## Write direction
//!
//! Only fields present in a patch are serialised, so an update never clobbers
//! stored values the caller did not mention. A cleared `due_date` or
//! `project_id` is sent as an explicit `null`.

use crate::libs::error::RecordKind;
use crate::libs::task::{Category, CategoryPatch, Priority, Project, ProjectPatch, Task, TaskPatch, DEFAULT_COLOR};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage-side record with identity, creation and merge semantics.
///
/// Both store implementations operate on these records, so patch merging
/// behaves the same whether the data lives in memory or behind the API.
pub trait StorageRecord: Clone {
    type Patch;

    const KIND: RecordKind;

    fn id(&self) -> i32;

    /// Builds a fresh record from a creation patch.
    fn create(id: i32, patch: &Self::Patch, now: DateTime<Utc>) -> Self;

    /// Applies the present fields of `patch` and bumps the modification stamp.
    fn merge(&mut self, patch: &Self::Patch, now: DateTime<Utc>);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i32>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(rename = "ModifiedOn", default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskRecordPatch {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Option<i32>>,
}

impl StorageRecord for TaskRecord {
    type Patch = TaskRecordPatch;

    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> i32 {
        self.id
    }

    fn create(id: i32, patch: &TaskRecordPatch, now: DateTime<Utc>) -> Self {
        let stamp = now.to_rfc3339();
        let mut record = TaskRecord {
            id,
            completed: Some(false),
            created_on: Some(stamp.clone()),
            modified_on: Some(stamp),
            ..Default::default()
        };
        record.apply(patch);
        record
    }

    fn merge(&mut self, patch: &TaskRecordPatch, now: DateTime<Utc>) {
        self.apply(patch);
        self.modified_on = Some(bump(self.modified_on.as_deref(), now));
    }
}

impl TaskRecord {
    fn apply(&mut self, patch: &TaskRecordPatch) {
        overlay(&mut self.name, &patch.name);
        overlay(&mut self.title, &patch.title);
        overlay(&mut self.description, &patch.description);
        overlay_or_clear(&mut self.due_date, &patch.due_date);
        overlay(&mut self.priority, &patch.priority);
        overlay(&mut self.completed, &patch.completed);
        overlay(&mut self.category, &patch.category);
        overlay_or_clear(&mut self.project_id, &patch.project_id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectRecordPatch {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StorageRecord for ProjectRecord {
    type Patch = ProjectRecordPatch;

    const KIND: RecordKind = RecordKind::Project;

    fn id(&self) -> i32 {
        self.id
    }

    fn create(id: i32, patch: &ProjectRecordPatch, now: DateTime<Utc>) -> Self {
        let mut record = ProjectRecord {
            id,
            created_on: Some(now.to_rfc3339()),
            ..Default::default()
        };
        record.merge(patch, now);
        record
    }

    fn merge(&mut self, patch: &ProjectRecordPatch, _now: DateTime<Utc>) {
        overlay(&mut self.name, &patch.name);
        overlay(&mut self.description, &patch.description);
        overlay(&mut self.color, &patch.color);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryRecordPatch {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StorageRecord for CategoryRecord {
    type Patch = CategoryRecordPatch;

    const KIND: RecordKind = RecordKind::Category;

    fn id(&self) -> i32 {
        self.id
    }

    fn create(id: i32, patch: &CategoryRecordPatch, now: DateTime<Utc>) -> Self {
        let mut record = CategoryRecord { id, ..Default::default() };
        record.merge(patch, now);
        record
    }

    fn merge(&mut self, patch: &CategoryRecordPatch, _now: DateTime<Utc>) {
        overlay(&mut self.name, &patch.name);
        overlay(&mut self.color, &patch.color);
    }
}

/// Storage record → canonical task. `now` stands in for missing timestamps.
pub fn read_task(record: TaskRecord, now: DateTime<Utc>) -> Task {
    let title = record.title.filter(|title| !title.is_empty()).or(record.name).unwrap_or_default();
    let created_at = parse_timestamp(record.created_on.as_deref()).unwrap_or(now);
    let updated_at = parse_timestamp(record.modified_on.as_deref()).unwrap_or(now).max(created_at);

    Task {
        id: record.id,
        title,
        description: record.description.unwrap_or_default(),
        due_date: record.due_date.as_deref().and_then(parse_due_date),
        priority: record.priority.as_deref().and_then(Priority::parse).unwrap_or_default(),
        completed: record.completed.unwrap_or(false),
        category: record.category.unwrap_or_default(),
        project_id: record.project_id,
        created_at,
        updated_at,
    }
}

/// Canonical patch → storage patch. A title is mirrored into `Name`.
pub fn write_task(patch: &TaskPatch) -> TaskRecordPatch {
    TaskRecordPatch {
        name: patch.title.clone(),
        title: patch.title.clone(),
        description: patch.description.clone(),
        due_date: patch.due_date.map(|due| due.map(|date| date.format(DATE_FORMAT).to_string())),
        priority: patch.priority.map(|priority| priority.as_str().to_string()),
        completed: patch.completed,
        category: patch.category.clone(),
        project_id: patch.project_id,
    }
}

pub fn read_project(record: ProjectRecord, now: DateTime<Utc>) -> Project {
    Project {
        id: record.id,
        name: record.name.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        color: record.color.filter(|color| !color.is_empty()).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        created_at: parse_timestamp(record.created_on.as_deref()).unwrap_or(now),
    }
}

pub fn write_project(patch: &ProjectPatch) -> ProjectRecordPatch {
    ProjectRecordPatch {
        name: patch.name.clone(),
        description: patch.description.clone(),
        color: patch.color.clone(),
    }
}

pub fn read_category(record: CategoryRecord) -> Category {
    Category {
        id: record.id,
        name: record.name.unwrap_or_default(),
        color: record.color.filter(|color| !color.is_empty()).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    }
}

pub fn write_category(patch: &CategoryPatch) -> CategoryRecordPatch {
    CategoryRecordPatch {
        name: patch.name.clone(),
        color: patch.color.clone(),
    }
}

/// Accepts `2024-05-01`, full RFC 3339 stamps and naive date-times; anything
/// else reads as no due date.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|stamp| stamp.date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|stamp| stamp.date()))
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
}

/// Next modification stamp: never earlier than the previous one.
fn bump(previous: Option<&str>, now: DateTime<Utc>) -> String {
    parse_timestamp(previous).map_or(now, |previous| previous.max(now)).to_rfc3339()
}

fn overlay<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

/// Like [`overlay`], but `Some(None)` empties the slot.
fn overlay_or_clear<T: Clone>(slot: &mut Option<T>, value: &Option<Option<T>>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Lookup columns arrive as a number, a numeric string, an empty string or a
/// `{ "Id": .., "Name": .. }` object depending on the backend.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

fn id_from_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(text) => text.trim().parse().ok(),
        Value::Object(map) => map.get("Id").and_then(id_from_value),
        _ => None,
    }
}
