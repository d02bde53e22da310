use crate::libs::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color assigned to projects and categories created without one.
pub const DEFAULT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight: high sorts before medium before low.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
    /// Label copied from a category name; not a foreign key.
    pub category: String,
    /// May point at a project that no longer exists.
    pub project_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial task update. `None` fields are left untouched by the store.
///
/// The optional slots `due_date` and `project_id` nest one level deeper:
/// `Some(None)` clears the stored value, `Some(Some(_))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub category: Option<String>,
    pub project_id: Option<Option<i32>>,
}

impl TaskPatch {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A new task needs a non-blank title.
    pub fn validate_new(&self) -> StoreResult<()> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(StoreError::Validation("Task title is required".to_string())),
        }
    }

    /// An update may omit the title but must not blank it.
    pub fn validate_update(&self) -> StoreResult<()> {
        match self.title.as_deref() {
            Some(title) if title.trim().is_empty() => Err(StoreError::Validation("Task title cannot be empty".to_string())),
            _ => Ok(()),
        }
    }
}

impl From<&Task> for TaskPatch {
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            due_date: Some(task.due_date),
            priority: Some(task.priority),
            completed: Some(task.completed),
            category: Some(task.category.clone()),
            project_id: Some(task.project_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl ProjectPatch {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn validate_new(&self) -> StoreResult<()> {
        require_name(self.name.as_deref(), "Project")
    }

    pub fn validate_update(&self) -> StoreResult<()> {
        forbid_blank_name(self.name.as_deref(), "Project")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn validate_new(&self) -> StoreResult<()> {
        require_name(self.name.as_deref(), "Category")
    }

    pub fn validate_update(&self) -> StoreResult<()> {
        forbid_blank_name(self.name.as_deref(), "Category")
    }
}

fn require_name(name: Option<&str>, what: &str) -> StoreResult<()> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(StoreError::Validation(format!("{} name is required", what))),
    }
}

fn forbid_blank_name(name: Option<&str>, what: &str) -> StoreResult<()> {
    match name {
        Some(name) if name.trim().is_empty() => Err(StoreError::Validation(format!("{} name cannot be empty", what))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" low "), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(TaskPatch::new("   ").validate_new().is_err());
        assert!(TaskPatch::default().validate_new().is_err());
        assert!(TaskPatch::new("Write docs").validate_new().is_ok());
    }

    #[test]
    fn clearing_fields_is_a_change() {
        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate_update().is_ok());
    }

    #[test]
    fn update_without_title_is_valid() {
        assert!(TaskPatch::completed(true).validate_update().is_ok());
        assert!(TaskPatch::new("").validate_update().is_err());
    }
}
