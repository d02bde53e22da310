//! Display-list derivation for tasks.
//!
//! Turns the raw task collection plus the user's filter, search text and sort
//! key into the ordered list the terminal renders. The pipeline is fixed:
//! status filter, then search, then a stable sort, then enrichment with the
//! date status and the resolved project. Everything here is pure; callers pass
//! the reference instant explicitly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use taskflow::libs::view_model::{derive, SortKey, StatusFilter, TaskQuery};
//!
//! # use taskflow::libs::task::{Project, Task};
//! # let (tasks, projects): (Vec<Task>, Vec<Project>) = (vec![], vec![]);
//! let query = TaskQuery::new(StatusFilter::Pending, "report", SortKey::Priority);
//! let rows = derive(&tasks, &projects, &query, Local::now().naive_local());
//! ```

use crate::libs::date_status::DateStatus;
use crate::libs::messages::Message;
use crate::libs::task::{Project, Task};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Completion-state filter applied before search and sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Overdue,
}

impl StatusFilter {
    pub fn matches(&self, task: &Task, now: NaiveDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::Overdue => !task.completed && DateStatus::classify(task.due_date, now) == DateStatus::Overdue,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Earliest due date first, undated tasks last.
    #[default]
    DueDate,
    /// High, then medium, then low.
    Priority,
    /// Most recently created first.
    Created,
}

impl SortKey {
    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => b.priority.weight().cmp(&a.priority.weight()),
            Self::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DueDate => "due-date",
            Self::Priority => "priority",
            Self::Created => "created",
        };
        write!(f, "{}", label)
    }
}

/// Transient view state chosen by the user. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub filter: StatusFilter,
    pub search: String,
    pub sort: SortKey,
}

impl TaskQuery {
    pub fn new(filter: StatusFilter, search: &str, sort: SortKey) -> Self {
        Self {
            filter,
            search: search.to_string(),
            sort,
        }
    }

    /// Message shown when the derived list comes back empty.
    pub fn empty_state(&self) -> Message {
        if !self.search.is_empty() {
            Message::NoMatchingTasks
        } else if self.filter == StatusFilter::All {
            Message::NoTasksYet
        } else {
            Message::NoFilteredTasks(self.filter.to_string())
        }
    }
}

/// A task ready for rendering, with its derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayTask<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub date_status: DateStatus,
    pub project: Option<&'a Project>,
}

/// Computes the ordered display list.
///
/// Never mutates `tasks` or `projects`; equal sort keys keep their input order.
pub fn derive<'a>(tasks: &'a [Task], projects: &'a [Project], query: &TaskQuery, now: NaiveDateTime) -> Vec<DisplayTask<'a>> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| query.filter.matches(task, now))
        .filter(|task| matches_search(task, &needle))
        .collect();

    // sort_by is stable
    visible.sort_by(|a, b| query.sort.compare(a, b));

    visible.into_iter().map(|task| enrich(task, projects, now)).collect()
}

/// Attaches the date status and the project, if it still exists.
pub fn enrich<'a>(task: &'a Task, projects: &'a [Project], now: NaiveDateTime) -> DisplayTask<'a> {
    DisplayTask {
        task,
        date_status: DateStatus::classify(task.due_date, now),
        project: task.project_id.and_then(|id| projects.iter().find(|project| project.id == id)),
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    needle.is_empty() || task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

/// Header counters: every task, and the ones not yet completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            pending: tasks.iter().filter(|task| !task.completed).count(),
        }
    }
}
