//! Error taxonomy for the record store boundary.
//!
//! Classification and view-model derivation are total and never fail, so every
//! error in the library originates here: either a request was rejected before
//! reaching the store, referenced a record that does not exist, or the backend
//! itself failed.

use std::fmt;
use thiserror::Error;

/// Kind of record an operation targeted, used to make `NotFound` errors readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Task,
    Project,
    Category,
}

impl RecordKind {
    /// Table name used by the remote record API.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Task => "Task",
            Self::Project => "Project",
            Self::Category => "Category",
        };
        write!(f, "{}", label)
    }
}

/// Failure raised by a [`RecordStore`](crate::api::RecordStore) operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or empty. Raised before the store is contacted.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation referenced an id the store does not know.
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: RecordKind, id: i32 },

    /// Transport, protocol or storage fault in the backend.
    #[error("Record store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(kind: RecordKind, id: i32) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Backend(format!("malformed record payload: {}", err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
