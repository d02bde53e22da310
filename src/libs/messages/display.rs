//! Display implementation for taskflow messages.
//!
//! Single source of truth for user-facing text. Parameterised variants format
//! their arguments here so call sites never build strings by hand:
//!
//! ```rust
//! use taskflow::libs::messages::Message;
//!
//! assert_eq!(Message::TaskCreated("Ship it".into()).to_string(), "Task 'Ship it' created");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskCompleted(title) => format!("Task '{}' completed!", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskAlreadyCompleted(title) => format!("Task '{}' is already completed", title),
            Message::TaskAlreadyPending(title) => format!("Task '{}' is not completed", title),
            Message::TaskSummary { total, pending } => format!("{} total tasks • {} pending", total, pending),
            Message::TaskDetailsHeader(id) => format!("Task #{}", id),
            Message::NoMatchingTasks => "No matching tasks".to_string(),
            Message::NoTasksYet => "No tasks yet".to_string(),
            Message::NoFilteredTasks(filter) => format!("No {} tasks", filter),
            Message::TryDifferentSearch => "Try a different search term".to_string(),
            Message::CreateFirstTask => "Create your first task with `taskflow task add <TITLE>`".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::NoChangesProvided => "Nothing to change: pass at least one field to update".to_string(),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD", value),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name) => format!("Project '{}' created", name),
            Message::ProjectUpdated(name) => format!("Project '{}' updated", name),
            Message::ProjectDeleted(id) => format!("Project {} deleted", id),
            Message::ProjectsHeader => "Projects:".to_string(),
            Message::NoProjectsFound => "No projects found".to_string(),
            Message::ConfirmDeleteProject(name, 0) => format!("Delete project '{}'?", name),
            Message::ConfirmDeleteProject(name, count) => {
                format!("Delete project '{}'? {} task(s) will keep pointing at it", name, count)
            }

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated", name),
            Message::CategoryDeleted(id) => format!("Category {} deleted", id),
            Message::CategoriesHeader => "Categories:".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),

            // === STORE MESSAGES ===
            Message::DataLoadFailed(err) => format!("Failed to load data: {}", err),
            Message::TaskSaveFailed(err) => format!("Failed to save task: {}", err),
            Message::TaskDeleteFailed(err) => format!("Failed to delete task: {}", err),
            Message::RecordSaveFailed(err) => format!("Failed to save record: {}", err),
            Message::RecordDeleteFailed(err) => format!("Failed to delete record: {}", err),
            Message::RemoteNotConfigured => {
                "Remote store selected but api_url, project_id or public_key is missing. Run `taskflow init` or set TASKFLOW_API_URL, TASKFLOW_PROJECT_ID and TASKFLOW_PUBLIC_KEY".to_string()
            }
            Message::UsingBackend(backend) => format!("Using {} record store", backend),
            Message::ChangesNotPersisted => {
                "The memory store starts from demo data on every run, so this change is gone once the command exits. Run `taskflow init` to use the remote store".to_string()
            }

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleStore => "Record store settings".to_string(),
            Message::ConfigModuleRemote => "Remote record service settings".to_string(),
            Message::ConfigModuleView => "Task list defaults".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptBackend => "Where should tasks be stored?".to_string(),
            Message::PromptRemoteApiUrl => "Enter the record service API URL".to_string(),
            Message::PromptRemoteProjectId => "Enter the record service project ID".to_string(),
            Message::PromptRemotePublicKey => "Enter the record service public key".to_string(),
            Message::PromptDefaultFilter => "Default status filter".to_string(),
            Message::PromptDefaultSort => "Default sort order".to_string(),
            Message::PromptName => "Name".to_string(),
            Message::PromptDescription => "Description".to_string(),
            Message::PromptColor => "Color".to_string(),

            // === GENERAL ===
            Message::EditingRecord(name) => format!("Editing '{}'", name),
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
