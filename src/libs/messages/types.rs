/// Every user-facing message in the application.
///
/// Text lives in the `Display` implementation in `display.rs`; call sites only
/// pick a variant and supply its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(i32),
    TaskCompleted(String),
    TaskReopened(String),
    TaskAlreadyCompleted(String),
    TaskAlreadyPending(String),
    TaskSummary { total: usize, pending: usize },
    TaskDetailsHeader(i32),
    NoMatchingTasks,
    NoTasksYet,
    NoFilteredTasks(String), // filter label
    TryDifferentSearch,
    CreateFirstTask,
    ConfirmDeleteTask(String),
    NoChangesProvided,
    InvalidDueDate(String),

    // === PROJECT MESSAGES ===
    ProjectCreated(String),
    ProjectUpdated(String),
    ProjectDeleted(i32),
    ProjectsHeader,
    NoProjectsFound,
    ConfirmDeleteProject(String, usize), // name, tasks referencing it

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryUpdated(String),
    CategoryDeleted(i32),
    CategoriesHeader,
    NoCategoriesFound,
    ConfirmDeleteCategory(String),

    // === STORE MESSAGES ===
    DataLoadFailed(String),
    TaskSaveFailed(String),
    TaskDeleteFailed(String),
    RecordSaveFailed(String),
    RecordDeleteFailed(String),
    RemoteNotConfigured,
    UsingBackend(String),
    ChangesNotPersisted,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleStore,
    ConfigModuleRemote,
    ConfigModuleView,

    // === PROMPTS ===
    PromptSelectModules,
    PromptBackend,
    PromptRemoteApiUrl,
    PromptRemoteProjectId,
    PromptRemotePublicKey,
    PromptDefaultFilter,
    PromptDefaultSort,
    PromptName,
    PromptDescription,
    PromptColor,

    // === GENERAL ===
    EditingRecord(String),
    OperationCancelled,
}
