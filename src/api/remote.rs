//! Record store backed by a remote, table-oriented record service.
//!
//! Every table (`task`, `project`, `category`) is reached through the same
//! five endpoints under `{api_url}/tables/{table}/records`:
//!
//! | operation | request                                   | response envelope                          |
//! |-----------|-------------------------------------------|--------------------------------------------|
//! | list      | `POST .../records/query` `{fields, orderBy}` | `{success, data: [record]}`             |
//! | get       | `GET .../records/{id}`                    | `{success, data: record}`                  |
//! | create    | `POST .../records` `{records: [patch]}`   | `{success, results: [{success, data}]}`    |
//! | update    | `PATCH .../records` `{records: [{Id, ..}]}` | `{success, results: [{success, data}]}`  |
//! | delete    | `DELETE .../records` `{RecordIds: [id]}`  | `{success, results: [{success}]}`          |
//!
//! Requests carry the project id in `X-Project-Id` and the public key as a
//! bearer token. A 404 on an id-addressed call, or a per-record result saying
//! the record does not exist, maps to `NotFound`; every other failure maps to
//! `Backend`. Failed calls are never retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::api::{RecordStore, RemoteConfig, RemoteStore};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = RemoteConfig {
//!     api_url: "https://records.example.com/api".to_string(),
//!     project_id: "taskflow-prod".to_string(),
//!     public_key: "pk_live_xxx".to_string(),
//! };
//! let store = RemoteStore::new(&config);
//! let tasks = store.list_tasks().await?;
//! # Ok(())
//! # }
//! ```

use super::mapper::{self, CategoryRecord, ProjectRecord, TaskRecord};
use super::RecordStore;
use crate::libs::config::ConfigModule;
use crate::libs::error::{RecordKind, StoreError, StoreResult};
use crate::libs::messages::Message;
use crate::libs::task::{Category, CategoryPatch, Project, ProjectPatch, Task, TaskPatch};
use crate::msg_print;
use anyhow::Result;
use chrono::Utc;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PROJECT_HEADER: &str = "X-Project-Id";

const TASK_FIELDS: &[&str] = &[
    "Name",
    "Tags",
    "Owner",
    "CreatedOn",
    "CreatedBy",
    "ModifiedOn",
    "ModifiedBy",
    "title",
    "description",
    "due_date",
    "priority",
    "completed",
    "category",
    "created_at",
    "updated_at",
    "project_id",
];
const PROJECT_FIELDS: &[&str] = &[
    "Name",
    "Tags",
    "Owner",
    "CreatedOn",
    "CreatedBy",
    "ModifiedOn",
    "ModifiedBy",
    "description",
    "color",
    "created_at",
];
const CATEGORY_FIELDS: &[&str] = &["Name", "Tags", "Owner", "CreatedOn", "CreatedBy", "ModifiedOn", "ModifiedBy", "color"];

/// Connection settings for the remote record service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// Base URL; table paths are appended to it.
    pub api_url: String,
    pub project_id: String,
    pub public_key: String,
}

impl RemoteConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "remote".to_string(),
            name: Message::ConfigModuleRemote.to_string(),
        }
    }

    /// All three settings are needed before a request can be made.
    pub fn is_complete(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.project_id.trim().is_empty() && !self.public_key.trim().is_empty()
    }

    pub fn init(config: &Option<RemoteConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            project_id: "".to_string(),
            public_key: "".to_string(),
        });
        msg_print!(Message::ConfigModuleRemote);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRemoteApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            project_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRemoteProjectId.to_string())
                .default(config.project_id)
                .interact_text()?,
            public_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRemotePublicKey.to_string())
                .default(config.public_key)
                .interact_text()?,
        })
    }
}

#[derive(Serialize)]
struct OrderBy {
    #[serde(rename = "fieldName")]
    field_name: &'static str,
    #[serde(rename = "sortType")]
    sort_type: &'static str,
}

#[derive(Serialize)]
struct QueryRequest {
    fields: &'static [&'static str],
    #[serde(rename = "orderBy")]
    order_by: Vec<OrderBy>,
}

#[derive(Serialize)]
struct RecordsRequest<P> {
    records: Vec<P>,
}

#[derive(Serialize)]
struct UpdateRecord<'a, P> {
    #[serde(rename = "Id")]
    id: i32,
    #[serde(flatten)]
    patch: &'a P,
}

#[derive(Serialize)]
struct DeleteRequest {
    #[serde(rename = "RecordIds")]
    record_ids: Vec<i32>,
}

#[derive(Deserialize)]
struct QueryResponse<R> {
    #[serde(default)]
    success: bool,
    data: Option<Vec<R>>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct GetResponse<R> {
    #[serde(default)]
    success: bool,
    data: Option<R>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "R: DeserializeOwned"))]
struct MutationResponse<R> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<MutationResult<R>>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct MutationResult<R> {
    #[serde(default)]
    success: bool,
    data: Option<R>,
    message: Option<String>,
}

#[derive(Debug)]
pub struct RemoteStore {
    client: Client,
    config: RemoteConfig,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn request(&self, method: Method, kind: RecordKind, suffix: &str) -> RequestBuilder {
        let url = format!("{}/tables/{}/records{}", self.config.api_url.trim_end_matches('/'), kind.table(), suffix);
        self.client
            .request(method, url)
            .header(PROJECT_HEADER, &self.config.project_id)
            .bearer_auth(&self.config.public_key)
    }

    /// Sends the request and decodes the envelope. A 404 on an id-addressed
    /// call becomes `NotFound`.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, kind: RecordKind, id: Option<i32>) -> StoreResult<T> {
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(table = kind.table(), "request failed: {}", err);
            StoreError::from(err)
        })?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::not_found(kind, id));
            }
        }
        if !status.is_success() {
            tracing::warn!(table = kind.table(), %status, "record service rejected request");
            return Err(StoreError::Backend(format!("{} request failed with status {}", kind.table(), status)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn query<R: DeserializeOwned>(&self, kind: RecordKind, fields: &'static [&'static str], order_field: &'static str) -> StoreResult<Vec<R>> {
        let body = QueryRequest {
            fields,
            order_by: vec![OrderBy {
                field_name: order_field,
                sort_type: "ASC",
            }],
        };
        tracing::debug!(table = kind.table(), "fetching records");
        let builder = self.request(Method::POST, kind, "/query").json(&body);
        let response: QueryResponse<R> = self.send(builder, kind, None).await?;

        if !response.success {
            return Err(failure(kind, "fetch", response.message));
        }
        Ok(response.data.unwrap_or_default())
    }

    async fn fetch_one<R: DeserializeOwned>(&self, kind: RecordKind, id: i32) -> StoreResult<R> {
        tracing::debug!(table = kind.table(), id, "fetching record");
        let builder = self.request(Method::GET, kind, &format!("/{}", id));
        let response: GetResponse<R> = self.send(builder, kind, Some(id)).await?;

        match response.data {
            Some(record) if response.success => Ok(record),
            None => Err(StoreError::not_found(kind, id)),
            Some(_) => Err(failure(kind, "fetch", response.message)),
        }
    }

    async fn create_one<P: Serialize, R: DeserializeOwned>(&self, kind: RecordKind, patch: &P) -> StoreResult<R> {
        tracing::debug!(table = kind.table(), "creating record");
        let body = RecordsRequest { records: vec![patch] };
        let builder = self.request(Method::POST, kind, "").json(&body);
        let response: MutationResponse<R> = self.send(builder, kind, None).await?;
        first_result(kind, "create", None, response)
    }

    async fn update_one<P: Serialize, R: DeserializeOwned>(&self, kind: RecordKind, id: i32, patch: &P) -> StoreResult<R> {
        tracing::debug!(table = kind.table(), id, "updating record");
        let body = RecordsRequest {
            records: vec![UpdateRecord { id, patch }],
        };
        let builder = self.request(Method::PATCH, kind, "").json(&body);
        let response: MutationResponse<R> = self.send(builder, kind, Some(id)).await?;
        first_result(kind, "update", Some(id), response)
    }

    async fn delete_one(&self, kind: RecordKind, id: i32) -> StoreResult<bool> {
        tracing::debug!(table = kind.table(), id, "deleting record");
        let body = DeleteRequest { record_ids: vec![id] };
        let builder = self.request(Method::DELETE, kind, "").json(&body);
        let response: MutationResponse<Value> = self.send(builder, kind, Some(id)).await?;

        if !response.success {
            return Err(failure(kind, "delete", response.message));
        }
        match response.results.into_iter().next() {
            Some(result) if !result.success => Err(rejected(kind, "delete", id, result.message)),
            _ => Ok(true),
        }
    }
}

fn first_result<R>(kind: RecordKind, action: &str, id: Option<i32>, response: MutationResponse<R>) -> StoreResult<R> {
    if !response.success {
        return Err(failure(kind, action, response.message));
    }
    match response.results.into_iter().next() {
        Some(MutationResult {
            success: true,
            data: Some(record),
            ..
        }) => Ok(record),
        Some(result) => match id {
            Some(id) => Err(rejected(kind, action, id, result.message)),
            None => Err(failure(kind, action, result.message)),
        },
        None => Err(failure(kind, action, None)),
    }
}

/// A per-record rejection of an id-addressed call. Messages saying the record
/// is missing become `NotFound`.
fn rejected(kind: RecordKind, action: &str, id: i32, message: Option<String>) -> StoreError {
    let missing = message.as_deref().map(str::to_lowercase).is_some_and(|text| {
        text.contains("not exist") || text.contains("not found") || text.contains("no record")
    });
    if missing {
        tracing::warn!(table = kind.table(), id, action, "record does not exist");
        return StoreError::not_found(kind, id);
    }
    failure(kind, action, message)
}

fn failure(kind: RecordKind, action: &str, message: Option<String>) -> StoreError {
    let detail = message.unwrap_or_else(|| "no details returned".to_string());
    tracing::warn!(table = kind.table(), action, "record service reported failure: {}", detail);
    StoreError::Backend(format!("failed to {} {}: {}", action, kind.table(), detail))
}

impl RecordStore for RemoteStore {
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let records: Vec<TaskRecord> = self.query(RecordKind::Task, TASK_FIELDS, "due_date").await?;
        let now = Utc::now();
        Ok(records.into_iter().map(|record| mapper::read_task(record, now)).collect())
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        let record: TaskRecord = self.fetch_one(RecordKind::Task, id).await?;
        Ok(mapper::read_task(record, Utc::now()))
    }

    async fn create_task(&self, patch: &TaskPatch) -> StoreResult<Task> {
        patch.validate_new()?;
        let record: TaskRecord = self.create_one(RecordKind::Task, &mapper::write_task(patch)).await?;
        Ok(mapper::read_task(record, Utc::now()))
    }

    async fn update_task(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        patch.validate_update()?;
        let record: TaskRecord = self.update_one(RecordKind::Task, id, &mapper::write_task(patch)).await?;
        Ok(mapper::read_task(record, Utc::now()))
    }

    async fn delete_task(&self, id: i32) -> StoreResult<bool> {
        self.delete_one(RecordKind::Task, id).await
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let records: Vec<ProjectRecord> = self.query(RecordKind::Project, PROJECT_FIELDS, "Name").await?;
        let now = Utc::now();
        Ok(records.into_iter().map(|record| mapper::read_project(record, now)).collect())
    }

    async fn get_project(&self, id: i32) -> StoreResult<Project> {
        let record: ProjectRecord = self.fetch_one(RecordKind::Project, id).await?;
        Ok(mapper::read_project(record, Utc::now()))
    }

    async fn create_project(&self, patch: &ProjectPatch) -> StoreResult<Project> {
        patch.validate_new()?;
        let record: ProjectRecord = self.create_one(RecordKind::Project, &mapper::write_project(patch)).await?;
        Ok(mapper::read_project(record, Utc::now()))
    }

    async fn update_project(&self, id: i32, patch: &ProjectPatch) -> StoreResult<Project> {
        patch.validate_update()?;
        let record: ProjectRecord = self.update_one(RecordKind::Project, id, &mapper::write_project(patch)).await?;
        Ok(mapper::read_project(record, Utc::now()))
    }

    async fn delete_project(&self, id: i32) -> StoreResult<bool> {
        self.delete_one(RecordKind::Project, id).await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let records: Vec<CategoryRecord> = self.query(RecordKind::Category, CATEGORY_FIELDS, "Name").await?;
        Ok(records.into_iter().map(mapper::read_category).collect())
    }

    async fn get_category(&self, id: i32) -> StoreResult<Category> {
        let record: CategoryRecord = self.fetch_one(RecordKind::Category, id).await?;
        Ok(mapper::read_category(record))
    }

    async fn create_category(&self, patch: &CategoryPatch) -> StoreResult<Category> {
        patch.validate_new()?;
        let record: CategoryRecord = self.create_one(RecordKind::Category, &mapper::write_category(patch)).await?;
        Ok(mapper::read_category(record))
    }

    async fn update_category(&self, id: i32, patch: &CategoryPatch) -> StoreResult<Category> {
        patch.validate_update()?;
        let record: CategoryRecord = self.update_one(RecordKind::Category, id, &mapper::write_category(patch)).await?;
        Ok(mapper::read_category(record))
    }

    async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        self.delete_one(RecordKind::Category, id).await
    }
}
