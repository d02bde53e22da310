//! Configuration management for taskflow.
//!
//! Settings live in a JSON file inside the platform data directory and are
//! split into optional sections:
//!
//! - **Store**: which record store backend to use and, for the remote one,
//!   how to reach it
//! - **View**: the filter and sort applied to `task list` when none is given
//!
//! Remote credentials can also come from the environment (or a `.env` file
//! loaded at startup), which takes precedence over the file:
//!
//! | variable              | overrides                  |
//! |-----------------------|----------------------------|
//! | `TASKFLOW_BACKEND`    | `store.backend`            |
//! | `TASKFLOW_API_URL`    | `store.remote.api_url`     |
//! | `TASKFLOW_PROJECT_ID` | `store.remote.project_id`  |
//! | `TASKFLOW_PUBLIC_KEY` | `store.remote.public_key`  |
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskflow::libs::config::Config;
//!
//! # fn demo() -> anyhow::Result<()> {
//! // File settings with environment overrides applied
//! let config = Config::load()?;
//!
//! // Run the interactive wizard and persist the result
//! let updated = Config::init()?;
//! updated.save()?;
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use crate::api::remote::RemoteConfig;
use crate::libs::messages::Message;
use crate::libs::view_model::{SortKey, StatusFilter, TaskQuery};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

const ENV_BACKEND: &str = "TASKFLOW_BACKEND";
const ENV_API_URL: &str = "TASKFLOW_API_URL";
const ENV_PROJECT_ID: &str = "TASKFLOW_PROJECT_ID";
const ENV_PUBLIC_KEY: &str = "TASKFLOW_PUBLIC_KEY";

/// A section offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Identifier used to route the selection
    pub key: String,
    /// Name shown in the selection list
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Demo data held in process; changes last until exit.
    #[default]
    Memory,
    Remote,
}

impl Backend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mock" => Some(Self::Memory),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

impl StoreConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "store".to_string(),
            name: Message::ConfigModuleStore.to_string(),
        }
    }
}

/// Defaults for `task list`. Search text is never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ViewConfig {
    #[serde(default)]
    pub filter: StatusFilter,
    #[serde(default)]
    pub sort: SortKey,
}

impl ViewConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "view".to_string(),
            name: Message::ConfigModuleView.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewConfig>,
}

impl Config {
    /// Reads the configuration file, or returns defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads the file and applies environment overrides.
    pub fn load() -> Result<Config> {
        let mut config = Self::read()?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let backend = lookup(ENV_BACKEND).as_deref().and_then(Backend::parse);
        let api_url = lookup(ENV_API_URL);
        let project_id = lookup(ENV_PROJECT_ID);
        let public_key = lookup(ENV_PUBLIC_KEY);

        let has_remote = api_url.is_some() || project_id.is_some() || public_key.is_some();
        if backend.is_none() && !has_remote {
            return;
        }

        let store = self.store.get_or_insert_with(StoreConfig::default);
        if let Some(backend) = backend {
            store.backend = backend;
        }
        if !has_remote {
            return;
        }

        let remote = store.remote.get_or_insert_with(|| RemoteConfig {
            api_url: "".to_string(),
            project_id: "".to_string(),
            public_key: "".to_string(),
        });
        if let Some(api_url) = api_url {
            remote.api_url = api_url;
        }
        if let Some(project_id) = project_id {
            remote.project_id = project_id;
        }
        if let Some(public_key) = public_key {
            remote.public_key = public_key;
        }
    }

    pub fn backend(&self) -> Backend {
        self.store.as_ref().map(|store| store.backend).unwrap_or_default()
    }

    pub fn remote(&self) -> Option<&RemoteConfig> {
        self.store.as_ref().and_then(|store| store.remote.as_ref())
    }

    /// Starting query for `task list`, from the saved view defaults.
    pub fn default_query(&self) -> TaskQuery {
        let view = self.view.clone().unwrap_or_default();
        TaskQuery::new(view.filter, "", view.sort)
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![StoreConfig::module(), RemoteConfig::module(), ViewConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "store" => {
                    let mut store = config.store.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleStore);
                    let backends = [Backend::Memory, Backend::Remote];
                    let current = backends.iter().position(|backend| *backend == store.backend).unwrap_or(0);
                    let choice = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptBackend.to_string())
                        .items(&["memory (demo data)", "remote (record service)"])
                        .default(current)
                        .interact()?;
                    store.backend = backends[choice];
                    let remote_selected = selected.iter().any(|&i| modules[i].key == "remote");
                    let remote_ready = store.remote.as_ref().is_some_and(RemoteConfig::is_complete);
                    if store.backend == Backend::Remote && !remote_selected && !remote_ready {
                        store.remote = Some(RemoteConfig::init(&store.remote)?);
                    }
                    config.store = Some(store);
                }
                "remote" => {
                    let mut store = config.store.clone().unwrap_or_default();
                    store.remote = Some(RemoteConfig::init(&store.remote)?);
                    config.store = Some(store);
                }
                "view" => {
                    let mut view = config.view.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleView);
                    let filters = [StatusFilter::All, StatusFilter::Pending, StatusFilter::Completed, StatusFilter::Overdue];
                    let sorts = [SortKey::DueDate, SortKey::Priority, SortKey::Created];
                    let filter = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultFilter.to_string())
                        .items(&filters)
                        .default(filters.iter().position(|filter| *filter == view.filter).unwrap_or(0))
                        .interact()?;
                    let sort = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultSort.to_string())
                        .items(&sorts)
                        .default(sorts.iter().position(|sort| *sort == view.sort).unwrap_or(0))
                        .interact()?;
                    view.filter = filters[filter];
                    view.sort = sorts[sort];
                    config.view = Some(view);
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
