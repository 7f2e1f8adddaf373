//! Store configuration
//!
//! Resolves where tasks are kept from the environment, falling back to
//! defaults that match the browser app's single `todos` key.

use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "TODO_STORAGE_KEY";

pub const DEFAULT_DATA_DIR: &str = ".todo-data";
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Where and under which key the task list is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `TODO_DATA_DIR` and `TODO_STORAGE_KEY` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            data_dir: read(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key: read(STORAGE_KEY_ENV).unwrap_or(defaults.storage_key),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}
