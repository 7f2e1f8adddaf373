//! Task list persistence
//!
//! Bridges the in-memory task list to a [`BlobStore`]. The full list is
//! written as a JSON array under one key; the id counter lives under a
//! sibling key so the array keeps its plain record layout.

use async_trait::async_trait;

use super::blob::BlobStore;
use crate::config::DEFAULT_STORAGE_KEY;
use crate::task::Task;
use crate::{Error, Result};

/// Load/save interface used by [`TaskStore`](crate::task::TaskStore)
#[async_trait]
pub trait TaskPersistence: Send + Sync {
    /// Read the stored list; empty when nothing was ever saved
    async fn load(&self) -> Result<Vec<Task>>;

    /// Overwrite the stored list with `tasks`
    async fn save(&self, tasks: &[Task]) -> Result<()>;

    /// Read the next id to hand out, if one was saved
    async fn load_next_id(&self) -> Result<Option<u64>> {
        Ok(None)
    }

    async fn save_next_id(&self, _next_id: u64) -> Result<()> {
        Ok(())
    }
}

/// [`TaskPersistence`] over any [`BlobStore`]
#[derive(Debug, Clone)]
pub struct BlobTaskPersistence<B> {
    blobs: B,
    key: String,
    next_id_key: String,
}

impl<B: BlobStore> BlobTaskPersistence<B> {
    /// Persist under the default `todos` key
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let next_id_key = format!("{key}.nextId");
        Self {
            blobs,
            key,
            next_id_key,
        }
    }
}

#[async_trait]
impl<B: BlobStore> TaskPersistence for BlobTaskPersistence<B> {
    async fn load(&self) -> Result<Vec<Task>> {
        let Some(content) = self.blobs.get(&self.key).await? else {
            tracing::debug!(key = %self.key, "No stored tasks");
            return Ok(Vec::new());
        };
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    async fn save(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string(tasks)?;
        self.blobs.set(&self.key, &content).await?;
        tracing::debug!(key = %self.key, count = tasks.len(), "Saved tasks");
        Ok(())
    }

    async fn load_next_id(&self) -> Result<Option<u64>> {
        let Some(content) = self.blobs.get(&self.next_id_key).await? else {
            return Ok(None);
        };
        content.trim().parse().map(Some).map_err(|e| {
            Error::Storage(format!(
                "Invalid id counter under {}: {}",
                self.next_id_key, e
            ))
        })
    }

    async fn save_next_id(&self, next_id: u64) -> Result<()> {
        self.blobs
            .set(&self.next_id_key, &next_id.to_string())
            .await
    }
}
