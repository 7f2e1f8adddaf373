//! In-memory task list with write-through persistence
//!
//! Every command that changes the list holds the write lock until its
//! persistence write has finished, so commands apply one at a time and
//! memory never runs ahead of the durable copy.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use super::model::{SortMethod, Task, TaskDraft};
use crate::config::StoreConfig;
use crate::status::{status, DeadlineStatus};
use crate::storage::{BlobTaskPersistence, FileBlobStore, TaskPersistence};
use crate::{Error, Result};

struct TaskList {
    tasks: Vec<Task>,
    /// Next id to hand out; only ever grows
    next_id: u64,
}

impl TaskList {
    fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

async fn load_list<P: TaskPersistence>(persistence: &P) -> Result<TaskList> {
    let tasks = persistence.load().await?;

    let mut seen = HashSet::with_capacity(tasks.len());
    if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id)) {
        return Err(Error::Storage(format!(
            "Stored tasks contain duplicate id {}",
            dup.id
        )));
    }

    // The counter only guards against reuse; the task array stays authoritative.
    let watermark = match persistence.load_next_id().await {
        Ok(watermark) => watermark.unwrap_or(1),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable id counter");
            1
        }
    };
    let next_id = tasks
        .iter()
        .map(|t| t.id.saturating_add(1))
        .max()
        .unwrap_or(1)
        .max(watermark)
        .max(1);

    Ok(TaskList { tasks, next_id })
}

/// Ordered task collection backed by a [`TaskPersistence`]
pub struct TaskStore<P, C = DefaultClock> {
    persistence: P,
    clock: C,
    list: RwLock<TaskList>,
}

impl<C> TaskStore<BlobTaskPersistence<FileBlobStore>, C>
where
    C: Clock + Send + Sync,
{
    /// Open the file-backed list described by `config`
    pub async fn open_file(config: &StoreConfig, clock: C) -> Result<Self> {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            key = %config.storage_key,
            "Opening task store"
        );
        let persistence = BlobTaskPersistence::with_key(
            FileBlobStore::new(&config.data_dir),
            config.storage_key.as_str(),
        );
        Self::open(persistence, clock).await
    }
}

impl<P, C> TaskStore<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    /// Load the stored list. Fails if the stored content is unreadable.
    pub async fn open(persistence: P, clock: C) -> Result<Self> {
        let list = load_list(&persistence).await?;
        tracing::info!(count = list.tasks.len(), next_id = list.next_id, "Loaded task list");

        Ok(Self {
            persistence,
            clock,
            list: RwLock::new(list),
        })
    }

    /// Like [`open`](Self::open), but start empty if the stored list can't be loaded
    pub async fn open_or_empty(persistence: P, clock: C) -> Self {
        let list = match load_list(&persistence).await {
            Ok(list) => {
                tracing::info!(count = list.tasks.len(), next_id = list.next_id, "Loaded task list");
                list
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load tasks; starting with an empty list");
                let next_id = match persistence.load_next_id().await {
                    Ok(watermark) => watermark.unwrap_or(1).max(1),
                    Err(_) => 1,
                };
                TaskList {
                    tasks: Vec::new(),
                    next_id,
                }
            }
        };

        Self {
            persistence,
            clock,
            list: RwLock::new(list),
        }
    }

    /// Current instant according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Snapshot of the collection in its current order
    pub async fn list(&self) -> Vec<Task> {
        self.list.read().await.tasks.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Task> {
        let list = self.list.read().await;
        list.position(id).map(|i| list.tasks[i].clone())
    }

    /// Like [`get`](Self::get), but a missing task is an error
    pub async fn get_or_err(&self, id: u64) -> Result<Task> {
        self.get(id).await.ok_or(Error::TaskNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.list.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.list.read().await.tasks.is_empty()
    }

    /// Urgency of a stored task as of the store's clock
    pub async fn status_of(&self, id: u64) -> Option<DeadlineStatus> {
        let deadline = self.get(id).await?.deadline;
        Some(status(self.now(), deadline))
    }

    /// Append a new, not-done task. A missing deadline defaults to now.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task> {
        let draft = draft.validate(self.now()).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected new task");
        })?;

        let mut list = self.list.write().await;
        let id = list.next_id;
        if id == u64::MAX {
            return Err(Error::Storage("Task id space exhausted".to_string()));
        }
        list.next_id = id + 1;
        self.persistence.save_next_id(list.next_id).await?;

        let task = Task::from_draft(id, draft);
        let before = list.tasks.clone();
        list.tasks.push(task.clone());
        self.commit(&mut list, before).await?;

        tracing::info!(id, name = %task.name, priority = %task.priority, "Created task");
        Ok(task)
    }

    /// Flip the done flag. `Ok(None)` if no task has `id`.
    pub async fn toggle_complete(&self, id: u64) -> Result<Option<Task>> {
        let mut list = self.list.write().await;
        let Some(index) = list.position(id) else {
            tracing::debug!(id, "Toggle ignored: task not found");
            return Ok(None);
        };

        let before = list.tasks.clone();
        let task = &mut list.tasks[index];
        task.is_done = !task.is_done;
        let task = task.clone();
        self.commit(&mut list, before).await?;

        tracing::info!(id, is_done = task.is_done, "Toggled task");
        Ok(Some(task))
    }

    /// Remove a task, returning it. `Ok(None)` if no task has `id`.
    pub async fn delete(&self, id: u64) -> Result<Option<Task>> {
        let mut list = self.list.write().await;
        let Some(index) = list.position(id) else {
            tracing::debug!(id, "Delete ignored: task not found");
            return Ok(None);
        };

        let before = list.tasks.clone();
        let task = list.tasks.remove(index);
        self.commit(&mut list, before).await?;

        tracing::info!(id, remaining = list.tasks.len(), "Deleted task");
        Ok(Some(task))
    }

    /// Replace name, priority and deadline, and mark the task not done.
    /// `Ok(None)` if no task has `id`.
    pub async fn edit(&self, id: u64, draft: TaskDraft) -> Result<Option<Task>> {
        let draft = draft.validate(self.now()).inspect_err(|e| {
            tracing::warn!(id, error = %e, "Rejected task edit");
        })?;

        let mut list = self.list.write().await;
        let Some(index) = list.position(id) else {
            tracing::debug!(id, "Edit ignored: task not found");
            return Ok(None);
        };

        let before = list.tasks.clone();
        let task = &mut list.tasks[index];
        task.apply(draft);
        let task = task.clone();
        self.commit(&mut list, before).await?;

        tracing::info!(id, "Edited task");
        Ok(Some(task))
    }

    /// Re-order the stored collection once. Later creates still append.
    pub async fn sort_by(&self, method: SortMethod) -> Result<Vec<Task>> {
        let mut list = self.list.write().await;
        let before = list.tasks.clone();
        method.apply(&mut list.tasks);
        self.commit(&mut list, before).await?;

        tracing::info!(%method, "Sorted tasks");
        Ok(list.tasks.clone())
    }

    /// Persist the list, restoring `before` if the write fails
    async fn commit(&self, list: &mut TaskList, before: Vec<Task>) -> Result<()> {
        if let Err(e) = self.persistence.save(&list.tasks).await {
            tracing::warn!(error = %e, "Failed to persist tasks; reverting change");
            list.tasks = before;
            return Err(e);
        }
        Ok(())
    }
}
