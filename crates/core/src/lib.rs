//! Core library for the personal task tracker
//!
//! This crate contains the task data model and its derived state:
//! - Task CRUD, completion toggling and one-shot sorting
//! - Deadline urgency labels
//! - Write-through persistence to a string-keyed blob store

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod status;
pub mod storage;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use clock::{Clock, DefaultClock, FixedClock};
pub use config::StoreConfig;
pub use status::{status, DeadlineStatus};
pub use storage::{BlobStore, BlobTaskPersistence, FileBlobStore, MemoryBlobStore, TaskPersistence};
pub use task::{Priority, SortMethod, Task, TaskDraft, TaskStore};
