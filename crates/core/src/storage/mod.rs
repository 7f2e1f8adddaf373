//! Storage module
//!
//! The opaque key-value medium and the task list persistence built on it.

mod blob;
mod persistence;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use persistence::{BlobTaskPersistence, TaskPersistence};
