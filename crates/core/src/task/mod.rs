//! Task module
//!
//! This module contains the task model and the store that owns the task list.

mod model;
mod store;

pub use model::{Priority, SortMethod, Task, TaskDraft};
pub use store::TaskStore;
