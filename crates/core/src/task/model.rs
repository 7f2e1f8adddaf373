//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Task urgency. Higher is more urgent; never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Priority(u32);

impl Priority {
    pub const MIN: Priority = Priority(1);

    pub fn new(value: u32) -> Result<Self> {
        if value < Self::MIN.0 {
            return Err(Error::InvalidInput(format!(
                "priority must be at least {}, got {}",
                Self::MIN.0,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u32> for Priority {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored task, in the record layout written to the durable store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub priority: Priority,
    pub is_done: bool,
    pub deadline: DateTime<Utc>,
}

impl Task {
    /// Build a not-yet-done task from a validated draft
    pub(crate) fn from_draft(id: u64, draft: ValidDraft) -> Self {
        Self {
            id,
            name: draft.name,
            priority: draft.priority,
            is_done: false,
            deadline: draft.deadline,
        }
    }

    /// Overwrite the editable fields and mark the task as not done again
    pub(crate) fn apply(&mut self, draft: ValidDraft) {
        self.name = draft.name;
        self.priority = draft.priority;
        self.deadline = draft.deadline;
        self.is_done = false;
    }
}

/// Caller input for creating or editing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub priority: u32,
    /// `None` means "now" at the moment the command runs
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: Priority::MIN.get(),
            deadline: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check the draft and resolve its default deadline against `now`
    pub(crate) fn validate(self, now: DateTime<Utc>) -> Result<ValidDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("task name must not be empty".to_string()));
        }
        Ok(ValidDraft {
            name: name.to_string(),
            priority: Priority::new(self.priority)?,
            deadline: self.deadline.unwrap_or(now),
        })
    }
}

pub(crate) struct ValidDraft {
    name: String,
    priority: Priority,
    deadline: DateTime<Utc>,
}

/// Re-ordering applied by [`TaskStore::sort_by`](super::TaskStore::sort_by)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMethod {
    /// Highest priority first
    Priority,
    /// Earliest deadline first
    Deadline,
    /// Ascending id
    Insertion,
}

impl SortMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Deadline => "deadline",
            Self::Insertion => "insertion",
        }
    }

    /// Stable in-place sort
    pub(crate) fn apply(self, tasks: &mut [Task]) {
        match self {
            Self::Priority => tasks.sort_by(|a, b| b.priority.cmp(&a.priority)),
            Self::Deadline => tasks.sort_by_key(|t| t.deadline),
            Self::Insertion => tasks.sort_by_key(|t| t.id),
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "deadline" => Ok(Self::Deadline),
            "insertion" => Ok(Self::Insertion),
            other => Err(Error::InvalidInput(format!("unknown sort method: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn task(id: u64, name: &str, priority: u32, hour: u32) -> Task {
        let draft = TaskDraft::new(name)
            .with_priority(priority)
            .with_deadline(at(hour))
            .validate(at(0))
            .unwrap();
        Task::from_draft(id, draft)
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_priority_rejects_zero() {
        assert!(matches!(Priority::new(0), Err(Error::InvalidInput(_))));
        assert_eq!(Priority::new(1).unwrap(), Priority::MIN);
        assert_eq!(Priority::new(u32::MAX).unwrap().get(), u32::MAX);
    }

    #[test]
    fn test_draft_trims_name_and_defaults_deadline() {
        let valid = TaskDraft::new("  Buy milk \n").validate(at(7)).unwrap();
        let task = Task::from_draft(1, valid);

        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.priority, Priority::MIN);
        assert_eq!(task.deadline, at(7));
        assert!(!task.is_done);
    }

    #[test]
    fn test_draft_rejects_blank_name() {
        for name in ["", "   ", "\t\n"] {
            let result = TaskDraft::new(name).validate(at(0));
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{name:?}");
        }
    }

    #[test]
    fn test_draft_rejects_zero_priority() {
        let result = TaskDraft::new("x").with_priority(0).validate(at(0));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_apply_resets_done() {
        let mut task = task(3, "Old", 1, 5);
        task.is_done = true;

        let draft = TaskDraft::new("New")
            .with_priority(4)
            .with_deadline(at(9))
            .validate(at(0))
            .unwrap();
        task.apply(draft);

        assert_eq!(task.id, 3);
        assert_eq!(task.name, "New");
        assert_eq!(task.priority.get(), 4);
        assert_eq!(task.deadline, at(9));
        assert!(!task.is_done);
    }

    #[test]
    fn test_serialized_record_layout() {
        let task = task(7, "File taxes", 5, 9);
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "name": "File taxes",
                "priority": 5,
                "isDone": false,
                "deadline": "2024-01-01T09:00:00Z",
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_zero_priority() {
        let raw = r#"{"id":1,"name":"x","priority":0,"isDone":false,"deadline":"2024-01-01T09:00:00Z"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn test_deserialize_accepts_offset_timestamps() {
        let raw = r#"{"id":1,"name":"x","priority":2,"isDone":true,"deadline":"2024-01-01T18:00:00+09:00"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.deadline, at(9));
        assert!(task.is_done);
    }

    #[test]
    fn test_sort_by_priority_is_descending_and_stable() {
        let mut tasks = vec![
            task(1, "a", 2, 1),
            task(2, "b", 5, 1),
            task(3, "c", 2, 1),
            task(4, "d", 5, 1),
        ];
        SortMethod::Priority.apply(&mut tasks);
        assert_eq!(names(&tasks), ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_deadline_is_ascending() {
        let mut tasks = vec![task(1, "late", 1, 20), task(2, "early", 1, 3), task(3, "mid", 1, 10)];
        SortMethod::Deadline.apply(&mut tasks);
        assert_eq!(names(&tasks), ["early", "mid", "late"]);
    }

    #[test]
    fn test_sort_by_insertion_restores_id_order() {
        let mut tasks = vec![task(3, "c", 1, 1), task(1, "a", 9, 1), task(2, "b", 4, 1)];
        SortMethod::Insertion.apply(&mut tasks);
        assert_eq!(names(&tasks), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_method_parsing() {
        assert_eq!("priority".parse::<SortMethod>().unwrap(), SortMethod::Priority);
        assert_eq!(" Deadline ".parse::<SortMethod>().unwrap(), SortMethod::Deadline);
        assert_eq!("INSERTION".parse::<SortMethod>().unwrap(), SortMethod::Insertion);
        assert!(matches!("name".parse::<SortMethod>(), Err(Error::InvalidInput(_))));
        assert_eq!(SortMethod::Deadline.to_string(), "deadline");
    }
}
