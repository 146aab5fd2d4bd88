//! Quest (task) model and the ordered task list
//!
//! Tasks are addressed by position. Any removal shifts later tasks down, so
//! positions captured before a mutation must be re-read afterwards.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::player::RewardType;

/// Current time at the millisecond precision the payload stores
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Trim a title and reject it if nothing is left
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("title", "quest title cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// A single quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub reward_type: RewardType,
    #[serde(default)]
    pub completed: bool,
    /// Creation time, never changed after construction
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Task {
    /// Create an open task stamped with the current time
    pub fn new(title: impl Into<String>, reward_type: RewardType) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            reward_type,
            completed: false,
            timestamp: now_millis(),
        }
    }

    /// Builder method to set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builder method to set creation time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Completed vs total, as shown next to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCount {
    pub completed: usize,
    pub total: usize,
}

impl std::fmt::Display for TaskCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Insertion-ordered task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return its position
    pub fn push(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Get or return error if index is out of range
    pub fn get_or_err(&self, index: usize) -> Result<&Task> {
        let len = self.tasks.len();
        self.tasks
            .get(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })
    }

    /// Get mutable or return error if index is out of range
    pub fn get_mut_or_err(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })
    }

    /// Remove the task at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.get_or_err(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Count completed tasks
    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn task_count(&self) -> TaskCount {
        TaskCount {
            completed: self.count_completed(),
            total: self.tasks.len(),
        }
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
