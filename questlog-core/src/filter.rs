//! Task filtering and sorting views
//!
//! Views never reorder the underlying list. Each entry keeps its position in
//! the list so callers can pass it straight back to the store.

use crate::task::{Task, TaskList};

/// Which quests to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Display order for quests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Order the quests were added in
    #[default]
    Insertion,
    Newest,
    Oldest,
    /// Alphabetical by reward type name
    Reward,
}

/// Builder for a filtered, sorted view of the task list
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub status: TaskStatusFilter,
    pub sort: TaskSort,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only quests not yet completed
    pub fn active(mut self) -> Self {
        self.status = TaskStatusFilter::Active;
        self
    }

    /// Only completed quests
    pub fn completed(mut self) -> Self {
        self.status = TaskStatusFilter::Completed;
        self
    }

    pub fn with_status(mut self, status: TaskStatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn sort_by(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self.status {
            TaskStatusFilter::All => true,
            TaskStatusFilter::Active => !task.completed,
            TaskStatusFilter::Completed => task.completed,
        }
    }

    /// Filter and sort, pairing each task with its list position
    pub fn apply<'a>(&self, tasks: &'a TaskList) -> Vec<(usize, &'a Task)> {
        let mut view: Vec<(usize, &Task)> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches(t))
            .collect();

        // sort_by is stable, so ties keep insertion order
        match self.sort {
            TaskSort::Insertion => {}
            TaskSort::Newest => view.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp)),
            TaskSort::Oldest => view.sort_by(|(_, a), (_, b)| a.timestamp.cmp(&b.timestamp)),
            TaskSort::Reward => {
                view.sort_by(|(_, a), (_, b)| a.reward_type.as_str().cmp(b.reward_type.as_str()))
            }
        }

        view
    }
}
