//! The persisted aggregate: one profile plus the task list

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::player::{PlayerProfile, RewardType};
use crate::task::{Task, TaskList, now_millis};

/// Quests seeded into a brand new state
pub const STARTER_TASKS: [(&str, &str); 5] = [
    (
        "Fajar",
        "Waking Up For Fajar is The Best Way to Start Healing Yourself",
    ),
    ("Zohar", "Blessings are showered on those who pray on time"),
    ("Asar", "Successful life here and after life"),
    ("Magreeb", "Allah will fulfil all your wishes and Duas"),
    ("Isha", "You will have a peaceful Night"),
];

/// Profile and tasks, serialized and deserialized as one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    #[serde(default)]
    pub tasks: TaskList,
}

impl AppState {
    /// Fresh profile with no tasks
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh profile with the starter quests, each 1ms apart
    pub fn with_starter_tasks() -> Self {
        let base = now_millis();
        let tasks: Vec<Task> = STARTER_TASKS
            .iter()
            .enumerate()
            .map(|(i, (title, description))| {
                Task::new(*title, RewardType::Strength)
                    .with_description(*description)
                    .with_timestamp(base + Duration::milliseconds(i as i64))
            })
            .collect();

        Self {
            profile: PlayerProfile::default(),
            tasks: tasks.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::persistence_write_with_source("failed to serialize state", e))
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| CoreError::deserialization_with_source("corrupt saved state", e))
    }
}
