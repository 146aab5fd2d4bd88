//! Questlog Core - reward and progression logic for a gamified quest tracker
//!
//! This crate contains no filesystem I/O. State is mirrored through the
//! [`KeyValueStore`] trait; adapters live in consuming crates.

pub mod error;
pub mod filter;
pub mod player;
pub mod state;
pub mod store;
pub mod task;

pub use error::{CoreError, Result};
pub use filter::{TaskFilter, TaskSort, TaskStatusFilter};
pub use player::{PlayerProfile, Reward, RewardOutcome, RewardType, Stats};
pub use state::AppState;
pub use store::{KeyValueStore, MemoryStore, ProgressionStore, STATE_KEY, StoreOptions};
pub use task::{Task, TaskCount, TaskList};
