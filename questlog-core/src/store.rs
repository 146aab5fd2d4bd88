//! The progression store
//!
//! `ProgressionStore` owns the `AppState` and is the only way to mutate it.
//! Every mutation is followed by a save through a [`KeyValueStore`]; a failed
//! save is logged and kept as a warning, never rolled back.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};
use crate::player::{PlayerProfile, Reward, RewardOutcome, RewardType};
use crate::state::AppState;
use crate::task::{Task, TaskCount, TaskList, validate_title};

/// Key the whole state is stored under
pub const STATE_KEY: &str = "questManagerState";

/// Durable key/value storage the state is mirrored to
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Erase a value. Erasing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process key/value store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries, writes: 0 }
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Behaviour switches for the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Run the leveling check after `complete_task` as well as `repeat_task`.
    /// Off by default: only repeating a quest levels the player up.
    pub level_up_on_complete: bool,
}

/// Canonical state plus the operations that change it
pub struct ProgressionStore<S: KeyValueStore> {
    state: AppState,
    backend: S,
    options: StoreOptions,
    warnings: Vec<CoreError>,
}

impl<S: KeyValueStore> ProgressionStore<S> {
    /// Load state from `backend` with default options
    pub fn open(backend: S) -> Self {
        Self::open_with(backend, StoreOptions::default())
    }

    /// Load state from `backend`.
    ///
    /// A missing key yields the starter state, which is saved right away.
    /// A corrupt payload or failed read also yields the starter state, with
    /// the error kept as a warning and nothing written until the next save.
    pub fn open_with(backend: S, options: StoreOptions) -> Self {
        let mut store = Self {
            state: AppState::empty(),
            backend,
            options,
            warnings: Vec::new(),
        };

        match store.backend.get(STATE_KEY) {
            Ok(Some(payload)) => match AppState::from_json(&payload) {
                Ok(state) => {
                    info!(tasks = state.tasks.len(), "loaded saved state");
                    store.state = state;
                }
                Err(e) => {
                    warn!(error = %e, "saved state is corrupt, starting fresh");
                    store.state = AppState::with_starter_tasks();
                    store.warnings.push(e);
                }
            },
            Ok(None) => {
                info!("no saved state, creating starter quests");
                store.state = AppState::with_starter_tasks();
                store.save();
            }
            Err(e) => {
                warn!(error = %e, "could not read saved state, starting fresh");
                store.state = AppState::with_starter_tasks();
                store.warnings.push(e);
            }
        }

        store
    }

    /// Wrap an existing state without reading the backend
    pub fn with_state(backend: S, state: AppState, options: StoreOptions) -> Self {
        Self {
            state,
            backend,
            options,
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.state.profile
    }

    pub fn tasks(&self) -> &TaskList {
        &self.state.tasks
    }

    pub fn task(&self, index: usize) -> Result<&Task> {
        self.state.tasks.get_or_err(index)
    }

    pub fn task_count(&self) -> TaskCount {
        self.state.tasks.task_count()
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Drain the non-fatal errors collected since the last call
    pub fn take_warnings(&mut self) -> Vec<CoreError> {
        std::mem::take(&mut self.warnings)
    }

    /// Append a new open quest
    pub fn add_task(&mut self, title: &str, description: &str, reward_type: &str) -> Result<Task> {
        let title = validate_title(title)?;
        let reward_type: RewardType = reward_type.parse()?;

        let task = Task::new(title, reward_type).with_description(description.trim());
        let index = self.state.tasks.push(task.clone());
        debug!(index, title = %task.title, "quest added");

        self.save();
        Ok(task)
    }

    /// Replace title, description and reward type; keep status and timestamp
    pub fn edit_task(
        &mut self,
        index: usize,
        title: &str,
        description: &str,
        reward_type: &str,
    ) -> Result<Task> {
        self.state.tasks.get_or_err(index)?;
        let title = validate_title(title)?;
        let reward_type: RewardType = reward_type.parse()?;

        let task = self.state.tasks.get_mut_or_err(index)?;
        task.title = title;
        task.description = description.trim().to_string();
        task.reward_type = reward_type;
        let edited = task.clone();
        debug!(index, title = %edited.title, "quest edited");

        self.save();
        Ok(edited)
    }

    /// Remove a quest; later quests move up one position
    pub fn delete_task(&mut self, index: usize) -> Result<Task> {
        let removed = self.state.tasks.remove(index)?;
        debug!(index, title = %removed.title, "quest deleted");

        self.save();
        Ok(removed)
    }

    /// Mark an open quest done and grant its reward.
    ///
    /// Levels only when `level_up_on_complete` is set.
    pub fn complete_task(&mut self, index: usize) -> Result<RewardOutcome> {
        let task = self.state.tasks.get_mut_or_err(index)?;
        if task.completed {
            return Err(CoreError::invalid_state(format!(
                "quest '{}' is already completed",
                task.title
            )));
        }
        task.completed = true;
        let reward_type = task.reward_type;
        debug!(index, "quest completed");

        let check_level = self.options.level_up_on_complete;
        let outcome = self.grant(reward_type, check_level);
        self.save();
        Ok(outcome)
    }

    /// Grant a quest's reward again, then level
    pub fn repeat_task(&mut self, index: usize) -> Result<RewardOutcome> {
        let reward_type = self.state.tasks.get_or_err(index)?.reward_type;
        debug!(index, "quest repeated");

        let outcome = self.grant(reward_type, true);
        self.save();
        Ok(outcome)
    }

    /// Rename the player; blank names are ignored
    pub fn rename_player(&mut self, new_name: &str) -> &PlayerProfile {
        if self.state.profile.rename(new_name) {
            debug!(name = %self.state.profile.name, "player renamed");
            self.save();
        }
        &self.state.profile
    }

    /// Drop every quest
    pub fn clear_all_tasks(&mut self) {
        let count = self.state.tasks.len();
        self.state.tasks.clear();
        debug!(count, "all quests cleared");
        self.save();
    }

    /// Erase the saved value and start over with the starter state
    pub fn reset_all(&mut self) {
        if let Err(e) = self.backend.remove(STATE_KEY) {
            warn!(error = %e, "failed to erase saved state");
            self.warnings.push(e);
        }
        self.state = AppState::with_starter_tasks();
        info!("state reset");
        self.save();
    }

    /// Write the full state to the backend. Returns false if the write failed.
    pub fn save(&mut self) -> bool {
        let result = self
            .state
            .to_json()
            .and_then(|payload| self.backend.set(STATE_KEY, &payload));

        match result {
            Ok(()) => {
                debug!("state saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save state, keeping in-memory copy");
                self.warnings.push(e);
                false
            }
        }
    }

    fn grant(&mut self, reward_type: RewardType, check_level: bool) -> RewardOutcome {
        let reward = Reward::QUEST;
        let profile = &mut self.state.profile;
        profile.apply_reward(reward_type, reward);

        let new_level = if check_level { profile.level_up() } else { None };
        if let Some(level) = new_level {
            info!(level, "level up");
        }

        RewardOutcome {
            reward_type,
            stat_gained: reward.stat,
            xp_gained: reward.xp,
            coins_gained: reward.coins,
            leveled_up: new_level.is_some(),
            new_level,
        }
    }
}
