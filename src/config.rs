//! User configuration, loaded through confy
//!
//! Missing fields fall back to defaults so older config files keep working.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use questlog_core::StoreOptions;

pub const APP_NAME: &str = "questlog";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the saved state and its backup
    pub data_directory: PathBuf,
    /// Seconds between auto-saves in the shell; 0 disables the timer
    pub autosave_interval_secs: u64,
    /// Level up on first completion too, not only when repeating
    pub level_up_on_complete: bool,
    /// Colored output when stdout is a terminal
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            autosave_interval_secs: 10,
            level_up_on_complete: false,
            color: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            level_up_on_complete: self.level_up_on_complete,
        }
    }

    pub fn autosave_interval(&self) -> Option<Duration> {
        (self.autosave_interval_secs > 0).then(|| Duration::from_secs(self.autosave_interval_secs))
    }
}

fn default_data_directory() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autosave_interval_secs, 10);
        assert!(!config.level_up_on_complete);
        assert_eq!(config.autosave_interval(), Some(Duration::from_secs(10)));
        assert!(!config.store_options().level_up_on_complete);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"level_up_on_complete": true}"#).unwrap();
        assert!(config.level_up_on_complete);
        assert_eq!(config.autosave_interval_secs, 10);
        assert!(config.color);
    }

    #[test]
    fn test_zero_interval_disables_autosave() {
        let config = Config {
            autosave_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.autosave_interval(), None);
    }
}
