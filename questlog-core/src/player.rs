//! Player profile, skill stats and the leveling rule

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// XP needed for one level
pub const XP_PER_LEVEL: u32 = 100;

/// Name given to a fresh profile
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// Skill a task rewards when it is completed or repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Strength,
    Intelligence,
    Charisma,
    Creativity,
}

impl RewardType {
    pub const ALL: [RewardType; 4] = [
        RewardType::Strength,
        RewardType::Intelligence,
        RewardType::Charisma,
        RewardType::Creativity,
    ];

    /// Key used in the persisted payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Charisma => "charisma",
            Self::Creativity => "creativity",
        }
    }
}

impl FromStr for RewardType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(Self::Strength),
            "intelligence" => Ok(Self::Intelligence),
            "charisma" => Ok(Self::Charisma),
            "creativity" => Ok(Self::Creativity),
            other => Err(CoreError::validation(
                "rewardType",
                format!(
                    "unknown reward type '{}' (expected strength, intelligence, charisma or creativity)",
                    other
                ),
            )),
        }
    }
}

impl std::fmt::Display for RewardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four skill counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub strength: u32,
    pub intelligence: u32,
    pub charisma: u32,
    pub creativity: u32,
}

impl Stats {
    pub fn get(&self, stat: RewardType) -> u32 {
        match stat {
            RewardType::Strength => self.strength,
            RewardType::Intelligence => self.intelligence,
            RewardType::Charisma => self.charisma,
            RewardType::Creativity => self.creativity,
        }
    }

    fn get_mut(&mut self, stat: RewardType) -> &mut u32 {
        match stat {
            RewardType::Strength => &mut self.strength,
            RewardType::Intelligence => &mut self.intelligence,
            RewardType::Charisma => &mut self.charisma,
            RewardType::Creativity => &mut self.creativity,
        }
    }

    /// Iterate stats in display order
    pub fn iter(&self) -> impl Iterator<Item = (RewardType, u32)> + '_ {
        RewardType::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }
}

/// Amounts granted by one reward application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub stat: u32,
    pub xp: u32,
    pub coins: u64,
}

impl Reward {
    /// The fixed reward every quest grants
    pub const QUEST: Reward = Reward {
        stat: 10,
        xp: 10,
        coins: 5,
    };
}

/// What a complete/repeat call granted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    pub reward_type: RewardType,
    pub stat_gained: u32,
    pub xp_gained: u32,
    pub coins_gained: u64,
    pub leveled_up: bool,
    /// Final level, set only when `leveled_up` is true
    pub new_level: Option<u32>,
}

/// The player's name and progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(rename = "playerName")]
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub stats: Stats,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            level: 0,
            xp: 0,
            coins: 0,
            stats: Stats::default(),
        }
    }
}

impl PlayerProfile {
    /// Add reward amounts to xp, coins and the given stat.
    ///
    /// Saturates instead of overflowing; no leveling happens here.
    pub fn apply_reward(&mut self, stat: RewardType, reward: Reward) {
        let counter = self.stats.get_mut(stat);
        *counter = counter.saturating_add(reward.stat);
        self.xp = self.xp.saturating_add(reward.xp);
        self.coins = self.coins.saturating_add(reward.coins);
    }

    /// Roll accumulated XP into levels.
    ///
    /// Returns the final level if at least one level was gained.
    pub fn level_up(&mut self) -> Option<u32> {
        let before = self.level;
        while self.xp >= XP_PER_LEVEL {
            self.level = self.level.saturating_add(1);
            self.xp -= XP_PER_LEVEL;
        }
        (self.level > before).then_some(self.level)
    }

    /// Replace the name with a trimmed, non-empty one. Returns false on a no-op.
    pub fn rename(&mut self, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }

    /// XP as a percentage of the next level
    pub fn xp_progress(&self) -> u32 {
        self.xp.min(XP_PER_LEVEL) * 100 / XP_PER_LEVEL
    }

    /// Coin bar fill, wraps every 100 coins
    pub fn coin_progress(&self) -> u32 {
        (self.coins % 100) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_type_parse() {
        assert_eq!("strength".parse::<RewardType>().unwrap(), RewardType::Strength);
        assert_eq!(" Charisma ".parse::<RewardType>().unwrap(), RewardType::Charisma);
        assert!(matches!(
            "luck".parse::<RewardType>(),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_reward_type_serde_key() {
        let json = serde_json::to_string(&RewardType::Creativity).unwrap();
        assert_eq!(json, "\"creativity\"");
    }

    #[test]
    fn test_apply_reward_does_not_level() {
        let mut profile = PlayerProfile {
            xp: 95,
            ..PlayerProfile::default()
        };
        profile.apply_reward(RewardType::Charisma, Reward::QUEST);

        assert_eq!(profile.xp, 105);
        assert_eq!(profile.level, 0);
        assert_eq!(profile.coins, 5);
        assert_eq!(profile.stats.charisma, 10);
        assert_eq!(profile.stats.strength, 0);
    }

    #[test]
    fn test_level_up_single() {
        let mut profile = PlayerProfile {
            xp: 105,
            level: 2,
            ..PlayerProfile::default()
        };
        assert_eq!(profile.level_up(), Some(3));
        assert_eq!(profile.xp, 5);
    }

    #[test]
    fn test_level_up_multiple_rollovers() {
        let mut profile = PlayerProfile {
            xp: 340,
            ..PlayerProfile::default()
        };
        assert_eq!(profile.level_up(), Some(3));
        assert_eq!(profile.xp, 40);
    }

    #[test]
    fn test_level_up_none_below_threshold() {
        let mut profile = PlayerProfile {
            xp: 99,
            level: 4,
            ..PlayerProfile::default()
        };
        assert_eq!(profile.level_up(), None);
        assert_eq!(profile.level, 4);
        assert_eq!(profile.xp, 99);
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut profile = PlayerProfile::default();
        assert!(!profile.rename("   "));
        assert_eq!(profile.name, DEFAULT_PLAYER_NAME);

        assert!(profile.rename("  Hero "));
        assert_eq!(profile.name, "Hero");
    }

    #[test]
    fn test_progress_bars() {
        let profile = PlayerProfile {
            xp: 42,
            coins: 235,
            ..PlayerProfile::default()
        };
        assert_eq!(profile.xp_progress(), 42);
        assert_eq!(profile.coin_progress(), 35);
    }
}
