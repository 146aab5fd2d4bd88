//! Terminal rendering of the player and quest list
//!
//! Handles colored output; every function also has a plain form for pipes.

use chrono::Local;
use colored::*;

use questlog_core::{PlayerProfile, Reward, RewardOutcome, Task, TaskCount};

const BAR_WIDTH: usize = 20;

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Render a percentage as a fixed-width bar
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Format a quest line. `index` is the position to pass back to commands.
pub fn format_task(index: usize, task: &Task, use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };
    let reward = format!("{} +{}", task.reward_type, Reward::QUEST.stat);
    let added = task
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string();

    let mut line = if use_color {
        let title = if task.completed {
            task.title.strikethrough().dimmed().to_string()
        } else {
            task.title.bold().to_string()
        };
        format!(
            "{} {} {} {} {}",
            checkbox,
            format!("[{}]", index).cyan(),
            title,
            format!("({})", reward).magenta(),
            added.dimmed()
        )
    } else {
        format!("{} [{}] {} ({}) {}", checkbox, index, task.title, reward, added)
    };

    if !task.description.is_empty() {
        let description = if use_color {
            task.description.dimmed().to_string()
        } else {
            task.description.clone()
        };
        line.push_str(&format!("\n      {}", description));
    }

    line
}

/// Format the player card: name, level, bars and stats
pub fn format_profile(profile: &PlayerProfile, use_color: bool) -> String {
    let name = if use_color {
        profile.name.bold().to_string()
    } else {
        profile.name.clone()
    };

    let mut lines = vec![
        format!("{} (level {})", name, profile.level),
        format!(
            "XP     {} {}/100",
            progress_bar(profile.xp_progress()),
            profile.xp
        ),
        format!(
            "Coins  {} {}",
            progress_bar(profile.coin_progress()),
            profile.coins
        ),
    ];

    for (stat, value) in profile.stats.iter() {
        lines.push(format!("{:<13}{}", stat.as_str(), value));
    }

    lines.join("\n")
}

/// Format the reward notification for a completed or repeated quest
pub fn format_outcome(outcome: &RewardOutcome, use_color: bool) -> String {
    let reward = format!(
        "Reward claimed! +{} {}, +{} XP, +{} coins",
        outcome.stat_gained, outcome.reward_type, outcome.xp_gained, outcome.coins_gained
    );
    let reward = if use_color {
        reward.green().to_string()
    } else {
        reward
    };

    match outcome.new_level {
        Some(level) => {
            let level_up = format!("Level Up! You are now level {}", level);
            if use_color {
                format!("{}\n{}", reward, level_up.purple().bold())
            } else {
                format!("{}\n{}", reward, level_up)
            }
        }
        None => reward,
    }
}

/// Format a summary line for the quest list
pub fn format_summary(count: TaskCount, use_color: bool) -> String {
    let done = format!("{} done", count.completed);
    let done = if use_color {
        done.green().to_string()
    } else {
        done
    };
    format!("[{} total | {} | {}]", count.total, done, count)
}
