//! Command execution shared by one-shot invocations and the shell

use std::io::{self, Write};

use questlog_core::{ProgressionStore, STATE_KEY, TaskFilter};

use crate::cli::Commands;
use crate::display::{format_outcome, format_profile, format_summary, format_task};
use crate::error::{CliError, Result};
use crate::storage::FileStore;

/// Prompt to show before a destructive command, if it needs one
pub fn confirmation_prompt(command: &Commands, store: &ProgressionStore<FileStore>) -> Option<String> {
    match command {
        Commands::Clear { force: false } => Some(format!(
            "Are you sure you want to clear all {} quests?",
            store.tasks().len()
        )),
        Commands::Reset { force: false } => {
            Some("Are you sure you want to reset? This will clear all data.".to_string())
        }
        Commands::Recover { force: false } => {
            Some("Restore state from backup? Current progress will be replaced.".to_string())
        }
        _ => None,
    }
}

/// Ask user for confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Run one command against the store and return the text to print.
///
/// Confirmation has already happened by the time this is called.
pub fn execute(
    store: &mut ProgressionStore<FileStore>,
    command: Commands,
    use_color: bool,
) -> Result<String> {
    let output = match command {
        Commands::Status => format!(
            "{}\n\nQuests {}",
            format_profile(store.profile(), use_color),
            store.task_count()
        ),

        Commands::List {
            active,
            completed,
            sort,
            no_color,
        } => {
            let use_color = use_color && !no_color;
            let filter = TaskFilter::new()
                .with_status(Commands::status_filter(active, completed))
                .sort_by(sort.into());
            let view = filter.apply(store.tasks());

            if view.is_empty() {
                "No quests found.".to_string()
            } else {
                let mut lines: Vec<String> = view
                    .iter()
                    .map(|(index, task)| format_task(*index, task, use_color))
                    .collect();
                lines.push(String::new());
                lines.push(format_summary(store.task_count(), use_color));
                lines.join("\n")
            }
        }

        Commands::Add {
            title,
            desc,
            reward,
        } => {
            let task = store.add_task(&title.join(" "), &desc.join(" "), &reward)?;
            format!(
                "Quest added: {} ({} +10) at position {}",
                task.title,
                task.reward_type,
                store.tasks().len() - 1
            )
        }

        Commands::Edit {
            index,
            title,
            desc,
            reward,
        } => {
            let current = store.task(index)?;
            let desc = desc.map_or_else(|| current.description.clone(), |words| words.join(" "));
            let reward = reward.unwrap_or_else(|| current.reward_type.to_string());

            let task = store.edit_task(index, &title.join(" "), &desc, &reward)?;
            format!("Updated quest [{}]: {} ({} +10)", index, task.title, task.reward_type)
        }

        Commands::Delete { index } => {
            let task = store.delete_task(index)?;
            format!("Deleted: {}", task.title)
        }

        Commands::Complete { index } => {
            let outcome = store.complete_task(index)?;
            format_outcome(&outcome, use_color)
        }

        Commands::Repeat { index } => {
            let outcome = store.repeat_task(index)?;
            format_outcome(&outcome, use_color)
        }

        Commands::Rename { name } => {
            let before = store.profile().name.clone();
            let after = store.rename_player(&name.join(" ")).name.clone();
            if before == after {
                "Name unchanged.".to_string()
            } else {
                format!("Renamed player:\n  From: {}\n  To:   {}", before, after)
            }
        }

        Commands::Clear { .. } => {
            let count = store.tasks().len();
            store.clear_all_tasks();
            format!("Cleared {} quest(s).", count)
        }

        Commands::Reset { .. } => {
            store.reset_all();
            format!(
                "Reset complete. Welcome, {}! {} starter quests are waiting.",
                store.profile().name,
                store.tasks().len()
            )
        }

        Commands::Recover { .. } => {
            store.backend().recover(STATE_KEY)?;
            let reopened = ProgressionStore::open_with(store.backend().clone(), store.options());
            *store = reopened;
            format!("Recovered state with {} quests.", store.tasks().len())
        }

        Commands::Shell => {
            return Err(CliError::validation("shell", "already in a shell session"));
        }
    };

    Ok(output)
}

/// Print and clear the store's non-fatal warnings
pub fn print_warnings(store: &mut ProgressionStore<FileStore>) {
    for warning in store.take_warnings() {
        eprintln!("Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SortBy;
    use questlog_core::{RewardType, StoreOptions};
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> ProgressionStore<FileStore> {
        ProgressionStore::open_with(FileStore::new(dir.path()), StoreOptions::default())
    }

    fn add(title: &str, reward: &str) -> Commands {
        Commands::Add {
            title: title.split(' ').map(String::from).collect(),
            desc: Vec::new(),
            reward: reward.to_string(),
        }
    }

    #[test]
    fn test_add_complete_repeat_flow() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        execute(&mut store, Commands::Clear { force: true }, false).unwrap();

        let out = execute(&mut store, add("Read a book", "intelligence"), false).unwrap();
        assert_eq!(out, "Quest added: Read a book (intelligence +10) at position 0");

        let out = execute(&mut store, Commands::Complete { index: 0 }, false).unwrap();
        assert_eq!(out, "Reward claimed! +10 intelligence, +10 XP, +5 coins");

        let err = execute(&mut store, Commands::Complete { index: 0 }, false).unwrap_err();
        assert!(matches!(err, CliError::InvalidState { .. }));

        execute(&mut store, Commands::Repeat { index: 0 }, false).unwrap();
        assert_eq!(store.profile().xp, 20);
        assert_eq!(store.profile().stats.intelligence, 20);
    }

    #[test]
    fn test_title_only_edit_keeps_description_and_reward() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        execute(
            &mut store,
            Commands::Add {
                title: vec!["Sing".into()],
                desc: vec!["loud".into()],
                reward: "charisma".into(),
            },
            false,
        )
        .unwrap();

        let edit = Commands::Edit {
            index: 5,
            title: vec!["Sing".into(), "well".into()],
            desc: None,
            reward: None,
        };
        let out = execute(&mut store, edit, false).unwrap();

        assert_eq!(out, "Updated quest [5]: Sing well (charisma +10)");
        let task = store.task(5).unwrap();
        assert_eq!(task.reward_type, RewardType::Charisma);
        assert_eq!(task.description, "loud");
    }

    #[test]
    fn test_edit_replaces_given_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let edit = Commands::Edit {
            index: 0,
            title: vec!["Dawn".into()],
            desc: Some(vec!["before".into(), "sunrise".into()]),
            reward: Some("creativity".into()),
        };
        execute(&mut store, edit, false).unwrap();

        let task = store.task(0).unwrap();
        assert_eq!(task.title, "Dawn");
        assert_eq!(task.description, "before sunrise");
        assert_eq!(task.reward_type, RewardType::Creativity);
    }

    #[test]
    fn test_edit_bad_index_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let edit = Commands::Edit {
            index: 7,
            title: vec!["Nope".into()],
            desc: None,
            reward: None,
        };
        let err = execute(&mut store, edit, false).unwrap_err();
        assert!(matches!(err, CliError::QuestNotFound { index: 7, len: 5 }));
    }

    #[test]
    fn test_list_filters_keep_positions() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        execute(&mut store, Commands::Complete { index: 1 }, false).unwrap();

        let out = execute(
            &mut store,
            Commands::List {
                active: false,
                completed: true,
                sort: SortBy::Insertion,
                no_color: true,
            },
            false,
        )
        .unwrap();

        assert!(out.contains("[✓] [1] Zohar"));
        assert!(!out.contains("Fajar"));
        assert!(out.contains("[5 total | 1 done | 1/5]"));
    }

    #[test]
    fn test_unknown_reward_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let err = execute(&mut store, add("Nap", "sleep"), false).unwrap_err();

        assert!(matches!(err, CliError::Validation { .. }));
        assert_eq!(store.tasks().len(), 5);
    }

    #[test]
    fn test_out_of_range_index() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let err = execute(&mut store, Commands::Delete { index: 9 }, false).unwrap_err();
        assert!(matches!(err, CliError::QuestNotFound { index: 9, len: 5 }));
    }

    #[test]
    fn test_rename_blank_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let out = execute(&mut store, Commands::Rename { name: vec![" ".into()] }, false).unwrap();
        assert_eq!(out, "Name unchanged.");
        assert_eq!(store.profile().name, "Adventurer");
    }

    #[test]
    fn test_recover_restores_previous_save() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        execute(&mut store, Commands::Delete { index: 0 }, false).unwrap();
        assert_eq!(store.tasks().len(), 4);

        let out = execute(&mut store, Commands::Recover { force: true }, false).unwrap();

        assert_eq!(out, "Recovered state with 5 quests.");
        assert_eq!(store.tasks().len(), 5);
        assert_eq!(open(&dir).tasks().len(), 5);
    }

    #[test]
    fn test_confirmation_needed_unless_forced() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        let prompt = confirmation_prompt(&Commands::Clear { force: false }, &store).unwrap();
        assert!(prompt.contains("all 5 quests"));
        assert!(confirmation_prompt(&Commands::Clear { force: true }, &store).is_none());
        assert!(confirmation_prompt(&Commands::Status, &store).is_none());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
