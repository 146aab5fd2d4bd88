use clap::{Parser, Subcommand, ValueEnum};

use questlog_core::{TaskSort, TaskStatusFilter};

#[derive(Parser, Debug)]
#[command(name = "questlog")]
#[command(about = concat!(
    ">>==============================<<\n",
    "||   Q U E S T   L O G   +10 XP ||\n",
    ">>==============================<<\n",
    "~Level up by getting things done~"
))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    Insertion,
    Newest,
    Oldest,
    Reward,
}

impl From<SortBy> for TaskSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Insertion => TaskSort::Insertion,
            SortBy::Newest => TaskSort::Newest,
            SortBy::Oldest => TaskSort::Oldest,
            SortBy::Reward => TaskSort::Reward,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Shows the player card and quest count
    Status,

    /// Lists quests with their positions
    List {
        /// Show only quests not yet completed
        #[arg(long, conflicts_with = "completed")]
        active: bool,
        /// Show only completed quests
        #[arg(long)]
        completed: bool,
        /// Display order
        #[arg(long, value_enum, default_value = "insertion")]
        sort: SortBy,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Adds a quest
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Longer description of the quest
        #[arg(long, short = 'd', num_args = 1.., value_name = "TEXT")]
        desc: Vec<String>,
        /// Skill the quest rewards: strength, intelligence, charisma or creativity
        #[arg(long, short = 'r', default_value = "strength", value_name = "SKILL")]
        reward: String,
    },

    /// Changes a quest's title, and optionally its description and reward skill
    Edit {
        index: usize,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// New description, kept as is when omitted
        #[arg(long, short = 'd', num_args = 1.., value_name = "TEXT")]
        desc: Option<Vec<String>>,
        /// New reward skill, kept as is when omitted
        #[arg(long, short = 'r', value_name = "SKILL")]
        reward: Option<String>,
    },

    /// Deletes a quest
    Delete { index: usize },

    /// Completes a quest and claims its reward
    Complete { index: usize },

    /// Claims a quest's reward again
    Repeat { index: usize },

    /// Renames the player
    Rename {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Removes every quest
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Resets the player and quests to a fresh start
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Restores the state saved before the last write
    Recover {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Opens an interactive session with auto-save
    Shell,
}

impl Commands {
    /// Status filter selected by `list` flags
    pub fn status_filter(active: bool, completed: bool) -> TaskStatusFilter {
        if active {
            TaskStatusFilter::Active
        } else if completed {
            TaskStatusFilter::Completed
        } else {
            TaskStatusFilter::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("questlog").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_add_with_desc_and_reward() {
        let cmd = parse(&["add", "Read", "a", "book", "--desc", "30", "min", "-r", "intelligence"]);
        assert_eq!(
            cmd,
            Commands::Add {
                title: vec!["Read".into(), "a".into(), "book".into()],
                desc: vec!["30".into(), "min".into()],
                reward: "intelligence".into(),
            }
        );
    }

    #[test]
    fn test_parse_add_defaults_to_strength() {
        match parse(&["add", "Pushups"]) {
            Commands::Add { reward, desc, .. } => {
                assert_eq!(reward, "strength");
                assert!(desc.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_leaves_omitted_fields_unset() {
        assert_eq!(
            parse(&["edit", "5", "Sing", "well"]),
            Commands::Edit {
                index: 5,
                title: vec!["Sing".into(), "well".into()],
                desc: None,
                reward: None,
            }
        );
        match parse(&["edit", "0", "Run", "-r", "charisma"]) {
            Commands::Edit { desc, reward, .. } => {
                assert_eq!(desc, None);
                assert_eq!(reward.as_deref(), Some("charisma"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_flags() {
        assert_eq!(
            parse(&["list", "--completed", "--sort", "newest"]),
            Commands::List {
                active: false,
                completed: true,
                sort: SortBy::Newest,
                no_color: false,
            }
        );
        assert!(Cli::try_parse_from(["questlog", "list", "--active", "--completed"]).is_err());
    }

    #[test]
    fn test_repeat_help_allows_active_quests() {
        use clap::CommandFactory;

        let cli = Cli::command();
        let about = cli
            .find_subcommand("repeat")
            .and_then(|cmd| cmd.get_about())
            .map(|about| about.to_string());
        assert_eq!(about.as_deref(), Some("Claims a quest's reward again"));
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(Commands::status_filter(true, false), TaskStatusFilter::Active);
        assert_eq!(Commands::status_filter(false, false), TaskStatusFilter::All);
    }
}
