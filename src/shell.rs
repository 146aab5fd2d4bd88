//! Interactive session: one store, many commands, saved on a timer
//!
//! Each input line is parsed with the same grammar as the command line.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;
use tracing::info;

use questlog_core::ProgressionStore;

use crate::autosave::{AutoSaver, SharedStore};
use crate::cli::{Cli, Commands};
use crate::commands::{confirmation_prompt, execute, is_yes, print_warnings};
use crate::config::Config;
use crate::error::Result;
use crate::storage::FileStore;

/// Run the shell on stdin until `quit` or end of input
pub async fn run(file_store: FileStore, config: &Config, use_color: bool) -> Result<()> {
    let store = Arc::new(Mutex::new(ProgressionStore::open_with(
        file_store,
        config.store_options(),
    )));
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    println!("Questlog shell. Type 'help' for commands, 'quit' to leave.");
    run_session(store, input, config, use_color).await
}

/// Drive a session from any line source.
///
/// The auto-save timer is stopped before the final save, so nothing is
/// written once this returns.
pub async fn run_session<R>(
    store: SharedStore<FileStore>,
    input: R,
    config: &Config,
    use_color: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let saver = config
        .autosave_interval()
        .map(|period| AutoSaver::spawn(store.clone(), period));
    print_warnings(&mut *store.lock().await);

    let mut lines = input.lines();
    let result = command_loop(&store, &mut lines, use_color).await;

    if let Some(saver) = saver {
        let saves = saver.shutdown().await;
        info!(saves, "session auto-saves");
    }

    let mut locked = store.lock().await;
    locked.save();
    print_warnings(&mut locked);
    result
}

async fn command_loop<R>(
    store: &SharedStore<FileStore>,
    lines: &mut Lines<R>,
    use_color: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };

        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            _ => {}
        }

        let command = match parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                // also covers `help` and `--help`
                println!("{}", e);
                continue;
            }
        };

        if command == Commands::Shell {
            println!("Already in a shell.");
            continue;
        }

        let prompt = confirmation_prompt(&command, &*store.lock().await);
        if let Some(prompt) = prompt {
            print!("{} [y/N] ", prompt);
            io::stdout().flush()?;
            let answer = lines.next_line().await?.unwrap_or_default();
            if !is_yes(&answer) {
                println!("Cancelled.");
                continue;
            }
        }

        let mut locked = store.lock().await;
        match execute(&mut locked, command, use_color) {
            Ok(output) => println!("{}", output),
            Err(e) => println!("Error: {}", e),
        }
        print_warnings(&mut locked);
    }
}

/// Parse a shell line with the command-line grammar
fn parse_line(line: &str) -> std::result::Result<Commands, clap::Error> {
    let words = std::iter::once("questlog").chain(line.split_whitespace());
    Cli::try_parse_from(words).map(|cli| cli.command)
}
