use clap::Parser;
use tracing_subscriber::EnvFilter;

use questlog_core::ProgressionStore;

use crate::cli::{Cli, Commands};
use crate::commands::{confirm, confirmation_prompt, execute, print_warnings};
use crate::config::Config;
use crate::display::supports_color;
use crate::error::Result;
use crate::storage::FileStore;

mod autosave;
mod cli;
mod commands;
mod config;
mod display;
mod error;
mod shell;
mod storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = Config::load()?;
    let use_color = cfg.color && supports_color();
    let file_store = FileStore::new(&cfg.data_directory);
    tracing::debug!(dir = %file_store.dir().display(), "using data directory");

    if let Commands::Shell = cli.command {
        return shell::run(file_store, &cfg, use_color).await;
    }

    let mut store = ProgressionStore::open_with(file_store, cfg.store_options());
    print_warnings(&mut store);

    if let Some(prompt) = confirmation_prompt(&cli.command, &store)
        && !confirm(&prompt)?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let result = execute(&mut store, cli.command, use_color);
    print_warnings(&mut store);
    println!("{}", result?);

    Ok(())
}

/// Log to stderr. `QUESTLOG_LOG` sets the filter; `--verbose` forces debug.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("QUESTLOG_LOG").unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
