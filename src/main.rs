//! Clippal - command palette for a clipboard history manager.
//!
//! This binary hosts the palette from the shell: it wires a settings file
//! and a few host callbacks into the engine, then lists, searches or runs
//! commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use clippal::commands::{
    CommandAction, CommandCategory, CommandHandlers, CommandRegistry, CommandResult,
    ExecutionContext,
};
use clippal::config::FileSettingsStore;
use clippal::{logging, AppError};

/// Sigil that switches the host's search field into command mode.
const COMMAND_PREFIX: char = '>';

#[derive(Debug, Parser)]
#[command(name = "clippal", version, about = "Clipboard history command palette")]
struct Cli {
    /// Settings file to write to (defaults to the config directory).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Also print debug logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Page opened by the "release notes" command.
    #[arg(long, global = true, env = "CLIPPAL_RELEASE_NOTES_URL")]
    release_notes_url: Option<String>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List every command, grouped by category.
    List,
    /// Show commands matching a query, best match first.
    Search {
        query: String,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run the best match for a query.
    Run {
        query: String,
        /// Confirm destructive commands without asking.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = dispatch(cli).await;
    logging::shutdown();
    result
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let registry = CommandRegistry::new();

    match cli.command {
        Action::List => {
            print_catalog(&registry);
            Ok(())
        }
        Action::Search { query, json } => {
            let results = registry.search(strip_prefix(&query));
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for cmd in &results {
                    println!("{:<20} {}", cmd.trigger, cmd.description);
                }
            }
            Ok(())
        }
        Action::Run { query, yes } => {
            let store = open_settings(cli.settings).map_err(report)?;
            let ctx = ExecutionContext::new(
                host_handlers(store.path().to_path_buf(), cli.release_notes_url),
                Arc::new(store),
            );
            run(&registry, &ctx, strip_prefix(&query), yes)
                .await
                .map_err(report)
        }
    }
}

fn strip_prefix(query: &str) -> &str {
    let query = query.trim_start();
    query.strip_prefix(COMMAND_PREFIX).unwrap_or(query)
}

fn report(err: AppError) -> anyhow::Error {
    warn!(error = %err, "Command failed");
    anyhow::anyhow!(err.user_message())
}

fn open_settings(path: Option<PathBuf>) -> clippal::Result<FileSettingsStore> {
    let store = match path {
        Some(path) => FileSettingsStore::open(path)?,
        None => FileSettingsStore::open_default()?,
    };
    Ok(store)
}

fn host_handlers(settings_path: PathBuf, release_notes_url: Option<String>) -> CommandHandlers {
    CommandHandlers::new()
        .on_open_settings(move || println!("Settings file: {}", settings_path.display()))
        .on_check_for_updates(|| println!("Running clippal {}", env!("CARGO_PKG_VERSION")))
        .on_open_release_notes(move || match &release_notes_url {
            Some(url) => {
                if let Err(e) = open::that(url) {
                    warn!(url = %url, error = %e, "Failed to open release notes");
                }
            }
            None => println!("No release notes URL configured"),
        })
        .on_quit(|| info!("Quit requested"))
        .on_open_main_window(|content_type| match content_type {
            Some(content_type) => println!("Showing {}", content_type.display().to_lowercase()),
            None => println!("Showing all entries"),
        })
}

async fn run(
    registry: &CommandRegistry,
    ctx: &ExecutionContext,
    query: &str,
    yes: bool,
) -> clippal::Result<()> {
    let results = registry.search(query);
    let Some(command) = results.first() else {
        return Err(AppError::other(format!("No command matches '{}'", query)));
    };

    info!(id = %command.id, "Running command");
    let mut result = ctx.execute(command).await;

    if let CommandResult::NeedsConfirmation { message, confirm } = &result {
        if !yes {
            println!("{}", message);
            println!("Re-run with --yes to confirm.");
            return Ok(());
        }
        let confirm = confirm.clone();
        result = ctx.run(&confirm).await;
    }

    match result {
        CommandResult::Success(message) => {
            println!("{}", message);
            if command.action == CommandAction::ShowHelp {
                print_catalog(registry);
            }
        }
        CommandResult::Error(message) => return Err(AppError::other(message)),
        CommandResult::OpenMainWindow(content_type) => ctx.open_main_window(content_type),
        CommandResult::NeedsConfirmation { message, .. } => println!("{}", message),
        CommandResult::Dismissed => {}
    }

    Ok(())
}

fn print_catalog(registry: &CommandRegistry) {
    for category in CommandCategory::ALL {
        println!("{}", category.display());
        for cmd in registry.commands().iter().filter(|c| c.category == category) {
            let marker = if cmd.is_destructive { " (!)" } else { "" };
            println!("  {:<20} {}{}", cmd.trigger, cmd.description, marker);
        }
    }
}
