// crates/nt-cli/src/main.rs - CLI Application Entry Point
//
// `nt` keeps short notes in a single local database file. Every subcommand
// opens the store, does one thing and exits; `nt tui` keeps the store open
// for an interactive session.
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │ (main function)  │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │   nt-core store     │
//                        │ (store + config) │    │ (one file, locked)  │
//                        └──────────────────┘    └─────────────────────┘
//
// STARTUP ORDER:
// 1. Parse arguments (bad IDs are rejected here by clap)
// 2. Load config.toml and resolve the database path
// 3. Install the tracing subscriber
// 4. Read any stdin-supplied argument before the store is opened
// 5. Open the store and dispatch
//
// EXAMPLE USAGE:
// ```bash
// nt add "Buy milk" "2% milk, 1 gal"     # Added note 1: Buy milk
// nt list                                # 1<TAB>2024-05-17<TAB>Buy milk
// nt list | cut -f1 | tail -1 | nt view  # ID from stdin
// nt --db ~/work.db tui                  # Browse another database
// nt config > ~/.config/nt/config.toml   # Start from the defaults
// ```

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use nt_core::{ConfigManager, parse_note_id, paths};
use tracing::debug;

mod cli; // Command-line interface definitions (pure data structures)
mod commands; // Command implementations
mod context; // Open store + configuration handed to commands
mod logging; // tracing subscriber setup
mod stdin; // Argument-or-stdin input
mod tui; // Interactive browser

use cli::{Cli, Commands};
use context::Context;
use logging::LogTarget;

/// Commands after stdin-supplied arguments have been resolved
enum Resolved {
    Add { title: String, body: String },
    List { json: bool },
    View { id: nt_core::NoteId, json: bool },
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Needs neither config nor store
    if let Commands::Config = cli.command {
        return commands::config::handle();
    }

    let config = ConfigManager::load_config().context("Failed to load configuration")?;
    let db_path = paths::resolve_db_path(cli.db.as_deref(), &config)
        .context("Failed to resolve the notes database path")?;

    // The browser owns the terminal, so its logs go next to the database
    let target = match cli.command {
        Commands::Tui => LogTarget::File(logging::log_path_for(&db_path)),
        _ => LogTarget::Stderr,
    };
    logging::init(target)?;
    debug!(db = %db_path.display(), "starting");

    // Invalid stdin input must fail before the database is touched
    let command = resolve(cli.command)?;

    let mut ctx = Context::open(db_path, config)?;

    match command {
        Resolved::Add { title, body } => commands::add::handle(&mut ctx, &title, &body),
        Resolved::List { json } => commands::list::handle(&ctx, json),
        Resolved::View { id, json } => commands::view::handle(&ctx, id, json),
        Resolved::Tui => commands::tui::handle(&mut ctx),
    }
}

fn resolve(command: Commands) -> Result<Resolved> {
    Ok(match command {
        Commands::Add { title, body } => Resolved::Add {
            body: stdin::read_input_or_stdin(body.as_deref())?,
            title,
        },
        Commands::List { json } => Resolved::List { json },
        Commands::View { id, json } => {
            let id = match id {
                Some(id) => id,
                None => {
                    let raw = stdin::read_input_or_stdin(None)?;
                    parse_note_id(&raw).with_context(|| format!("Invalid note ID: {raw:?}"))?
                }
            };
            Resolved::View { id, json }
        }
        Commands::Tui => Resolved::Tui,
        Commands::Config => unreachable!(), // Already handled in main
    })
}
