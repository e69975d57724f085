use clap::{Parser, Subcommand};
use nt_core::{NoteId, parse_note_id};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "nt")]
#[command(about = "nt - small offline terminal notes")]
#[command(version)]
pub struct Cli {
    /// Path to the notes database (default: per-user data directory)
    #[arg(long, global = true, env = "NT_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Note title
        title: String,

        /// Note body (read from stdin when omitted)
        body: Option<String>,
    },

    /// List notes, oldest ID first
    List {
        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,
    },

    /// Show one note
    View {
        /// ID of the note (read from stdin when omitted)
        #[arg(value_parser = parse_note_id)]
        id: Option<NoteId>,

        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,
    },

    /// Launch the interactive browser
    Tui,

    /// Print a commented default config.toml
    Config,
}
