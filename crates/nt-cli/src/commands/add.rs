use anyhow::Result;
use console::style;
use tracing::debug;

use crate::context::Context;

/// Create a note and report its assigned ID
pub fn handle(ctx: &mut Context, title: &str, body: &str) -> Result<()> {
    let note = ctx.store.add(title, body)?;
    debug!(id = note.id, db = %ctx.db_path().display(), "note added");

    println!("Added note {}: {}", style(note.id).bold(), note.title);
    Ok(())
}
