use anyhow::Result;
use chrono::SecondsFormat;
use console::style;
use nt_core::{Note, NoteId};

use crate::context::Context;

/// Print one note, or fail with a non-zero exit when it doesn't exist
pub fn handle(ctx: &Context, id: NoteId, json: bool) -> Result<()> {
    let note = ctx.store.get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("{}", render(&note));
    }

    Ok(())
}

fn render(note: &Note) -> String {
    format!(
        "{} {}\n{} {}\n{} {}\n\n{}",
        style("ID:").bold(),
        note.id,
        style("Title:").bold(),
        note.title,
        style("Date:").bold(),
        note.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        note.body
    )
}
