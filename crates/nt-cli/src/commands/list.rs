use anyhow::Result;
use nt_core::Note;

use crate::context::Context;

/// List every note, oldest ID first
///
/// Plain output is one `id<TAB>date<TAB>title` line per note so it can be
/// fed to `cut`, `sort` or `awk`. `--json` prints the stored records.
pub fn handle(ctx: &Context, json: bool) -> Result<()> {
    let mut notes = ctx.store.list()?;
    notes.sort_by_key(|note| note.id);

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    let date_format = &ctx.config().display.date_format;
    for note in &notes {
        println!("{}", format_row(note, date_format));
    }

    Ok(())
}

fn format_row(note: &Note, date_format: &str) -> String {
    format!(
        "{}\t{}\t{}",
        note.id,
        note.created_at.format(date_format),
        note.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_row() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        let note = Note::new(3, "Buy milk", "2% milk", created_at);

        assert_eq!(format_row(&note, "%Y-%m-%d"), "3\t2024-05-17\tBuy milk");
        assert_eq!(format_row(&note, "%d/%m"), "3\t17/05\tBuy milk");
    }
}
