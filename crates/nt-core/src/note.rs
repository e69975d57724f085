// crates/nt-core/src/note.rs - The Note record and its identifier
//
// A note is the only thing nt persists. IDs are handed out by the store
// (see store.rs) and are never reused, so an ID is a stable handle for the
// lifetime of a note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier assigned by the store. Starts at 1 and only ever grows.
pub type NoteId = u64;

/// Errors produced when a user-supplied note ID cannot be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoteIdError {
    #[error("Empty note ID")]
    Empty,

    #[error("Invalid note ID '{0}': expected a positive whole number")]
    NotANumber(String),

    #[error("Invalid note ID '0': IDs start at 1")]
    Zero,
}

/// A single persisted note
///
/// The serialized form is self-describing: `id` is duplicated inside the
/// payload even though the store also keys records by it.
///
/// JSON SHAPE:
/// ```json
/// {"id":1,"title":"Buy milk","body":"2% milk, 1 gal",
///  "created_at":"2024-05-01T09:30:00Z","completed":false}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Set once by the store when the note is added
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl Note {
    /// Build a fresh, not-yet-completed note
    pub fn new(id: NoteId, title: &str, body: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.to_string(),
            body: body.to_string(),
            created_at,
            completed: false,
        }
    }

    /// Flip the completion flag in place
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// True when neither title nor body carries any visible text
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    /// Storage key for this note
    pub fn key(&self) -> [u8; 8] {
        encode_key(self.id)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}

/// Title used when the user only typed a body: its first line as typed
pub fn title_from_body(body: &str) -> String {
    body.lines().next().unwrap_or("").to_string()
}

/// Parse a user-supplied note ID
///
/// Accepts surrounding whitespace (IDs often arrive through pipes with a
/// trailing newline). Rejects 0 because the store never issues it.
pub fn parse_note_id(input: &str) -> Result<NoteId, NoteIdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NoteIdError::Empty);
    }

    let id: NoteId = trimmed
        .parse()
        .map_err(|_| NoteIdError::NotANumber(trimmed.to_string()))?;

    if id == 0 {
        return Err(NoteIdError::Zero);
    }

    Ok(id)
}

/// Encode an ID as the 8-byte big-endian key used by the notes table
///
/// Big-endian keys sort bytewise in the same order as the numbers, so an
/// ordered scan over keys yields ascending IDs.
pub fn encode_key(id: NoteId) -> [u8; 8] {
    id.to_be_bytes()
}

/// Decode a key produced by [`encode_key`]; `None` if it is not 8 bytes
pub fn decode_key(bytes: &[u8]) -> Option<NoteId> {
    let array: [u8; 8] = bytes.try_into().ok()?;
    Some(NoteId::from_be_bytes(array))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_note_id() {
        assert_eq!(parse_note_id("1"), Ok(1));
        assert_eq!(parse_note_id(" 42\n"), Ok(42));
        assert_eq!(parse_note_id(""), Err(NoteIdError::Empty));
        assert_eq!(parse_note_id("   "), Err(NoteIdError::Empty));
        assert_eq!(parse_note_id("0"), Err(NoteIdError::Zero));
        assert_eq!(
            parse_note_id("abc"),
            Err(NoteIdError::NotANumber("abc".to_string()))
        );
        assert!(parse_note_id("-3").is_err());
        assert!(parse_note_id("18446744073709551616").is_err());
    }

    #[test]
    fn test_key_encoding_sorts_numerically() {
        assert_eq!(encode_key(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(encode_key(256), [0, 0, 0, 0, 0, 0, 1, 0]);
        assert!(encode_key(2) < encode_key(10));
        assert!(encode_key(255) < encode_key(256));
        assert_eq!(decode_key(&encode_key(u64::MAX)), Some(u64::MAX));
        assert_eq!(decode_key(&[1, 2, 3]), None);
    }

    #[test]
    fn test_title_from_body() {
        assert_eq!(title_from_body("first line\nsecond"), "first line");
        assert_eq!(title_from_body("  padded  \r\nnext"), "  padded  ");
        assert_eq!(title_from_body("\nsecond"), "");
        assert_eq!(title_from_body(""), "");
    }

    #[test]
    fn test_serialized_shape() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let note = Note::new(7, "Buy milk", "2% milk, 1 gal", created);
        let json: serde_json::Value = serde_json::to_value(&note).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["created_at"], "2024-05-01T09:30:00Z");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn test_toggle_and_blank() {
        let mut note = Note::new(1, "", " \n", Utc::now());
        assert!(note.is_blank());
        note.toggle_completed();
        assert!(note.completed);
        note.toggle_completed();
        assert!(!note.completed);
    }
}
