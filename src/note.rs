//! Core data structures for the memostash application.
//!
//! This module contains the primary types used throughout the application:
//! the Note record plus the draft and patch shapes that feed the store.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MemoError, Result};

/// Format accepted for reminder strings, matching an HTML
/// `datetime-local` value.
pub const REMINDER_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, derived from the creation timestamp
    pub id: i64,
    /// Note content in Markdown format
    pub content: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Optional embedded image as a data URL
    pub attachment: Option<String>,
    /// Optional reminder as a local datetime string
    pub reminder: Option<String>,
    /// Content snapshots taken immediately before each update
    pub versions: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note from a draft, with the given unique id.
    pub fn new(id: i64, draft: NoteDraft) -> Self {
        let now = Utc::now();
        Note {
            id,
            content: draft.content,
            tags: draft.tags,
            attachment: draft.attachment,
            reminder: draft.reminder,
            versions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The field values a user is editing before a save commits them.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub content: String,
    pub tags: Vec<String>,
    pub attachment: Option<String>,
    pub reminder: Option<String>,
}

/// A partial update applied to an existing note.
///
/// `attachment` and `reminder` are replaced wholesale: `Some(None)` clears
/// the field, `Some(Some(..))` replaces it, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub attachment: Option<Option<String>>,
    pub reminder: Option<Option<String>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.tags.is_none()
            && self.attachment.is_none()
            && self.reminder.is_none()
    }
}

/// Parses a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Validates a reminder string against [`REMINDER_FORMAT`].
///
/// The value is stored as an opaque string; validation only happens at the
/// input boundary.
pub fn validate_reminder(value: &str) -> Result<()> {
    NaiveDateTime::parse_from_str(value, REMINDER_FORMAT)
        .map(|_| ())
        .map_err(|_| MemoError::InvalidReminder {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_starts_with_empty_versions() {
        let note = Note::new(
            1,
            NoteDraft {
                content: "buy milk".into(),
                tags: vec!["errand".into()],
                ..Default::default()
            },
        );
        assert!(note.versions.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        let tags = parse_tags(Some(" work , , urgent,,  home ".to_string()));
        assert_eq!(tags, vec!["work", "urgent", "home"]);
    }

    #[test]
    fn parse_tags_keeps_duplicates_and_order() {
        let tags = parse_tags(Some("a,b,a".to_string()));
        assert_eq!(tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn parse_tags_none_is_empty() {
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn reminder_validation() {
        assert!(validate_reminder("2026-08-25T14:30").is_ok());
        assert!(validate_reminder("tomorrow").is_err());
        assert!(validate_reminder("2026-08-25").is_err());
    }
}
