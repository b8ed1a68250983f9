//! Persistence and the note collection.
//!
//! Storage is a flat key-value surface with two logical keys: the serialized
//! note collection and the theme flag. The `NoteStore` owns the authoritative
//! in-memory collection and rewrites the whole blob on every mutation; readers
//! tolerate absent or malformed state by degrading to empty defaults.

use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use chrono::Utc;
use log::{debug, info, trace, warn};
use tempfile::NamedTempFile;

use crate::{MemoError, Note, NoteDraft, NotePatch, Result};

/// Key under which the serialized note collection is stored.
pub const NOTES_KEY: &str = "notes";

/// Key under which the dark-mode flag is stored, as "true"/"false".
pub const THEME_KEY: &str = "dark_mode";

/// The persistence port: a single mutable slot per logical key, written and
/// read wholesale.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed key-value store: one file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the data directory if needed.
    pub fn open(dir: PathBuf) -> Result<Self> {
        if !dir.exists() {
            debug!("Data directory does not exist, creating: {}", dir.display());
            fs::create_dir_all(&dir)
                .map_err(|_| MemoError::DirectoryError { path: dir.clone() })?;
        }
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MemoError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        trace!("Writing key '{}' to {}", key, path.display());

        // Write to a temporary file in the same directory, then move it into
        // place so a crash mid-write cannot leave a truncated blob.
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&path).map_err(|e| MemoError::Io(e.error))?;

        Ok(())
    }
}

/// In-memory key-value store for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Color theme persisted alongside the notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Single source of truth for the note collection.
///
/// Notes are kept newest-first: `add` prepends. Every mutation rewrites the
/// serialized collection through the key-value port before returning.
pub struct NoteStore<S: KeyValueStore> {
    kv: S,
    notes: Vec<Note>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Opens the store, loading the persisted collection.
    ///
    /// Absent or malformed persisted state degrades to an empty collection;
    /// this constructor never fails on bad data.
    pub fn open(kv: S) -> Self {
        let notes = match kv.get(NOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => {
                    info!("Loaded {} notes", notes.len());
                    notes
                }
                Err(e) => {
                    warn!("Malformed note collection, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No persisted notes found, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read note collection, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { kv, notes }
    }

    /// All notes in display order (newest first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the note with the given id, if present.
    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Creates a note from a draft and persists the collection.
    ///
    /// A draft whose content is empty after trimming is rejected silently:
    /// nothing is created, nothing is written, and `Ok(None)` is returned.
    pub fn add(&mut self, draft: NoteDraft) -> Result<Option<i64>> {
        if draft.content.trim().is_empty() {
            debug!("Rejected draft with blank content");
            return Ok(None);
        }

        let id = self.fresh_id();
        let note = Note::new(id, draft);
        self.notes.insert(0, note);
        self.persist()?;

        info!("Note created: {}", id);
        Ok(Some(id))
    }

    /// Applies a partial update to the note with the given id.
    ///
    /// The pre-patch content is appended to `versions` on every successful
    /// update, even when the patch does not touch `content`. Returns
    /// `Ok(false)` without mutating anything when the id is unknown.
    pub fn update(&mut self, id: i64, patch: NotePatch) -> Result<bool> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            warn!("Cannot update note {}: not found", id);
            return Ok(false);
        };

        let snapshot = note.content.clone();
        note.versions.push(snapshot);

        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(tags) = patch.tags {
            note.tags = tags;
        }
        if let Some(attachment) = patch.attachment {
            note.attachment = attachment;
        }
        if let Some(reminder) = patch.reminder {
            note.reminder = reminder;
        }
        note.updated_at = Utc::now();

        self.persist()?;
        info!("Note updated: {}", id);
        Ok(true)
    }

    /// Removes the note with the given id.
    ///
    /// Returns `Ok(false)` without writing when the id is unknown.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);

        if self.notes.len() == before {
            warn!("Cannot delete note {}: not found", id);
            return Ok(false);
        }

        self.persist()?;
        info!("Note deleted: {}", id);
        Ok(true)
    }

    /// Reads the persisted theme; absent or malformed state means light mode.
    pub fn load_theme(&self) -> Theme {
        match self.kv.get(THEME_KEY) {
            Ok(Some(flag)) if flag.trim() == "true" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                warn!("Failed to read theme flag, using light: {}", e);
                Theme::Light
            }
        }
    }

    /// Persists the theme flag.
    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        let flag = match theme {
            Theme::Dark => "true",
            Theme::Light => "false",
        };
        self.kv.set(THEME_KEY, flag)
    }

    /// Next unique id: the current millisecond timestamp, bumped past the
    /// largest existing id so ids stay unique and non-decreasing even when
    /// two notes are created within the same millisecond.
    fn fresh_id(&self) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        let max_existing = self.notes.iter().map(|n| n.id).max().unwrap_or(0);
        candidate.max(max_existing + 1)
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.notes)?;
        self.kv.set(NOTES_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(content: &str, tags: &[&str]) -> NoteDraft {
        NoteDraft {
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn add_grows_collection_with_empty_versions() {
        let mut store = NoteStore::open(MemoryStore::new());
        let id = store.add(draft("buy milk", &["errand"])).unwrap().unwrap();

        assert_eq!(store.notes().len(), 1);
        let note = store.get(id).unwrap();
        assert!(id > 0);
        assert!(note.versions.is_empty());
        assert_eq!(note.content, "buy milk");
    }

    #[test]
    fn blank_draft_is_a_silent_no_op() {
        let mut store = NoteStore::open(MemoryStore::new());
        assert!(store.add(draft("   \n\t", &[])).unwrap().is_none());
        assert!(store.notes().is_empty());
        // nothing must have been written either
        assert!(store.kv.get(NOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn newest_note_comes_first() {
        let mut store = NoteStore::open(MemoryStore::new());
        store.add(draft("older", &[])).unwrap();
        store.add(draft("newer", &[])).unwrap();

        assert_eq!(store.notes()[0].content, "newer");
        assert_eq!(store.notes()[1].content, "older");
    }

    #[test]
    fn ids_are_unique_and_non_decreasing() {
        let mut store = NoteStore::open(MemoryStore::new());
        let first = store.add(draft("a", &[])).unwrap().unwrap();
        let second = store.add(draft("b", &[])).unwrap().unwrap();
        let third = store.add(draft("c", &[])).unwrap().unwrap();

        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn update_snapshots_pre_patch_content() {
        let mut store = NoteStore::open(MemoryStore::new());
        let id = store.add(draft("buy milk", &["errand"])).unwrap().unwrap();

        let found = store
            .update(
                id,
                NotePatch {
                    content: Some("buy milk and eggs".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(found);
        let note = store.get(id).unwrap();
        assert_eq!(note.content, "buy milk and eggs");
        assert_eq!(note.versions, vec!["buy milk".to_string()]);
    }

    #[test]
    fn metadata_only_update_still_records_a_revision() {
        let mut store = NoteStore::open(MemoryStore::new());
        let id = store.add(draft("meeting notes", &[])).unwrap().unwrap();

        store
            .update(
                id,
                NotePatch {
                    reminder: Some(Some("2026-09-01T09:00".into())),
                    ..Default::default()
                },
            )
            .unwrap();

        let note = store.get(id).unwrap();
        assert_eq!(note.versions, vec!["meeting notes".to_string()]);
        assert_eq!(note.reminder.as_deref(), Some("2026-09-01T09:00"));
        assert_eq!(note.content, "meeting notes");
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut store = NoteStore::open(MemoryStore::new());
        let id = store
            .add(NoteDraft {
                content: "with extras".into(),
                attachment: Some("data:image/png;base64,AAAA".into()),
                reminder: Some("2026-09-01T09:00".into()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        store
            .update(
                id,
                NotePatch {
                    attachment: Some(None),
                    reminder: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        let note = store.get(id).unwrap();
        assert!(note.attachment.is_none());
        assert!(note.reminder.is_none());
        assert_eq!(note.versions.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut store = NoteStore::open(MemoryStore::new());
        store.add(draft("only note", &[])).unwrap();

        let found = store
            .update(
                9999,
                NotePatch {
                    content: Some("ghost".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!found);
        assert_eq!(store.notes()[0].content, "only note");
        assert!(store.notes()[0].versions.is_empty());
    }

    #[test]
    fn delete_removes_exactly_the_target() {
        let mut store = NoteStore::open(MemoryStore::new());
        let keep = store.add(draft("keep me", &[])).unwrap().unwrap();
        let gone = store.add(draft("delete me", &[])).unwrap().unwrap();

        assert!(store.delete(gone).unwrap());
        assert_eq!(store.notes().len(), 1);
        assert!(store.get(keep).is_some());

        assert!(!store.delete(gone).unwrap());
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn full_lifecycle_scenario() {
        let mut store = NoteStore::open(MemoryStore::new());

        let id = store
            .add(NoteDraft {
                content: "buy milk".into(),
                tags: vec!["errand".into()],
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(store.notes().len(), 1);
        assert!(store.get(id).unwrap().versions.is_empty());

        store
            .update(
                id,
                NotePatch {
                    content: Some("buy milk and eggs".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.get(id).unwrap().versions, vec!["buy milk".to_string()]);
        assert_eq!(store.get(id).unwrap().content, "buy milk and eggs");

        store.delete(id).unwrap();
        assert!(store.notes().is_empty());
    }

    #[test]
    fn collection_round_trips_through_the_blob() {
        let mut kv = MemoryStore::new();
        {
            let mut store = NoteStore::open(std::mem::take(&mut kv));
            let id = store.add(draft("first", &["home", "urgent"])).unwrap().unwrap();
            store
                .update(
                    id,
                    NotePatch {
                        content: Some("first, revised".into()),
                        attachment: Some(Some("data:image/png;base64,AAAA".into())),
                        ..Default::default()
                    },
                )
                .unwrap();
            store.add(draft("second", &["work"])).unwrap();
            kv = store.kv;
        }

        let original: Vec<Note> =
            serde_json::from_str(&kv.get(NOTES_KEY).unwrap().unwrap()).unwrap();
        let reloaded = NoteStore::open(kv);

        assert_eq!(reloaded.notes(), &original[..]);
        assert_eq!(reloaded.notes()[1].versions, vec!["first".to_string()]);
        assert_eq!(reloaded.notes()[1].tags, vec!["home", "urgent"]);
    }

    #[test]
    fn malformed_blob_degrades_to_empty() {
        let mut kv = MemoryStore::new();
        kv.set(NOTES_KEY, "{not json at all").unwrap();

        let store = NoteStore::open(kv);
        assert!(store.notes().is_empty());
    }

    #[test]
    fn theme_round_trip_and_default() {
        let mut store = NoteStore::open(MemoryStore::new());
        assert_eq!(store.load_theme(), Theme::Light);

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme(), Theme::Dark);

        store.save_theme(Theme::Light).unwrap();
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn malformed_theme_flag_defaults_to_light() {
        let mut kv = MemoryStore::new();
        kv.set(THEME_KEY, "sideways").unwrap();
        let store = NoteStore::open(kv);
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn file_store_round_trips_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut fs_store = FileStore::open(dir.path().to_path_buf()).unwrap();

        assert!(fs_store.get("notes").unwrap().is_none());
        fs_store.set("notes", "[]").unwrap();
        assert_eq!(fs_store.get("notes").unwrap().as_deref(), Some("[]"));

        fs_store.set("notes", "[1]").unwrap();
        assert_eq!(fs_store.get("notes").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let fs_store = FileStore::open(dir.path().to_path_buf()).unwrap();
            let mut store = NoteStore::open(fs_store);
            store.add(draft("persisted", &["disk"])).unwrap().unwrap()
        };

        let fs_store = FileStore::open(dir.path().to_path_buf()).unwrap();
        let store = NoteStore::open(fs_store);
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.get(id).unwrap().content, "persisted");
    }
}
