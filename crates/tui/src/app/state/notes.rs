use crate::app::dialog::{NoteDraft, NoteSnapshot};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DERIVED_TITLE_MAX_CHARS: usize = 30;
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<u64>,
}

impl Note {
    pub fn snapshot(&self) -> NoteSnapshot {
        NoteSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query) || self.content.to_lowercase().contains(query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Regular,
    Private,
}

impl Partition {
    pub fn from_private(private: bool) -> Self {
        if private {
            Self::Private
        } else {
            Self::Regular
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    Empty,
    NotFound,
}

/// Both note partitions, newest first.
#[derive(Debug, Default)]
pub struct NoteStore {
    pub notes: Vec<Note>,
    pub private_notes: Vec<Note>,
}

impl NoteStore {
    pub fn partition(&self, partition: Partition) -> &[Note] {
        match partition {
            Partition::Regular => &self.notes,
            Partition::Private => &self.private_notes,
        }
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut Vec<Note> {
        match partition {
            Partition::Regular => &mut self.notes,
            Partition::Private => &mut self.private_notes,
        }
    }

    pub fn find(&self, partition: Partition, id: &str) -> Option<&Note> {
        self.partition(partition).iter().find(|note| note.id == id)
    }

    /// Validates a submitted draft and either prepends it or updates the
    /// note it was opened from.
    pub fn apply_draft(&mut self, draft: NoteDraft) -> Result<Partition, DraftError> {
        if draft.title.is_empty() && draft.content.is_empty() {
            return Err(DraftError::Empty);
        }
        let title = if draft.title.is_empty() {
            derive_title(&draft.content)
        } else {
            draft.title
        };
        let partition = Partition::from_private(draft.is_private);
        let now = now_millis();
        let notes = self.partition_mut(partition);
        if draft.edit_mode {
            let note = notes
                .iter_mut()
                .find(|note| note.id == draft.id)
                .ok_or(DraftError::NotFound)?;
            note.title = title;
            note.content = draft.content;
            note.updated = Some(now);
        } else {
            notes.insert(
                0,
                Note {
                    id: draft.id,
                    title,
                    content: draft.content,
                    created: Some(now),
                    updated: None,
                },
            );
        }
        Ok(partition)
    }

    pub fn delete(&mut self, partition: Partition, id: &str) -> bool {
        let notes = self.partition_mut(partition);
        let before = notes.len();
        notes.retain(|note| note.id != id);
        notes.len() != before
    }

    /// Indices of notes matching `query`, or `None` when the query is too
    /// short to filter.
    pub fn search(&self, partition: Partition, query: &str) -> Option<Vec<usize>> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_SEARCH_QUERY_CHARS {
            return None;
        }
        Some(
            self.partition(partition)
                .iter()
                .enumerate()
                .filter(|(_, note)| note.matches(&query))
                .map(|(index, _)| index)
                .collect(),
        )
    }
}

/// First content line, cut to 30 chars with an ellipsis when longer.
pub fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default();
    if first_line.chars().count() > DERIVED_TITLE_MAX_CHARS {
        let head: String = first_line.chars().take(DERIVED_TITLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        first_line.to_string()
    }
}

pub fn welcome_note() -> Note {
    let now = now_millis();
    Note {
        id: now.to_string(),
        title: "Welcome to ani-note!".to_string(),
        content: [
            "Welcome to your new note-taking app! Here are some things you can do:",
            "",
            "- Create and manage notes (n)",
            "- Use private mode for sensitive notes (p, default PIN: 0000)",
            "- Customize theme and colors in settings (s)",
            "- Search the current list (/)",
            "",
            "Enjoy taking notes in style!",
        ]
        .join("\n"),
        created: Some(now),
        updated: None,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{derive_title, DraftError, NoteStore, Partition};
    use crate::app::dialog::NoteDraft;

    fn draft(id: &str, title: &str, content: &str) -> NoteDraft {
        NoteDraft {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            is_private: false,
            edit_mode: false,
        }
    }

    #[test]
    fn empty_draft_is_rejected_without_mutation() {
        let mut store = NoteStore::default();
        assert_eq!(store.apply_draft(draft("1", "", "")), Err(DraftError::Empty));
        assert!(store.notes.is_empty());
    }

    #[test]
    fn title_is_derived_from_first_line() {
        let mut store = NoteStore::default();
        store
            .apply_draft(draft("1", "", "buy milk\nand eggs"))
            .expect("saved");
        assert_eq!(store.notes[0].title, "buy milk");
    }

    #[test]
    fn long_first_line_is_truncated_with_ellipsis() {
        let line = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(derive_title(line), "abcdefghijklmnopqrstuvwxyz0123...");
        let exact = "x".repeat(30);
        assert_eq!(derive_title(&exact), exact);
    }

    #[test]
    fn new_notes_are_prepended_to_their_partition() {
        let mut store = NoteStore::default();
        store.apply_draft(draft("1", "first", "")).expect("saved");
        store.apply_draft(draft("2", "second", "")).expect("saved");
        let mut private = draft("3", "secret", "");
        private.is_private = true;
        assert_eq!(store.apply_draft(private), Ok(Partition::Private));

        let ids: Vec<&str> = store.notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(store.private_notes.len(), 1);
    }

    #[test]
    fn edit_updates_existing_note_in_place() {
        let mut store = NoteStore::default();
        store.apply_draft(draft("1", "old", "body")).expect("saved");
        let mut edit = draft("1", "new", "changed");
        edit.edit_mode = true;
        store.apply_draft(edit).expect("edited");
        assert_eq!(store.notes.len(), 1);
        assert_eq!(store.notes[0].title, "new");
        assert!(store.notes[0].updated.is_some());
        assert!(store.notes[0].created.is_some());
    }

    #[test]
    fn edit_of_missing_note_reports_not_found() {
        let mut store = NoteStore::default();
        let mut edit = draft("404", "x", "");
        edit.edit_mode = true;
        assert_eq!(store.apply_draft(edit), Err(DraftError::NotFound));
    }

    #[test]
    fn search_requires_two_chars_and_ignores_case() {
        let mut store = NoteStore::default();
        store.apply_draft(draft("1", "Groceries", "milk")).expect("saved");
        store.apply_draft(draft("2", "Work", "Quarterly MILK report")).expect("saved");
        store.apply_draft(draft("3", "Ideas", "none")).expect("saved");

        assert_eq!(store.search(Partition::Regular, " m "), None);
        assert_eq!(store.search(Partition::Regular, "Milk"), Some(vec![1, 2]));
        assert_eq!(store.search(Partition::Private, "milk"), Some(vec![]));
    }

    #[test]
    fn delete_removes_only_matching_id() {
        let mut store = NoteStore::default();
        store.apply_draft(draft("1", "a", "")).expect("saved");
        store.apply_draft(draft("2", "b", "")).expect("saved");
        assert!(store.delete(Partition::Regular, "1"));
        assert!(!store.delete(Partition::Regular, "1"));
        assert_eq!(store.notes.len(), 1);
    }
}
