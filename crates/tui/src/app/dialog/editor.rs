use super::kind::{NoteDraft, NoteSnapshot};
use crate::app::state::InputState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Content,
}

#[derive(Debug, Clone)]
pub struct NoteEditorState {
    pub edit_mode: bool,
    pub is_private: bool,
    pub note_id: Option<String>,
    pub title: InputState,
    pub content: InputState,
    pub focus: EditorField,
}

impl NoteEditorState {
    pub fn new(edit_mode: bool, note: Option<&NoteSnapshot>, is_private: bool) -> Self {
        let mut title = InputState::default();
        let mut content = InputState::default();
        if edit_mode {
            if let Some(note) = note {
                title.set_from(&note.title);
                content.set_from(&note.content);
            }
        }
        Self {
            edit_mode,
            is_private,
            note_id: note.map(|note| note.id.clone()),
            title,
            content,
            focus: EditorField::Title,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.edit_mode {
            "Edit Note"
        } else {
            "New Note"
        }
    }

    pub fn focused_mut(&mut self) -> &mut InputState {
        match self.focus {
            EditorField::Title => &mut self.title,
            EditorField::Content => &mut self.content,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            EditorField::Title => EditorField::Content,
            EditorField::Content => EditorField::Title,
        };
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            id: self.note_id.clone().unwrap_or_else(new_note_id),
            title: self.title.current().trim().to_string(),
            content: self.content.current().trim().to_string(),
            is_private: self.is_private,
            edit_mode: self.edit_mode,
        }
    }
}

static LAST_NOTE_ID: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp id, bumped past the previous id when two notes are
/// created within the same millisecond.
pub fn new_note_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0);
    let mut last = LAST_NOTE_ID.load(Ordering::Relaxed);
    loop {
        let next = millis.max(last.saturating_add(1));
        match LAST_NOTE_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return next.to_string(),
            Err(current) => last = current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{new_note_id, EditorField, NoteEditorState};
    use crate::app::dialog::NoteSnapshot;

    fn snapshot() -> NoteSnapshot {
        NoteSnapshot {
            id: "42".to_string(),
            title: "Groceries".to_string(),
            content: "milk\neggs".to_string(),
        }
    }

    #[test]
    fn edit_mode_prefills_inputs() {
        let editor = NoteEditorState::new(true, Some(&snapshot()), false);
        assert_eq!(editor.heading(), "Edit Note");
        assert_eq!(editor.title.current(), "Groceries");
        assert_eq!(editor.content.current(), "milk\neggs");
        assert_eq!(editor.focus, EditorField::Title);
    }

    #[test]
    fn new_mode_starts_blank_even_with_snapshot() {
        let editor = NoteEditorState::new(false, Some(&snapshot()), true);
        assert_eq!(editor.heading(), "New Note");
        assert!(editor.title.is_empty());
        assert!(editor.content.is_empty());
    }

    #[test]
    fn draft_trims_and_keeps_existing_id() {
        let mut editor = NoteEditorState::new(true, Some(&snapshot()), true);
        editor.title.set_from("  Shopping  ");
        let draft = editor.draft();
        assert_eq!(draft.id, "42");
        assert_eq!(draft.title, "Shopping");
        assert!(draft.is_private);
        assert!(draft.edit_mode);
    }

    #[test]
    fn draft_generates_id_for_new_notes() {
        let editor = NoteEditorState::new(false, None, false);
        assert!(!editor.draft().id.is_empty());
    }

    #[test]
    fn generated_ids_are_unique_within_a_millisecond() {
        let first = new_note_id();
        let second = new_note_id();
        assert_ne!(first, second);
    }
}
