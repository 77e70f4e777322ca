pub(crate) mod dialog;
pub(crate) mod handlers;
pub(crate) mod state;
pub(crate) mod view;

use crate::app::dialog::{
    ChangePinTransition, ChangePinWorkflow, DialogAction, DialogConfig, DialogContext,
    DialogEvent, DialogKind, DialogValue, Orchestrator, SettingsChange,
};
use crate::app::state::{
    welcome_note, AccentColor, Animations, DraftError, InputState, Note, NoteStore, Partition,
    PrivateMode, ThemeMode, ThemeState,
};
use crate::storage::{
    LocalStore, NOTES_KEY, PRIMARY_COLOR_KEY, PRIVATE_NOTES_KEY, PRIVATE_PIN_KEY, THEME_KEY,
    VISITED_KEY,
};
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
pub struct SearchState {
    pub active: bool,
    pub input: InputState,
}

pub struct AppState {
    pub store: LocalStore,
    pub notes: NoteStore,
    pub private_mode: PrivateMode,
    pub theme: ThemeState,
    pub animations: Animations,
    pub dialogs: Orchestrator,
    pub search: SearchState,
    pub selected: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn load(store: LocalStore) -> Self {
        let notes = load_notes(&store);
        let private_mode = PrivateMode::with_saved_pin(store.get(PRIVATE_PIN_KEY));
        let theme = ThemeState {
            mode: store.get(THEME_KEY).map(ThemeMode::parse).unwrap_or_default(),
            accent: store
                .get(PRIMARY_COLOR_KEY)
                .map(AccentColor::parse)
                .unwrap_or_default(),
            private_override: false,
        };
        info!(
            notes = notes.notes.len(),
            private_notes = notes.private_notes.len(),
            "notes loaded"
        );
        Self {
            store,
            notes,
            private_mode,
            theme,
            animations: Animations::default(),
            dialogs: Orchestrator::default(),
            search: SearchState::default(),
            selected: 0,
            should_quit: false,
        }
    }

    /// Seeds the welcome note on the first run against this store.
    pub fn ensure_welcome_note(&mut self) {
        if self.store.get(VISITED_KEY).is_some() {
            return;
        }
        self.notes.notes.insert(0, welcome_note());
        self.save_notes();
        if let Err(err) = self.store.set(VISITED_KEY, "true") {
            warn!("failed to record first visit: {err}");
        }
    }

    pub fn active_partition(&self) -> Partition {
        Partition::from_private(self.private_mode.is_unlocked())
    }

    pub fn search_query(&self) -> Option<String> {
        self.search.active.then(|| self.search.input.current())
    }

    /// Indices into the active partition, filtered by the search query.
    pub fn visible_notes(&self) -> Vec<usize> {
        let partition = self.active_partition();
        self.search_query()
            .and_then(|query| self.notes.search(partition, &query))
            .unwrap_or_else(|| (0..self.notes.partition(partition).len()).collect())
    }

    pub fn is_filtering(&self) -> bool {
        let partition = self.active_partition();
        self.search_query()
            .is_some_and(|query| self.notes.search(partition, &query).is_some())
    }

    pub fn selected_note(&self) -> Option<&Note> {
        let index = *self.visible_notes().get(self.selected)?;
        self.notes.partition(self.active_partition()).get(index)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_notes().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    /// Mouse-wheel scrolling of the list; ignored while a dialog holds the
    /// scroll lock.
    pub fn scroll_list(&mut self, delta: isize) -> bool {
        if self.dialogs.scroll_locked() {
            return false;
        }
        self.move_selection(delta);
        true
    }

    fn clamp_selection(&mut self) {
        self.move_selection(0);
    }

    pub fn alert(&mut self, message: impl Into<String>, title: impl Into<String>) {
        self.dialogs
            .open(DialogKind::Alert, DialogConfig::alert(message, title));
    }

    pub fn create_note(&mut self) {
        let config = DialogConfig {
            is_private: self.private_mode.is_unlocked(),
            ..DialogConfig::default().on_confirm(DialogAction::SaveNote)
        };
        self.dialogs.open(DialogKind::NoteEditor, config);
    }

    pub fn edit_note(&mut self, id: &str, private: bool) {
        let Some(note) = self.notes.find(Partition::from_private(private), id) else {
            self.alert("Note not found", "Error");
            return;
        };
        let config = DialogConfig {
            edit_mode: true,
            note: Some(note.snapshot()),
            is_private: private,
            ..DialogConfig::default().on_confirm(DialogAction::SaveNote)
        };
        self.dialogs.open(DialogKind::NoteEditor, config);
    }

    pub fn delete_note(&mut self, id: &str, private: bool) {
        self.dialogs.open(
            DialogKind::Confirm,
            DialogConfig::confirm("Are you sure you want to delete this note?", "Confirm Delete")
                .on_confirm(DialogAction::DeleteNote {
                    id: id.to_string(),
                    private,
                }),
        );
    }

    pub fn view_note(&mut self, id: &str, private: bool) {
        let Some(note) = self.notes.find(Partition::from_private(private), id) else {
            self.alert("Note not found", "Error");
            return;
        };
        let (message, title) = (note.content.clone(), note.display_title().to_string());
        self.alert(message, title);
    }

    fn selected_target(&self) -> Option<(String, bool)> {
        let note = self.selected_note()?;
        Some((note.id.clone(), self.private_mode.is_unlocked()))
    }

    pub fn edit_selected(&mut self) {
        if let Some((id, private)) = self.selected_target() {
            self.edit_note(&id, private);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some((id, private)) = self.selected_target() {
            self.delete_note(&id, private);
        }
    }

    pub fn view_selected(&mut self) {
        if let Some((id, private)) = self.selected_target() {
            self.view_note(&id, private);
        }
    }

    pub fn enter_private_mode(&mut self) {
        if self.private_mode.is_unlocked() {
            return;
        }
        let config = DialogConfig {
            private_mode: true,
            ..DialogConfig::default()
                .with_title("Enter PIN to Access Private Notes")
                .on_confirm(DialogAction::UnlockPrivate)
        };
        self.dialogs.open(DialogKind::PinEntry, config);
    }

    fn activate_private_mode(&mut self) {
        if !self.private_mode.unlock() {
            return;
        }
        info!("private mode unlocked");
        self.theme.private_override = true;
        self.animations.private_mode_changed(true);
        self.selected = 0;
    }

    pub fn exit_private_mode(&mut self) {
        if !self.private_mode.lock() {
            return;
        }
        info!("private mode locked");
        self.theme.private_override = false;
        self.animations.private_mode_changed(false);
        self.selected = 0;
    }

    pub fn toggle_private_mode(&mut self) {
        if self.private_mode.is_unlocked() {
            self.exit_private_mode();
        } else {
            self.enter_private_mode();
        }
    }

    pub fn open_settings(&mut self) {
        let config = DialogConfig {
            private_mode: self.private_mode.is_unlocked(),
            ..DialogConfig::default()
        };
        self.dialogs.open(DialogKind::Settings, config);
    }

    pub fn start_change_pin(&mut self) {
        let config = ChangePinWorkflow::start().dialog_config(self.private_mode.pin());
        self.dialogs.open(DialogKind::PinEntry, config);
    }

    pub fn open_search(&mut self) {
        self.search.active = true;
    }

    pub fn close_search(&mut self) {
        self.search.active = false;
        self.search.input.clear();
        self.selected = 0;
    }

    pub fn handle_dialog_key(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        self.animations.set_clock(now);
        let mut ctx = DialogContext {
            vault: &self.private_mode,
            hooks: &mut self.animations,
            now,
        };
        let consumed = self.dialogs.handle_key(key, modifiers, &mut ctx);
        self.apply_dialog_events();
        consumed
    }

    /// Runs due deferred dialog work and applies any callbacks it fired.
    /// Callbacks may schedule follow-ups that are already due, so polling
    /// repeats until a pass fires nothing.
    pub fn tick(&mut self, now: Instant) {
        self.animations.set_clock(now);
        loop {
            let mut ctx = DialogContext {
                vault: &self.private_mode,
                hooks: &mut self.animations,
                now,
            };
            self.dialogs.poll(&mut ctx);
            if !self.apply_dialog_events() {
                break;
            }
        }
    }

    /// Returns true when at least one event was applied.
    fn apply_dialog_events(&mut self) -> bool {
        let mut applied = false;
        loop {
            let events = self.dialogs.drain_events();
            if events.is_empty() {
                return applied;
            }
            applied = true;
            for event in events {
                self.apply_dialog_event(event);
            }
        }
    }

    fn apply_dialog_event(&mut self, event: DialogEvent) {
        match event {
            DialogEvent::Settings(change) => self.apply_settings_change(change),
            DialogEvent::Invoke {
                kind,
                action,
                value,
                at,
            } => {
                debug!(kind = %kind, ?action, "dialog callback");
                match (action, value) {
                    (DialogAction::SaveNote, DialogValue::Note(draft)) => {
                        let created = !draft.edit_mode;
                        match self.notes.apply_draft(draft) {
                            Ok(_) => {
                                if created {
                                    self.selected = 0;
                                } else {
                                    self.clamp_selection();
                                }
                                self.save_notes();
                            }
                            Err(DraftError::Empty) => self.alert("Note cannot be empty", "Error"),
                            Err(DraftError::NotFound) => self.alert("Note not found", "Error"),
                        }
                    }
                    (DialogAction::DeleteNote { id, private }, _) => {
                        if self.notes.delete(Partition::from_private(private), &id) {
                            self.clamp_selection();
                            self.save_notes();
                        }
                    }
                    (DialogAction::UnlockPrivate, _) => self.activate_private_mode(),
                    (DialogAction::StartChangePin, _) => self.start_change_pin(),
                    (DialogAction::ChangePin(workflow), DialogValue::Pin(entered)) => {
                        self.advance_change_pin(workflow, &entered, at);
                    }
                    (action, value) => {
                        warn!(?action, ?value, "callback payload does not match action");
                    }
                }
            }
        }
    }

    fn advance_change_pin(&mut self, workflow: ChangePinWorkflow, entered: &str, at: Instant) {
        match workflow.advance(entered) {
            ChangePinTransition::Next(next) => {
                debug!(step = next.step().number(), "change pin advanced");
                let config = next.dialog_config(self.private_mode.pin());
                self.dialogs.open_after(at, DialogKind::PinEntry, config);
            }
            ChangePinTransition::Committed(pin) => self.commit_pin(pin),
            ChangePinTransition::Mismatch => {
                info!("change pin confirmation mismatch");
                self.alert("PINs do not match. Please try again.", "Error");
            }
        }
    }

    fn commit_pin(&mut self, pin: String) {
        self.private_mode.set_pin(pin.clone());
        match self.store.set(PRIVATE_PIN_KEY, pin) {
            Ok(()) => {
                info!("private pin changed");
                self.alert("PIN changed successfully", "Success");
            }
            Err(err) => {
                error!("failed to save pin: {err}");
                self.alert("Failed to save PIN. Please try again.", "Error");
            }
        }
    }

    fn apply_settings_change(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::LightMode => self.theme.mode = ThemeMode::Light,
            SettingsChange::DarkMode => self.theme.mode = ThemeMode::Dark,
            SettingsChange::NextAccent => self.theme.accent = self.theme.accent.next(),
            SettingsChange::PreviousAccent => self.theme.accent = self.theme.accent.previous(),
        }
        let result = self
            .store
            .set(THEME_KEY, self.theme.mode.as_str())
            .and_then(|()| self.store.set(PRIMARY_COLOR_KEY, self.theme.accent.as_str()));
        if let Err(err) = result {
            warn!("failed to save theme: {err}");
        }
    }

    /// Persists both partitions. A failure is reported but the in-memory
    /// notes are kept as they are.
    pub fn save_notes(&mut self) {
        if let Err(err) = self.persist_notes() {
            error!("failed to save notes: {err}");
            self.alert("Failed to save notes. Please try again.", "Error");
        }
    }

    fn persist_notes(&mut self) -> Result<(), crate::storage::StorageError> {
        let notes = serde_json::to_string(&self.notes.notes)?;
        let private_notes = serde_json::to_string(&self.notes.private_notes)?;
        self.store.set(NOTES_KEY, notes)?;
        self.store.set(PRIVATE_NOTES_KEY, private_notes)
    }
}

fn load_notes(store: &LocalStore) -> NoteStore {
    let parse = |key: &str| -> Result<Vec<Note>, serde_json::Error> {
        match store.get(key) {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(Vec::new()),
        }
    };
    match (parse(NOTES_KEY), parse(PRIVATE_NOTES_KEY)) {
        (Ok(notes), Ok(private_notes)) => NoteStore {
            notes,
            private_notes,
        },
        (Err(err), _) | (_, Err(err)) => {
            error!("failed to load notes: {err}");
            NoteStore::default()
        }
    }
}
