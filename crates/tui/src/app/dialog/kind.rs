use super::change_pin::ChangePinWorkflow;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    NoteEditor,
    PinEntry,
    ChangePin,
    Confirm,
    Alert,
    Settings,
}

impl DialogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoteEditor => "note-editor",
            Self::PinEntry => "pin-entry",
            Self::ChangePin => "change-pin",
            Self::Confirm => "confirm",
            Self::Alert => "alert",
            Self::Settings => "settings",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::NoteEditor => "New Note",
            Self::PinEntry => "Enter PIN",
            Self::ChangePin => "Change PIN",
            Self::Confirm => "Confirm",
            Self::Alert => "Alert",
            Self::Settings => "Settings",
        }
    }

    /// Only alert and confirm render a free-form message body.
    pub fn has_message_slot(self) -> bool {
        matches!(self, Self::Confirm | Self::Alert)
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteSnapshot {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub edit_mode: bool,
}

/// What the application does when a registered callback fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    SaveNote,
    DeleteNote { id: String, private: bool },
    UnlockPrivate,
    StartChangePin,
    ChangePin(ChangePinWorkflow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogValue {
    None,
    Pin(String),
    Note(NoteDraft),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogCallbacks {
    pub on_confirm: Option<DialogAction>,
    pub on_cancel: Option<DialogAction>,
}

#[derive(Debug, Clone, Default)]
pub struct DialogConfig {
    pub title: Option<String>,
    pub message: Option<String>,
    pub on_confirm: Option<DialogAction>,
    pub on_cancel: Option<DialogAction>,
    pub edit_mode: bool,
    pub note: Option<NoteSnapshot>,
    pub is_private: bool,
    pub verify_mode: bool,
    pub correct_pin: Option<String>,
    pub step: Option<u8>,
    pub private_mode: bool,
}

impl DialogConfig {
    pub fn alert(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn confirm(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self::alert(message, title)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn on_confirm(mut self, action: DialogAction) -> Self {
        self.on_confirm = Some(action);
        self
    }

    #[cfg(test)]
    pub fn on_cancel(mut self, action: DialogAction) -> Self {
        self.on_cancel = Some(action);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    LightMode,
    DarkMode,
    NextAccent,
    PreviousAccent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// A registered callback fired. `at` is the deadline it was scheduled
    /// for, used to chain follow-up deferrals.
    Invoke {
        kind: DialogKind,
        action: DialogAction,
        value: DialogValue,
        at: Instant,
    },
    Settings(SettingsChange),
}
