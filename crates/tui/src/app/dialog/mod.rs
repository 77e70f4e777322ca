mod change_pin;
mod deferred;
mod editor;
mod kind;
mod orchestrator;
mod pin;

pub use change_pin::{ChangePinTransition, ChangePinWorkflow};
pub use editor::{EditorField, NoteEditorState};
pub use kind::{
    DialogAction, DialogConfig, DialogEvent, DialogKind, DialogValue, NoteDraft, NoteSnapshot,
    SettingsChange,
};
pub use orchestrator::{
    ActiveDialog, ConfirmChoice, DialogBody, DialogContext, Orchestrator, PinDialogState,
    SettingsState,
};
pub use pin::{AnimationHooks, PinPhase, PinVault, DEFAULT_PIN, PIN_LENGTH};
