pub(crate) mod animations;
pub(crate) mod input;
pub(crate) mod notes;
pub(crate) mod private_mode;
pub(crate) mod theme;

pub(crate) use animations::{Animations, ModeFlash, PinFlash};
pub(crate) use input::InputState;
pub(crate) use notes::{welcome_note, DraftError, Note, NoteStore, Partition};
pub(crate) use private_mode::PrivateMode;
pub(crate) use theme::{AccentColor, ThemeMode, ThemeState};
