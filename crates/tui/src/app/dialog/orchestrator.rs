use super::deferred::{
    DeferredQueue, DeferredTask, CALLBACK_DEFER, PIN_EVALUATE_DELAY, PIN_FEEDBACK_DELAY,
    STEP_DELAY,
};
use super::editor::{EditorField, NoteEditorState};
use super::kind::{
    DialogAction, DialogCallbacks, DialogConfig, DialogEvent, DialogKind, DialogValue,
    SettingsChange,
};
use super::pin::{AnimationHooks, PinInput, PinPad, PinPolicy, PinVault, PinVerdict, PIN_LENGTH};
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

/// Per-call collaborators for key handling and timer processing.
pub struct DialogContext<'a> {
    pub vault: &'a dyn PinVault,
    pub hooks: &'a mut dyn AnimationHooks,
    pub now: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

#[derive(Debug, Clone)]
pub struct PinDialogState {
    pub pad: PinPad,
    pub verify_mode: bool,
    pub correct_pin: Option<String>,
    pub step: Option<u8>,
    pub private_mode: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SettingsState {
    pub private_mode: bool,
}

#[derive(Debug, Clone)]
pub enum DialogBody {
    NoteEditor(NoteEditorState),
    Pin(PinDialogState),
    Confirm(ConfirmChoice),
    Alert,
    Settings(SettingsState),
}

#[derive(Debug, Clone)]
pub struct ActiveDialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: Option<String>,
    pub body: DialogBody,
}

#[derive(Debug, Clone, Copy)]
enum CallbackSlot {
    Confirm,
    Cancel,
}

/// Owns the single active modal, its callbacks and every deferred action
/// scheduled on its behalf.
///
/// The generation advances on every open and close. Deferred work carries the
/// generation it was scheduled under and is dropped once that is stale.
#[derive(Debug, Default)]
pub struct Orchestrator {
    active: Option<ActiveDialog>,
    callbacks: HashMap<DialogKind, DialogCallbacks>,
    generation: u64,
    scroll_locked: bool,
    deferred: DeferredQueue,
    events: Vec<DialogEvent>,
}

impl Orchestrator {
    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref()
    }

    pub fn active_kind(&self) -> Option<DialogKind> {
        self.active.as_ref().map(|dialog| dialog.kind)
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.active_kind() == Some(kind)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[cfg(test)]
    pub fn callbacks(&self, kind: DialogKind) -> Option<&DialogCallbacks> {
        self.callbacks.get(&kind)
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    #[cfg(test)]
    pub fn pin_state(&self) -> Option<&PinDialogState> {
        match self.active.as_ref().map(|dialog| &dialog.body) {
            Some(DialogBody::Pin(state)) => Some(state),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn editor_state(&self) -> Option<&NoteEditorState> {
        match self.active.as_ref().map(|dialog| &dialog.body) {
            Some(DialogBody::NoteEditor(state)) => Some(state),
            _ => None,
        }
    }

    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn open(&mut self, kind: DialogKind, config: DialogConfig) {
        if let Some(current) = self.active_kind() {
            self.close(current);
        }
        self.generation = self.generation.wrapping_add(1);
        self.scroll_locked = true;

        if config.on_confirm.is_some() || config.on_cancel.is_some() {
            self.callbacks.insert(
                kind,
                DialogCallbacks {
                    on_confirm: config.on_confirm.clone(),
                    on_cancel: config.on_cancel.clone(),
                },
            );
        }

        let body = setup_body(kind, &config);
        let title = match (&config.title, &body) {
            (Some(title), _) => title.clone(),
            (None, DialogBody::NoteEditor(editor)) => editor.heading().to_string(),
            (None, _) => kind.default_title().to_string(),
        };
        let message = config.message.filter(|_| kind.has_message_slot());

        debug!(kind = %kind, generation = self.generation, "dialog opened");
        self.active = Some(ActiveDialog {
            kind,
            title,
            message,
            body,
        });
    }

    /// Closes `kind` if it is the active dialog. Never fires callbacks.
    pub fn close(&mut self, kind: DialogKind) -> bool {
        if !self.is_open(kind) {
            return false;
        }
        self.active = None;
        self.scroll_locked = false;
        self.callbacks.remove(&kind);
        self.generation = self.generation.wrapping_add(1);
        debug!(kind = %kind, generation = self.generation, "dialog closed");
        true
    }

    /// Opens `kind` one step delay after `at`, unless another dialog opens or
    /// closes first.
    pub fn open_after(&mut self, at: Instant, kind: DialogKind, config: DialogConfig) {
        self.deferred.schedule(
            at + STEP_DELAY,
            self.generation,
            DeferredTask::Open { kind, config },
        );
    }

    pub fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        ctx: &mut DialogContext<'_>,
    ) -> bool {
        let Some(kind) = self.active_kind() else {
            return false;
        };
        if key == KeyCode::Esc {
            self.close(kind);
            return true;
        }
        match kind {
            DialogKind::NoteEditor => self.handle_editor_key(key, modifiers, ctx.now),
            DialogKind::PinEntry | DialogKind::ChangePin => self.handle_pin_key(kind, key, ctx),
            DialogKind::Confirm => self.handle_confirm_key(key, ctx.now),
            DialogKind::Alert => self.handle_alert_key(key, ctx.now),
            DialogKind::Settings => self.handle_settings_key(key, ctx.now),
        }
        true
    }

    /// Runs every deferred task due at `ctx.now`, in deadline order.
    pub fn poll(&mut self, ctx: &mut DialogContext<'_>) {
        while let Some(entry) = self.deferred.pop_due(ctx.now) {
            if entry.generation != self.generation {
                debug!(
                    scheduled = entry.generation,
                    current = self.generation,
                    "dropping stale deferred task"
                );
                continue;
            }
            let at = entry.due;
            match entry.task {
                DeferredTask::EvaluatePin => self.evaluate_pin(at, ctx),
                DeferredTask::FinishPin(verdict) => self.finish_pin(verdict, at),
                DeferredTask::Invoke {
                    kind,
                    action,
                    value,
                } => self.events.push(DialogEvent::Invoke {
                    kind,
                    action,
                    value,
                    at,
                }),
                DeferredTask::Open { kind, config } => self.open(kind, config),
            }
        }
    }

    fn fire_and_close(
        &mut self,
        kind: DialogKind,
        slot: CallbackSlot,
        value: DialogValue,
        now: Instant,
    ) {
        let action = self.callbacks.get(&kind).and_then(|callbacks| match slot {
            CallbackSlot::Confirm => callbacks.on_confirm.clone(),
            CallbackSlot::Cancel => callbacks.on_cancel.clone(),
        });
        self.close(kind);
        if let Some(action) = action {
            self.deferred.schedule(
                now + CALLBACK_DEFER,
                self.generation,
                DeferredTask::Invoke {
                    kind,
                    action,
                    value,
                },
            );
        }
    }

    fn handle_editor_key(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let Some(DialogBody::NoteEditor(editor)) = self.active.as_mut().map(|d| &mut d.body)
        else {
            return;
        };
        match key {
            KeyCode::Char('s') if ctrl => {
                let draft = editor.draft();
                debug!(id = %draft.id, "note editor submitted");
                self.fire_and_close(
                    DialogKind::NoteEditor,
                    CallbackSlot::Confirm,
                    DialogValue::Note(draft),
                    now,
                );
            }
            KeyCode::Char('x') if ctrl => {
                self.fire_and_close(
                    DialogKind::NoteEditor,
                    CallbackSlot::Cancel,
                    DialogValue::None,
                    now,
                );
            }
            KeyCode::Char('w') if ctrl => editor.focused_mut().delete_word_back(),
            KeyCode::Tab | KeyCode::BackTab => editor.toggle_focus(),
            KeyCode::Enter => match editor.focus {
                EditorField::Title => editor.focus = EditorField::Content,
                EditorField::Content => editor.content.insert_char('\n'),
            },
            KeyCode::Backspace => editor.focused_mut().backspace(),
            KeyCode::Delete => editor.focused_mut().delete(),
            KeyCode::Left => editor.focused_mut().move_left(),
            KeyCode::Right => editor.focused_mut().move_right(),
            KeyCode::Home => editor.focused_mut().move_home(),
            KeyCode::End => editor.focused_mut().move_end(),
            KeyCode::Up => {
                if editor.focus == EditorField::Content && !editor.content.move_up() {
                    editor.focus = EditorField::Title;
                }
            }
            KeyCode::Down => {
                if editor.focus == EditorField::Title {
                    editor.focus = EditorField::Content;
                } else {
                    editor.content.move_down();
                }
            }
            KeyCode::Char(ch) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => {
                editor.focused_mut().insert_char(ch);
            }
            _ => {}
        }
    }

    fn handle_pin_key(&mut self, kind: DialogKind, key: KeyCode, ctx: &mut DialogContext<'_>) {
        let Some(DialogBody::Pin(state)) = self.active.as_mut().map(|d| &mut d.body) else {
            return;
        };
        match key {
            KeyCode::Char(digit) if digit.is_ascii_digit() => match state.pad.push_digit(digit) {
                PinInput::Ignored => {}
                PinInput::Filled(index) => ctx.hooks.pin_digit_filled(index),
                PinInput::Completed => {
                    ctx.hooks.pin_digit_filled(PIN_LENGTH - 1);
                    let task = if kind == DialogKind::ChangePin {
                        match state.pad.take_collected() {
                            Some(pin) => (
                                ctx.now + PIN_FEEDBACK_DELAY,
                                DeferredTask::FinishPin(PinVerdict::Accepted(pin)),
                            ),
                            None => return,
                        }
                    } else {
                        (ctx.now + PIN_EVALUATE_DELAY, DeferredTask::EvaluatePin)
                    };
                    self.deferred.schedule(task.0, self.generation, task.1);
                }
            },
            KeyCode::Backspace | KeyCode::Delete => {
                state.pad.delete();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => state.pad.clear(),
            _ => {}
        }
    }

    fn evaluate_pin(&mut self, at: Instant, ctx: &mut DialogContext<'_>) {
        let verdict = {
            let Some(DialogBody::Pin(state)) = self.active.as_mut().map(|d| &mut d.body) else {
                return;
            };
            let policy = PinPolicy::resolve(
                state.verify_mode,
                state.correct_pin.as_deref(),
                ctx.vault,
            );
            state.pad.evaluate(&policy)
        };
        match verdict {
            PinVerdict::Accepted(_) => ctx.hooks.pin_success(),
            PinVerdict::Rejected => {
                info!("pin entry rejected");
                ctx.hooks.pin_error();
            }
        }
        self.deferred.schedule(
            at + PIN_FEEDBACK_DELAY,
            self.generation,
            DeferredTask::FinishPin(verdict),
        );
    }

    fn finish_pin(&mut self, verdict: PinVerdict, at: Instant) {
        let Some(kind) = self
            .active_kind()
            .filter(|kind| matches!(kind, DialogKind::PinEntry | DialogKind::ChangePin))
        else {
            return;
        };
        match verdict {
            PinVerdict::Accepted(pin) => {
                self.fire_and_close(kind, CallbackSlot::Confirm, DialogValue::Pin(pin), at);
            }
            PinVerdict::Rejected => {
                if let Some(DialogBody::Pin(state)) = self.active.as_mut().map(|d| &mut d.body) {
                    state.pad.reset();
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode, now: Instant) {
        let Some(DialogBody::Confirm(selected)) = self.active.as_mut().map(|d| &mut d.body) else {
            return;
        };
        let choice = match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                *selected = match *selected {
                    ConfirmChoice::Yes => ConfirmChoice::No,
                    ConfirmChoice::No => ConfirmChoice::Yes,
                };
                None
            }
            KeyCode::Enter => Some(*selected),
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ConfirmChoice::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(ConfirmChoice::No),
            _ => None,
        };
        let slot = match choice {
            Some(ConfirmChoice::Yes) => CallbackSlot::Confirm,
            Some(ConfirmChoice::No) => CallbackSlot::Cancel,
            None => return,
        };
        self.fire_and_close(DialogKind::Confirm, slot, DialogValue::None, now);
    }

    fn handle_alert_key(&mut self, key: KeyCode, now: Instant) {
        if matches!(
            key,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') | KeyCode::Char('O')
        ) {
            self.fire_and_close(
                DialogKind::Alert,
                CallbackSlot::Confirm,
                DialogValue::None,
                now,
            );
        }
    }

    fn handle_settings_key(&mut self, key: KeyCode, now: Instant) {
        let Some(DialogBody::Settings(settings)) = self.active.as_ref().map(|d| &d.body) else {
            return;
        };
        let private_mode = settings.private_mode;
        let change = match key {
            KeyCode::Char('l') | KeyCode::Char('L') => Some(SettingsChange::LightMode),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(SettingsChange::DarkMode),
            KeyCode::Left | KeyCode::Char('h') => Some(SettingsChange::PreviousAccent),
            KeyCode::Right | KeyCode::Tab => Some(SettingsChange::NextAccent),
            KeyCode::Char('c') | KeyCode::Char('C') if private_mode => {
                self.close(DialogKind::Settings);
                self.deferred.schedule(
                    now + STEP_DELAY,
                    self.generation,
                    DeferredTask::Invoke {
                        kind: DialogKind::Settings,
                        action: DialogAction::StartChangePin,
                        value: DialogValue::None,
                    },
                );
                None
            }
            KeyCode::Enter => {
                self.close(DialogKind::Settings);
                None
            }
            _ => None,
        };
        if let Some(change) = change {
            self.events.push(DialogEvent::Settings(change));
        }
    }
}

fn setup_body(kind: DialogKind, config: &DialogConfig) -> DialogBody {
    match kind {
        DialogKind::NoteEditor => DialogBody::NoteEditor(NoteEditorState::new(
            config.edit_mode,
            config.note.as_ref(),
            config.is_private,
        )),
        DialogKind::PinEntry => DialogBody::Pin(PinDialogState {
            pad: PinPad::default(),
            verify_mode: config.verify_mode,
            correct_pin: config.correct_pin.clone(),
            step: config.step,
            private_mode: config.private_mode,
        }),
        DialogKind::ChangePin => DialogBody::Pin(PinDialogState {
            pad: PinPad::default(),
            verify_mode: false,
            correct_pin: None,
            step: Some(config.step.unwrap_or(1)),
            private_mode: true,
        }),
        DialogKind::Confirm => DialogBody::Confirm(ConfirmChoice::Yes),
        DialogKind::Alert => DialogBody::Alert,
        DialogKind::Settings => DialogBody::Settings(SettingsState {
            private_mode: config.private_mode,
        }),
    }
}
