use super::search::handle_search_key;
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
use std::time::Instant;

const PAGE_STEP: isize = 10;

/// Routes one key press. An open dialog takes every key except Ctrl+C.
pub fn handle_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers, now: Instant) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key, KeyCode::Char('c') | KeyCode::Char('C')) {
        app.should_quit = true;
        return;
    }
    if app.dialogs.active().is_some() {
        app.handle_dialog_key(key, modifiers, now);
        return;
    }
    if app.search.active && handle_search_key(app, key, modifiers) {
        return;
    }
    handle_list_key(app, key, modifiers);
}

fn handle_list_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match key {
        KeyCode::Char('n') | KeyCode::Char('N') => app.create_note(),
        KeyCode::Char('p') | KeyCode::Char('P') => app.toggle_private_mode(),
        KeyCode::Char(',') if ctrl => app.open_settings(),
        KeyCode::Char('s') | KeyCode::Char('S') if !ctrl => app.open_settings(),
        KeyCode::Char('q') if !ctrl => app.should_quit = true,
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-PAGE_STEP),
        KeyCode::PageDown => app.move_selection(PAGE_STEP),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Enter | KeyCode::Char('v') => app.view_selected(),
        KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut AppState, kind: MouseEventKind) -> bool {
    match kind {
        MouseEventKind::ScrollUp => app.scroll_list(-1),
        MouseEventKind::ScrollDown => app.scroll_list(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_key, handle_mouse};
    use crate::app::dialog::DialogKind;
    use crate::app::AppState;
    use crate::storage::LocalStore;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
    use std::time::{Duration, Instant};

    fn press(app: &mut AppState, key: KeyCode, now: Instant) {
        handle_key(app, key, KeyModifiers::NONE, now);
    }

    fn app_with_notes(texts: &[&str]) -> (AppState, Instant) {
        let mut app = AppState::load(LocalStore::in_memory());
        let mut now = Instant::now();
        for text in texts {
            press(&mut app, KeyCode::Char('n'), now);
            press(&mut app, KeyCode::Enter, now);
            for ch in text.chars() {
                press(&mut app, KeyCode::Char(ch), now);
            }
            handle_key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, now);
            now += Duration::from_secs(1);
            app.tick(now);
        }
        (app, now)
    }

    #[test]
    fn shortcuts_open_dialogs() {
        let mut app = AppState::load(LocalStore::in_memory());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('n'), now);
        assert!(app.dialogs.is_open(DialogKind::NoteEditor));
        press(&mut app, KeyCode::Esc, now);

        handle_key(&mut app, KeyCode::Char(','), KeyModifiers::CONTROL, now);
        assert!(app.dialogs.is_open(DialogKind::Settings));
        press(&mut app, KeyCode::Enter, now);

        press(&mut app, KeyCode::Char('p'), now);
        assert!(app.dialogs.is_open(DialogKind::PinEntry));
    }

    #[test]
    fn keys_go_to_dialog_while_open() {
        let mut app = AppState::load(LocalStore::in_memory());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('n'), now);
        press(&mut app, KeyCode::Char('q'), now);
        assert!(!app.should_quit);
        let editor = app.dialogs.editor_state().expect("editor open");
        assert_eq!(editor.title.current(), "q");
    }

    #[test]
    fn ctrl_c_quits_even_with_dialog_open() {
        let mut app = AppState::load(LocalStore::in_memory());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('s'), now);
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, now);
        assert!(app.should_quit);
    }

    #[test]
    fn list_navigation_clamps() {
        let (mut app, now) = app_with_notes(&["one", "two", "three"]);
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Char('j'), now);
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Up, now);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Home, now);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End, now);
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn view_opens_note_as_alert() {
        let (mut app, now) = app_with_notes(&["hello body"]);
        press(&mut app, KeyCode::Char('v'), now);
        let dialog = app.dialogs.active().expect("alert open");
        assert_eq!(dialog.kind, DialogKind::Alert);
        assert_eq!(dialog.message.as_deref(), Some("hello body"));
    }

    #[test]
    fn edit_key_prefills_editor() {
        let (mut app, now) = app_with_notes(&["first"]);
        press(&mut app, KeyCode::Char('e'), now);
        let editor = app.dialogs.editor_state().expect("editor open");
        assert!(editor.edit_mode);
        assert_eq!(editor.title.current(), "first");
        assert_eq!(app.dialogs.active().map(|d| d.title.as_str()), Some("Edit Note"));
    }

    #[test]
    fn search_captures_letters_until_escape() {
        let (mut app, now) = app_with_notes(&["apple pie", "banana"]);
        press(&mut app, KeyCode::Char('/'), now);
        for ch in "an".chars() {
            press(&mut app, KeyCode::Char(ch), now);
        }
        assert!(app.dialogs.active().is_none());
        assert_eq!(app.visible_notes(), vec![0]);
        press(&mut app, KeyCode::Enter, now);
        assert!(app.dialogs.is_open(DialogKind::Alert));
        press(&mut app, KeyCode::Esc, now);
        press(&mut app, KeyCode::Esc, now);
        assert!(!app.search.active);
        assert_eq!(app.visible_notes().len(), 2);
    }

    #[test]
    fn mouse_scroll_respects_dialog_lock() {
        let (mut app, now) = app_with_notes(&["a", "b"]);
        assert!(handle_mouse(&mut app, MouseEventKind::ScrollDown));
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Char('s'), now);
        assert!(!handle_mouse(&mut app, MouseEventKind::ScrollUp));
        assert_eq!(app.selected, 1);
    }
}
