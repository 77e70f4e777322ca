use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers};

/// Keys for the open search bar. Returns false for keys the list should
/// handle instead (navigation and control shortcuts).
pub fn handle_search_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let input = &mut app.search.input;
    let edited = match key {
        KeyCode::Esc => {
            app.close_search();
            return true;
        }
        KeyCode::Char('w') if ctrl => {
            input.delete_word_back();
            true
        }
        KeyCode::Char('u') if ctrl => {
            input.clear();
            true
        }
        KeyCode::Char(_) if ctrl || modifiers.contains(KeyModifiers::ALT) => return false,
        KeyCode::Char(ch) => {
            input.insert_char(ch);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_home();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => return false,
    };
    if edited {
        app.selected = 0;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::handle_search_key;
    use crate::app::AppState;
    use crate::storage::LocalStore;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn typing_edits_query_and_resets_selection() {
        let mut app = AppState::load(LocalStore::in_memory());
        app.open_search();
        app.selected = 3;
        for ch in "mi".chars() {
            assert!(handle_search_key(&mut app, KeyCode::Char(ch), KeyModifiers::NONE));
        }
        assert_eq!(app.search_query().as_deref(), Some("mi"));
        assert_eq!(app.selected, 0);

        assert!(handle_search_key(&mut app, KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.search_query().as_deref(), Some("m"));
    }

    #[test]
    fn escape_closes_and_clears() {
        let mut app = AppState::load(LocalStore::in_memory());
        app.open_search();
        handle_search_key(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(handle_search_key(&mut app, KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.search.active);
        assert!(app.search.input.is_empty());
    }

    #[test]
    fn navigation_and_shortcuts_fall_through() {
        let mut app = AppState::load(LocalStore::in_memory());
        app.open_search();
        assert!(!handle_search_key(&mut app, KeyCode::Down, KeyModifiers::NONE));
        assert!(!handle_search_key(&mut app, KeyCode::Enter, KeyModifiers::NONE));
        assert!(!handle_search_key(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL));
    }
}
