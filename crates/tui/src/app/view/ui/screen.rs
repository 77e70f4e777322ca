use crate::app::state::ModeFlash;
use crate::app::view::theme::Palette;
use crate::app::AppState;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use std::time::Instant;

use super::text::{truncate_to_width, visual_width};

const APP_NAME: &str = "ani-note";

pub(super) fn build_header_line(app: &AppState, palette: &Palette, now: Instant) -> Line<'static> {
    let flashing = app.animations.mode_flash(now).is_some();
    let brand_style = if flashing {
        Style::default()
            .fg(palette.accent)
            .bg(palette.accent_text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.accent_text)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![Span::styled(format!(" {APP_NAME} "), brand_style)];
    if app.private_mode.is_unlocked() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " PRIVATE ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ));
    }
    let count = app.notes.partition(app.active_partition()).len();
    let noun = if count == 1 { "note" } else { "notes" };
    spans.push(Span::styled(
        format!("  {count} {noun}"),
        Style::default().fg(palette.muted),
    ));
    let accent = if app.theme.private_override {
        "red".to_string()
    } else {
        app.theme.accent.to_string()
    };
    spans.push(Span::styled(
        format!("  {} · {accent}", app.theme.mode),
        Style::default().fg(palette.muted),
    ));
    match app.animations.mode_flash(now) {
        Some(ModeFlash::EnterPrivate) => spans.push(Span::styled(
            "  private notes unlocked",
            Style::default().fg(palette.accent),
        )),
        Some(ModeFlash::ExitPrivate) => spans.push(Span::styled(
            "  private notes locked",
            Style::default().fg(palette.muted),
        )),
        None => {}
    }
    Line::from(spans)
}

pub(super) fn render_search(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let block = Block::bordered()
        .title(" Search ")
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    let line = if app.search.input.is_empty() {
        Line::from(Span::styled(
            "Type at least 2 characters",
            Style::default().fg(palette.muted),
        ))
    } else {
        Line::from(Span::styled(
            app.search.input.current(),
            Style::default().fg(palette.text),
        ))
    };
    f.render_widget(Paragraph::new(line).block(block), area);

    let column = u16::try_from(visual_width(app.search.input.line_before_cursor()))
        .unwrap_or(u16::MAX);
    if app.dialogs.active().is_none() && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position(Position {
            x: inner.x + column.min(inner.width.saturating_sub(1)),
            y: inner.y,
        });
    }
}

fn preview_line(content: &str) -> &str {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default()
}

pub(super) fn build_list_items(
    app: &AppState,
    palette: &Palette,
    width: usize,
) -> Vec<ListItem<'static>> {
    let notes = app.notes.partition(app.active_partition());
    let text_width = width.saturating_sub(2).max(1);
    app.visible_notes()
        .into_iter()
        .filter_map(|index| notes.get(index))
        .map(|note| {
            let title = Line::from(Span::styled(
                truncate_to_width(note.display_title(), text_width),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ));
            let preview = Line::from(Span::styled(
                truncate_to_width(preview_line(&note.content), text_width),
                Style::default().fg(palette.muted),
            ));
            ListItem::new(vec![title, preview])
        })
        .collect()
}

pub(super) fn empty_list_message(app: &AppState) -> &'static str {
    if app.is_filtering() {
        "No matching notes"
    } else if app.private_mode.is_unlocked() {
        "No private notes yet. Press n to create one."
    } else {
        "No notes yet. Press n to create one."
    }
}

pub(super) fn render_list(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let title = if app.private_mode.is_unlocked() {
        " Private Notes "
    } else {
        " Notes "
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(palette.border));
    let items = build_list_items(app, palette, usize::from(block.inner(area).width));
    if items.is_empty() {
        let message = Line::from(Span::styled(
            empty_list_message(app),
            Style::default().fg(palette.muted),
        ));
        f.render_widget(Paragraph::new(message).block(block), area);
        return;
    }
    let selected = app.selected.min(items.len() - 1);
    let list = List::new(items)
        .block(block)
        .highlight_symbol("▌")
        .highlight_style(Style::default().fg(palette.accent).bg(palette.surface));
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

pub(super) fn build_status_line(app: &AppState, palette: &Palette) -> Line<'static> {
    let hints: Vec<&str> = if app.dialogs.active().is_some() {
        vec!["Esc close dialog"]
    } else if app.search.active {
        vec!["Esc close search", "↑/↓ select", "Enter view", "Ctrl+N new"]
    } else {
        let private = if app.private_mode.is_unlocked() {
            "p lock"
        } else {
            "p private"
        };
        vec![
            "n new",
            "e edit",
            "d delete",
            "v view",
            private,
            "s settings",
            "/ search",
            "q quit",
        ]
    };
    Line::from(Span::styled(
        format!(" {}", hints.join(" · ")),
        Style::default().fg(palette.muted),
    ))
}

#[cfg(test)]
mod tests {
    use super::{build_status_line, empty_list_message, preview_line};
    use crate::app::view::theme::palette_for;
    use crate::app::AppState;
    use crate::storage::LocalStore;

    #[test]
    fn preview_skips_blank_lines() {
        assert_eq!(preview_line("\n  \nsecond line\nthird"), "second line");
        assert_eq!(preview_line(""), "");
    }

    #[test]
    fn empty_message_depends_on_mode() {
        let mut app = AppState::load(LocalStore::in_memory());
        assert_eq!(empty_list_message(&app), "No notes yet. Press n to create one.");
        app.open_search();
        app.search.input.set_from("zz");
        assert_eq!(empty_list_message(&app), "No matching notes");
    }

    #[test]
    fn status_hints_follow_private_state() {
        let mut app = AppState::load(LocalStore::in_memory());
        let palette = palette_for(&app.theme);
        assert!(build_status_line(&app, &palette).to_string().contains("p private"));
        app.private_mode.unlock();
        assert!(build_status_line(&app, &palette).to_string().contains("p lock"));
    }
}
