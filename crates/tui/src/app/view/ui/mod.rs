mod dialogs;
mod screen;
mod text;

use crate::app::view::theme::palette_for;
use crate::app::AppState;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::time::Instant;

use self::dialogs::render_dialog;
use self::screen::{build_header_line, build_status_line, render_list, render_search};

const SEARCH_HEIGHT: u16 = 3;

pub fn draw_ui(f: &mut Frame, app: &AppState, now: Instant) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let palette = palette_for(&app.theme);
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let search_height = if app.search.active { SEARCH_HEIGHT } else { 0 };
    let [header, search, list, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(search_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    f.render_widget(Paragraph::new(build_header_line(app, &palette, now)), header);
    if app.search.active {
        render_search(f, search, app, &palette);
    }
    render_list(f, list, app, &palette);
    f.render_widget(Paragraph::new(build_status_line(app, &palette)), status);
    render_dialog(f, area, app, &palette, now);
}
