use crate::app::dialog::{
    ActiveDialog, ConfirmChoice, DialogBody, EditorField, NoteEditorState, PinDialogState,
    PinPhase, SettingsState, PIN_LENGTH,
};
use crate::app::state::{AccentColor, PinFlash, ThemeMode};
use crate::app::view::theme::{accent_color, Palette, PRIVATE_ACCENT};
use crate::app::AppState;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::time::Instant;

use super::text::{truncate_to_width, visual_width, wrap_text};

const EDITOR_WIDTH: u16 = 64;
const PIN_WIDTH: u16 = 40;
const CONFIRM_WIDTH: u16 = 52;
const ALERT_WIDTH: u16 = 64;
const SETTINGS_WIDTH: u16 = 56;
const EDITOR_CONTENT_ROWS: usize = 8;
const CHANGE_PIN_STEPS: u8 = 3;

/// Rendered form of the active dialog, before placement on screen.
pub(super) struct ModalView {
    pub(super) title: String,
    pub(super) lines: Vec<Line<'static>>,
    pub(super) width: u16,
    pub(super) alignment: Alignment,
    /// Border and highlight color. Private PIN pads are always red.
    pub(super) accent: Color,
    /// Cursor as (row, column) inside the modal body.
    pub(super) cursor: Option<(u16, u16)>,
}

pub(super) fn build_modal_view(
    dialog: &ActiveDialog,
    app: &AppState,
    palette: &Palette,
    max_width: u16,
    now: Instant,
) -> ModalView {
    let (width, alignment) = match &dialog.body {
        DialogBody::NoteEditor(_) => (EDITOR_WIDTH, Alignment::Left),
        DialogBody::Pin(_) => (PIN_WIDTH, Alignment::Center),
        DialogBody::Confirm(_) => (CONFIRM_WIDTH, Alignment::Center),
        DialogBody::Alert => (ALERT_WIDTH, Alignment::Left),
        DialogBody::Settings(_) => (SETTINGS_WIDTH, Alignment::Left),
    };
    let width = width.min(max_width.max(10));
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let accent = match &dialog.body {
        DialogBody::Pin(state) if state.private_mode => PRIVATE_ACCENT,
        _ => palette.accent,
    };
    let mut cursor = None;
    let lines = match &dialog.body {
        DialogBody::NoteEditor(editor) => {
            let (lines, editor_cursor) = build_editor_lines(editor, palette, text_width);
            cursor = editor_cursor;
            lines
        }
        DialogBody::Pin(state) => build_pin_lines(state, app, palette, accent, now),
        DialogBody::Confirm(choice) => {
            build_confirm_lines(dialog.message.as_deref(), *choice, palette, text_width)
        }
        DialogBody::Alert => build_alert_lines(dialog.message.as_deref(), palette, text_width),
        DialogBody::Settings(settings) => build_settings_lines(*settings, app, palette),
    };
    ModalView {
        title: dialog.title.clone(),
        lines,
        width,
        alignment,
        accent,
        cursor,
    }
}

fn label(text: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    Line::from(Span::styled(text.to_string(), style))
}

fn hint(text: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(palette.muted).add_modifier(Modifier::DIM),
    ))
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn build_editor_lines(
    editor: &NoteEditorState,
    palette: &Palette,
    text_width: usize,
) -> (Vec<Line<'static>>, Option<(u16, u16)>) {
    let text_style = Style::default().fg(palette.text);
    let placeholder = Style::default().fg(palette.muted).add_modifier(Modifier::DIM);
    let title_focused = editor.focus == EditorField::Title;
    let mut lines = Vec::new();
    let mut cursor = None;

    lines.push(label("Title", title_focused, palette));
    let title = editor.title.current();
    if title.is_empty() {
        lines.push(Line::from(Span::styled("Note title", placeholder)));
    } else {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&title, text_width),
            text_style,
        )));
    }
    if title_focused {
        cursor = Some((1, to_u16(visual_width(editor.title.line_before_cursor()))));
    }

    lines.push(Line::default());
    lines.push(label("Content", !title_focused, palette));
    let content_top = lines.len();
    let content = editor.content.current();
    let content_lines: Vec<&str> = content.split('\n').collect();
    let (cursor_line, _) = editor.content.cursor_line_col();
    let offset = cursor_line.saturating_sub(EDITOR_CONTENT_ROWS - 1);
    for row in 0..EDITOR_CONTENT_ROWS {
        match content_lines.get(offset + row) {
            Some(line) => lines.push(Line::from(Span::styled(
                truncate_to_width(line, text_width),
                text_style,
            ))),
            None if row == 0 && content.is_empty() => {
                lines.push(Line::from(Span::styled("Write your note...", placeholder)));
            }
            None => lines.push(Line::default()),
        }
    }
    if !title_focused {
        cursor = Some((
            to_u16(content_top + cursor_line - offset),
            to_u16(visual_width(editor.content.line_before_cursor())),
        ));
    }

    lines.push(Line::default());
    let visibility = if editor.is_private {
        "private note"
    } else {
        "note"
    };
    lines.push(hint(
        &format!("Tab field · Ctrl+S save {visibility} · Ctrl+X discard · Esc close"),
        palette,
    ));
    (lines, cursor)
}

fn build_pin_lines(
    state: &PinDialogState,
    app: &AppState,
    palette: &Palette,
    accent: Color,
    now: Instant,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(step) = state.step {
        lines.push(hint(&format!("Step {step} of {CHANGE_PIN_STEPS}"), palette));
    }
    lines.push(Line::default());

    let flash = app.animations.pin_flash(now);
    let pulsing = app.animations.pulsing_dot(now);
    let filled = state.pad.len();
    let mut dots = Vec::new();
    for index in 0..PIN_LENGTH {
        if index > 0 {
            dots.push(Span::raw("   "));
        }
        let symbol = if index < filled { "●" } else { "○" };
        let mut style = match flash {
            Some(PinFlash::Success) => Style::default().fg(palette.success),
            Some(PinFlash::Error) => Style::default().fg(palette.error),
            None if index < filled => Style::default().fg(accent),
            None => Style::default().fg(palette.border),
        };
        if pulsing == Some(index) {
            style = style.add_modifier(Modifier::BOLD);
        }
        dots.push(Span::styled(symbol, style));
    }
    lines.push(Line::from(dots));
    lines.push(Line::default());

    let message_style = match state.pad.phase() {
        PinPhase::Success => Style::default().fg(palette.success),
        PinPhase::Error => Style::default().fg(palette.error),
        PinPhase::Entering | PinPhase::Complete => Style::default().fg(palette.muted),
    };
    lines.push(Line::from(Span::styled(
        state.pad.message.clone().unwrap_or_default(),
        message_style,
    )));
    lines.push(Line::default());
    lines.push(hint("0-9 digit · Backspace delete · c clear · Esc cancel", palette));
    lines
}

fn button(text: &str, active: bool, palette: &Palette) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(palette.accent_text)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    Span::styled(format!("[ {text} ]"), style)
}

fn message_lines(message: Option<&str>, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let style = Style::default().fg(palette.text);
    wrap_text(message.unwrap_or_default(), width)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, style)))
        .collect()
}

fn build_confirm_lines(
    message: Option<&str>,
    choice: ConfirmChoice,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = message_lines(message, palette, width);
    lines.push(Line::default());
    lines.push(Line::from(vec![
        button("Yes", choice == ConfirmChoice::Yes, palette),
        Span::raw("    "),
        button("No", choice == ConfirmChoice::No, palette),
    ]));
    lines.push(hint("y/n · ←/→ choose · Enter select", palette));
    lines
}

fn build_alert_lines(message: Option<&str>, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let mut lines = message_lines(message, palette, width);
    lines.push(Line::default());
    lines.push(Line::from(button("OK", true, palette)));
    lines
}

fn build_settings_lines(
    settings: SettingsState,
    app: &AppState,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let theme = app.theme;
    let radio = |selected: bool| if selected { "(•)" } else { "( )" };
    let mut lines = vec![
        label("Theme", true, palette),
        Line::from(vec![
            Span::styled(
                format!(
                    "{} Light   {} Dark",
                    radio(theme.mode == ThemeMode::Light),
                    radio(theme.mode == ThemeMode::Dark)
                ),
                Style::default().fg(palette.text),
            ),
            Span::styled("    l / d", Style::default().fg(palette.muted)),
        ]),
        Line::default(),
        label("Accent color", true, palette),
        Line::from(vec![
            Span::styled(
                format!("◀ {} ▶", theme.accent),
                Style::default()
                    .fg(accent_color(theme.accent))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("    ← / →", Style::default().fg(palette.muted)),
        ]),
    ];
    let swatches: Vec<Span<'static>> = AccentColor::all()
        .iter()
        .map(|accent| {
            let selected = *accent == theme.accent;
            let symbol = if selected { "■ " } else { "□ " };
            let mut style = Style::default().fg(accent_color(*accent));
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            Span::styled(symbol, style)
        })
        .collect();
    lines.push(Line::from(swatches));
    if theme.private_override {
        lines.push(hint("Private notes use the red accent while unlocked", palette));
    }
    if settings.private_mode {
        lines.push(Line::default());
        lines.push(label("Security", true, palette));
        lines.push(Line::from(Span::styled(
            "c  Change PIN",
            Style::default().fg(palette.text),
        )));
    }
    lines.push(Line::default());
    lines.push(hint("Enter done · Esc close", palette));
    lines
}

pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(super) fn render_dialog(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    palette: &Palette,
    now: Instant,
) {
    let Some(dialog) = app.dialogs.active() else {
        return;
    };
    let view = build_modal_view(dialog, app, palette, area.width.saturating_sub(4), now);
    let height = to_u16(view.lines.len()).saturating_add(2);
    let rect = centered_rect(area, view.width, height);
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    let block = Block::bordered()
        .title(Line::from(Span::styled(
            format!(" {} ", view.title),
            Style::default().fg(view.accent).add_modifier(Modifier::BOLD),
        )))
        .border_style(Style::default().fg(view.accent))
        .style(Style::default().bg(palette.surface).fg(palette.text));
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(Text::from(view.lines))
            .alignment(view.alignment)
            .block(block),
        rect,
    );
    if let Some((row, column)) = view.cursor {
        if row < inner.height && inner.width > 0 {
            f.set_cursor_position(Position {
                x: inner.x + column.min(inner.width - 1),
                y: inner.y + row,
            });
        }
    }
}
