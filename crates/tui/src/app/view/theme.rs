use crate::app::state::{AccentColor, ThemeMode, ThemeState};
use ratatui::style::Color;

pub(crate) const PRIVATE_ACCENT: Color = Color::Rgb(220, 38, 38);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) surface: Color,
    pub(crate) text: Color,
    pub(crate) muted: Color,
    pub(crate) border: Color,
    pub(crate) accent: Color,
    pub(crate) accent_text: Color,
    pub(crate) success: Color,
    pub(crate) error: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(248, 250, 252),
    surface: Color::Rgb(255, 255, 255),
    text: Color::Rgb(30, 41, 59),
    muted: Color::Rgb(100, 116, 139),
    border: Color::Rgb(203, 213, 225),
    accent: Color::Rgb(14, 165, 233),
    accent_text: Color::Rgb(255, 255, 255),
    success: Color::Rgb(22, 163, 74),
    error: Color::Rgb(220, 38, 38),
};

const DARK: Palette = Palette {
    background: Color::Rgb(15, 23, 42),
    surface: Color::Rgb(30, 41, 59),
    text: Color::Rgb(226, 232, 240),
    muted: Color::Rgb(148, 163, 184),
    border: Color::Rgb(71, 85, 105),
    accent: Color::Rgb(56, 189, 248),
    accent_text: Color::Rgb(15, 23, 42),
    success: Color::Rgb(74, 222, 128),
    error: Color::Rgb(248, 113, 113),
};

pub(crate) fn accent_color(accent: AccentColor) -> Color {
    match accent {
        AccentColor::SkyBlue => Color::Rgb(14, 165, 233),
        AccentColor::Purple => Color::Rgb(147, 51, 234),
        AccentColor::Teal => Color::Rgb(20, 184, 166),
        AccentColor::Orange => Color::Rgb(249, 115, 22),
        AccentColor::Pink => Color::Rgb(236, 72, 153),
        AccentColor::Lime => Color::Rgb(132, 204, 22),
        AccentColor::Indigo => Color::Rgb(99, 102, 241),
        AccentColor::Amber => Color::Rgb(245, 158, 11),
        AccentColor::Emerald => Color::Rgb(16, 185, 129),
        AccentColor::Ruby => Color::Rgb(225, 29, 72),
        AccentColor::Slate => Color::Rgb(100, 116, 139),
    }
}

pub(crate) fn palette_for(theme: &ThemeState) -> Palette {
    let base = match theme.mode {
        ThemeMode::Light => LIGHT,
        ThemeMode::Dark => DARK,
    };
    let accent = if theme.private_override {
        PRIVATE_ACCENT
    } else {
        accent_color(theme.accent)
    };
    Palette { accent, ..base }
}
