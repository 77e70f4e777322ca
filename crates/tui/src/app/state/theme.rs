use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Unknown values fall back to light.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AccentColor {
    #[default]
    SkyBlue,
    Purple,
    Teal,
    Orange,
    Pink,
    Lime,
    Indigo,
    Amber,
    Emerald,
    Ruby,
    Slate,
}

const ACCENT_COLORS: &[AccentColor] = &[
    AccentColor::SkyBlue,
    AccentColor::Purple,
    AccentColor::Teal,
    AccentColor::Orange,
    AccentColor::Pink,
    AccentColor::Lime,
    AccentColor::Indigo,
    AccentColor::Amber,
    AccentColor::Emerald,
    AccentColor::Ruby,
    AccentColor::Slate,
];

impl AccentColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SkyBlue => "sky-blue",
            Self::Purple => "purple",
            Self::Teal => "teal",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Lime => "lime",
            Self::Indigo => "indigo",
            Self::Amber => "amber",
            Self::Emerald => "emerald",
            Self::Ruby => "ruby",
            Self::Slate => "slate",
        }
    }

    pub fn all() -> &'static [AccentColor] {
        ACCENT_COLORS
    }

    /// Unknown values fall back to sky-blue.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim().to_ascii_lowercase();
        ACCENT_COLORS
            .iter()
            .copied()
            .find(|color| color.as_str() == trimmed)
            .unwrap_or_default()
    }

    fn index(self) -> usize {
        ACCENT_COLORS
            .iter()
            .position(|color| *color == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        ACCENT_COLORS[(self.index() + 1) % ACCENT_COLORS.len()]
    }

    pub fn previous(self) -> Self {
        let len = ACCENT_COLORS.len();
        ACCENT_COLORS[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User theme plus the red override shown while private notes are unlocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub accent: AccentColor,
    pub private_override: bool,
}

#[cfg(test)]
mod tests {
    use super::{AccentColor, ThemeMode};

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        assert_eq!(ThemeMode::parse("sepia"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse(" Dark "), ThemeMode::Dark);
        assert_eq!(AccentColor::parse("red"), AccentColor::SkyBlue);
        assert_eq!(AccentColor::parse("emerald"), AccentColor::Emerald);
    }

    #[test]
    fn accent_cycle_wraps_both_ways() {
        assert_eq!(AccentColor::Slate.next(), AccentColor::SkyBlue);
        assert_eq!(AccentColor::SkyBlue.previous(), AccentColor::Slate);
        assert_eq!(AccentColor::Teal.next(), AccentColor::Orange);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for color in AccentColor::all() {
            assert_eq!(AccentColor::parse(color.as_str()), *color);
        }
    }
}
