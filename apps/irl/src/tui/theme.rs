//! Color themes.
//!
//! Picks a dark or light palette from `COLORFGBG`, and a colorless one when
//! `NO_COLOR` is set.

use ratatui::style::Color;

/// Palette shared by every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Active or focused elements.
    pub highlight: Color,
    /// Selected list rows.
    pub selected: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Secondary text such as hints and ages.
    pub muted: Color,
    pub text: Color,
    /// Marks folders that already hold a project.
    pub project: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            selected: Color::LightBlue,
            border: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            text: Color::White,
            project: Color::Magenta,
        }
    }

    /// Palette for light terminal backgrounds.
    #[must_use]
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            selected: Color::DarkGray,
            border: Color::Gray,
            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(204, 153, 0),
            error: Color::Rgb(139, 0, 0),
            muted: Color::Gray,
            text: Color::Black,
            project: Color::Rgb(128, 0, 128),
        }
    }

    /// Uses the terminal's own colors everywhere.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            highlight: Color::Reset,
            selected: Color::Reset,
            border: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            muted: Color::Reset,
            text: Color::Reset,
            project: Color::Reset,
        }
    }

    /// Chooses a theme from `NO_COLOR` and `COLORFGBG`, defaulting to dark.
    ///
    /// `COLORFGBG` is `foreground;background` in ANSI color codes. Background
    /// 7 and 8 to 15 are treated as light.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return Self::plain();
        }
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| detect_theme_from_colorfgbg(&value))
            .unwrap_or_else(Self::dark)
    }
}

fn detect_theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.split(';').nth(1)?.trim().parse().ok()?;
    if background >= 8 || background == 7 {
        Some(Theme::light())
    } else {
        Some(Theme::dark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark() {
        assert_eq!(Theme::default(), Theme::dark());
    }

    #[test]
    fn colorfgbg_dark_backgrounds() {
        assert_eq!(detect_theme_from_colorfgbg("15;0"), Some(Theme::dark()));
        assert_eq!(detect_theme_from_colorfgbg("7;4"), Some(Theme::dark()));
        assert_eq!(
            detect_theme_from_colorfgbg("15;0;extra"),
            Some(Theme::dark())
        );
    }

    #[test]
    fn colorfgbg_light_backgrounds() {
        assert_eq!(detect_theme_from_colorfgbg("0;7"), Some(Theme::light()));
        assert_eq!(detect_theme_from_colorfgbg("0;15"), Some(Theme::light()));
    }

    #[test]
    fn colorfgbg_invalid() {
        assert!(detect_theme_from_colorfgbg("").is_none());
        assert!(detect_theme_from_colorfgbg("15").is_none());
        assert!(detect_theme_from_colorfgbg("default;default").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn no_color_wins() {
        let original = std::env::var("NO_COLOR").ok();

        // SAFETY: serialized with the other env-mutating tests.
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        assert_eq!(Theme::detect(), Theme::plain());

        unsafe {
            match original {
                Some(val) => std::env::set_var("NO_COLOR", val),
                None => std::env::remove_var("NO_COLOR"),
            }
        }
    }
}
