use ratatui::style::Color;

/// Colors for one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub bg: Color,
    pub dialog_bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 32),
            dialog_bg: Color::Rgb(36, 36, 48),
            fg: Color::Rgb(220, 220, 230),
            accent: Color::Rgb(255, 105, 135),
            highlight: Color::Rgb(250, 200, 90),
            muted: Color::Rgb(130, 130, 150),
            success: Color::Rgb(120, 210, 140),
            warning: Color::Rgb(240, 170, 80),
            border: Color::Rgb(70, 70, 90),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 252),
            dialog_bg: Color::Rgb(238, 238, 244),
            fg: Color::Rgb(30, 30, 40),
            accent: Color::Rgb(200, 40, 80),
            highlight: Color::Rgb(170, 110, 0),
            muted: Color::Rgb(110, 110, 125),
            success: Color::Rgb(30, 140, 60),
            warning: Color::Rgb(190, 100, 0),
            border: Color::Rgb(200, 200, 212),
        }
    }

    pub fn for_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
