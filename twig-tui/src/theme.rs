use ratatui::style::Color;
use twig_core::config::{NamedColor, ThemeColor, ThemeConfig};

pub struct Theme {
    pub accent: Color,
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub hint: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: color(&config.accent),
            secondary: color(&config.secondary),
            success: color(&config.success),
            error: color(&config.error),
            warning: color(&config.warning),
            muted: color(&config.muted),
            border: color(&config.border),
            hint: color(&config.hint),
            highlight_fg: color(&config.highlight_fg),
        }
    }
}

fn color(color: &ThemeColor) -> Color {
    match *color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
        ThemeColor::Named(NamedColor::Black) => Color::Black,
        ThemeColor::Named(NamedColor::Red) => Color::Red,
        ThemeColor::Named(NamedColor::Green) => Color::Green,
        ThemeColor::Named(NamedColor::Yellow) => Color::Yellow,
        ThemeColor::Named(NamedColor::Blue) => Color::Blue,
        ThemeColor::Named(NamedColor::Magenta) => Color::Magenta,
        ThemeColor::Named(NamedColor::Cyan) => Color::Cyan,
        ThemeColor::Named(NamedColor::White) => Color::White,
        ThemeColor::Named(NamedColor::Gray) => Color::Gray,
    }
}
