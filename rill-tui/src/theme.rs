use ratatui::style::Color;
use rill_core::config::{NamedColor, ThemeColor, ThemeConfig};

pub struct Theme {
    pub accent: Color,
    pub highlight_fg: Color,
    pub unread: Color,
    pub read: Color,
    pub marked: Color,
    pub title: Color,
    pub border: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(&config.accent),
            highlight_fg: to_ratatui_color(&config.highlight_fg),
            unread: to_ratatui_color(&config.unread),
            read: to_ratatui_color(&config.read),
            marked: to_ratatui_color(&config.marked),
            title: to_ratatui_color(&config.title),
            border: to_ratatui_color(&config.border),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
        },
    }
}
