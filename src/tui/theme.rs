use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::Priority;

/// Parsed color theme for the TUI. One palette is active at a time; `t`
/// toggles between the dark and light variants.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub accent: Color,
    pub selection_bg: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1B, 0x26),
            text: Color::Rgb(0xA9, 0xB1, 0xD6),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x56, 0x5F, 0x89),
            accent: Color::Rgb(0x7A, 0xA2, 0xF7),
            selection_bg: Color::Rgb(0x28, 0x34, 0x57),
            green: Color::Rgb(0x9E, 0xCE, 0x6A),
            yellow: Color::Rgb(0xE0, 0xAF, 0x68),
            red: Color::Rgb(0xF7, 0x76, 0x8E),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x34, 0x3B, 0x58),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            dim: Color::Rgb(0x8A, 0x91, 0xA8),
            accent: Color::Rgb(0x29, 0x5E, 0xD9),
            selection_bg: Color::Rgb(0xDC, 0xE3, 0xF7),
            green: Color::Rgb(0x2E, 0x7D, 0x32),
            yellow: Color::Rgb(0xB2, 0x6A, 0x00),
            red: Color::Rgb(0xC6, 0x28, 0x28),
        }
    }

    /// Build the active palette from config overrides. Overrides apply on
    /// top of whichever base palette `dark` selects.
    pub fn from_config(colors: &HashMap<String, String>, dark: bool) -> Self {
        let mut theme = if dark { Theme::dark() } else { Theme::light() };

        for (key, value) in colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "accent" => theme.accent = color,
                    "selection_bg" => theme.selection_bg = color,
                    "green" => theme.green = color,
                    "yellow" => theme.yellow = color,
                    "red" => theme.red = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Badge color for a priority level
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.green,
            Priority::Medium => self.yellow,
            Priority::High => self.red,
        }
    }
}

/// Parse a hex color string like "#7AA2F7" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
