use ratatui::style::Color;

use crate::model::{Category, Swatch, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Card and popup fill
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    /// Selected card border and cursor row
    pub highlight: Color,
    pub red: Color,
    pub green: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            surface: Color::Rgb(0x1A, 0x0B, 0x2E),
            text: Color::Rgb(0xE0, 0xDD, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6B, 0x64, 0x90),
            highlight: Color::Rgb(0x00, 0xF0, 0xFF),
            red: Color::Rgb(0xFF, 0x00, 0x5C),
            green: Color::Rgb(0x00, 0xFF, 0x85),
        }
    }
}

/// Parse a hex color string like "#FF005C" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn swatch_color(swatch: Swatch) -> Color {
    let (r, g, b) = swatch.rgb();
    Color::Rgb(r, g, b)
}

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "surface" => theme.surface = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "red" => theme.red = color,
                    "green" => theme.green = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Accent color for a category. Stored colors outside the palette are
    /// still drawn if they are valid hex.
    pub fn category_color(&self, category: &Category) -> Color {
        category
            .swatch()
            .map(swatch_color)
            .or_else(|| parse_hex_color(&category.color))
            .unwrap_or(self.highlight)
    }
}
