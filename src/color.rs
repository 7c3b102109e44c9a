use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Terminal color palette for the rain. The simulation core only produces
/// brightness values; schemes map those to RGB here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Green,
    Amber,
    Ice,
    Violet,
}

impl ColorScheme {
    pub fn name(&self) -> &str {
        match self {
            ColorScheme::Green => "Green",
            ColorScheme::Amber => "Amber",
            ColorScheme::Ice => "Ice",
            ColorScheme::Violet => "Violet",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Green => ColorScheme::Amber,
            ColorScheme::Amber => ColorScheme::Ice,
            ColorScheme::Ice => ColorScheme::Violet,
            ColorScheme::Violet => ColorScheme::Green,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ColorScheme::Green => ColorScheme::Violet,
            ColorScheme::Amber => ColorScheme::Green,
            ColorScheme::Ice => ColorScheme::Amber,
            ColorScheme::Violet => ColorScheme::Ice,
        }
    }

    fn channels(&self, intensity: u8) -> (u8, u8, u8) {
        let i = intensity as f32;
        match self {
            ColorScheme::Green => (0, intensity, 0),
            ColorScheme::Amber => (intensity, (i * 0.70) as u8, 0),
            ColorScheme::Ice => (0, (i * 0.85) as u8, intensity),
            ColorScheme::Violet => ((i * 0.65) as u8, 0, intensity),
        }
    }

    /// Shade for a settled glyph at the given brightness in [0, 1].
    pub fn shade(&self, brightness: f32) -> Color {
        let b = brightness.clamp(0.0, 1.0);
        let intensity = (28.0 + 220.0 * b) as u8;
        let (r, g, b) = self.channels(intensity);
        Color::Rgb(r, g, b)
    }

    /// Shade for the leading spinner glyph: the base shade pulled most of
    /// the way toward white, like the pale head of a rain column.
    pub fn spinner_shade(&self, brightness: f32) -> Color {
        let b = brightness.clamp(0.0, 1.0);
        let intensity = (28.0 + 220.0 * b) as u8;
        let (cr, cg, cb) = self.channels(intensity);
        let lift = |c: u8| c.saturating_add(((255 - c as u16) * 3 / 4) as u8);
        Color::Rgb(lift(cr), lift(cg), lift(cb))
    }
}
