use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Used wherever a color is passed through directly and the source color is unusable.
pub const FALLBACK_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color string is empty")]
    Empty,
    #[error("malformed hex color: {0:?}")]
    Malformed(String),
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional, case-insensitive) into channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Malformed(hex.to_string()));
    }
    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(ColorError::Malformed(hex.to_string())),
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| ColorError::Malformed(hex.to_string()))
    };
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Normalize to `#rrggbb`, or [`FALLBACK_COLOR`] if the input doesn't parse.
pub fn sanitize_color(color: &str) -> String {
    match hex_to_rgb(color) {
        Ok(rgb) => rgb.to_string(),
        Err(_) => FALLBACK_COLOR.to_string(),
    }
}

/// Fade-out ramp for a point: full opacity at `t = 0`, transparent at `t = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFade {
    rgb: Rgb,
}

impl ColorFade {
    pub fn new(rgb: Rgb) -> Self {
        Self { rgb }
    }

    pub fn at(&self, t: f64) -> String {
        let alpha = if t.is_nan() {
            1.0
        } else {
            (1.0 - t).clamp(0.0, 1.0)
        };
        let Rgb { r, g, b } = self.rgb;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}
