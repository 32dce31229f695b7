// src/core/color.rs

use crate::models::AnsiColor;
use anyhow::{Result, anyhow};

/// Parses a color name string (e.g., "red", "green") into an `AnsiColor` enum.
pub fn parse_color_name(name: &str) -> Result<AnsiColor> {
    match name.trim().to_lowercase().as_str() {
        "reset" => Ok(AnsiColor::Reset),
        "black" => Ok(AnsiColor::Black),
        "red" => Ok(AnsiColor::Red),
        "green" => Ok(AnsiColor::Green),
        "yellow" => Ok(AnsiColor::Yellow),
        "blue" => Ok(AnsiColor::Blue),
        "magenta" => Ok(AnsiColor::Magenta),
        "cyan" => Ok(AnsiColor::Cyan),
        "white" => Ok(AnsiColor::White),
        _ => Err(anyhow!("Unknown color name: '{}'", name)),
    }
}

/// Paints `text` with `color`. `Reset` leaves the text untouched.
pub fn paint(text: &str, color: AnsiColor) -> String {
    use colored::{Color, Colorize};

    let color = match color {
        AnsiColor::Reset => return text.to_string(),
        AnsiColor::Black => Color::Black,
        AnsiColor::Red => Color::Red,
        AnsiColor::Green => Color::Green,
        AnsiColor::Yellow => Color::Yellow,
        AnsiColor::Blue => Color::Blue,
        AnsiColor::Magenta => Color::Magenta,
        AnsiColor::Cyan => Color::Cyan,
        AnsiColor::White => Color::White,
    };
    text.color(color).to_string()
}
