//! Presentation of section lines.
//!
//! Bullet markers are swapped for a glyph at display time only; section
//! content keeps the original text.

use std::fmt;

pub const BULLET_GLYPH: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLine<'a> {
    /// A `- ` or `* ` line, with the marker removed.
    Bullet(&'a str),
    Text(&'a str),
}

pub fn display_line(line: &str) -> DisplayLine<'_> {
    match line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        Some(rest) => DisplayLine::Bullet(rest),
        None => DisplayLine::Text(line),
    }
}

impl fmt::Display for DisplayLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLine::Bullet(text) => write!(f, "{BULLET_GLYPH} {text}"),
            DisplayLine::Text(text) => f.write_str(text),
        }
    }
}
