//! Display modes and colors accepted by a [`Loader`](crate::Loader).
//!
//! Both are parsed from their lowercase names so that invalid values coming from
//! configuration or the command line are rejected when the loader is built.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// Selects the built-in strategy used to format a frame.
///
/// The spinner is not a style: it is enabled with
/// [`Options::spinner`](crate::Options::spinner) and overrides whichever style is set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Style {
    #[default]
    Bar,
    Dots,
    TimeClock,
}

impl Style {
    /// Accepted style names.
    pub const NAMES: [&'static str; 3] = ["bar", "dots", "time_clock"];

    /// Name this style is parsed from.
    pub fn name(self) -> &'static str {
        match self {
            Style::Bar => "bar",
            Style::Dots => "dots",
            Style::TimeClock => "time_clock",
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Style::Bar),
            "dots" => Ok(Style::Dots),
            "time_clock" => Ok(Style::TimeClock),
            other => Err(Error::InvalidStyle(other.to_string())),
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color of the bracketed part of the bar.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Color {
    #[default]
    Blue,
    Green,
    Red,
}

impl Color {
    /// Accepted color names.
    pub const NAMES: [&'static str; 3] = ["blue", "green", "red"];

    /// Name this color is parsed from.
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
        }
    }

    /// Bright foreground SGR code.
    pub fn ansi_code(self) -> u8 {
        match self {
            Color::Blue => 94,
            Color::Green => 92,
            Color::Red => 91,
        }
    }

    /// Wraps `text` in this color, resetting all attributes afterwards.
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.ansi_code(), text)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "red" => Ok(Color::Red),
            other => Err(Error::InvalidColor(other.to_string())),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a string holding exactly one character.
pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_styles() {
        for name in Style::NAMES {
            let style: Style = name.parse().unwrap();
            assert_eq!(style.to_string(), name);
        }
    }

    #[test]
    fn rejects_unknown_style() {
        assert_eq!(
            "pie".parse::<Style>(),
            Err(Error::InvalidStyle("pie".into()))
        );
        // spinner is a flag, not a style
        assert!("spinner".parse::<Style>().is_err());
    }

    #[test]
    fn rejects_unknown_color() {
        assert_eq!(
            "purple".parse::<Color>(),
            Err(Error::InvalidColor("purple".into()))
        );
    }

    #[test]
    fn paints_with_bright_codes() {
        assert_eq!(Color::Blue.paint("[#]"), "\x1b[94m[#]\x1b[0m");
        assert_eq!(Color::Green.ansi_code(), 92);
        assert_eq!(Color::Red.ansi_code(), 91);
    }

    #[test]
    fn single_char_counts_chars_not_bytes() {
        assert_eq!(single_char("#"), Some('#'));
        assert_eq!(single_char("█"), Some('█'));
        assert_eq!(single_char("##"), None);
        assert_eq!(single_char(""), None);
    }
}
