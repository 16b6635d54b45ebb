//! Terminal-agnostic styled text.
//!
//! The renderer produces [`Line`]s made of colored [`Span`]s; painting them
//! is left to the front end.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    LightYellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::LightYellow => "light_yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Option<Color>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self { text: text.into(), color: Some(color) }
    }
}

/// One output line. May contain embedded newlines (icons, alert bodies).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn push(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::plain(text));
        self
    }

    pub fn push_colored(mut self, text: impl Into<String>, color: Color) -> Self {
        self.spans.push(Span::colored(text, color));
        self
    }

    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// Text with all color information dropped.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Self { spans: vec![span] }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

/// Plain text of every line, joined with newlines.
pub fn to_plain_text(lines: &[Line]) -> String {
    lines.iter().map(Line::plain).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_drops_colors() {
        let line = Line::new()
            .push("The temperature is ")
            .push_colored("89.72°F", Color::Magenta);

        assert_eq!(line.plain(), "The temperature is 89.72°F");
        assert_eq!(line.spans[1].color, Some(Color::Magenta));
        assert!(!line.is_blank());
        assert!(Line::blank().is_blank());
    }
}
