//! Painting rendered lines onto the terminal.

use std::io::{self, IsTerminal, Stderr, Stdout, Write};

use crossterm::style::{self, Stylize};
use weather_core::{Color, Line};

/// ANSI equivalent of a renderer color. `Red` and friends are the normal
/// (not bright) variants; `LightYellow` is the bright one.
pub fn term_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::LightYellow => style::Color::Yellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
    }
}

fn colors_enabled(stream_is_terminal: bool) -> bool {
    stream_is_terminal && std::env::var_os("NO_COLOR").is_none()
}

pub fn paint(line: &Line, colorize: bool) -> String {
    line.spans
        .iter()
        .map(|span| match span.color {
            Some(color) if colorize => span.text.as_str().with(term_color(color)).to_string(),
            _ => span.text.clone(),
        })
        .collect()
}

/// Report output goes to `out`; warnings go to `err` so `out` stays
/// parseable when it carries JSON.
#[derive(Debug)]
pub struct Printer<O, E> {
    out: O,
    err: E,
    color_out: bool,
    color_err: bool,
}

impl Printer<Stdout, Stderr> {
    pub fn stdio() -> Self {
        let (out, err) = (io::stdout(), io::stderr());
        Self {
            color_out: colors_enabled(out.is_terminal()),
            color_err: colors_enabled(err.is_terminal()),
            out,
            err,
        }
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    /// Uncolored printer over arbitrary writers.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err, color_out: false, color_err: false }
    }

    pub fn lines(&mut self, lines: &[Line]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", paint(line, self.color_out))?;
        }
        self.out.flush()
    }

    pub fn text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        let line = Line::new().push_colored(message, Color::Yellow);
        writeln!(self.err, "{}", paint(&line, self.color_err))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

pub fn print_error(err: &anyhow::Error) {
    let line = Line::new().push_colored(format!("{err:#}"), Color::Red);
    eprintln!("{}", paint(&line, colors_enabled(io::stderr().is_terminal())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncolored_paint_is_plain_text() {
        let line = Line::new().push("The temperature is ").push_colored("89.72°F", Color::Red);
        assert_eq!(paint(&line, false), "The temperature is 89.72°F");
    }

    #[test]
    fn colored_spans_get_escape_codes() {
        let line = Line::new().push("plain ").push_colored("red", Color::Red);
        let painted = paint(&line, true);

        assert!(painted.starts_with("plain "));
        assert!(painted.contains('\u{1b}'));
        assert!(painted.contains("red"));
        assert_ne!(painted, line.plain());
    }

    #[test]
    fn light_yellow_is_the_bright_variant() {
        assert_eq!(term_color(Color::LightYellow), style::Color::Yellow);
        assert_eq!(term_color(Color::Yellow), style::Color::DarkYellow);
    }

    #[test]
    fn colors_need_a_terminal() {
        assert!(!colors_enabled(false));
    }

    #[test]
    fn warnings_and_lines_use_separate_streams() {
        let mut printer = Printer::new(Vec::new(), Vec::new());
        printer.lines(&[Line::new().push("report"), Line::blank()]).unwrap();
        printer.warning("careful").unwrap();

        let (out, err) = printer.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "report\n\n");
        assert_eq!(String::from_utf8(err).unwrap(), "careful\n");
    }
}
