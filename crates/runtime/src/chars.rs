//! Character printing
//!
//! The renderer hands every `Char` value to a [`CharPrinter`]. The runtime
//! ships [`LiteralChars`], which writes the character's external literal
//! form (`#\a`, `#\space`, `#\u0001`); hosts with a different notation
//! supply their own printer.

use std::io::{self, Write};

/// Writes the external form of a single character to a sink.
pub trait CharPrinter {
    fn print_char(&self, out: &mut dyn Write, c: char) -> io::Result<()>;
}

/// Default printer: Racket-style character literals
///
/// Named characters use their names, other control characters use a
/// `\u` escape with at least four hex digits, and everything else is
/// written as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralChars;

/// Names for characters that have one, keyed by code point
const CHAR_NAMES: [(char, &str); 9] = [
    ('\u{0}', "nul"),
    ('\u{8}', "backspace"),
    ('\t', "tab"),
    ('\n', "newline"),
    ('\u{b}', "vtab"),
    ('\u{c}', "page"),
    ('\r', "return"),
    (' ', "space"),
    ('\u{7f}', "rubout"),
];

fn char_name(c: char) -> Option<&'static str> {
    CHAR_NAMES
        .iter()
        .find(|(named, _)| *named == c)
        .map(|(_, name)| *name)
}

impl CharPrinter for LiteralChars {
    fn print_char(&self, out: &mut dyn Write, c: char) -> io::Result<()> {
        out.write_all(b"#\\")?;
        if let Some(name) = char_name(c) {
            out.write_all(name.as_bytes())
        } else if c.is_control() {
            write!(out, "u{:04X}", c as u32)
        } else {
            let mut buf = [0u8; 4];
            out.write_all(c.encode_utf8(&mut buf).as_bytes())
        }
    }
}
