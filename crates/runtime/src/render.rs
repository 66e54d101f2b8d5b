//! Rendering values to their external text form
//!
//! | Shape   | Output                         |
//! |---------|--------------------------------|
//! | Int     | decimal, signed                |
//! | Bool    | `#t` / `#f`                    |
//! | Char    | whatever the [`CharPrinter`] writes |
//! | Eof     | `#<eof>`                       |
//! | Void    | nothing                        |
//! | Invalid | `internal error`               |
//!
//! Rendering is total and never raises. Framing (the trailing newline) is
//! the driver's job, not the renderer's.

use crate::chars::{CharPrinter, LiteralChars};
use fraud_core::Value;
use std::io::{self, Write};

/// Text written for a value that should never reach the render boundary
pub const INVALID_TEXT: &str = "internal error";

/// Write the external form of `value` to `out`
pub fn write_value(out: &mut dyn Write, value: &Value, chars: &dyn CharPrinter) -> io::Result<()> {
    match value {
        Value::Int(n) => write!(out, "{}", n),
        Value::Bool(true) => out.write_all(b"#t"),
        Value::Bool(false) => out.write_all(b"#f"),
        Value::Char(c) => chars.print_char(out, *c),
        Value::Eof => out.write_all(b"#<eof>"),
        Value::Void => Ok(()),
        Value::Invalid => {
            tracing::warn!("render: invalid value reached the output boundary");
            out.write_all(INVALID_TEXT.as_bytes())
        }
    }
}

/// Render `value` to a string with the default character printer
pub fn render(value: &Value) -> String {
    let mut buf = Vec::new();
    // `LiteralChars` writing into a Vec cannot fail
    let _ = write_value(&mut buf, value, &LiteralChars);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Render `value` to a string with a custom character printer
///
/// An error from `chars` is returned as is, never as truncated text.
pub fn render_with(value: &Value, chars: &dyn CharPrinter) -> io::Result<String> {
    let mut buf = Vec::new();
    write_value(&mut buf, value, chars)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
