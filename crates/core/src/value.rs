use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape: the discriminator of a [`Value`]
///
/// One variant per `Value` variant, payload-free, so callers can branch on
/// the kind of a value without touching its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Int,
    Bool,
    Char,
    Eof,
    Void,
    Invalid,
}

impl Shape {
    /// Every shape, in declaration order
    pub const ALL: [Shape; 6] = [
        Shape::Int,
        Shape::Bool,
        Shape::Char,
        Shape::Eof,
        Shape::Void,
        Shape::Invalid,
    ];

    /// Stable name used in panic messages, logs and reports
    pub fn name(self) -> &'static str {
        match self {
            Shape::Int => "integer",
            Shape::Bool => "boolean",
            Shape::Char => "character",
            Shape::Eof => "eof",
            Shape::Void => "void",
            Shape::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value: What the language talks about
///
/// The closed set of results an entry computation can produce. Every value
/// is immutable plain data; copying it is the only way to share it.
///
/// Dispatch over a `Value` is always an exhaustive `match` without a
/// wildcard arm. Adding a variant here must break every such site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Integer value (64-bit, signed)
    Int(i64),

    /// Boolean value
    Bool(bool),

    /// Character (a Unicode scalar value)
    Char(char),

    /// End of input sentinel
    Eof,

    /// No printable result
    Void,

    /// Internal state a well-formed program never produces.
    /// Seeing it at the render boundary means the entry computation is broken.
    Invalid,
}

impl Value {
    /// The shape discriminator of this value
    #[inline]
    pub fn shape(&self) -> Shape {
        match self {
            Value::Int(_) => Shape::Int,
            Value::Bool(_) => Shape::Bool,
            Value::Char(_) => Shape::Char,
            Value::Eof => Shape::Eof,
            Value::Void => Shape::Void,
            Value::Invalid => Shape::Invalid,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Extract the integer payload
    ///
    /// # Panics
    /// Panics if the value is not an `Int`. Callers must check the shape
    /// first; a mismatch is a bug in the caller.
    pub fn unwrap_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            other => mismatch(Shape::Int, other),
        }
    }

    /// Extract the boolean payload
    ///
    /// # Panics
    /// Panics if the value is not a `Bool`.
    pub fn unwrap_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => mismatch(Shape::Bool, other),
        }
    }

    /// Extract the character payload
    ///
    /// # Panics
    /// Panics if the value is not a `Char`.
    pub fn unwrap_char(&self) -> char {
        match self {
            Value::Char(c) => *c,
            other => mismatch(Shape::Char, other),
        }
    }
}

#[cold]
#[track_caller]
fn mismatch(expected: Shape, got: &Value) -> ! {
    panic!(
        "value: expected {} payload, got {} ({:?})",
        expected,
        got.shape(),
        got
    )
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}
