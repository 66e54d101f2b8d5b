//! Fraud Core: the value model shared by the runtime and generated code
//!
//! Key design principles:
//! - Value: What the language talks about (Int, Bool, Char, Eof, Void, Invalid)
//! - Shape: the payload-free discriminator of a Value, queried in O(1)
//! - Payload extraction on the wrong shape is a bug and panics; it is never
//!   reported as a recoverable error
//!
//! # Modules
//!
//! - `value`: Core Value enum and its Shape discriminator

pub mod value;

pub use value::{Shape, Value};
