//! Runtime Error Handling
//!
//! `raise` carries no payload. An entry computation that wants to say *why*
//! it gave up stashes a message here first; the driver takes it after the
//! trap fires and hands it to the log and the at-exit report. The message is
//! never written to the program's output.
//!
//! # Usage
//!
//! ```ignore
//! if divisor == 0 {
//!     set_runtime_error("quotient: division by zero");
//!     trap::raise();
//! }
//! ```
//!
//! This module also defines [`RuntimeError`], the failure type for the
//! runtime's own I/O (a closed or broken output sink).

use std::cell::RefCell;
use std::fmt;
use std::io;

thread_local! {
    /// Thread-local storage for the last runtime error message
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Set the last runtime error message
pub fn set_runtime_error(msg: impl Into<String>) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(msg.into());
    });
}

/// Take (and clear) the last runtime error message
pub fn take_runtime_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Check if there's a pending runtime error
pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

/// Clear any pending runtime error
pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Error type for the runtime's own operations.
///
/// Program failures go through the trap, not through this type.
#[derive(Debug)]
pub enum RuntimeError {
    /// Writing to or flushing the output sink failed
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Io(e) => write!(f, "output sink error: {}", e),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Io(e)
    }
}
