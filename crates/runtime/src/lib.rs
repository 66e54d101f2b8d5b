//! Fraud Runtime: the tail end of a compiled Fraud program
//!
//! A compiled program supplies one entry computation. The runtime calls it,
//! prints the value it returns, and owns the single way a program can fail:
//! the trap behind [`raise`].
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     fraud_runtime::start(|_ctx| fraud_runtime::Value::Int(7))
//! }
//! ```
//!
//! # Modules
//!
//! - `chars`: external form of character values
//! - `config`: environment-driven runtime configuration
//! - `driver`: run the entry, render, frame, pick the exit status
//! - `error`: stashed error messages and the runtime's own error type
//! - `logging`: `tracing` subscriber setup (stderr)
//! - `render`: value → text
//! - `report`: optional at-exit report
//! - `trap`: `raise` and the replaceable hook behind it

pub mod chars;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod render;
pub mod report;
pub mod trap;

pub use fraud_core::{Shape, Value};

pub use chars::{CharPrinter, LiteralChars};
pub use config::{ReportConfig, RuntimeConfig};
pub use driver::{Context, Outcome, run, run_with, start};
pub use error::{
    RuntimeError, clear_runtime_error, has_runtime_error, set_runtime_error, take_runtime_error,
};
pub use render::{render, render_with, write_value};
pub use trap::{HookGuard, Raised, catch, install, raise, raise_with, replace_hook};
