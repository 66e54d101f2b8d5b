//! Program driver
//!
//! Runs the entry computation once, renders its result, and frames the
//! output:
//!
//! 1. Install the driver's trap for the extent of the entry.
//! 2. Call the entry. If it raises, flush what it already wrote, write
//!    `err\n`, and finish with status 1.
//! 3. Render the value, then a newline unless the value is `Void`.
//! 4. Flush and finish with status 0.
//!
//! Streams come in through [`Context`], so tests drive a program against
//! in-memory buffers. [`start`] binds the real stdin/stdout for a compiled
//! program's `main`.

use crate::chars::{CharPrinter, LiteralChars};
use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, clear_runtime_error, format_panic_payload, take_runtime_error};
use crate::logging::init_logging;
use crate::render::write_value;
use crate::report::RunReport;
use crate::trap::{self, ERR_TEXT, TRAP_EXIT_CODE};
use fraud_core::{Shape, Value};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error};

/// Exit status when the output sink itself fails
pub const SINK_FAILURE_EXIT_CODE: u8 = 2;

/// The streams an entry computation reads from and writes to
pub struct Context<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The entry returned a value of this shape and it was rendered
    Completed { shape: Shape },
    /// The entry raised; `message` is whatever it stashed first
    Raised { message: Option<String> },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Completed { .. } => 0,
            Outcome::Raised { .. } => TRAP_EXIT_CODE,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Run `entry` against `ctx` with the default character printer
pub fn run<F>(entry: F, ctx: &mut Context<'_>) -> Result<Outcome, RuntimeError>
where
    F: FnOnce(&mut Context<'_>) -> Value,
{
    run_with(entry, ctx, &LiteralChars)
}

/// Run `entry` against `ctx`, rendering characters with `chars`
///
/// The value's shape is not checked; rendering handles every shape.
/// A panic in `entry` that is not a raise is logged and keeps unwinding.
pub fn run_with<F>(
    entry: F,
    ctx: &mut Context<'_>,
    chars: &dyn CharPrinter,
) -> Result<Outcome, RuntimeError>
where
    F: FnOnce(&mut Context<'_>) -> Value,
{
    // A message left over from an earlier run on this thread is not ours
    clear_runtime_error();

    let caught = panic::catch_unwind(AssertUnwindSafe(|| trap::catch(|| entry(&mut *ctx))));
    let value = match caught {
        Ok(Ok(value)) => value,
        Ok(Err(trap::Raised)) => {
            let message = take_runtime_error();
            debug!(stashed = message.as_deref(), "driver: entry raised");
            // Partial output goes out before the error line
            ctx.output.flush()?;
            ctx.output.write_all(ERR_TEXT)?;
            ctx.output.flush()?;
            return Ok(Outcome::Raised { message });
        }
        Err(payload) => {
            error!("driver: entry panicked: {}", format_panic_payload(payload.as_ref()));
            panic::resume_unwind(payload)
        }
    };

    debug!(shape = %value.shape(), "driver: entry returned");
    write_value(&mut *ctx.output, &value, chars)?;
    if !value.is_void() {
        ctx.output.write_all(b"\n")?;
    }
    ctx.output.flush()?;

    Ok(Outcome::Completed {
        shape: value.shape(),
    })
}

/// Process entry point for a compiled program
///
/// Reads configuration from the environment, runs `entry` on the real
/// stdin/stdout, writes the at-exit report if one was requested, and
/// returns the exit status for `main`.
pub fn start<F>(entry: F) -> ExitCode
where
    F: FnOnce(&mut Context<'_>) -> Value,
{
    let config = RuntimeConfig::from_env();
    init_logging(&config.log_filter);

    let started = Instant::now();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    // No buffer of our own: a replacement hook may end the process with
    // `process::exit`, which flushes std's stdout but nothing layered on it
    let mut output = io::stdout().lock();
    let result = {
        let mut ctx = Context::new(&mut input, &mut output);
        run(entry, &mut ctx)
    };

    if let Some(report) = &config.report {
        RunReport::new(&result, started.elapsed()).emit(report);
    }

    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!("driver: {}", e);
            ExitCode::from(SINK_FAILURE_EXIT_CODE)
        }
    }
}
