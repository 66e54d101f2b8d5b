//! At-exit report for compiled Fraud programs
//!
//! Summarizes how the run ended, controlled by `FRAUD_REPORT`:
//! - Unset → no report
//! - `1` → human-readable to stderr
//! - `json` → JSON to stderr
//! - `json:/path` → JSON to file
//!
//! The report never goes to the program's output sink.

use crate::config::{ReportConfig, ReportDestination, ReportFormat};
use crate::driver::Outcome;
use crate::error::RuntimeError;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Collected facts about one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// `None` when the output sink failed before the run could finish
    #[serde(flatten)]
    pub outcome: Option<Outcome>,
    pub exit_code: u8,
    /// Output sink failure, if any
    pub sink_error: Option<String>,
    pub wall_clock_ms: u64,
}

impl RunReport {
    pub fn new(result: &Result<Outcome, RuntimeError>, elapsed: Duration) -> Self {
        let wall_clock_ms = elapsed.as_millis() as u64;
        match result {
            Ok(outcome) => RunReport {
                outcome: Some(outcome.clone()),
                exit_code: outcome.exit_code(),
                sink_error: None,
                wall_clock_ms,
            },
            Err(e) => RunReport {
                outcome: None,
                exit_code: crate::driver::SINK_FAILURE_EXIT_CODE,
                sink_error: Some(e.to_string()),
                wall_clock_ms,
            },
        }
    }

    pub fn format_human(&self) -> String {
        let mut out = String::new();
        out.push_str("=== FRAUD REPORT ===\n");
        match &self.outcome {
            Some(Outcome::Completed { shape }) => {
                out.push_str(&format!("Outcome:    completed ({})\n", shape));
            }
            Some(Outcome::Raised { message }) => {
                out.push_str("Outcome:    raised\n");
                if let Some(msg) = message {
                    out.push_str(&format!("Message:    {}\n", msg));
                }
            }
            None => out.push_str("Outcome:    sink failure\n"),
        }
        if let Some(err) = &self.sink_error {
            out.push_str(&format!("Sink error: {}\n", err));
        }
        out.push_str(&format!("Exit code:  {}\n", self.exit_code));
        out.push_str(&format!("Wall clock: {} ms\n", self.wall_clock_ms));
        out.push_str("====================\n");
        out
    }

    pub fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write the report where `config` says
    pub fn emit(&self, config: &ReportConfig) {
        let output = match config.format {
            ReportFormat::Human => self.format_human(),
            ReportFormat::Json => {
                let mut json = self.format_json();
                json.push('\n');
                json
            }
        };

        match &config.destination {
            ReportDestination::Stderr => {
                let _ = std::io::stderr().write_all(output.as_bytes());
            }
            ReportDestination::File(path) => {
                if let Ok(mut f) = std::fs::File::create(path) {
                    let _ = f.write_all(output.as_bytes());
                } else {
                    tracing::warn!("report: could not write report to {}", path);
                    let _ = std::io::stderr().write_all(output.as_bytes());
                }
            }
        }
    }
}
