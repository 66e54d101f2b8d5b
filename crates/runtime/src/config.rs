//! Runtime configuration
//!
//! Read once at program start from environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FRAUD_LOG` | `warn` | `tracing` filter directive for runtime logs (stderr) |
//! | `FRAUD_REPORT` | unset | At-exit report: `1` human, `json`, or `json:/path` |
//!
//! Neither setting changes what the program writes to its output sink.

/// Default log filter when `FRAUD_LOG` is unset or empty
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Report output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFormat {
    Human,
    Json,
}

/// Report output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    Stderr,
    File(String),
}

/// Parsed report configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub destination: ReportDestination,
}

impl ReportConfig {
    /// Parse a `FRAUD_REPORT` value
    ///
    /// Returns `None` for "no report", including unrecognized values (which
    /// are logged and ignored).
    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "" | "0" => None,
            "1" => Some(ReportConfig {
                format: ReportFormat::Human,
                destination: ReportDestination::Stderr,
            }),
            "json" => Some(ReportConfig {
                format: ReportFormat::Json,
                destination: ReportDestination::Stderr,
            }),
            s if s.starts_with("json:") && s.len() > 5 => Some(ReportConfig {
                format: ReportFormat::Json,
                destination: ReportDestination::File(s[5..].to_string()),
            }),
            _ => {
                eprintln!("Warning: FRAUD_REPORT='{}' not recognized, ignoring", val);
                None
            }
        }
    }

    /// Parse from the `FRAUD_REPORT` environment variable
    pub fn from_env() -> Option<Self> {
        let val = std::env::var("FRAUD_REPORT").ok()?;
        Self::parse(&val)
    }
}

/// Everything the driver needs to know about its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// `EnvFilter` directive for the log subscriber
    pub log_filter: String,
    /// At-exit report, if requested
    pub report: Option<ReportConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            report: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_filter = std::env::var("FRAUD_LOG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            log_filter,
            report: ReportConfig::from_env(),
        }
    }
}
