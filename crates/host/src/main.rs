//! Fraud runtime host CLI
//!
//! Stands in for a compiled program: the entry computation is picked on the
//! command line, then handed to the real driver on stdin/stdout. Useful for
//! checking exact output bytes and exit statuses from the outside.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use fraud_runtime::{Value, trap};
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit status for a command line the host cannot use
const USAGE_EXIT_CODE: u8 = 2;

#[derive(ClapParser)]
#[command(name = "fraudr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fraud runtime host - run an entry result through the driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program whose entry returns the given value
    ///
    /// Test host only: '"Invalid"' is accepted so the renderer's defensive
    /// path can be checked from outside. A compiled program never produces it.
    Value {
        /// The value as JSON, e.g. '{"Int":7}', '{"Char":"a"}', '"Void"'
        json: String,
    },

    /// Run a program whose entry raises
    Raise {
        /// Text the entry writes to stdout before raising
        #[arg(long)]
        partial: Option<String>,

        /// Message stashed for the log and report before raising
        #[arg(short, long)]
        message: Option<String>,

        /// Raise outside the driver, straight into the default hook
        #[arg(long)]
        no_driver: bool,

        /// Inside the entry, put the process-exiting default hook back before raising
        #[arg(long, conflicts_with = "no_driver")]
        exit_hook: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Value { json } => run_value(&json),
        Commands::Raise {
            partial,
            message,
            no_driver,
            exit_hook,
        } => run_raise(partial, message, no_driver, exit_hook),
        Commands::Completions { shell } => {
            run_completions(shell);
            ExitCode::SUCCESS
        }
    }
}

fn run_value(json: &str) -> ExitCode {
    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: invalid value '{}': {}", json, e);
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };
    fraud_runtime::start(move |_| value)
}

fn run_raise(
    partial: Option<String>,
    message: Option<String>,
    no_driver: bool,
    exit_hook: bool,
) -> ExitCode {
    if no_driver {
        if let Some(text) = &partial {
            let mut out = io::stdout().lock();
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
        raise(message);
    }

    fraud_runtime::start(move |ctx| {
        if let Some(text) = &partial {
            let _ = ctx.output.write_all(text.as_bytes());
        }
        if exit_hook {
            // The driver's trap is bypassed; the process ends inside `raise`
            trap::replace_hook(trap::exit_hook);
        }
        raise(message)
    })
}

fn raise(message: Option<String>) -> ! {
    match message {
        Some(msg) => trap::raise_with(msg),
        None => trap::raise(),
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "fraudr", &mut io::stdout());
}
