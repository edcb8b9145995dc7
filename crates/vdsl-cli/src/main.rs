//! # validate-dsl entry point
//!
//! Parses arguments, sets up tracing on stderr, and runs the validation.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vdsl_cli::report::Reporter;
use vdsl_cli::validate::{run_validate, ValidateArgs};

/// Validate DSL YAML files against the schema.
#[derive(Parser, Debug)]
#[command(name = "validate-dsl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(schema = %cli.args.schema.display(), paths = cli.args.paths.len(), "starting");

    let mut reporter = Reporter::stdio();
    match run_validate(&cli.args, &mut reporter) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
