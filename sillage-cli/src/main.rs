//! Entry point for the `sillage` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use sillage_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match sillage_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Clap renders its own help, version and usage text.
fn report(err: &CliError) {
    match err {
        CliError::ArgumentParsing(usage) => {
            if let Err(io_err) = usage.print() {
                eprintln!("sillage: {io_err}");
            }
        }
        other => eprintln!("sillage: {other}"),
    }
}

/// Send `log` records to stderr through a `tracing` fmt subscriber,
/// filtered by `RUST_LOG` and defaulting to `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("sillage: logging disabled: {err}");
    }
}
