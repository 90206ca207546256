//! alphagrow command-line entry point

mod cli;

use std::process::ExitCode;

use clap::Parser;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, WriteMode};

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    let _logger = match setup_logging(&args.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: logger initialization failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli::run(args)
}

/// Log to stderr at `base_level`, or at the level in `RUST_LOG` if set.
fn setup_logging(base_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(base_level)?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .start()
}
