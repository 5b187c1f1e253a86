//! CLI entrypoint for `tsconfig-resolve`.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsconfig_resolve::cli::Args;
use tsconfig_resolve::error::ResolveCliError;

fn main() -> ExitCode {
    let args = Args::parse();
    let mut stderr = std::io::stderr().lock();
    if let Err(error) = init_logging(&args) {
        // Nothing sensible remains if stderr is gone.
        let _ignored = writeln!(stderr, "{error}");
        return ExitCode::FAILURE;
    }
    let mut stdout = std::io::stdout().lock();
    match tsconfig_resolve::run(&args, &mut stdout, &mut stderr) {
        Ok(()) => ExitCode::SUCCESS,
        // Already written in the requested format.
        Err(ResolveCliError::Diagnostics(_)) => ExitCode::FAILURE,
        Err(error) => {
            let _ignored = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) -> Result<(), ResolveCliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ResolveCliError::Logging(error.to_string()))
}
