//! `updraft` command line tool.
use clap::Parser;
use std::process::ExitCode;
use updraft_cli::commands;
use updraft_cli::{logging, Cli, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result {
    let _log_guard = logging::init(&cli.log_dir()?, cli.verbose)?;
    let config = cli.config()?;
    let res = commands::run(cli.command, &config);
    if let Err(err) = &res {
        tracing::debug!(?err, "command failed");
    }

    res
}
