use std::process::ExitCode;

use clap::Parser;

mod cli;
pub(crate) use cli::*;

mod client;
mod commands;
pub(crate) use commands::*;

mod config;
mod log;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // dropped at the end of main, flushing buffered log lines
    let _guard = match log::init_logging(cli.verbose) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("⚠️ failed to initialize logging: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("⚠️ {err:?}");
            ExitCode::FAILURE
        }
    }
}
