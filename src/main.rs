//! Binary entry point for the `lzu8` command-line tool.

use std::process::ExitCode;

use clap::Parser;

use lzu8::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lzu8: {e:#}");
            ExitCode::FAILURE
        }
    }
}
