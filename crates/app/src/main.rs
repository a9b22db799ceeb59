//! Bestellblick dashboard CLI.

use std::process::ExitCode;

use clap::Parser;

use bestellblick_app::cli::Cli;

fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    bestellblick_app::init_tracing();

    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
