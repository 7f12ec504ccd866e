//! Veille CLI - summary requests for media monitoring

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = veille_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
