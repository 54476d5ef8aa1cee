//! Tina shell - terminal content-editing shell

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tina_shell::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
