//! getopt-style CLI argument parsing and execution.
//!
//! Invocation shape:
//! 1. `-h` prints usage and exits before any file is touched
//! 2. exactly one query option selects the operation; the first recognized
//!    query option wins and later ones are consumed but ignored
//! 3. the INI file is the trailing positional argument
//!
//! Exit codes: 0 success, 1 unreadable input file or bad invocation,
//! 2 queried key or section not found (for -e and -p only).

mod error;
mod execute;
mod parse;
mod types;

use std::process::ExitCode;

pub use types::Args;

use error::ExecuteStatus;

const EXIT_NOFILE: u8 = 1;
const EXIT_NOKEY: u8 = 2;

pub fn run() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(EXIT_NOFILE);
        }
    };

    if args.help {
        print!("{}", types::USAGE);
        return ExitCode::SUCCESS;
    }

    match args.execute() {
        Ok(ExecuteStatus::Ok) => ExitCode::SUCCESS,
        Ok(ExecuteStatus::NotFound) => ExitCode::from(EXIT_NOKEY),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_NOFILE)
        }
    }
}
