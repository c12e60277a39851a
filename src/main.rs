//! CLI entry point for batch texture resynthesis

use clap::Parser;
use std::process::ExitCode;
use texweave::io::cli::{Cli, FileProcessor};

// Allow print for the fatal-error diagnostic
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    match processor.process() {
        // zero on success, decremented (wrapping) once per write failure
        Ok(failures) => ExitCode::from(0u8.wrapping_sub(failures)),
        Err(error) => {
            eprintln!("fatal error: {error}");
            ExitCode::FAILURE
        }
    }
}
