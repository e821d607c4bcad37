//! ds_project_setup - data-science project scaffolder.
//!
//! Creates a project directory with a virtual environment, the standard
//! package set, a starter notebook or script, and optionally a git repository.

use ds_project_setup::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse_args();

    // Initialize logging; RUST_LOG overrides the verbosity flags
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}
