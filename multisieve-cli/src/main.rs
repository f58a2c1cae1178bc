//! multisieve - coreference resolution from the command line
//!
//! # Usage
//!
//! ```bash
//! # Resolve a term document, print JSON to stdout
//! multisieve doc.json
//!
//! # Pre-extracted mentions, keep singletons
//! multisieve --input-format mentions -s doc.json
//!
//! # Many documents into a directory
//! multisieve --output-dir out/ data/*.json
//! ```

use std::process::ExitCode;

use clap::Parser;
use multisieve::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.to_filter())
        .parse_default_env()
        .init();
    log::debug!("{:?}", cli);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
