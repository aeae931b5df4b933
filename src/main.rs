//! chrombert-dataset CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a config
//! chrombert-dataset validate dataset.json
//!
//! # Show a config with overrides
//! chrombert-dataset show dataset.json --set batch_size=16
//!
//! # Resolve a preset against the cache directory
//! chrombert-dataset preset prompt_dna --supervised-file train.csv -o dataset.json
//!
//! # Build the dataset and report its size
//! chrombert-dataset inspect dataset.json --set num_workers=0
//! ```

use chrombert_dataset::cli::{log_level, run_command, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(&cli).filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
