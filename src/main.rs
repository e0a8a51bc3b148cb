//! Merchant Fees CLI
//!
//! Reads `transactions.txt` from the given directory (or the current one),
//! prints every transaction with its fee to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ./data > fees.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::info;
use merchant_fees::{Config, FeeError, FeePipeline, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(env::args().skip(1))?;

    info!("Reading transactions from {}", config.input_path.display());
    let file = File::open(&config.input_path)?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let handle = stdout.lock();

    let mut pipeline = FeePipeline::default();
    let summary = pipeline.process(reader, handle)?;

    if summary.aborted {
        return Err(FeeError::TooManyErrors {
            count: summary.errors,
        });
    }

    Ok(())
}
