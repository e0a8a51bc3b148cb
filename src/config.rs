//! Command-line configuration.

use crate::error::{FeeError, Result};
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the transactions file looked up in the input directory.
pub const TRANSACTIONS_FILE_NAME: &str = "transactions.txt";

/// Runtime configuration resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full path of the transactions file to read
    pub input_path: PathBuf,
}

impl Config {
    /// Resolves the configuration from the command-line arguments, program name excluded.
    ///
    /// The optional first argument names the directory holding
    /// `transactions.txt`; without it the current directory is used.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let directory = match args.next() {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                if !dir.is_dir() {
                    return Err(FeeError::DirectoryNotFound(dir));
                }
                dir
            }
            None => {
                info!("No directory given, reading transactions from the current directory");
                env::current_dir()?
            }
        };

        let extra = args.count();
        if extra > 0 {
            warn!("Ignoring {} extra argument(s)", extra);
        }

        Ok(Config::for_directory(&directory))
    }

    /// Configuration reading `transactions.txt` from `directory`.
    pub fn for_directory(directory: &Path) -> Self {
        Config {
            input_path: directory.join(TRANSACTIONS_FILE_NAME),
        }
    }
}
