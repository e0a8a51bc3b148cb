//! Batch driver: read a transaction, price it, write it, repeat.

use crate::classifier::FeeClassifier;
use crate::error::Result;
use crate::reader::TransactionReader;
use crate::writer::TransactionWriter;
use log::{debug, info, warn};
use std::io::{Read, Write};

/// Read/write failures tolerated before processing is aborted.
pub const MAX_ERROR_COUNT: usize = 10;

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Transactions priced and written
    pub processed: usize,

    /// Lines that could not be parsed; each produced a blank output line
    pub skipped: usize,

    /// Read or write failures of the underlying streams
    pub errors: usize,

    /// Processing stopped early because `errors` exceeded the limit
    pub aborted: bool,
}

/// Streams transactions through a [`FeeClassifier`].
///
/// Transactions are handled strictly one at a time, in source order.
pub struct FeePipeline {
    classifier: FeeClassifier,
    max_errors: usize,
}

impl FeePipeline {
    /// Creates a pipeline that aborts after [`MAX_ERROR_COUNT`] stream errors.
    pub fn new(classifier: FeeClassifier) -> Self {
        FeePipeline {
            classifier,
            max_errors: MAX_ERROR_COUNT,
        }
    }

    /// Overrides the number of stream errors tolerated before aborting.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Reads every transaction from `input`, prices it and writes it to `output`.
    ///
    /// Unparseable lines are logged at warn level and echoed as blank lines.
    /// Stream failures are counted and, once there are more than the allowed
    /// number, the run stops and the summary is marked as aborted.
    pub fn process<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<PipelineSummary> {
        let mut writer = TransactionWriter::new(output);
        let mut summary = PipelineSummary::default();

        for result in TransactionReader::new(input).transactions() {
            let outcome = match result {
                Ok(mut tx) => {
                    self.classifier.classify(&mut tx);
                    writer.write_transaction(Some(&tx)).map(|()| true)
                }
                Err(e) if e.is_invalid_line() => {
                    warn!("{}", e);
                    summary.skipped += 1;
                    writer.write_transaction(None).map(|()| false)
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok(true) => summary.processed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Reading or writing next transaction failed: {}", e);
                    summary.errors += 1;

                    if summary.errors > self.max_errors {
                        warn!(
                            "More than {} read/write errors, aborting",
                            self.max_errors
                        );
                        summary.aborted = true;
                        break;
                    }
                }
            }
        }

        if let Err(e) = writer.flush() {
            warn!("Final flush failed: {}", e);
            summary.errors += 1;
        }

        info!(
            "Processed {} transactions, skipped {} lines, {} errors",
            summary.processed, summary.skipped, summary.errors
        );
        debug!(
            "{} merchant/month buckets seen",
            self.classifier.tracker().len()
        );

        Ok(summary)
    }

    /// The classifier, with the monthly state accumulated so far.
    pub fn classifier(&self) -> &FeeClassifier {
        &self.classifier
    }
}

impl Default for FeePipeline {
    fn default() -> Self {
        Self::new(FeeClassifier::default())
    }
}
