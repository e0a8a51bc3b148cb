//! Reads transactions from a space separated text source.

use crate::error::{FeeError, Result};
use crate::transaction::Transaction;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// Streams transactions line by line from any `Read` source.
///
/// Lines have the form `YYYY-MM-DD MERCHANT AMOUNT`. Repeated spaces are
/// treated as a single separator. Empty lines are reported as invalid so
/// every input line gets an outcome.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and parses transactions.
    ///
    /// A line that cannot be parsed yields [`FeeError::InvalidLine`] and
    /// reading continues with the next line. Failures of the source itself
    /// yield [`FeeError::Csv`].
    pub fn transactions(self) -> impl Iterator<Item = Result<Transaction>> {
        let mut last_line = 0;

        self.reader.into_records().flat_map(move |result| {
            let line = match &result {
                Ok(record) => record.position().map(|p| p.line()),
                Err(e) if e.is_io_error() => None,
                Err(e) => e.position().map(|p| p.line()),
            };

            // The csv reader drops empty lines; report each one in its place.
            let mut outcomes: Vec<Result<Transaction>> = Vec::new();
            if let Some(line) = line {
                outcomes.extend((last_line + 1..line).map(|skipped| {
                    Err(FeeError::InvalidLine {
                        line: skipped,
                        message: "empty line".to_string(),
                    })
                }));
                last_line = line;
            }

            outcomes.push(match result {
                Ok(record) => parse_record(&record),
                Err(e) if e.is_io_error() => Err(FeeError::from(e)),
                Err(e) => Err(FeeError::InvalidLine {
                    line: line.unwrap_or_default(),
                    message: e.to_string(),
                }),
            });
            outcomes
        })
    }
}

fn parse_record(record: &StringRecord) -> Result<Transaction> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
    Transaction::from_fields(&fields, line)
}
