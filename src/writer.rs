//! Writes priced transactions as space separated lines.

use crate::error::Result;
use crate::money::Money;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::io::Write;

/// Output line: date, merchant name as read, total fee with two decimals.
#[derive(Debug, Serialize)]
struct FeeRow<'a> {
    date: NaiveDate,
    merchant: &'a str,
    fee: Money,
}

/// Writes one line per transaction to any `Write` sink.
pub struct TransactionWriter<W: Write> {
    sink: W,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes the transaction as `YYYY-MM-DD MERCHANT FEE`.
    ///
    /// `None` produces an empty line, keeping output lines aligned with
    /// input lines that could not be read. An unpriced transaction is
    /// written with a zero fee.
    ///
    /// Every line is flushed right away so a failing sink is reported on
    /// the transaction that hit it.
    pub fn write_transaction(&mut self, tx: Option<&Transaction>) -> Result<()> {
        match tx {
            Some(tx) => {
                let line = encode_row(&FeeRow {
                    date: tx.date,
                    merchant: &tx.merchant,
                    fee: tx.fee.unwrap_or(Money::ZERO),
                })?;
                self.sink.write_all(&line)?;
            }
            None => writeln!(self.sink)?,
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Flushes buffered lines to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}

/// Frames a single row as one space separated, newline terminated line.
fn encode_row(row: &FeeRow<'_>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    writer.serialize(row)?;
    let line = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(line)
}
