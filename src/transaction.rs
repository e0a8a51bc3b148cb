//! Transaction model, line parsing and monthly bucketing.

use crate::error::{FeeError, Result};
use crate::money::Money;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Date format used by both the input and output line formats.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single merchant payment transaction.
///
/// `fee` stays `None` until the classifier prices the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar date of the payment
    pub date: NaiveDate,

    /// Merchant name exactly as read from the source
    pub merchant: String,

    /// Amount in whole currency units, never rejected for its sign
    pub amount: i64,

    /// Total fee, set once by the classifier
    pub fee: Option<Money>,
}

impl Transaction {
    /// Creates an unpriced transaction.
    pub fn new(date: NaiveDate, merchant: impl Into<String>, amount: i64) -> Self {
        Transaction {
            date,
            merchant: merchant.into(),
            amount,
            fee: None,
        }
    }

    /// Builds a transaction from the `date merchant amount` columns of a line.
    ///
    /// `line` is only used for error reporting.
    pub fn from_fields(fields: &[&str], line: u64) -> Result<Self> {
        let invalid = |message: String| FeeError::InvalidLine { line, message };

        let [date, merchant, amount] = fields else {
            return Err(invalid(format!("expected 3 columns, found {}", fields.len())));
        };

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| invalid(format!("bad date '{}': {}", date, e)))?;
        let amount = amount
            .parse::<i64>()
            .map_err(|e| invalid(format!("bad amount '{}': {}", amount, e)))?;

        Ok(Transaction::new(date, *merchant, amount))
    }

    /// Returns the bucket that scopes the monthly invoice fee for this transaction.
    pub fn month_bucket(&self) -> MonthBucket {
        MonthBucket::new(&self.merchant, self.date.year(), self.date.month())
    }

    /// Stores the computed fee, replacing any previous one.
    pub fn set_fee(&mut self, fee: Money) {
        self.fee = Some(fee);
    }
}

impl FromStr for Transaction {
    type Err = FeeError;

    /// Parses a `YYYY-MM-DD MERCHANT AMOUNT` line. Runs of spaces count as one separator.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s
            .trim()
            .split(' ')
            .filter(|field| !field.is_empty())
            .collect();
        Transaction::from_fields(&fields, 1)
    }
}

/// Merchant/month grouping key for the once-per-month invoice fee.
///
/// The merchant part is trimmed and uppercased, so `"Telia"` and `" TELIA "`
/// land in the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthBucket {
    pub merchant: String,
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn new(merchant: &str, year: i32, month: u32) -> Self {
        MonthBucket {
            merchant: merchant.trim().to_uppercase(),
            year,
            month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_line() {
        let tx: Transaction = "2018-01-02 test 100".parse().unwrap();
        assert_eq!(tx.date, date(2018, 1, 2));
        assert_eq!(tx.merchant, "test");
        assert_eq!(tx.amount, 100);
        assert!(tx.fee.is_none());
    }

    #[test]
    fn test_parse_collapses_repeated_spaces() {
        let tx: Transaction = "  2018-09-01   7-ELEVEN    100 ".parse().unwrap();
        assert_eq!(tx.merchant, "7-ELEVEN");
        assert_eq!(tx.amount, 100);
    }

    #[test]
    fn test_parse_negative_amount() {
        let tx: Transaction = "2018-09-01 NETTO -50".parse().unwrap();
        assert_eq!(tx.amount, -50);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        for line in [
            "",
            " ",
            "2018-01-01 test 100 test",
            "2018-01-01 test",
            "2018-13-01 test 100",
            "2018-02-30 test 100",
            "ABC test 100",
            "2018-01-01 test ABC",
            "2018-01-01 test 1.5",
            "2018-01-01 test 99999999999999999999",
            "2018-09-01\tTELIA\t100",
        ] {
            let err = line.parse::<Transaction>().unwrap_err();
            assert!(err.is_invalid_line(), "line {:?} gave {}", line, err);
        }
    }

    #[test]
    fn test_from_fields_reports_line_number() {
        let err = Transaction::from_fields(&["x"], 7).unwrap_err();
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_month_bucket_ignores_day_and_case() {
        let a = Transaction::new(date(2018, 9, 1), "Telia", 100);
        let b = Transaction::new(date(2018, 9, 30), " TELIA ", 5);
        let c = Transaction::new(date(2018, 10, 1), "TELIA", 100);
        let d = Transaction::new(date(2019, 9, 1), "TELIA", 100);

        assert_eq!(a.month_bucket(), b.month_bucket());
        assert_ne!(a.month_bucket(), c.month_bucket());
        assert_ne!(a.month_bucket(), d.month_bucket());
        assert_eq!(a.month_bucket().merchant, "TELIA");
    }

    #[test]
    fn test_set_fee() {
        let mut tx = Transaction::new(date(2018, 9, 1), "NETTO", 100);
        tx.set_fee(Money::ZERO);
        assert_eq!(tx.fee, Some(Money::ZERO));
    }
}
