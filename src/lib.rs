//! # Merchant Fees
//!
//! A streaming fee calculator for merchant payment transactions. Each
//! transaction is priced by its merchant's fee policy and written back out
//! with the fee attached.
//!
//! ## Design Principles
//!
//! - **Decimal arithmetic**: Fees use `rust_decimal` rounded to 2 places
//! - **Closed policy set**: Merchant discounts are enum variants, not configuration
//! - **Explicit state**: The monthly invoice tracker is owned by the classifier
//! - **Streaming processing**: One line in, one line out, in source order
//!
//! ## Example
//!
//! ```
//! use merchant_fees::FeePipeline;
//! use std::io::Cursor;
//!
//! let input = "2018-09-01 7-ELEVEN 100\n2018-09-04 CIRCLE_K 100\n";
//! let mut output = Vec::new();
//! FeePipeline::default().process(Cursor::new(input), &mut output).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "2018-09-01 7-ELEVEN 30.00\n2018-09-04 CIRCLE_K 29.80\n"
//! );
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod money;
pub mod pipeline;
pub mod policy;
pub mod reader;
pub mod tracker;
pub mod transaction;
pub mod writer;

pub use classifier::FeeClassifier;
pub use config::Config;
pub use error::{FeeError, Result};
pub use money::Money;
pub use pipeline::{FeePipeline, PipelineSummary};
pub use policy::FeePolicy;
pub use tracker::MonthlyTracker;
pub use transaction::{MonthBucket, Transaction};
