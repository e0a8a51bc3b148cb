//! Merchant fee policies.
//!
//! Every transaction is priced by exactly one policy: a merchant-specific
//! one when the merchant has negotiated a discount, otherwise `Standard`.
//! All policies share the same monthly invoice fee, which is never discounted.

use crate::money::Money;
use crate::tracker::MonthlyTracker;
use crate::transaction::Transaction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Flat fee charged on the first chargeable transaction of a merchant each month.
pub const INVOICE_FEE: Decimal = dec!(29.00);

/// Standard fee in percent of the transaction amount.
pub const STANDARD_FEE_PERCENT: Decimal = dec!(1.00);

/// Pricing strategy for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// 1% of the amount; used for every merchant without an agreement.
    Standard,

    /// 10% discount on the standard fee.
    Telia,

    /// 20% discount on the standard fee.
    CircleK,
}

impl FeePolicy {
    /// Merchant name this policy applies to, `None` for the fallback policy.
    pub fn merchant_identity(&self) -> Option<&'static str> {
        match self {
            FeePolicy::Standard => None,
            FeePolicy::Telia => Some("TELIA"),
            FeePolicy::CircleK => Some("CIRCLE_K"),
        }
    }

    /// Multiplier applied to the standard percentage fee.
    pub fn rate(&self) -> Decimal {
        match self {
            FeePolicy::Standard => dec!(1.00),
            FeePolicy::Telia => dec!(0.90),
            FeePolicy::CircleK => dec!(0.80),
        }
    }

    /// Returns `true` if `merchant` names this policy's merchant, ignoring
    /// case and surrounding whitespace.
    pub fn matches(&self, merchant: &str) -> bool {
        self.merchant_identity()
            .is_some_and(|identity| identity.eq_ignore_ascii_case(merchant.trim()))
    }

    /// Percentage fee for the transaction amount. Never touches the tracker.
    pub fn base_fee(&self, tx: &Transaction) -> Money {
        Money::new(Decimal::from(tx.amount) * STANDARD_FEE_PERCENT * self.rate() / dec!(100))
    }

    /// Monthly invoice fee for the transaction.
    ///
    /// The transaction's bucket is marked as seen whenever it was not seen
    /// before, even when the base fee is zero. A zero-fee first transaction
    /// therefore uses up the month without paying the invoice fee.
    pub fn surcharge(&self, tx: &Transaction, tracker: &mut MonthlyTracker) -> Money {
        let first_in_month = tracker.was_first_for_month(tx.month_bucket());

        if first_in_month && self.base_fee(tx).is_positive() {
            Money::new(INVOICE_FEE)
        } else {
            Money::ZERO
        }
    }

    /// Base fee plus monthly invoice fee.
    pub fn total_fee(&self, tx: &Transaction, tracker: &mut MonthlyTracker) -> Money {
        self.base_fee(tx) + self.surcharge(tx, tracker)
    }
}
