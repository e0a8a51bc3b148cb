//! Picks the fee policy for a transaction's merchant and prices it.

use crate::money::Money;
use crate::policy::FeePolicy;
use crate::tracker::MonthlyTracker;
use crate::transaction::Transaction;
use log::{debug, warn};

/// Routes transactions to merchant policies.
///
/// Holds the ordered list of merchant-specific policies and the monthly
/// tracker they all share. Policies are consulted in order and the first
/// match wins; merchants without a match use [`FeePolicy::Standard`].
#[derive(Debug)]
pub struct FeeClassifier {
    policies: Vec<FeePolicy>,
    tracker: MonthlyTracker,
}

impl FeeClassifier {
    /// Creates a classifier with the given merchant policies and an empty tracker.
    pub fn new(policies: Vec<FeePolicy>) -> Self {
        FeeClassifier {
            policies,
            tracker: MonthlyTracker::new(),
        }
    }

    /// Returns the policy that prices transactions for `merchant`.
    pub fn policy_for(&self, merchant: &str) -> FeePolicy {
        self.policies
            .iter()
            .copied()
            .find(|policy| policy.matches(merchant))
            .unwrap_or(FeePolicy::Standard)
    }

    /// Total fee for the transaction, or zero when there is no transaction.
    ///
    /// Every call with a transaction evaluates the monthly invoice fee, so
    /// each transaction must be passed exactly once.
    pub fn fee_for_transaction(&mut self, tx: Option<&Transaction>) -> Money {
        let Some(tx) = tx else {
            return Money::ZERO;
        };

        let policy = self.policy_for(&tx.merchant);
        let fee = policy.total_fee(tx, &mut self.tracker);
        debug!(
            "{} {} amount {} priced by {:?}: {}",
            tx.date, tx.merchant, tx.amount, policy, fee
        );
        fee
    }

    /// Prices the transaction and stores the fee on it.
    ///
    /// A transaction that already carries a fee keeps it and is not priced
    /// again, so it cannot use up another month's invoice fee.
    pub fn classify(&mut self, tx: &mut Transaction) -> Money {
        if let Some(fee) = tx.fee {
            warn!(
                "{} {} is already priced at {}, keeping it",
                tx.date, tx.merchant, fee
            );
            return fee;
        }

        let fee = self.fee_for_transaction(Some(&*tx));
        tx.set_fee(fee);
        fee
    }

    /// Month buckets seen so far.
    pub fn tracker(&self) -> &MonthlyTracker {
        &self.tracker
    }
}

impl Default for FeeClassifier {
    fn default() -> Self {
        Self::new(vec![FeePolicy::Telia, FeePolicy::CircleK])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(merchant: &str, y: i32, m: u32, d: u32, amount: i64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), merchant, amount)
    }

    #[test]
    fn test_policy_lookup() {
        let classifier = FeeClassifier::default();
        assert_eq!(classifier.policy_for("Telia"), FeePolicy::Telia);
        assert_eq!(classifier.policy_for("TELIA"), FeePolicy::Telia);
        assert_eq!(classifier.policy_for(" telia "), FeePolicy::Telia);
        assert_eq!(classifier.policy_for("Circle_K"), FeePolicy::CircleK);
        assert_eq!(classifier.policy_for("7-ELEVEN"), FeePolicy::Standard);
    }

    #[test]
    fn test_empty_registry_uses_standard() {
        let classifier = FeeClassifier::new(Vec::new());
        assert_eq!(classifier.policy_for("TELIA"), FeePolicy::Standard);
    }

    #[test]
    fn test_first_registered_match_wins() {
        let classifier = FeeClassifier::new(vec![FeePolicy::CircleK, FeePolicy::Telia]);
        assert_eq!(classifier.policy_for("circle_k"), FeePolicy::CircleK);
        assert_eq!(classifier.policy_for("telia"), FeePolicy::Telia);
    }

    #[test]
    fn test_seven_s_scenario() {
        let mut classifier = FeeClassifier::default();

        let fee = classifier.fee_for_transaction(Some(&tx("SEVEN-S", 2018, 2, 1, 0)));
        assert_eq!(fee.to_string(), "0.00");

        let fee = classifier.fee_for_transaction(Some(&tx("SEVEN-S", 2018, 3, 1, 200)));
        assert_eq!(fee.to_string(), "31.00");

        let fee = classifier.fee_for_transaction(Some(&tx("SEVEN-S", 2018, 3, 1, 200)));
        assert_eq!(fee.to_string(), "2.00");
    }

    #[test]
    fn test_zero_fee_first_transaction_consumes_month() {
        let mut classifier = FeeClassifier::default();

        assert_eq!(
            classifier.fee_for_transaction(Some(&tx("TELIA", 2018, 10, 1, 0))),
            Money::ZERO
        );
        let fee = classifier.fee_for_transaction(Some(&tx("TELIA", 2018, 10, 5, 300)));
        assert_eq!(fee.to_string(), "2.70");
    }

    #[test]
    fn test_absent_transaction_leaves_tracker_untouched() {
        let mut classifier = FeeClassifier::default();

        assert_eq!(classifier.fee_for_transaction(None), Money::ZERO);
        assert!(classifier.tracker().is_empty());

        let fee = classifier.fee_for_transaction(Some(&tx("NETTO", 2018, 9, 9, 100)));
        assert_eq!(fee.to_string(), "30.00");
    }

    #[test]
    fn test_tracker_shared_across_spellings() {
        let mut classifier = FeeClassifier::default();

        let first = classifier.fee_for_transaction(Some(&tx("circle_k", 2018, 9, 4, 100)));
        let second = classifier.fee_for_transaction(Some(&tx("CIRCLE_K", 2018, 9, 13, 100)));
        assert_eq!(first.to_string(), "29.80");
        assert_eq!(second.to_string(), "0.80");
        assert_eq!(classifier.tracker().len(), 1);
    }

    #[test]
    fn test_classify_sets_fee() {
        let mut classifier = FeeClassifier::default();
        let mut t = tx("7-ELEVEN", 2018, 9, 1, 100);

        let fee = classifier.classify(&mut t);
        assert_eq!(fee.to_string(), "30.00");
        assert_eq!(t.fee, Some(fee));
    }

    #[test]
    fn test_classify_twice_keeps_first_fee() {
        let mut classifier = FeeClassifier::default();
        let mut t = tx("NETTO", 2018, 9, 1, 100);

        assert_eq!(classifier.classify(&mut t).to_string(), "30.00");
        assert_eq!(classifier.classify(&mut t).to_string(), "30.00");
        assert_eq!(t.fee.map(|f| f.to_string()), Some("30.00".to_string()));

        let next = classifier.fee_for_transaction(Some(&tx("NETTO", 2018, 9, 2, 100)));
        assert_eq!(next.to_string(), "1.00");
    }
}
