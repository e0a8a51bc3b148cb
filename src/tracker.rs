//! Tracks which merchant/month buckets have already had a transaction.

use crate::transaction::MonthBucket;
use std::collections::HashSet;

/// Set of month buckets seen so far in this run.
///
/// Buckets are only ever added. A new run starts from an empty tracker.
#[derive(Debug, Default)]
pub struct MonthlyTracker {
    seen: HashSet<MonthBucket>,
}

impl MonthlyTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the bucket has already been marked.
    pub fn has_seen(&self, bucket: &MonthBucket) -> bool {
        self.seen.contains(bucket)
    }

    /// Marks the bucket as seen.
    pub fn mark_seen(&mut self, bucket: MonthBucket) {
        self.seen.insert(bucket);
    }

    /// Marks the bucket and returns `true` if it was not seen before.
    pub fn was_first_for_month(&mut self, bucket: MonthBucket) -> bool {
        self.seen.insert(bucket)
    }

    /// Number of buckets seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
