//! Chain-length statistics snapshots

use std::fmt;

/// Occupancy and probe-chain lengths of a single bucket.
///
/// The chain length of a slot is the number of occupied slots met while
/// following the probe sequence from that slot until an empty slot, capped
/// at the bucket capacity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketStats {
    /// Occupied slots in the bucket
    pub occupied: usize,
    /// Mean of the non-zero chain lengths, 0.0 when every chain is empty
    pub avg_chain_length: f64,
    /// Longest chain over all start slots
    pub max_chain_length: usize,
}

/// Table-wide statistics computed on demand from the bucket contents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Occupied slots across all buckets
    pub occupied: usize,
    /// Mean of the per-bucket averages, skipping buckets without chains
    pub avg_chain_length: f64,
    /// Longest chain in any bucket
    pub max_chain_length: usize,
    /// Bucket boundaries crossed by overflowing inserts
    pub overflow_count: usize,
    /// Rejected inserts as counted by the caller
    pub failures: usize,
}

impl Stats {
    /// Folds per-bucket snapshots into a table snapshot
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub(crate) fn aggregate<I>(buckets: I, overflow_count: usize) -> Self
    where
        I: IntoIterator<Item = BucketStats>,
    {
        let mut occupied: usize = 0;
        let mut max_chain_length = 0;
        let mut avg_sum = 0.0;
        let mut avg_count: usize = 0;

        for bucket in buckets {
            occupied = occupied.saturating_add(bucket.occupied);
            max_chain_length = max_chain_length.max(bucket.max_chain_length);
            if bucket.avg_chain_length > 0.0 {
                avg_sum += bucket.avg_chain_length;
                avg_count = avg_count.saturating_add(1);
            }
        }

        let avg_chain_length = if avg_count == 0 { 0.0 } else { avg_sum / avg_count as f64 };

        Self { occupied, avg_chain_length, max_chain_length, overflow_count, failures: 0 }
    }

    /// Attaches the number of inserts the caller saw rejected
    #[must_use]
    pub const fn with_failures(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "occupied={} avg_chain={:.2} max_chain={} overflows={} failures={}",
            self.occupied,
            self.avg_chain_length,
            self.max_chain_length,
            self.overflow_count,
            self.failures
        )
    }
}
