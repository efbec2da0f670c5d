use std::{fmt, hash::Hash};

use log::{debug, trace};

use crate::{
    BucketStats, ConfigError, DefaultEntryHasher, EntryHasher, LinearProbe, ProbeStrategy, Stats,
    TableConfig,
    bucket::{Bucket, InsertResult, Lookup},
    utils::reduce,
};

/// A fixed-capacity hash table made of independently probed buckets.
///
/// A value's hash picks its bucket (`hash % bucket_count`), and the bucket then
/// open-addresses its own slots with the probe strategy `P`. When overflow is
/// enabled a full bucket passes the value on to the next bucket, wrapping
/// around, until every bucket has been tried once.
///
/// Values are identified by their hash alone. Nothing is ever removed and the
/// table never grows.
///
/// Note: This implementation is not thread-safe. Overflow can touch any bucket,
/// so concurrent users must lock the whole table.
pub struct BucketTable<T, H = DefaultEntryHasher, P = LinearProbe> {
    /// The buckets, `config.bucket_count()` of them
    buckets: Box<[Bucket<T>]>,
    /// Layout and policy the table was built with
    config: TableConfig,
    /// Hash function applied to every inserted or searched value
    hasher: H,
    /// Probe sequence used inside each bucket
    probe: P,
    /// Bucket boundaries crossed by overflowing inserts
    overflow_count: usize,
}

impl<T: Hash> BucketTable<T> {
    /// Creates a table hashing with [`DefaultEntryHasher`] and probing linearly
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `config` does not describe at least one bucket.
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::new(config, DefaultEntryHasher, LinearProbe)
    }
}

impl<T, H, P> BucketTable<T, H, P>
where
    H: EntryHasher<T>,
    P: ProbeStrategy,
{
    /// Creates an empty table with the given hash function and probe strategy
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `config` does not describe at least one bucket.
    pub fn new(config: TableConfig, hasher: H, probe: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let bucket_count = config.bucket_count();
        let buckets = (0..bucket_count)
            .map(|_| Bucket::new(config.bucket_capacity(), config.hash_within_bucket()))
            .collect();

        debug!(
            "bucket table: {} buckets of {} slots, {} slots unused, overflow {}",
            bucket_count,
            config.bucket_capacity(),
            config.unused_capacity(),
            if config.overflow() { "enabled" } else { "disabled" }
        );

        Ok(Self { buckets, config, hasher, probe, overflow_count: 0 })
    }

    /// Stores `value`, returning `false` if no slot could be found for it.
    ///
    /// Without overflow only the value's own bucket is tried. With overflow the
    /// following buckets are tried in turn, counting one overflow per bucket
    /// entered, and the insert fails once the search would wrap back to the
    /// starting bucket. A failed insert leaves every bucket unchanged.
    pub fn insert(&mut self, mut value: T) -> bool {
        let hash = self.hasher.hash_of(&value);
        let start = reduce(hash, self.buckets.len());
        let mut index = start;

        loop {
            let Some(bucket) = self.buckets.get_mut(index) else {
                return false;
            };

            match bucket.insert(hash, value, &self.probe) {
                InsertResult::Inserted => return true,
                InsertResult::Full(rejected) => {
                    if !self.config.overflow() {
                        debug!("bucket {index} full, rejecting hash {hash:#018x}");
                        return false;
                    }

                    index = self.next_bucket(index);
                    if index == start {
                        debug!("every bucket full, rejecting hash {hash:#018x}");
                        return false;
                    }

                    self.overflow_count = self.overflow_count.saturating_add(1);
                    trace!("hash {hash:#018x} overflows into bucket {index}");
                    value = rejected;
                }
            }
        }
    }

    /// Looks up the stored value whose hash equals the hash of `value`
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_hash(self.hasher.hash_of(value))
    }

    /// Looks up the first stored value tagged with `hash`.
    ///
    /// The search moves on to the next bucket only when overflow is enabled and
    /// the current bucket was probed to its limit without meeting an empty slot.
    pub fn find_hash(&self, hash: u64) -> Option<&T> {
        let start = reduce(hash, self.buckets.len());
        let mut index = start;

        loop {
            match self.buckets.get(index)?.find(hash, &self.probe) {
                Lookup::Found(value) => return Some(value),
                Lookup::Vacant => return None,
                Lookup::Exhausted if self.config.overflow() => {
                    index = self.next_bucket(index);
                    if index == start {
                        return None;
                    }
                }
                Lookup::Exhausted => return None,
            }
        }
    }

    /// Computes occupancy and chain-length statistics over all buckets.
    ///
    /// The failure count is left at zero; callers that count rejected inserts
    /// attach it with [`Stats::with_failures`].
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::aggregate(self.bucket_stats(), self.overflow_count)
    }

    /// Statistics of every bucket, in bucket order
    #[must_use]
    pub fn bucket_stats(&self) -> Vec<BucketStats> {
        self.buckets.iter().map(|bucket| bucket.stats(&self.probe)).collect()
    }
}

impl<T, H, P> BucketTable<T, H, P> {
    /// Index of the bucket after `index`, wrapping to 0
    fn next_bucket(&self, index: usize) -> usize {
        index.saturating_add(1).checked_rem(self.buckets.len()).unwrap_or(0)
    }

    /// Returns the number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::occupied).sum()
    }

    /// Returns true if nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.occupied() == 0)
    }

    /// Returns the number of addressable slots, `bucket_count * bucket_capacity`
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bucket_count().saturating_mul(self.bucket_capacity())
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn bucket_capacity(&self) -> usize {
        self.config.bucket_capacity()
    }

    /// Returns the number of bucket boundaries crossed by inserts so far
    #[must_use]
    pub fn overflow_count(&self) -> usize {
        self.overflow_count
    }

    /// Returns the ratio of stored values to addressable slots
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns an iterator over the stored values in bucket and slot order
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flat_map(Bucket::values)
    }
}

impl<T, H, P> fmt::Debug for BucketTable<T, H, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketTable")
            .field("config", &self.config)
            .field("len", &self.len())
            .field("overflow_count", &self.overflow_count)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{IdentityHasher, QuadraticProbe};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_inserted_values_are_found(
            values in prop::collection::hash_set(any::<u64>(), 0..128),
            overflow in any::<bool>(),
        ) {
            let config = TableConfig::new(256, 16).with_overflow(overflow);
            let mut table = BucketTable::new(config, DefaultEntryHasher, QuadraticProbe)?;
            let mut stored = Vec::new();

            for value in values {
                if table.insert(value) {
                    stored.push(value);
                }
                for earlier in &stored {
                    let found = table.find(earlier);
                    prop_assert_eq!(
                        found.map(|v| DefaultEntryHasher.hash_of(v)),
                        Some(DefaultEntryHasher.hash_of(earlier))
                    );
                }
            }
        }

        #[test]
        fn prop_occupancy_is_monotonic_and_bounded(
            values in prop::collection::vec(any::<u64>(), 0..200),
            overflow in any::<bool>(),
            hash_within_bucket in any::<bool>(),
        ) {
            let config = TableConfig::new(70, 8)
                .with_overflow(overflow)
                .with_hash_within_bucket(hash_within_bucket);
            let mut table = BucketTable::new(config, IdentityHasher, LinearProbe)?;
            let mut previous = 0;

            for value in values {
                let inserted = table.insert(value);
                let occupied = table.stats().occupied;

                prop_assert!(occupied <= table.capacity());
                prop_assert_eq!(occupied, if inserted { previous + 1 } else { previous });
                previous = occupied;
            }
        }

        #[test]
        fn prop_without_overflow_only_home_bucket_changes(
            values in prop::collection::vec(any::<u64>(), 0..200),
        ) {
            let mut table = BucketTable::new(TableConfig::new(64, 8), IdentityHasher, LinearProbe)?;

            for value in values {
                let before = table.bucket_stats();
                let home = reduce(value, table.bucket_count());
                table.insert(value);
                let after = table.bucket_stats();

                for (index, (old, new)) in before.iter().zip(&after).enumerate() {
                    if index != home {
                        prop_assert_eq!(old.occupied, new.occupied);
                    }
                }
                prop_assert_eq!(table.overflow_count(), 0);
            }
        }

        #[test]
        fn prop_overflow_counts_buckets_crossed(
            values in prop::collection::vec(any::<u64>(), 0..200),
        ) {
            let config = TableConfig::new(40, 4).with_overflow(true);
            let mut table = BucketTable::new(config, IdentityHasher, LinearProbe)?;
            let bucket_count = table.bucket_count();

            for value in values {
                let before = table.bucket_stats();
                let overflows_before = table.overflow_count();
                let home = reduce(value, bucket_count);
                let inserted = table.insert(value);
                let after = table.bucket_stats();
                let crossed = table.overflow_count() - overflows_before;

                if inserted {
                    let landed = before
                        .iter()
                        .zip(&after)
                        .position(|(old, new)| new.occupied == old.occupied + 1);
                    prop_assert_eq!(landed, Some((home + crossed) % bucket_count));
                } else {
                    prop_assert_eq!(crossed, bucket_count - 1);
                    prop_assert_eq!(&before, &after);
                }
            }
        }
    }
}
