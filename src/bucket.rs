//! Fixed-capacity open-addressed buckets

use crate::{BucketStats, ProbeStrategy};

/// A stored value tagged with the hash that placed it
#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    /// Hash the value was inserted under, compared by lookups
    pub(crate) hash: u64,
    /// The stored value
    pub(crate) value: T,
}

/// Result of inserting into a single bucket
#[derive(Debug)]
pub(crate) enum InsertResult<T> {
    /// The value was written to an empty slot
    Inserted,
    /// Every probed slot was occupied; the value is handed back untouched
    Full(T),
}

/// Result of looking up a hash in a single bucket
#[derive(Debug)]
pub(crate) enum Lookup<'a, T> {
    /// A slot tagged with the hash was reached
    Found(&'a T),
    /// An empty slot ended the probe sequence, so the hash is not in this bucket
    Vacant,
    /// The attempt bound ran out before a match or an empty slot
    Exhausted,
}

/// A slot array probed independently of the other buckets.
///
/// Slots are filled in probe order and never cleared.
#[derive(Debug, Clone)]
pub(crate) struct Bucket<T> {
    /// The slots, `None` while empty
    slots: Box<[Option<Entry<T>>]>,
    /// Number of `Some` slots
    occupied: usize,
    /// Start probing at `hash % capacity` rather than at slot 0
    hash_within_bucket: bool,
}

impl<T> Bucket<T> {
    /// Creates an empty bucket with `capacity` slots
    pub(crate) fn new(capacity: usize, hash_within_bucket: bool) -> Self {
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        Self { slots, occupied: 0, hash_within_bucket }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    /// First slot probed for `hash`
    fn start_index(&self, hash: u64) -> usize {
        if self.hash_within_bucket { crate::utils::reduce(hash, self.capacity()) } else { 0 }
    }

    /// Writes `value` into the first empty slot of its probe sequence.
    ///
    /// Occupied slots are skipped whatever their hash, so equal hashes may be
    /// stored more than once. After `capacity` skipped slots the value is
    /// returned in [`InsertResult::Full`] and the bucket is left unchanged.
    pub(crate) fn insert<P>(&mut self, hash: u64, value: T, probe: &P) -> InsertResult<T>
    where
        P: ProbeStrategy + ?Sized,
    {
        let capacity = self.capacity();
        let mut index = self.start_index(hash);
        let mut attempt: usize = 0;

        loop {
            match self.slots.get_mut(index) {
                Some(slot @ None) => {
                    *slot = Some(Entry { hash, value });
                    self.occupied = self.occupied.saturating_add(1);
                    return InsertResult::Inserted;
                }
                Some(Some(_)) if attempt < capacity => {
                    index = probe.next_slot(index, attempt, capacity);
                    attempt = attempt.saturating_add(1);
                }
                // Attempts exhausted, or the strategy stepped outside the bucket
                _ => return InsertResult::Full(value),
            }
        }
    }

    /// Follows the same probe sequence as [`Bucket::insert`] looking for `hash`
    pub(crate) fn find<P>(&self, hash: u64, probe: &P) -> Lookup<'_, T>
    where
        P: ProbeStrategy + ?Sized,
    {
        let capacity = self.capacity();
        let mut index = self.start_index(hash);
        let mut attempt: usize = 0;

        loop {
            match self.slots.get(index) {
                Some(None) => return Lookup::Vacant,
                Some(Some(entry)) if entry.hash == hash => return Lookup::Found(&entry.value),
                Some(Some(_)) if attempt < capacity => {
                    index = probe.next_slot(index, attempt, capacity);
                    attempt = attempt.saturating_add(1);
                }
                _ => return Lookup::Exhausted,
            }
        }
    }

    /// Length of the occupied run met when probing from `start`
    fn chain_length<P>(&self, start: usize, probe: &P) -> usize
    where
        P: ProbeStrategy + ?Sized,
    {
        let capacity = self.capacity();
        let mut index = start;
        let mut length: usize = 0;

        while length < capacity {
            match self.slots.get(index) {
                Some(Some(_)) => {
                    index = probe.next_slot(index, length, capacity);
                    length = length.saturating_add(1);
                }
                _ => break,
            }
        }

        length
    }

    /// Replays the probe sequence from every slot of the bucket.
    ///
    /// This measures the occupied run visible from each slot, not the number of
    /// probes a lookup from a hash's own start slot would take.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn stats<P>(&self, probe: &P) -> BucketStats
    where
        P: ProbeStrategy + ?Sized,
    {
        let mut total: usize = 0;
        let mut chains: usize = 0;
        let mut max_chain_length = 0;

        for start in 0..self.capacity() {
            let length = self.chain_length(start, probe);
            if length > 0 {
                total = total.saturating_add(length);
                chains = chains.saturating_add(1);
            }
            max_chain_length = max_chain_length.max(length);
        }

        let avg_chain_length = if chains == 0 { 0.0 } else { total as f64 / chains as f64 };

        BucketStats { occupied: self.occupied, avg_chain_length, max_chain_length }
    }

    /// Stored values in slot order
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.as_ref().map(|entry| &entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearProbe, QuadraticProbe};

    /// Hash values `0, cap, 2 * cap, ...` all start probing at slot 0
    fn fill_from_zero(bucket: &mut Bucket<u64>, count: u64) {
        let capacity = bucket.capacity() as u64;
        for i in 0..count {
            let result = bucket.insert(i * capacity, i, &LinearProbe);
            assert!(matches!(result, InsertResult::Inserted));
        }
    }

    #[test]
    fn test_insert_and_find() {
        let mut bucket = Bucket::new(8, true);
        assert!(matches!(bucket.insert(3, "three", &LinearProbe), InsertResult::Inserted));
        assert!(matches!(bucket.insert(11, "eleven", &LinearProbe), InsertResult::Inserted));

        assert!(matches!(bucket.find(3, &LinearProbe), Lookup::Found(&"three")));
        assert!(matches!(bucket.find(11, &LinearProbe), Lookup::Found(&"eleven")));
        assert!(matches!(bucket.find(19, &LinearProbe), Lookup::Vacant));
        assert_eq!(bucket.occupied(), 2);
    }

    #[test]
    fn test_collision_takes_next_probed_slot() {
        let mut bucket = Bucket::new(4, true);
        bucket.insert(1, 'a', &LinearProbe);
        bucket.insert(5, 'b', &LinearProbe);

        let values: Vec<_> = bucket.values().copied().collect();
        assert_eq!(values, vec!['a', 'b']);
        assert!(bucket.slots.first().is_some_and(Option::is_none));
        assert!(matches!(bucket.slots.get(2), Some(Some(Entry { hash: 5, value: 'b' }))));
    }

    #[test]
    fn test_full_bucket_hands_value_back() {
        let mut bucket = Bucket::new(4, true);
        fill_from_zero(&mut bucket, 4);

        match bucket.insert(16, 99, &LinearProbe) {
            InsertResult::Full(value) => assert_eq!(value, 99),
            InsertResult::Inserted => panic!("a full bucket accepted a value"),
        }
        assert_eq!(bucket.occupied(), 4);
        assert!(matches!(bucket.find(16, &LinearProbe), Lookup::Exhausted));
        assert!(matches!(bucket.find(12, &LinearProbe), Lookup::Found(&3)));
    }

    #[test]
    fn test_duplicate_hash_is_stored_and_first_wins() {
        let mut bucket = Bucket::new(4, true);
        bucket.insert(2, "first", &LinearProbe);
        bucket.insert(2, "second", &LinearProbe);

        assert_eq!(bucket.occupied(), 2);
        assert!(matches!(bucket.find(2, &LinearProbe), Lookup::Found(&"first")));
    }

    #[test]
    fn test_fixed_start_ignores_hash() {
        let mut bucket = Bucket::new(4, false);
        bucket.insert(3, "a", &LinearProbe);

        assert!(matches!(bucket.slots.first(), Some(Some(Entry { hash: 3, .. }))));
        assert!(matches!(bucket.find(3, &LinearProbe), Lookup::Found(&"a")));
    }

    #[test]
    fn test_quadratic_probe_cannot_fill_three_slots_from_one_start() {
        let mut bucket = Bucket::new(3, true);
        assert!(matches!(bucket.insert(0, 0, &QuadraticProbe), InsertResult::Inserted));
        assert!(matches!(bucket.insert(3, 1, &QuadraticProbe), InsertResult::Inserted));
        assert!(matches!(bucket.insert(6, 2, &QuadraticProbe), InsertResult::Full(2)));

        assert_eq!(bucket.occupied(), 2);
    }

    #[test]
    fn test_stats_of_empty_bucket() {
        let bucket: Bucket<u64> = Bucket::new(5, true);

        assert_eq!(bucket.stats(&LinearProbe), BucketStats::default());
    }

    #[test]
    fn test_stats_measure_runs_from_every_slot() {
        let mut bucket = Bucket::new(8, true);
        fill_from_zero(&mut bucket, 3);

        // Slots 0..3 occupied: runs of 3, 2, 1 and nothing elsewhere
        let stats = bucket.stats(&LinearProbe);
        assert_eq!(stats.occupied, 3);
        assert_eq!(stats.max_chain_length, 3);
        assert!((stats.avg_chain_length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_of_full_bucket() {
        let mut bucket = Bucket::new(4, true);
        for hash in [0, 4, 8, 12] {
            bucket.insert(hash, hash, &QuadraticProbe);
        }

        let stats = bucket.stats(&QuadraticProbe);
        assert_eq!(stats.occupied, 4);
        assert_eq!(stats.max_chain_length, 4);
        assert!((stats.avg_chain_length - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_strategy_is_contained() {
        let escape = |_current: usize, _attempt: usize, capacity: usize| capacity + 1;
        let mut bucket = Bucket::new(2, true);
        bucket.insert(0, 'x', &escape);

        assert!(matches!(bucket.insert(2, 'y', &escape), InsertResult::Full('y')));
        assert!(matches!(bucket.find(2, &escape), Lookup::Exhausted));
        assert_eq!(bucket.stats(&escape).max_chain_length, 1);
    }
}
