//! Utility functions and traits for `BucketTable`

use crate::{BucketTable, ConfigError, EntryHasher, ProbeStrategy, Stats, TableConfig};

/// Reduces a 64-bit hash to an index in `0..modulus`, returning 0 for an empty range
pub(crate) fn reduce(hash: u64, modulus: usize) -> usize {
    let Ok(modulus) = u64::try_from(modulus) else {
        // usize wider than u64: every u64 hash is already in range
        return usize::try_from(hash).unwrap_or(0);
    };
    hash.checked_rem(modulus).and_then(|index| usize::try_from(index).ok()).unwrap_or(0)
}

/// Extension trait for tables driven by a caller that counts rejected inserts
pub trait TableExtensions<T> {
    /// Returns true if a value with the same hash as `value` is stored
    fn contains(&self, value: &T) -> bool;

    /// Inserts every value, returning how many were rejected
    fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = T>;

    /// Computes the table statistics with `failures` attached
    fn stats_with_failures(&self, failures: usize) -> Stats;
}

impl<T, H, P> TableExtensions<T> for BucketTable<T, H, P>
where
    H: EntryHasher<T>,
    P: ProbeStrategy,
{
    fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(|value| self.insert(value)).filter(|inserted| !inserted).count()
    }

    fn stats_with_failures(&self, failures: usize) -> Stats {
        self.stats().with_failures(failures)
    }
}

/// Builds a table and fills it from an iterator, returning the table together
/// with the number of values that did not fit
///
/// # Errors
///
/// Returns a [`ConfigError`] when `config` does not describe at least one bucket.
pub fn table_from_iter<T, H, P, I>(
    config: TableConfig,
    hasher: H,
    probe: P,
    values: I,
) -> Result<(BucketTable<T, H, P>, usize), ConfigError>
where
    H: EntryHasher<T>,
    P: ProbeStrategy,
    I: IntoIterator<Item = T>,
{
    let mut table = BucketTable::new(config, hasher, probe)?;
    let failures = table.insert_all(values);
    Ok((table, failures))
}
