//! Hash functions that tag entries before they are placed

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Maps a value to the 64-bit hash that selects its bucket and start slot.
///
/// The table compares stored hashes only, so two values with equal hashes are
/// indistinguishable to lookups.
pub trait EntryHasher<T: ?Sized> {
    /// Returns the hash of `value`
    fn hash_of(&self, value: &T) -> u64;
}

impl<T, F> EntryHasher<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> u64,
{
    fn hash_of(&self, value: &T) -> u64 {
        self(value)
    }
}

/// Hashes with the standard library's `DefaultHasher` using fixed keys, so the
/// same value always lands in the same slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultEntryHasher;

impl<T: Hash + ?Sized> EntryHasher<T> for DefaultEntryHasher {
    fn hash_of(&self, value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Uses an integer value as its own hash.
///
/// Handy when the caller already holds well-distributed hashes, or wants to
/// steer entries to known buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityHasher;

impl EntryHasher<u64> for IdentityHasher {
    fn hash_of(&self, value: &u64) -> u64 {
        *value
    }
}
