//! Table layout and policy configuration

use crate::ConfigError;

/// Layout and probing policy of a `BucketTable`.
///
/// The table is split into `total_capacity / bucket_capacity` buckets (floor
/// division). Any remainder slots are never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Slots requested for the whole table
    total_capacity: usize,
    /// Slots per bucket
    bucket_capacity: usize,
    /// Start in-bucket probing at `hash % bucket_capacity` instead of slot 0
    hash_within_bucket: bool,
    /// Retry full buckets in the cyclically next bucket
    overflow: bool,
}

impl TableConfig {
    /// Creates a configuration with hashed in-bucket start slots and overflow disabled
    #[must_use]
    pub const fn new(total_capacity: usize, bucket_capacity: usize) -> Self {
        Self { total_capacity, bucket_capacity, hash_within_bucket: true, overflow: false }
    }

    /// Selects whether probing inside a bucket starts at `hash % bucket_capacity`
    /// (`true`) or always at slot 0 (`false`)
    #[must_use]
    pub const fn with_hash_within_bucket(mut self, enabled: bool) -> Self {
        self.hash_within_bucket = enabled;
        self
    }

    /// Enables or disables overflow into the next bucket when a bucket is full
    #[must_use]
    pub const fn with_overflow(mut self, enabled: bool) -> Self {
        self.overflow = enabled;
        self
    }

    /// Slots requested for the whole table
    #[must_use]
    pub const fn total_capacity(&self) -> usize {
        self.total_capacity
    }

    /// Slots per bucket
    #[must_use]
    pub const fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    #[must_use]
    pub const fn hash_within_bucket(&self) -> bool {
        self.hash_within_bucket
    }

    #[must_use]
    pub const fn overflow(&self) -> bool {
        self.overflow
    }

    /// Number of buckets this layout produces, zero for an invalid layout
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        match self.total_capacity.checked_div(self.bucket_capacity) {
            Some(count) => count,
            None => 0,
        }
    }

    /// Slots left over by the floor division
    #[must_use]
    pub const fn unused_capacity(&self) -> usize {
        match self.total_capacity.checked_rem(self.bucket_capacity) {
            Some(rest) => rest,
            None => 0,
        }
    }

    /// Checks that the layout yields at least one non-empty bucket
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBucketCapacity`] when buckets would have no slots and
    /// [`ConfigError::BucketExceedsTotal`] when not even one bucket fits.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_capacity == 0 {
            return Err(ConfigError::ZeroBucketCapacity);
        }
        if self.bucket_capacity > self.total_capacity {
            return Err(ConfigError::BucketExceedsTotal {
                bucket_capacity: self.bucket_capacity,
                total_capacity: self.total_capacity,
            });
        }
        Ok(())
    }
}
