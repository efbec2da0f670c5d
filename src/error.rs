//! Construction errors for `BucketTable`

/// Rejected table configurations.
///
/// Insert and lookup never fail with an error; a table that could be built is
/// always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A bucket must hold at least one slot
    #[error("bucket capacity must be greater than zero")]
    ZeroBucketCapacity,

    /// The total capacity cannot hold a single bucket
    #[error(
        "bucket capacity {bucket_capacity} exceeds total capacity {total_capacity}, no bucket fits"
    )]
    BucketExceedsTotal {
        /// Requested slots per bucket
        bucket_capacity: usize,
        /// Requested slots for the whole table
        total_capacity: usize,
    },
}
