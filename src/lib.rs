//! # Bucket Table
//!
//! A fixed-capacity hash table split into equally sized buckets, each of which
//! resolves collisions by open addressing over its own slots.
//!
//! Placing a value is a two-level lookup: the value's 64-bit hash selects a
//! bucket (`hash % bucket_count`), then a pluggable [`ProbeStrategy`] walks the
//! bucket's slots starting at `hash % bucket_capacity` (or at slot 0). A full
//! bucket either rejects the value or, with overflow enabled, hands it on to the
//! next bucket until every bucket has been tried once.
//!
//! Values are told apart by their hash only. There is no removal, resizing, or
//! internal locking.
//!
//! [`BucketTable::stats`] replays the probe sequence from every slot to report
//! occupancy, average and maximum chain length, and the number of overflows.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bucket_table::{BucketTable, TableConfig};
//!
//! let config = TableConfig::new(100, 10).with_overflow(true);
//! let mut table = BucketTable::with_config(config)?;
//!
//! assert!(table.insert("apple".to_string()));
//! assert!(table.insert("banana".to_string()));
//!
//! assert_eq!(table.find(&"apple".to_string()).map(String::as_str), Some("apple"));
//! assert_eq!(table.find(&"cherry".to_string()), None);
//!
//! let stats = table.stats();
//! assert_eq!(stats.occupied, 2);
//! # Ok::<(), bucket_table::ConfigError>(())
//! ```
//!
//! ## Custom Strategies
//!
//! Any `Fn(&T) -> u64` is a hash function and any `Fn(usize, usize, usize) -> usize`
//! is a probe strategy.
//!
//! ```rust
//! use bucket_table::{BucketTable, TableConfig, TableExtensions};
//!
//! let by_len = |word: &&str| word.len() as u64;
//! let skip_two = |slot: usize, _attempt: usize, capacity: usize| (slot + 2) % capacity;
//!
//! let mut table = BucketTable::new(TableConfig::new(8, 4), by_len, skip_two)?;
//! let failures = table.insert_all(["a", "bb", "cc", "ddd"]);
//!
//! assert_eq!(failures, 0);
//! // "cc" has the same hash as "bb", so it is indistinguishable from it
//! assert_eq!(table.find(&"cc"), Some(&"bb"));
//! assert_eq!(table.stats_with_failures(failures).occupied, 4);
//! # Ok::<(), bucket_table::ConfigError>(())
//! ```

/// Module implementing the open-addressed buckets
mod bucket;
/// Module holding the table layout configuration
mod config;
/// Module defining construction errors
mod error;
/// Module defining entry hash functions
mod hasher;
/// Module defining in-bucket probe sequences
mod probe;
/// Module defining statistics snapshots
mod stats;
/// Module implementing the bucketed hash table
mod table;
/// Utility functions and traits for the table
mod utils;

pub use config::TableConfig;
pub use error::ConfigError;
pub use hasher::{DefaultEntryHasher, EntryHasher, IdentityHasher};
pub use probe::{LinearProbe, ProbeStrategy, QuadraticProbe};
pub use stats::{BucketStats, Stats};
pub use table::BucketTable;
pub use utils::{TableExtensions, table_from_iter};
