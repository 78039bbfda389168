//! # Value Layer Configuration Constants
//!
//! This module centralizes the configuration constants for the value layer,
//! grouping interdependent values together and documenting their
//! relationships. Constants that depend on each other are co-located to
//! prevent mismatch bugs.
//!
//! ## Dependency Graph
//!
//! ```text
//! VALUE_CACHE_SIZE (1024 slots)
//!       │
//!       └─> VALUE_CACHE_SHARD_COUNT (16)
//!             Must divide VALUE_CACHE_SIZE evenly so every shard gets the
//!             same number of slots. Slot index is derived from the value
//!             hash after the shard bits are consumed.
//!
//! TEXT_INTERN_SIZE (2048 entries)
//!       │
//!       └─> TEXT_INTERN_SHARD_COUNT (16)
//!             Same divisibility requirement as the value cache. The intern
//!             table bound is per-shard: a shard that fills up is flushed.
//!
//! MAX_CACHED_ELEMENT_BYTES (4096)
//!       Payloads larger than this bypass the value cache entirely. Keeps a
//!       handful of huge strings from pinning the whole cache budget.
//!       Upper bound on cached text memory:
//!       VALUE_CACHE_SIZE * MAX_CACHED_ELEMENT_BYTES.
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by compile-time assertions below:
//!
//! 1. `VALUE_CACHE_SHARD_COUNT` divides `VALUE_CACHE_SIZE`
//! 2. `TEXT_INTERN_SHARD_COUNT` divides `TEXT_INTERN_SIZE`
//! 3. Shard counts are powers of two (slot index uses the remaining hash bits)
//! 4. `MAX_CACHED_ELEMENT_BYTES > 0` (a zero threshold would disable the
//!    cache silently instead of explicitly)

// ============================================================================
// VALUE CACHE CONFIGURATION
// ============================================================================

/// Total number of canonical-value slots across all shards.
///
/// The cache is direct-mapped: each distinct content hashes to exactly one
/// slot, and a colliding insert replaces whatever occupied it. 1024 slots
/// keeps the steady-state footprint bounded while catching the repeated
/// literals and column values that dominate real workloads.
pub const VALUE_CACHE_SIZE: usize = 1024;

/// Number of independent lock shards for the value cache.
/// More shards = less contention, slightly more memory per cache.
pub const VALUE_CACHE_SHARD_COUNT: usize = 16;

/// Maximum payload size (in bytes) eligible for the shared value cache.
/// Larger values are constructed uncached and stay uniquely owned by their
/// creator, so one oversized string cannot evict a thousand small ones.
pub const MAX_CACHED_ELEMENT_BYTES: usize = 4096;

const _: () = assert!(
    VALUE_CACHE_SHARD_COUNT.is_power_of_two(),
    "VALUE_CACHE_SHARD_COUNT must be a power of two (shard index consumes low hash bits)"
);

const _: () = assert!(
    VALUE_CACHE_SIZE % VALUE_CACHE_SHARD_COUNT == 0,
    "VALUE_CACHE_SHARD_COUNT must divide VALUE_CACHE_SIZE evenly"
);

const _: () = assert!(
    MAX_CACHED_ELEMENT_BYTES > 0,
    "MAX_CACHED_ELEMENT_BYTES of zero would silently disable the value cache"
);

// ============================================================================
// TEXT INTERN TABLE CONFIGURATION
// ============================================================================

/// Maximum number of distinct interned payloads held across the table.
/// The intern table deduplicates raw character data independent of value
/// identity; its bound is enforced per-shard with a flush-on-full policy.
pub const TEXT_INTERN_SIZE: usize = 2048;

/// Number of independent lock shards for the text intern table.
pub const TEXT_INTERN_SHARD_COUNT: usize = 16;

const _: () = assert!(
    TEXT_INTERN_SHARD_COUNT.is_power_of_two(),
    "TEXT_INTERN_SHARD_COUNT must be a power of two"
);

const _: () = assert!(
    TEXT_INTERN_SIZE % TEXT_INTERN_SHARD_COUNT == 0,
    "TEXT_INTERN_SHARD_COUNT must divide TEXT_INTERN_SIZE evenly"
);

// ============================================================================
// MEMORY ACCOUNTING MODEL
// ============================================================================

/// Fixed per-value-object overhead charged by `memory_size`, in bytes.
/// Covers the value struct, the shared-pointer block, and allocator slop.
/// This is a model, not a measurement: callers doing memory-budgeted
/// eviction need a deterministic function of content size, and slightly
/// over-counting is safer than under-counting.
pub const VALUE_OBJECT_OVERHEAD: usize = 48;

/// Bytes charged per character of text content by `memory_size`.
/// Models a wide (two-byte) character encoding regardless of how the
/// payload is actually stored.
pub const BYTES_PER_CHAR: usize = 2;
