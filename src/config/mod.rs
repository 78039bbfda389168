//! # Value Layer Configuration
//!
//! Compile-time constants live in [`constants`]; [`ValueConfig`] carries the
//! runtime-adjustable copies so embedders and tests can shrink or grow the
//! shared tables without touching the defaults everyone else relies on.
//!
//! ## Why Centralization?
//!
//! The cache and intern-table sizes are interdependent (shard counts must
//! divide table sizes). Co-locating them with compile-time checks prevents
//! the mismatch bugs that scattered constants invite.

pub mod constants;
pub use constants::*;

/// Runtime configuration for the value layer's shared tables.
///
/// Defaults come from [`constants`]. All sizes are validated when the owning
/// [`ValueContext`](crate::ValueContext) is constructed, not here, so a
/// config can be built up incrementally.
#[derive(Debug, Clone)]
pub struct ValueConfig {
    /// Total canonical-value slots in the value cache.
    pub value_cache_size: usize,
    /// Lock shards for the value cache. Power of two, divides the size.
    pub value_cache_shards: usize,
    /// Payloads larger than this many bytes bypass the value cache.
    pub max_cached_element_bytes: usize,
    /// Total entries in the text intern table.
    pub text_intern_size: usize,
    /// Lock shards for the text intern table. Power of two, divides the size.
    pub text_intern_shards: usize,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            value_cache_size: VALUE_CACHE_SIZE,
            value_cache_shards: VALUE_CACHE_SHARD_COUNT,
            max_cached_element_bytes: MAX_CACHED_ELEMENT_BYTES,
            text_intern_size: TEXT_INTERN_SIZE,
            text_intern_shards: TEXT_INTERN_SHARD_COUNT,
        }
    }
}

impl ValueConfig {
    /// Overrides the value-cache slot count.
    pub fn value_cache_size(mut self, slots: usize) -> Self {
        self.value_cache_size = slots;
        self
    }

    /// Overrides the cache-eligibility threshold in bytes.
    pub fn max_cached_element_bytes(mut self, bytes: usize) -> Self {
        self.max_cached_element_bytes = bytes;
        self
    }

    /// Overrides the intern-table entry count.
    pub fn text_intern_size(mut self, entries: usize) -> Self {
        self.text_intern_size = entries;
        self
    }
}
