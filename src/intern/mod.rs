//! # Raw Text Interning
//!
//! Deduplicates identical character payloads independent of value-object
//! identity: ten `StrValue`s of different flavors built from the same column
//! data can all point at one `Arc<str>` allocation even when the value cache
//! holds only one of them.
//!
//! Structure mirrors the value cache: lock shards selected by the low hash
//! bits, each shard behind a `parking_lot::RwLock`. The shard store is a
//! `hashbrown` set bounded by a flush-on-full policy: when a shard reaches
//! its entry budget it is emptied and refills with the current workload's
//! payloads. Flushing never invalidates anything: outstanding `Arc<str>`
//! handles keep their allocations alive, and a flushed payload simply
//! re-interns on next use.
//!
//! Interning never fails; construction validates the geometry once.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use eyre::{ensure, Result};
use hashbrown::HashSet;
use parking_lot::RwLock;

struct InternShard {
    entries: HashSet<Arc<str>>,
    capacity: usize,
}

impl InternShard {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashSet::with_capacity(capacity),
            capacity,
        }
    }
}

/// Sharded, bounded intern table for raw text payloads.
pub struct TextInterner {
    shards: Vec<RwLock<InternShard>>,
    shard_mask: usize,
}

impl TextInterner {
    /// Creates an intern table with `total_entries` spread over
    /// `shard_count` shards.
    pub fn new(total_entries: usize, shard_count: usize) -> Result<Self> {
        ensure!(
            shard_count > 0 && shard_count.is_power_of_two(),
            "intern shard count {} must be a nonzero power of two",
            shard_count
        );
        ensure!(
            total_entries >= shard_count && total_entries % shard_count == 0,
            "intern table size {} must be a multiple of the shard count {}",
            total_entries,
            shard_count
        );

        let per_shard = total_entries / shard_count;
        let shards = (0..shard_count)
            .map(|_| RwLock::new(InternShard::new(per_shard)))
            .collect();

        Ok(Self {
            shards,
            shard_mask: shard_count - 1,
        })
    }

    fn shard_for(&self, s: &str) -> &RwLock<InternShard> {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        &self.shards[hasher.finish() as usize & self.shard_mask]
    }

    /// Returns a shared handle to a payload equal to `s`.
    ///
    /// A hit bumps a refcount; a miss allocates one `Arc<str>` and publishes
    /// it. Two threads racing on equal payloads may both allocate, but only
    /// one allocation is published and handed to later callers.
    pub fn intern(&self, s: &str) -> Arc<str> {
        let shard = self.shard_for(s);

        {
            let guard = shard.read();
            if let Some(existing) = guard.entries.get(s) {
                return existing.clone();
            }
        }

        let mut guard = shard.write();
        if let Some(existing) = guard.entries.get(s) {
            return existing.clone();
        }
        if guard.entries.len() >= guard.capacity {
            guard.entries.clear();
        }
        let payload: Arc<str> = Arc::from(s);
        guard.entries.insert(payload.clone());
        payload
    }

    /// Number of payloads currently held.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
