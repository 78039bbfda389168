//! # Canonical Value Cache
//!
//! Process-wide interning table mapping a value's content to a single shared
//! canonical instance. Equal immutable values constructed independently all
//! over the engine collapse to one allocation, which is where the memory
//! savings of the value layer come from.
//!
//! ## Direct-Mapped Slots with Lock Sharding
//!
//! The table is direct-mapped: a value's hash selects exactly one slot, and
//! a colliding insert of *different* content replaces whatever occupied the
//! slot. That replacement is the whole eviction policy: bounded memory with
//! zero bookkeeping, no recency lists to maintain under contention.
//!
//! A single lock over the table would serialize every value construction in
//! the engine, so slots are split across independent shards, each behind its
//! own `parking_lot::RwLock`:
//!
//! ```text
//! ValueCache
//! ├── Shard 0:  RwLock<[Option<V>; slots/shards]>
//! ├── Shard 1:  RwLock<[Option<V>; slots/shards]>
//! ├── ...
//! └── Shard 15: RwLock<[Option<V>; slots/shards]>
//! ```
//!
//! The low hash bits pick the shard, the remaining bits pick the slot.
//!
//! ## Correctness Model
//!
//! At most one canonical instance per distinct content exists among live
//! entries at any time ("at most", not "exactly": replacement may drop an
//! entry, and a later miss recreates a canonical instance for the same
//! content). A miss or an eviction only ever costs a reallocation, never
//! correctness, because equality is always re-derivable from content.
//!
//! Two threads racing [`ValueCache::intern_or_register`] on equal content
//! may both construct a candidate; exactly one wins publication under the
//! shard's write lock and the loser's candidate is discarded, never left
//! half-published.
//!
//! ## No Failure Modes
//!
//! Cache operations never fail. Construction validates the geometry once.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use eyre::{ensure, Result};
use parking_lot::RwLock;

/// Counters reported by [`ValueCache::stats`]. Relaxed-atomic, advisory:
/// exact under single-threaded use, approximate under contention.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Probes that returned an already-canonical instance.
    pub hits: u64,
    /// Probes that published the candidate into an empty slot.
    pub misses: u64,
    /// Publishes that displaced different content from the slot.
    pub replacements: u64,
}

struct CacheShard<V> {
    slots: Box<[Option<V>]>,
}

impl<V> CacheShard<V> {
    fn new(slot_count: usize) -> Self {
        let mut slots = Vec::with_capacity(slot_count);
        slots.resize_with(slot_count, || None);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }
}

/// Sharded, bounded, direct-mapped canonical-instance cache.
///
/// Generic over the value type: the cache depends only on the `Eq + Hash`
/// contract (equal content, equal hash). Type-specific eligibility rules
/// like size thresholds belong to the caller, not here.
pub struct ValueCache<V> {
    shards: Vec<RwLock<CacheShard<V>>>,
    shard_mask: usize,
    shard_bits: u32,
    slots_per_shard: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    replacements: AtomicU64,
}

impl<V: Clone + Eq + Hash> ValueCache<V> {
    /// Creates a cache with `total_slots` spread over `shard_count` shards.
    pub fn new(total_slots: usize, shard_count: usize) -> Result<Self> {
        ensure!(
            shard_count > 0 && shard_count.is_power_of_two(),
            "cache shard count {} must be a nonzero power of two",
            shard_count
        );
        ensure!(
            total_slots >= shard_count && total_slots % shard_count == 0,
            "cache size {} must be a multiple of the shard count {}",
            total_slots,
            shard_count
        );

        let slots_per_shard = total_slots / shard_count;
        let shards = (0..shard_count)
            .map(|_| RwLock::new(CacheShard::new(slots_per_shard)))
            .collect();

        Ok(Self {
            shards,
            shard_mask: shard_count - 1,
            shard_bits: shard_count.trailing_zeros(),
            slots_per_shard,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            replacements: AtomicU64::new(0),
        })
    }

    fn locate(&self, value: &V) -> (usize, usize) {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let hash = hasher.finish() as usize;
        let shard = hash & self.shard_mask;
        let slot = (hash >> self.shard_bits) % self.slots_per_shard;
        (shard, slot)
    }

    /// Returns the canonical instance for the candidate's content.
    ///
    /// An equal-content entry wins and the candidate is discarded; otherwise
    /// the candidate is published as canonical and returned. Never fails.
    pub fn intern_or_register(&self, candidate: V) -> V {
        let (shard_idx, slot) = self.locate(&candidate);

        {
            let shard = self.shards[shard_idx].read();
            if let Some(existing) = &shard.slots[slot] {
                if *existing == candidate {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return existing.clone();
                }
            }
        }

        let mut shard = self.shards[shard_idx].write();
        // re-check under the write lock: a racer may have published first
        if let Some(existing) = &shard.slots[slot] {
            if *existing == candidate {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return existing.clone();
            }
            self.replacements.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        shard.slots[slot] = Some(candidate.clone());
        candidate
    }

    /// True when an equal-content entry is currently cached.
    pub fn contains(&self, value: &V) -> bool {
        let (shard_idx, slot) = self.locate(value);
        let shard = self.shards[shard_idx].read();
        matches!(&shard.slots[slot], Some(existing) if existing == value)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.read().slots.iter().filter(|slot| slot.is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots_per_shard * self.shards.len()
    }

    /// Drops every cached entry. Outstanding holders keep their instances;
    /// subsequent probes re-register.
    pub fn clear(&self) {
        for shard in &self.shards {
            let mut guard = shard.write();
            for slot in guard.slots.iter_mut() {
                *slot = None;
            }
        }
    }

    /// Snapshot of the hit/miss/replacement counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            replacements: self.replacements.load(Ordering::Relaxed),
        }
    }
}
