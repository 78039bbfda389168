//! # Pluggable Text Comparison
//!
//! `CompareMode` is the collation seam: value kinds delegate ordering to it
//! so that collation rules stay decoupled from the value types themselves.
//! Sort and index code holds one mode for the lifetime of an ordering
//! operation, keeping the order total and self-consistent.
//!
//! The default mode orders by Unicode scalar value, with an allocation-free
//! case-folding path for the case-insensitive flavors. Locale-aware
//! collation would plug in here without touching any value type.

use std::cmp::Ordering;

/// Comparison mode shared by all text orderings in one engine instance.
#[derive(Debug, Clone, Default)]
pub struct CompareMode {
    _private: (),
}

impl CompareMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares two strings, optionally folding case.
    ///
    /// The case-insensitive path folds per character without allocating.
    /// When the folded forms tie, the exact forms break the tie so that the
    /// order stays total and deterministic ("a" and "A" compare adjacent,
    /// not equal-and-unordered).
    pub fn compare_text(&self, a: &str, b: &str, case_insensitive: bool) -> Ordering {
        if !case_insensitive {
            return a.cmp(b);
        }
        let folded = a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase));
        match folded {
            Ordering::Equal => a.cmp(b),
            other => other,
        }
    }
}
